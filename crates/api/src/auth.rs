// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identity is established upstream; this layer only turns the supplied
//! user id, role and tenant into an [`AuthenticatedActor`] and checks what
//! that actor may do.

use absence_board_domain::{Person, TenantId};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: manages persons, organization-wide days and year settings.
    ///
    /// Admins may also edit the days of any person.
    Admin,
    /// Member role: edits the days of the person linked to their account.
    Member,
}

impl Role {
    /// Returns the wire representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role and tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The login account of this actor.
    pub user_id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The tenant every request of this actor is scoped to.
    pub tenant_id: TenantId,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The login account of this actor
    /// * `role` - The role assigned to this actor
    /// * `tenant_id` - The tenant of this actor
    #[must_use]
    pub const fn new(user_id: String, role: Role, tenant_id: TenantId) -> Self {
        Self {
            user_id,
            role,
            tenant_id,
        }
    }

    /// Returns whether this actor is linked to the given person.
    #[must_use]
    pub fn is_linked_to(&self, person: &Person) -> bool {
        person.user_id.as_deref() == Some(self.user_id.as_str())
    }
}

/// Builds an actor from the identity supplied by the authentication collaborator.
///
/// Nothing is mutated before this succeeds: a missing identity or tenant is
/// rejected here.
///
/// # Arguments
///
/// * `user_id` - The authenticated user id, if any
/// * `role` - The role string (`admin` or `member`), if any
/// * `tenant` - The tenant id, if any
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if any part of the identity is
/// missing or malformed.
pub fn authenticate(
    user_id: Option<&str>,
    role: Option<&str>,
    tenant: Option<&str>,
) -> Result<AuthenticatedActor, AuthError> {
    let user_id: &str = user_id
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Missing user identity"),
        })?;

    let tenant: &str = tenant.ok_or_else(|| AuthError::AuthenticationFailed {
        reason: String::from("Missing tenant"),
    })?;
    let tenant_id: TenantId =
        TenantId::new(tenant).map_err(|err| AuthError::AuthenticationFailed {
            reason: err.to_string(),
        })?;

    let role: Role = role
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Missing role"),
        })?
        .parse()?;

    Ok(AuthenticatedActor::new(user_id.to_string(), role, tenant_id))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may edit the days of a person.
    ///
    /// Admins may edit everyone; members only the person linked to their account.
    ///
    /// # Errors
    ///
    /// Returns an error if a member targets a person that is not theirs.
    pub fn authorize_edit_person_days(
        actor: &AuthenticatedActor,
        person: &Person,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Member if actor.is_linked_to(person) => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: format!("edit_person_days:{}", person.id),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may create, update or remove persons.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_persons(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_persons")
    }

    /// Checks if an actor may set or delete organization-wide days.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_set_global_day(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_global_day")
    }

    /// Checks if an actor may import public holidays.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_import_holidays(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "import_holidays")
    }

    /// Checks if an actor may change the settings of a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_configure_year(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "configure_year")
    }

    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Member => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }
}
