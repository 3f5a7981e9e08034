// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity extraction at the server boundary.
//!
//! The upstream authentication proxy forwards the verified identity as
//! request headers. This module turns them into an [`AuthenticatedActor`]
//! before any handler runs, so a request without a complete identity never
//! reaches the board.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use absence_board_api::{ApiError, AuthenticatedActor, authenticate};

use crate::{AppState, HttpError};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the role (`admin` or `member`).
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Header carrying the tenant id.
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Extractor for the authenticated actor of a request.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     Identity(actor): Identity,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if any identity header is missing, not valid
/// ASCII, or malformed.
pub struct Identity(pub AuthenticatedActor);

impl FromRequestParts<AppState> for Identity {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Option<&str> {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };

        let actor: AuthenticatedActor = authenticate(
            header(USER_ID_HEADER),
            header(USER_ROLE_HEADER),
            header(TENANT_ID_HEADER),
        )
        .map_err(|err| {
            warn!(error = %err, path = %parts.uri.path(), "Rejected request without valid identity");
            HttpError::from(ApiError::from(err))
        })?;

        debug!(
            user_id = %actor.user_id,
            role = actor.role.as_str(),
            tenant = %actor.tenant_id.value(),
            "Identity extracted"
        );

        Ok(Self(actor))
    }
}
