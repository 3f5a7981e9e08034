// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-visible notifications.
//!
//! Notifications are informational facts about background work, most
//! importantly remote writes that failed after the caller already saw the
//! optimistic result. They are never authoritative; clients re-read state
//! over HTTP.

use absence_board_domain::{PersonDayKey, StatusValue, TenantId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum number of notifications buffered per subscriber.
/// Slow subscribers lose the oldest notifications.
const NOTIFICATION_BUFFER_SIZE: usize = 100;

/// A notification published by the write coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A deferred write of a person's day failed.
    RemoteWriteFailed {
        /// The tenant the write belonged to.
        tenant_id: String,
        /// The person whose day was written.
        person_id: String,
        /// The year of the day.
        year: i32,
        /// The zero-based month of the day.
        month: u8,
        /// The day of the month.
        day: u8,
        /// The status the write tried to persist; `None` was a deletion.
        attempted: Option<StatusValue>,
        /// The status the day was rolled back to, if a rollback happened.
        restored: Option<StatusValue>,
        /// Whether the local value was rolled back.
        rolled_back: bool,
        /// A description of the failure.
        message: String,
    },
    /// Connection confirmation, sent by the live stream on connect.
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

impl Notification {
    /// Builds the failure notification for a person-specific write.
    #[must_use]
    pub fn remote_write_failed(
        tenant_id: &TenantId,
        key: &PersonDayKey,
        attempted: Option<StatusValue>,
        restored: Option<StatusValue>,
        rolled_back: bool,
        message: String,
    ) -> Self {
        Self::RemoteWriteFailed {
            tenant_id: tenant_id.value().to_string(),
            person_id: key.person_id.value().to_string(),
            year: key.date.year(),
            month: key.date.month_index(),
            day: key.date.day(),
            attempted,
            restored,
            rolled_back,
            message,
        }
    }

    /// Returns the tenant this notification belongs to, if it is scoped.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Self::RemoteWriteFailed { tenant_id, .. } => Some(tenant_id),
            Self::Connected { .. } => None,
        }
    }
}

/// Broadcaster for notifications.
///
/// A lightweight wrapper around `tokio::sync::broadcast`; cloning shares the
/// same channel.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<Notification>,
}

impl NotificationHub {
    /// Creates a new hub.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(NOTIFICATION_BUFFER_SIZE);
        Self { tx }
    }

    /// Publishes a notification to every subscriber.
    ///
    /// Without subscribers the notification is dropped.
    pub fn publish(&self, notification: &Notification) {
        match self.tx.send(notification.clone()) {
            Ok(count) => {
                debug!(?notification, receivers = count, "Published notification");
            }
            Err(_) => {
                debug!(?notification, "No receivers for notification");
            }
        }
    }

    /// Subscribes to future notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Returns the number of current subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}
