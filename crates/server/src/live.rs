// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification streaming for calendar UIs.
//!
//! This module forwards the notifications of the write coordinators over
//! WebSocket connections. Notifications are facts about background work,
//! most importantly remote writes that failed and were rolled back.
//!
//! # Architecture
//!
//! - Each client only receives notifications of its own tenant
//! - Notifications are informational only and never authoritative
//! - No commands are executed over WebSocket connections
//! - Clients re-read the calendar over HTTP after a failure notification

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use absence_board_api::{AuthenticatedActor, Notification};

use crate::AppState;
use crate::identity::Identity;

/// Returns whether a notification may be delivered to a client of `tenant`.
fn is_visible_to(notification: &Notification, tenant: &str) -> bool {
    notification
        .tenant_id()
        .is_none_or(|owner: &str| owner == tenant)
}

fn connected_notification() -> Notification {
    Notification::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    }
}

/// Handles WebSocket upgrade requests for the notification stream.
///
/// The subscription is taken before the upgrade completes, so nothing
/// published after the handshake is missed.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `actor` - The authenticated actor; selects the tenant to stream
/// * `app_state` - Application state holding the board registry
pub async fn live_notifications_handler(
    ws: WebSocketUpgrade,
    Identity(actor): Identity,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    let rx: broadcast::Receiver<Notification> = app_state.registry.notifications();
    ws.on_upgrade(move |socket| handle_socket(socket, actor, rx))
}

/// Sends a connection confirmation, then streams the tenant's notifications
/// until the client disconnects or an error occurs.
async fn handle_socket(
    socket: WebSocket,
    actor: AuthenticatedActor,
    mut rx: broadcast::Receiver<Notification>,
) {
    let tenant: String = actor.tenant_id.value().to_string();
    info!(tenant = %tenant, user_id = %actor.user_id, "Client connected to notification stream");

    let (mut sender, mut receiver) = socket.split();

    if let Ok(json) = serde_json::to_string(&connected_notification())
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let stream_tenant: String = tenant.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let notification: Notification = match rx.recv().await {
                Ok(notification) => notification,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification stream lagged, dropping oldest");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if !is_visible_to(&notification, &stream_tenant) {
                continue;
            }

            match serde_json::to_string(&notification) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize notification");
                }
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!(tenant = %tenant, "Client disconnected from notification stream");
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn failure_for(tenant: &str) -> Notification {
        Notification::RemoteWriteFailed {
            tenant_id: tenant.to_string(),
            person_id: String::from("p-alice"),
            year: 2025,
            month: 2,
            day: 12,
            attempted: None,
            restored: None,
            rolled_back: true,
            message: String::from("boom"),
        }
    }

    #[test]
    fn test_failures_are_scoped_to_their_tenant() {
        assert!(is_visible_to(&failure_for("acme"), "acme"));
        assert!(!is_visible_to(&failure_for("globex"), "acme"));
    }

    #[test]
    fn test_connected_is_visible_to_everyone() {
        assert!(is_visible_to(&connected_notification(), "acme"));
    }

    #[test]
    fn test_connected_serializes_with_type_tag() {
        let json: String = serde_json::to_string(&connected_notification()).unwrap();
        assert!(json.contains(r#""type":"connected""#));
    }
}
