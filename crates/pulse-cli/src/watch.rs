//! The `pulse watch` command: tail the real-time event stream.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use pulse_core::envelope::KNOWN_EVENT_TYPES;
use pulse_notify::NotificationCenter;
use pulse_realtime::{EventClient, RealtimeConfig};
use pulse_settings::ClientSettings;

/// Connect, print every event and every notice, run until Ctrl-C.
pub(crate) async fn run(settings: &ClientSettings) -> Result<()> {
    let center = NotificationCenter::new();
    let client = EventClient::new(
        RealtimeConfig::new(settings.ws_url.clone()),
        Arc::new(center.clone()),
    );

    // One printing subscriber per event type the server emits. Kept alive
    // for the whole watch session.
    let subscriptions: Vec<_> = KNOWN_EVENT_TYPES
        .iter()
        .map(|event_type| {
            client.on(*event_type, move |payload| {
                println!("{event_type:<18} {payload}");
            })
        })
        .collect();

    let mut feed = center.subscribe();
    let mut state = client.state();
    client.connect();
    info!("watching {} (ctrl-c to stop)", settings.ws_url);

    loop {
        tokio::select! {
            notice = feed.recv() => match notice {
                Ok(notice) => println!("[{}] {}", notice.kind, notice.message),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "notice feed lagged");
                }
                Err(RecvError::Closed) => break,
            },
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let connected = state.borrow().connected;
                debug!(connected, "connection state changed");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping");
                client.disconnect();
                break;
            }
        }
    }

    drop(subscriptions);
    Ok(())
}
