//! The notification envelope passed from feed sources to the ingest task.

use serpiente_types::ChannelKind;
use tokio::sync::mpsc;

/// Buffered capacity of the notification channel.
///
/// The dashboard workload is a handful of rows per second at most; a
/// small buffer absorbs bursts without letting a stalled consumer pile
/// up unbounded memory.
const NOTIFICATION_BUFFER: usize = 64;

/// A row-level change notification delivered by a feed source.
///
/// The payload is the raw new-row image as JSON. Parsing and
/// validation happen in the ingest task, not in the feed, so every
/// source -- real or simulated -- goes through the same boundary.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Which subscription channel delivered this notification.
    pub channel: ChannelKind,
    /// The new row image.
    pub payload: serde_json::Value,
}

impl Notification {
    /// A machine-status update notification.
    pub const fn status(payload: serde_json::Value) -> Self {
        Self {
            channel: ChannelKind::MachineStatus,
            payload,
        }
    }

    /// An action-insertion notification.
    pub const fn action(payload: serde_json::Value) -> Self {
        Self {
            channel: ChannelKind::Actions,
            payload,
        }
    }

    /// Map a backend channel name to a notification, if the name is one
    /// of the two channels this adapter subscribes to.
    pub fn from_channel_name(name: &str, payload: serde_json::Value) -> Option<Self> {
        if name == ChannelKind::MachineStatus.channel_name() {
            Some(Self::status(payload))
        } else if name == ChannelKind::Actions.channel_name() {
            Some(Self::action(payload))
        } else {
            None
        }
    }
}

/// Create the bounded channel connecting feed sources to the ingest task.
pub fn notification_channel() -> (mpsc::Sender<Notification>, mpsc::Receiver<Notification>) {
    mpsc::channel(NOTIFICATION_BUFFER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_channel_names() {
        let payload = serde_json::json!({});
        let status = Notification::from_channel_name("estado_maquina", payload.clone());
        assert!(matches!(
            status,
            Some(Notification {
                channel: ChannelKind::MachineStatus,
                ..
            })
        ));

        let actions = Notification::from_channel_name("acciones_sistema", payload.clone());
        assert!(matches!(
            actions,
            Some(Notification {
                channel: ChannelKind::Actions,
                ..
            })
        ));

        assert!(Notification::from_channel_name("telemetria_cerebro", payload).is_none());
    }
}
