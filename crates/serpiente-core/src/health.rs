//! Per-channel link health tracking.
//!
//! The two notification channels are independent streams with no
//! ordering relationship between them, so each carries its own health
//! state and last-delivery stamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serpiente_types::{ChannelHealth, ChannelKind};

/// Health and last-delivery stamp of a single notification channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkState {
    /// Current health of the channel.
    pub health: ChannelHealth,
    /// When the most recent notification arrived, if any.
    pub last_delivery: Option<DateTime<Utc>>,
}

/// Link state for both subscription channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLinks {
    /// Link state of the machine-status channel.
    pub machine_status: LinkState,
    /// Link state of the actions channel.
    pub actions: LinkState,
}

impl ChannelLinks {
    /// Link state for the given channel.
    pub const fn get(&self, channel: ChannelKind) -> &LinkState {
        match channel {
            ChannelKind::MachineStatus => &self.machine_status,
            ChannelKind::Actions => &self.actions,
        }
    }

    /// Mutable link state for the given channel.
    pub const fn get_mut(&mut self, channel: ChannelKind) -> &mut LinkState {
        match channel {
            ChannelKind::MachineStatus => &mut self.machine_status,
            ChannelKind::Actions => &mut self.actions,
        }
    }

    /// Record a successful delivery on a channel.
    ///
    /// The channel becomes [`ChannelHealth::Live`] and its delivery
    /// stamp is updated. Returns `true` if the health value changed.
    pub fn mark_delivery(&mut self, channel: ChannelKind, at: DateTime<Utc>) -> bool {
        let link = self.get_mut(channel);
        let changed = link.health != ChannelHealth::Live;
        link.health = ChannelHealth::Live;
        link.last_delivery = Some(at);
        changed
    }

    /// Record that a channel's subscription terminated.
    ///
    /// Returns `true` if the health value changed.
    pub fn mark_disconnected(&mut self, channel: ChannelKind) -> bool {
        let link = self.get_mut(channel);
        let changed = link.health != ChannelHealth::Disconnected;
        link.health = ChannelHealth::Disconnected;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_start_connecting() {
        let links = ChannelLinks::default();
        assert_eq!(links.machine_status.health, ChannelHealth::Connecting);
        assert_eq!(links.actions.health, ChannelHealth::Connecting);
        assert!(links.machine_status.last_delivery.is_none());
    }

    #[test]
    fn delivery_marks_channel_live() {
        let mut links = ChannelLinks::default();
        let now = Utc::now();

        assert!(links.mark_delivery(ChannelKind::Actions, now));
        assert_eq!(links.actions.health, ChannelHealth::Live);
        assert_eq!(links.actions.last_delivery, Some(now));

        // The other channel is untouched.
        assert_eq!(links.machine_status.health, ChannelHealth::Connecting);

        // A second delivery updates the stamp but reports no change.
        assert!(!links.mark_delivery(ChannelKind::Actions, now));
    }

    #[test]
    fn disconnect_is_reported_once() {
        let mut links = ChannelLinks::default();
        assert!(links.mark_disconnected(ChannelKind::MachineStatus));
        assert!(!links.mark_disconnected(ChannelKind::MachineStatus));
        assert_eq!(
            links.get(ChannelKind::MachineStatus).health,
            ChannelHealth::Disconnected
        );
    }
}
