//! Simulated devices and the sender/receiver pair chosen for a run.

use crate::address::{Ipv4Address, MacAddress};
use std::fmt::{self, Display};

/// A simulated network endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Device {
    /// The address inside the device's local network
    pub private_ip: Ipv4Address,
    /// The address the rest of the internet sees
    pub public_ip: Ipv4Address,
    /// The link-layer address of the device's interface
    pub mac: MacAddress,
    /// Bandwidth capacity in Mbps
    pub bandwidth: u32,
    /// Whether the device is attached to a network
    pub connected: bool,
}

impl Device {
    pub const fn new(
        private_ip: Ipv4Address,
        public_ip: Ipv4Address,
        mac: MacAddress,
        bandwidth: u32,
        connected: bool,
    ) -> Self {
        Self {
            private_ip,
            public_ip,
            mac,
            bandwidth,
            connected,
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (public {}, mac {}, {} Mbps, {})",
            self.private_ip,
            self.public_ip,
            self.mac,
            self.bandwidth,
            if self.connected {
                "connected"
            } else {
                "disconnected"
            }
        )
    }
}

/// The two endpoints of one simulation run. Fixed from submit until the
/// next submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub sender: Device,
    pub receiver: Device,
}

impl Route {
    pub const fn new(sender: Device, receiver: Device) -> Self {
        Self { sender, receiver }
    }

    /// Whether both endpoints are attached to a network.
    pub fn is_connected(&self) -> bool {
        self.sender.connected && self.receiver.connected
    }
}
