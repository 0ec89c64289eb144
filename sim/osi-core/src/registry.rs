//! The catalog of selectable devices and the current role assignments.

use crate::{
    address::{Ipv4Address, MacAddress},
    device::{Device, Route},
};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

/// The part a device plays in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Sender,
    Receiver,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Sender => "sender",
            Role::Receiver => "receiver",
        })
    }
}

#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Cannot make device {index} the {role}: the catalog has {len} devices")]
    OutOfBounds { role: Role, index: usize, len: usize },
    #[error("The device catalog is empty")]
    EmptyCatalog,
}

/// The devices used by the lab exercises.
const LAB_DEVICES: [Device; 4] = [
    Device::new(
        Ipv4Address::new([192, 168, 1, 1]),
        Ipv4Address::new([192, 23, 12, 12]),
        MacAddress::new([0x24, 0x88, 0x90, 0x00, 0xff, 0xab]),
        80,
        true,
    ),
    Device::new(
        Ipv4Address::new([192, 168, 1, 2]),
        Ipv4Address::new([192, 36, 14, 12]),
        MacAddress::new([0xaa, 0xcd, 0xef, 0x00, 0xaa, 0x54]),
        50,
        true,
    ),
    Device::new(
        Ipv4Address::new([192, 168, 1, 3]),
        Ipv4Address::new([192, 23, 12, 12]),
        MacAddress::new([0x25, 0x48, 0xb0, 0x00, 0xff, 0xab]),
        80,
        true,
    ),
    Device::new(
        Ipv4Address::new([192, 168, 1, 4]),
        Ipv4Address::new([192, 24, 16, 11]),
        MacAddress::new([0x32, 0xa8, 0x9f, 0x00, 0xff, 0x56]),
        50,
        false,
    ),
];

/// A fixed catalog of devices plus which of them currently send and
/// receive.
///
/// Selection only checks bounds. The same device may hold both roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    catalog: Vec<Device>,
    sender: usize,
    receiver: usize,
}

impl Registry {
    /// Creates a registry over `catalog`. The first device sends and the
    /// second, or the first again if it is alone, receives.
    pub fn new(catalog: Vec<Device>) -> Result<Self, RegistryError> {
        if catalog.is_empty() {
            Err(RegistryError::EmptyCatalog)?
        }
        let receiver = usize::from(catalog.len() > 1);
        Ok(Self {
            catalog,
            sender: 0,
            receiver,
        })
    }

    pub fn catalog(&self) -> &[Device] {
        &self.catalog
    }

    pub fn select_sender(&mut self, index: usize) -> Result<(), RegistryError> {
        self.select(Role::Sender, index)
    }

    pub fn select_receiver(&mut self, index: usize) -> Result<(), RegistryError> {
        self.select(Role::Receiver, index)
    }

    /// Assigns the device at `index` to `role`, replacing the previous
    /// assignment.
    pub fn select(&mut self, role: Role, index: usize) -> Result<(), RegistryError> {
        if index >= self.catalog.len() {
            Err(RegistryError::OutOfBounds {
                role,
                index,
                len: self.catalog.len(),
            })?
        }
        match role {
            Role::Sender => self.sender = index,
            Role::Receiver => self.receiver = index,
        }
        Ok(())
    }

    pub fn sender(&self) -> &Device {
        &self.catalog[self.sender]
    }

    pub fn receiver(&self) -> &Device {
        &self.catalog[self.receiver]
    }

    /// The index currently assigned to `role`.
    pub fn selected(&self, role: Role) -> usize {
        match role {
            Role::Sender => self.sender,
            Role::Receiver => self.receiver,
        }
    }

    /// The sender and receiver as they stand right now.
    pub fn route(&self) -> Route {
        Route::new(*self.sender(), *self.receiver())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            catalog: LAB_DEVICES.to_vec(),
            sender: 0,
            receiver: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles() {
        let registry = Registry::default();
        assert_eq!(registry.catalog().len(), 4);
        assert_eq!(registry.sender().private_ip.to_string(), "192.168.1.1");
        assert_eq!(registry.receiver().private_ip.to_string(), "192.168.1.2");
    }

    #[test]
    fn same_device_for_both_roles() {
        let mut registry = Registry::default();
        registry.select_sender(2).unwrap();
        registry.select_receiver(2).unwrap();
        let route = registry.route();
        assert_eq!(route.sender, route.receiver);
    }

    #[test]
    fn out_of_bounds_keeps_assignment() {
        let mut registry = Registry::default();
        assert_eq!(
            registry.select_receiver(4),
            Err(RegistryError::OutOfBounds {
                role: Role::Receiver,
                index: 4,
                len: 4
            })
        );
        assert_eq!(registry.selected(Role::Receiver), 1);
    }

    #[test]
    fn single_device_catalog() {
        let registry = Registry::new(vec![LAB_DEVICES[3]]).unwrap();
        assert_eq!(registry.sender(), registry.receiver());
        assert!(!registry.route().is_connected());
        assert_eq!(Registry::new(Vec::new()), Err(RegistryError::EmptyCatalog));
    }
}
