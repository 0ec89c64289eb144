//! Typed network and link-layer addresses carried by simulated devices.

mod ipv4_address;
pub use ipv4_address::Ipv4Address;

mod mac_address;
pub use mac_address::MacAddress;

use thiserror::Error as ThisError;

/// Errors from parsing an address out of its textual form.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Expected {expected} address parts, found {actual}")]
    PartCount { expected: usize, actual: usize },
    #[error("Address part '{0}' is not a valid number")]
    InvalidPart(String),
}
