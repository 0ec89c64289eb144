//! Logging holds wrapper functions for logging pipeline events.
//! Each function corresponds to one kind of event (a stage running, the
//! transmission starting). Subscribers are installed by the front end.

use crate::{device::Route, layer::Layer, pipeline::Direction};
use tracing::{event, Level};

/// Stage event handler.
/// Used to log every stage that runs. Captures the following data:
/// direction, layer number, layer name, output
pub(crate) fn stage_event(direction: Direction, layer: Layer, output: &str) {
    event!(
        target: "STAGE",
        Level::INFO,
        direction = %direction,
        layer = layer.number(),
        name = layer.name(),
        output = output
    );
}

/// Transmission event handler.
/// Captures the following data: sender and receiver public and link
/// addresses
pub(crate) fn transmission_event(route: &Route) {
    event!(
        target: "TRANSMISSION",
        Level::INFO,
        sender_ip = %route.sender.public_ip,
        receiver_ip = %route.receiver.public_ip,
        sender_mac = %route.sender.mac,
        receiver_mac = %route.receiver.mac
    );
}
