//! The seven layers of the OSI reference model.

use std::fmt::{self, Display};
use thiserror::Error as ThisError;

/// An OSI layer. The discriminant is the layer number, counted from the wire
/// up, so a message is encoded from [`Layer::Application`] (7) down to
/// [`Layer::Physical`] (1) and decoded in the opposite order.
///
/// ```text
///   sender                          receiver
///   7 Application    ──┐      ┌──▶  7 Application
///   6 Presentation     │      │     6 Presentation
///   5 Session          │      │     5 Session
///   4 Transport        │      │     4 Transport
///   3 Network          │      │     3 Network
///   2 Data Link        │      │     2 Data Link
///   1 Physical       ◀─┘ ───▶ └──   1 Physical
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Bit-string signalling of the whole frame.
    Physical = 1,
    /// Link-layer addressing.
    DataLink = 2,
    /// Network-layer addressing.
    Network = 3,
    /// Segmentation into fixed-size pieces.
    Transport = 4,
    /// Session tagging.
    Session = 5,
    /// Reversible text encoding and translation to bits.
    Presentation = 6,
    /// The raw message.
    Application = 7,
}

impl Layer {
    /// Every layer in encoding order, from the top of the stack down.
    pub const ALL: [Layer; 7] = [
        Layer::Application,
        Layer::Presentation,
        Layer::Session,
        Layer::Transport,
        Layer::Network,
        Layer::DataLink,
        Layer::Physical,
    ];

    /// The layer number, 1 through 7.
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layer::Physical => "Physical",
            Layer::DataLink => "Data Link",
            Layer::Network => "Network",
            Layer::Transport => "Transport",
            Layer::Session => "Session",
            Layer::Presentation => "Presentation",
            Layer::Application => "Application",
        }
    }

    /// The next layer toward the wire, if any.
    pub fn below(self) -> Option<Layer> {
        Layer::try_from(self.number() - 1).ok()
    }

    /// The next layer away from the wire, if any.
    pub fn above(self) -> Option<Layer> {
        Layer::try_from(self.number() + 1).ok()
    }
}

impl Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {} ({})", self.number(), self.name())
    }
}

/// Returned when a number does not name one of the seven layers.
#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
#[error("There is no OSI layer {0}")]
pub struct InvalidLayer(pub u8);

impl TryFrom<u8> for Layer {
    type Error = InvalidLayer;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Ok(match n {
            1 => Layer::Physical,
            2 => Layer::DataLink,
            3 => Layer::Network,
            4 => Layer::Transport,
            5 => Layer::Session,
            6 => Layer::Presentation,
            7 => Layer::Application,
            other => Err(InvalidLayer(other))?,
        })
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> Self {
        layer.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for layer in Layer::ALL {
            assert_eq!(Layer::try_from(layer.number()), Ok(layer));
        }
        assert_eq!(Layer::try_from(0), Err(InvalidLayer(0)));
        assert_eq!(Layer::try_from(8), Err(InvalidLayer(8)));
    }

    #[test]
    fn neighbours() {
        assert_eq!(Layer::Application.below(), Some(Layer::Presentation));
        assert_eq!(Layer::Physical.below(), None);
        assert_eq!(Layer::Physical.above(), Some(Layer::DataLink));
        assert_eq!(Layer::Application.above(), None);
    }

    #[test]
    fn all_is_descending() {
        assert!(Layer::ALL.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn display() {
        assert_eq!(Layer::DataLink.to_string(), "layer 2 (Data Link)");
    }
}
