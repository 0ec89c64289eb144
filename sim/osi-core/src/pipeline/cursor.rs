use crate::layer::Layer;
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

/// Which way a message is travelling through the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sender side, layer 7 down to layer 1.
    Encode,
    /// Receiver side, layer 1 up to layer 6.
    Decode,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        })
    }
}

/// A stage was asked to run when the cursor does not admit it. Nothing is
/// changed when this is returned.
#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("No message has been submitted")]
    NotSubmitted,
    #[error("Cannot {requested} while the pipeline is set to {actual}")]
    WrongDirection {
        requested: Direction,
        actual: Direction,
    },
    #[error("Cannot {direction} {requested} while the cursor is at layer {position}")]
    OutOfOrder {
        direction: Direction,
        requested: Layer,
        position: u8,
    },
    #[error("Every {direction} stage has already run")]
    Exhausted { direction: Direction },
    #[error("{0} has no decode stage")]
    NoDecodeStage(Layer),
    #[error("Transmission needs a finished encode run, but the cursor is at layer {position}")]
    EncodeIncomplete { position: u8 },
    #[error("The transmission has already been simulated")]
    AlreadyTransmitted,
    #[error("{0} has no output to read")]
    EmptySlot(Layer),
}

/// The position of the next stage allowed to run, plus the direction of
/// travel.
///
/// While encoding the position falls from 7 to 0, where 0 means layer 1 has
/// run. While decoding it rises from 1 to 7, where 7 means the application
/// slot has been re-derived. Decoding has no layer 7 stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    position: u8,
    direction: Direction,
}

impl Cursor {
    /// Where every run starts: layer 7, encoding.
    pub const fn start() -> Self {
        Self {
            position: Layer::Application.number(),
            direction: Direction::Encode,
        }
    }

    /// Where decoding starts: layer 1.
    pub(crate) const fn transmitted() -> Self {
        Self {
            position: Layer::Physical.number(),
            direction: Direction::Decode,
        }
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The layer whose stage runs next, or `None` once the current direction
    /// is finished.
    pub fn layer(&self) -> Option<Layer> {
        if self.is_finished() {
            return None;
        }
        Layer::try_from(self.position).ok()
    }

    pub fn is_finished(&self) -> bool {
        match self.direction {
            Direction::Encode => self.position < Layer::Physical.number(),
            Direction::Decode => self.position >= Layer::Application.number(),
        }
    }

    /// Checks that the `direction` stage for `layer` may run now.
    pub fn admit(&self, layer: Layer, direction: Direction) -> Result<(), PreconditionError> {
        if direction != self.direction {
            Err(PreconditionError::WrongDirection {
                requested: direction,
                actual: self.direction,
            })?
        }
        if direction == Direction::Decode && layer == Layer::Application {
            Err(PreconditionError::NoDecodeStage(layer))?
        }
        if self.is_finished() {
            Err(PreconditionError::Exhausted { direction })?
        }
        if layer.number() != self.position {
            Err(PreconditionError::OutOfOrder {
                direction,
                requested: layer,
                position: self.position,
            })?
        }
        Ok(())
    }

    /// Moves past the stage that just ran.
    pub(crate) fn advance(&mut self) {
        match self.direction {
            Direction::Encode => self.position = self.position.saturating_sub(1),
            Direction::Decode => self.position = (self.position + 1).min(Layer::Application.number()),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layer() {
            Some(layer) => write!(f, "{} at {layer}", self.direction),
            None => write!(f, "{} finished", self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_walks_down_to_zero() {
        let mut cursor = Cursor::start();
        let mut seen = Vec::new();
        while let Some(layer) = cursor.layer() {
            cursor.admit(layer, Direction::Encode).unwrap();
            seen.push(layer);
            cursor.advance();
        }
        assert_eq!(seen, Layer::ALL);
        assert_eq!(cursor.position(), 0);
        assert_eq!(
            cursor.admit(Layer::Physical, Direction::Encode),
            Err(PreconditionError::Exhausted {
                direction: Direction::Encode
            })
        );
    }

    #[test]
    fn decode_stops_below_application() {
        let mut cursor = Cursor::transmitted();
        let mut seen = Vec::new();
        while let Some(layer) = cursor.layer() {
            seen.push(layer.number());
            cursor.advance();
        }
        assert_eq!(seen, [1, 2, 3, 4, 5, 6]);
        assert!(cursor.is_finished());
        assert_eq!(
            cursor.admit(Layer::Application, Direction::Decode),
            Err(PreconditionError::NoDecodeStage(Layer::Application))
        );
    }

    #[test]
    fn admission() {
        let cursor = Cursor::start();
        assert_eq!(
            cursor.admit(Layer::Transport, Direction::Encode),
            Err(PreconditionError::OutOfOrder {
                direction: Direction::Encode,
                requested: Layer::Transport,
                position: 7
            })
        );
        assert!(matches!(
            cursor.admit(Layer::Application, Direction::Decode),
            Err(PreconditionError::WrongDirection { .. })
        ));
    }
}
