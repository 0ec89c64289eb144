//! The layer pipeline: a state machine that walks one message down the
//! stack on the sender side and back up on the receiver side.
//!
//! # Lifecycle
//!
//! 1. [`Pipeline::submit`] starts a run with a message and a [`Route`]. It
//!    clears every slot and runs the application stage.
//! 2. [`Pipeline::advance_encode`] runs layers 6 through 1, one per call.
//! 3. [`Pipeline::begin_transmission`] turns the pipeline around.
//! 4. [`Pipeline::advance_decode`] runs the receive path from layer 1 up,
//!    each stage writing the slot of the layer above it.
//!
//! A stage only runs when the [`Cursor`] points at it. Each stage computes
//! its output before touching any state, so a failed call leaves the slots
//! and the cursor exactly as they were.

mod cursor;
mod outputs;
mod stage;

pub use cursor::{Cursor, Direction, PreconditionError};
pub use outputs::{LayerOutputs, Output, Presentation};

use crate::{
    codec::{self, DecodeError, EncodeError},
    config::PipelineConfig,
    device::Route,
    layer::Layer,
    logging,
    token::{RandomTokens, TokenSource},
};
use stage::{DecodeContext, EncodeContext};
use std::fmt::{self, Debug, Formatter};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{0}")]
    StagePrecondition(#[from] PreconditionError),
    #[error("{0}")]
    DecodeMismatch(#[from] DecodeError),
    #[error("{0}")]
    Encode(#[from] EncodeError),
}

/// Moves a message through the seven layers and keeps what each one
/// produced.
pub struct Pipeline {
    config: PipelineConfig,
    tokens: Box<dyn TokenSource>,
    route: Option<Route>,
    input: String,
    cursor: Cursor,
    outputs: LayerOutputs,
    /// The presentation encoding from the encode run. Decoding reads the
    /// application text back from this.
    captured_encoding: Option<String>,
}

impl Pipeline {
    /// Creates a pipeline with random session tokens, seeded from the
    /// configuration when it carries a seed.
    pub fn new(config: PipelineConfig) -> Self {
        let length = config.token_length().get();
        let tokens = match config.seed() {
            Some(seed) => RandomTokens::seeded(seed, length),
            None => RandomTokens::new(length),
        };
        Self::with_tokens(config, tokens)
    }

    /// Creates a pipeline that takes session tokens from `tokens`.
    pub fn with_tokens(config: PipelineConfig, tokens: impl TokenSource + 'static) -> Self {
        Self {
            config,
            tokens: Box::new(tokens),
            route: None,
            input: String::new(),
            cursor: Cursor::start(),
            outputs: LayerOutputs::default(),
            captured_encoding: None,
        }
    }

    /// Starts a new run. The cursor returns to layer 7, every slot is
    /// cleared, and the application stage runs right away.
    ///
    /// Characters without an 8-bit code are rejected before anything is
    /// reset.
    pub fn submit(&mut self, input: &str, route: Route) -> Result<(), PipelineError> {
        if let Some(error) = codec::find_unsupported(input) {
            tracing::debug!("Rejected submission: {}", error);
            Err(error)?
        }
        self.route = Some(route);
        self.input = input.to_string();
        self.cursor = Cursor::start();
        self.outputs = LayerOutputs::default();
        self.captured_encoding = None;
        tracing::info!(
            "Submitted {} characters from {} to {}",
            input.chars().count(),
            route.sender.private_ip,
            route.receiver.private_ip
        );
        self.run_encode_stage(Layer::Application)
    }

    /// Runs the encode stage the cursor points at and returns its layer.
    pub fn advance_encode(&mut self) -> Result<Layer, PipelineError> {
        let layer = self.next_layer(Direction::Encode)?;
        self.run_encode_stage(layer)?;
        Ok(layer)
    }

    /// Runs the encode stage of `layer`, which must be the one the cursor
    /// points at.
    pub fn run_encode_stage(&mut self, layer: Layer) -> Result<(), PipelineError> {
        let route = self.admit(layer, Direction::Encode)?;
        let value = match layer.above() {
            None => self.input.as_str(),
            Some(above) => self
                .outputs
                .carried(above)
                .ok_or(PreconditionError::EmptySlot(above))?,
        };
        let mut context = EncodeContext {
            route: &route,
            segment_length: self.config.segment_length(),
            tokens: self.tokens.as_mut(),
        };
        let output = stage::encode(layer, value, &mut context)?;

        if let Output::Presentation(presentation) = &output {
            self.captured_encoding = Some(presentation.encoded.clone());
        }
        logging::stage_event(Direction::Encode, layer, output.carried());
        self.outputs.store(layer, output);
        self.cursor.advance();
        Ok(())
    }

    /// Runs every encode stage that has not run yet.
    pub fn encode_all(&mut self) -> Result<(), PipelineError> {
        while !self.cursor.is_finished() {
            self.advance_encode()?;
        }
        Ok(())
    }

    /// Sends the finished frame to the receiver. The direction flips to
    /// decode and the cursor goes back to layer 1. No data changes.
    pub fn begin_transmission(&mut self) -> Result<(), PipelineError> {
        let route = self.route.ok_or(PreconditionError::NotSubmitted)?;
        if self.cursor.direction() == Direction::Decode {
            Err(PreconditionError::AlreadyTransmitted)?
        }
        if !self.cursor.is_finished() {
            Err(PreconditionError::EncodeIncomplete {
                position: self.cursor.position(),
            })?
        }
        if !route.is_connected() {
            tracing::warn!(
                "Transmitting between {} and {} although one of them is disconnected",
                route.sender.private_ip,
                route.receiver.private_ip
            );
        }
        logging::transmission_event(&route);
        self.cursor = Cursor::transmitted();
        Ok(())
    }

    /// Runs the decode stage the cursor points at and returns its layer.
    pub fn advance_decode(&mut self) -> Result<Layer, PipelineError> {
        let layer = self.next_layer(Direction::Decode)?;
        self.run_decode_stage(layer)?;
        Ok(layer)
    }

    /// Runs the decode stage of `layer`, which must be the one the cursor
    /// points at. The result is written to the slot of the layer above.
    pub fn run_decode_stage(&mut self, layer: Layer) -> Result<(), PipelineError> {
        self.admit(layer, Direction::Decode)?;
        let target = layer
            .above()
            .ok_or(PreconditionError::NoDecodeStage(layer))?;
        let value = self
            .outputs
            .carried(layer)
            .ok_or(PreconditionError::EmptySlot(layer))?;
        let context = DecodeContext {
            segment_length: self.config.segment_length(),
            captured_encoding: self.captured_encoding.as_deref(),
        };
        let output = stage::decode(layer, value, &context).map_err(|error| {
            tracing::warn!("Decoding {} failed: {}", layer, error);
            error
        })?;

        logging::stage_event(Direction::Decode, target, output.carried());
        self.outputs.store(target, output);
        self.cursor.advance();
        Ok(())
    }

    /// Runs every decode stage that has not run yet.
    pub fn decode_all(&mut self) -> Result<(), PipelineError> {
        while !self.cursor.is_finished() {
            self.advance_decode()?;
        }
        Ok(())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.cursor.direction()
    }

    pub fn outputs(&self) -> &LayerOutputs {
        &self.outputs
    }

    /// The value in `layer`'s slot; the bit translation for the presentation
    /// layer.
    pub fn output(&self, layer: Layer) -> Option<&str> {
        self.outputs.carried(layer)
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.outputs.presentation.as_ref()
    }

    /// The transport slot split into its segments.
    pub fn transport_segments(&self) -> Option<Vec<String>> {
        let length = self.config.segment_length();
        let joined = codec::desegment(self.outputs.transport.as_deref()?, length).ok()?;
        Some(
            codec::segment(&joined, length)
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn captured_encoding(&self) -> Option<&str> {
        self.captured_encoding.as_deref()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn next_layer(&self, direction: Direction) -> Result<Layer, PreconditionError> {
        if self.route.is_none() {
            Err(PreconditionError::NotSubmitted)?
        }
        if self.cursor.direction() != direction {
            Err(PreconditionError::WrongDirection {
                requested: direction,
                actual: self.cursor.direction(),
            })?
        }
        self.cursor
            .layer()
            .ok_or(PreconditionError::Exhausted { direction })
    }

    fn admit(&self, layer: Layer, direction: Direction) -> Result<Route, PreconditionError> {
        let route = self.route.ok_or(PreconditionError::NotSubmitted)?;
        self.cursor.admit(layer, direction).map_err(|error| {
            tracing::debug!("Refused to {} {}: {}", direction, layer, error);
            error
        })?;
        Ok(route)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Debug for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("route", &self.route)
            .field("input", &self.input)
            .field("cursor", &self.cursor)
            .field("outputs", &self.outputs)
            .field("captured_encoding", &self.captured_encoding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    fn pipeline() -> Pipeline {
        Pipeline::with_tokens(PipelineConfig::default(), || "tok3n".to_string())
    }

    #[test]
    fn submit_runs_application_stage() {
        let mut pipeline = pipeline();
        pipeline.submit("HI", Registry::default().route()).unwrap();
        assert_eq!(pipeline.output(Layer::Application), Some("HI"));
        assert_eq!(pipeline.cursor().position(), 6);
        assert!(!pipeline.outputs().is_populated(Layer::Presentation));
    }

    #[test]
    fn nothing_runs_before_submit() {
        let mut pipeline = pipeline();
        assert_eq!(
            pipeline.advance_encode(),
            Err(PipelineError::StagePrecondition(
                PreconditionError::NotSubmitted
            ))
        );
        assert_eq!(
            pipeline.begin_transmission(),
            Err(PipelineError::StagePrecondition(
                PreconditionError::NotSubmitted
            ))
        );
    }

    #[test]
    fn rejected_submit_keeps_previous_run() {
        let mut pipeline = pipeline();
        pipeline.submit("HI", Registry::default().route()).unwrap();
        pipeline.advance_encode().unwrap();
        let before = pipeline.outputs().clone();

        assert!(matches!(
            pipeline.submit("€", Registry::default().route()),
            Err(PipelineError::Encode(EncodeError::UnsupportedCharacter { .. }))
        ));
        assert_eq!(pipeline.outputs(), &before);
        assert_eq!(pipeline.cursor().position(), 5);
    }

    #[test]
    fn failed_token_leaves_state() {
        let mut pipeline =
            Pipeline::with_tokens(PipelineConfig::default(), || String::from("bad|token"));
        pipeline.submit("HI", Registry::default().route()).unwrap();
        pipeline.advance_encode().unwrap();
        assert!(pipeline.advance_encode().is_err());
        assert_eq!(pipeline.cursor().position(), 5);
        assert!(!pipeline.outputs().is_populated(Layer::Session));
    }

    #[test]
    fn wide_token_fails_at_session_stage() {
        let mut pipeline =
            Pipeline::with_tokens(PipelineConfig::default(), || String::from("t\u{20ac}k"));
        pipeline.submit("HI", Registry::default().route()).unwrap();
        pipeline.advance_encode().unwrap();
        assert!(matches!(
            pipeline.advance_encode(),
            Err(PipelineError::Encode(EncodeError::InvalidSessionToken(_)))
        ));
        assert_eq!(pipeline.cursor().position(), 5);
        assert!(!pipeline.outputs().is_populated(Layer::Session));
    }

    #[test]
    fn captured_encoding_survives_decode() {
        let mut pipeline = pipeline();
        pipeline.submit("HI", Registry::default().route()).unwrap();
        pipeline.encode_all().unwrap();
        pipeline.begin_transmission().unwrap();
        pipeline.decode_all().unwrap();
        assert_eq!(pipeline.captured_encoding(), Some("SEk="));
        assert_eq!(pipeline.presentation().unwrap().encoded, "SEk=");
        assert_eq!(pipeline.output(Layer::Application), Some("HI"));
    }

    #[test]
    fn corrupted_frame_is_a_decode_mismatch() {
        let mut pipeline = pipeline();
        pipeline.submit("HI", Registry::default().route()).unwrap();
        pipeline.encode_all().unwrap();
        pipeline.begin_transmission().unwrap();
        pipeline.advance_decode().unwrap();

        pipeline.outputs.data_link = Some("MAC_SRC:24-88-90-0-ff-ab".into());
        let before = pipeline.outputs().clone();
        assert_eq!(
            pipeline.advance_decode(),
            Err(PipelineError::DecodeMismatch(
                DecodeError::MissingHeaderDelimiter { header: "MAC_SRC" }
            ))
        );
        assert_eq!(pipeline.outputs(), &before);
        assert_eq!(pipeline.cursor().position(), 2);
    }

    #[test]
    #[tracing_test::traced_test]
    fn refusals_are_logged() {
        let mut pipeline = pipeline();
        pipeline.submit("HI", Registry::default().route()).unwrap();
        assert!(pipeline.run_encode_stage(Layer::Transport).is_err());
        assert!(logs_contain("Refused to encode"));
    }
}
