//! Pipeline configuration.

use std::num::NonZeroUsize;
use thiserror::Error as ThisError;

/// Default transport segment length: 4 encoded bytes of 8 bits each.
pub const DEFAULT_SEGMENT_LENGTH: usize = 4 * 8;

/// Default session token length.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

#[derive(Debug, ThisError, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The segment length must be at least 1")]
    ZeroSegmentLength,
    #[error("The session token length must be at least 1")]
    ZeroTokenLength,
}

/// Settings that stay fixed across runs of a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    segment_length: NonZeroUsize,
    token_length: NonZeroUsize,
    seed: Option<u64>,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Characters per transport segment.
    pub fn segment_length(&self) -> NonZeroUsize {
        self.segment_length
    }

    /// Characters per generated session token.
    pub fn token_length(&self) -> NonZeroUsize {
        self.token_length
    }

    /// Seed for generated session tokens, if runs should be reproducible.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segment_length: NonZeroUsize::new(DEFAULT_SEGMENT_LENGTH)
                .unwrap_or(NonZeroUsize::MIN),
            token_length: NonZeroUsize::new(DEFAULT_TOKEN_LENGTH).unwrap_or(NonZeroUsize::MIN),
            seed: None,
        }
    }
}

/// A builder for [`PipelineConfig`]. Unset fields keep their defaults.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfigBuilder {
    segment_length: usize,
    token_length: usize,
    seed: Option<u64>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self {
            segment_length: DEFAULT_SEGMENT_LENGTH,
            token_length: DEFAULT_TOKEN_LENGTH,
            seed: None,
        }
    }

    /// Sets the transport segment length
    pub fn segment_length(mut self, segment_length: usize) -> Self {
        self.segment_length = segment_length;
        self
    }

    /// Sets the session token length
    pub fn token_length(mut self, token_length: usize) -> Self {
        self.token_length = token_length;
        self
    }

    /// Seeds session token generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        Ok(PipelineConfig {
            segment_length: NonZeroUsize::new(self.segment_length)
                .ok_or(ConfigError::ZeroSegmentLength)?,
            token_length: NonZeroUsize::new(self.token_length)
                .ok_or(ConfigError::ZeroTokenLength)?,
            seed: self.seed,
        })
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
