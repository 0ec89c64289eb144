//! A simulator of the OSI reference model, a library for walking a single
//! message through the seven layers of a network stack.
//!
//! # Uses
//!
//! Educators can use it as a pedagogical tool. Students watch a message
//! gain a session tag, get cut into segments, pick up network and link
//! headers and end up as bits on the wire, then see the receiver peel each
//! of those off again.
//!
//! # Organization
//! - [`Layer`] names the layers
//! - [`Device`], [`Route`] and [`Registry`] describe who talks to whom
//! - [`codec`] and [`header`] hold the per-layer transformations
//! - [`Pipeline`] runs the transformations one stage at a time
//!
//! # Example
//!
//! ```
//! use osi_core::{Layer, Pipeline, PipelineConfig, Registry};
//!
//! let registry = Registry::default();
//! let mut pipeline = Pipeline::with_tokens(PipelineConfig::default(), || "demo".to_string());
//! pipeline.submit("HI", registry.route()).unwrap();
//! pipeline.encode_all().unwrap();
//! pipeline.begin_transmission().unwrap();
//! pipeline.decode_all().unwrap();
//! assert_eq!(pipeline.output(Layer::Application), Some("HI"));
//! ```

mod logging;

pub mod address;
pub use address::{Ipv4Address, MacAddress};

pub mod codec;
pub mod header;

pub mod config;
pub use config::{ConfigError, PipelineConfig};

mod device;
pub use device::{Device, Route};

pub mod layer;
pub use layer::Layer;

pub mod pipeline;
pub use pipeline::{Cursor, Direction, LayerOutputs, Pipeline, PipelineError, Presentation};

mod registry;
pub use registry::{Registry, RegistryError, Role};

pub mod token;
pub use token::{RandomTokens, TokenSource};
