//! Walks a message down the sender's stack, across the wire and up the
//! receiver's stack, printing each layer as it is produced.

use osi_core::{
    ConfigError, Direction, Layer, Pipeline, PipelineError, Registry, RegistryError, Route,
};
use std::io::{self, Write};
use thiserror::Error as ThisError;

/// Width of the layer column in the printed report
const NAME_WIDTH: usize = 12;

#[derive(Debug, ThisError)]
pub enum SimulationError {
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
    #[error("{0}")]
    Registry(#[from] RegistryError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Could not install the log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Sends `message` over `route` through every stage of `pipeline`.
///
/// `before_stage` is called ahead of each stage with the direction and the
/// layer about to run, which lets an operator step through the run.
pub fn walkthrough<W: Write>(
    pipeline: &mut Pipeline,
    message: &str,
    route: Route,
    out: &mut W,
    mut before_stage: impl FnMut(Direction, Layer) -> io::Result<()>,
) -> Result<(), SimulationError> {
    writeln!(out, "Sender:   {}", route.sender)?;
    writeln!(out, "Receiver: {}", route.receiver)?;
    writeln!(out, "=== encode ===")?;

    before_stage(Direction::Encode, Layer::Application)?;
    pipeline.submit(message, route)?;
    render_layer(out, pipeline, Layer::Application)?;
    while let Some(layer) = pipeline.cursor().layer() {
        before_stage(Direction::Encode, layer)?;
        pipeline.advance_encode()?;
        render_layer(out, pipeline, layer)?;
    }

    pipeline.begin_transmission()?;
    writeln!(
        out,
        "=== transmission {} -> {} ===",
        route.sender.public_ip, route.receiver.public_ip
    )?;
    if !route.is_connected() {
        writeln!(out, "warning: an endpoint is disconnected")?;
    }

    writeln!(out, "=== decode ===")?;
    while let Some(layer) = pipeline.cursor().layer() {
        before_stage(Direction::Decode, layer)?;
        pipeline.advance_decode()?;
        if let Some(target) = layer.above() {
            render_layer(out, pipeline, target)?;
        }
    }
    Ok(())
}

/// Prints the current contents of `layer`'s slot.
pub fn render_layer<W: Write>(
    out: &mut W,
    pipeline: &Pipeline,
    layer: Layer,
) -> io::Result<()> {
    let label = format!("[{} {:<NAME_WIDTH$}]", layer.number(), layer.name());
    let indent = " ".repeat(label.len());
    match layer {
        Layer::Presentation => {
            if let Some(presentation) = pipeline.presentation() {
                writeln!(out, "{label} encoded:    {}", presentation.encoded)?;
                writeln!(out, "{indent} translated: {}", presentation.translated)?;
            }
        }
        Layer::Transport => {
            let segments = pipeline.transport_segments().unwrap_or_default();
            writeln!(
                out,
                "{label} {} ({} segments)",
                pipeline.output(layer).unwrap_or_default(),
                segments.len()
            )?;
        }
        _ => writeln!(out, "{label} {}", pipeline.output(layer).unwrap_or_default())?,
    }
    Ok(())
}

/// Prints the device catalog with the current role assignments.
pub fn list_devices<W: Write>(out: &mut W, registry: &Registry) -> io::Result<()> {
    for (index, device) in registry.catalog().iter().enumerate() {
        let mut roles = Vec::new();
        if index == registry.selected(osi_core::Role::Sender) {
            roles.push("sender");
        }
        if index == registry.selected(osi_core::Role::Receiver) {
            roles.push("receiver");
        }
        let roles = if roles.is_empty() {
            String::new()
        } else {
            format!(" [{}]", roles.join(", "))
        };
        writeln!(out, "{index}: {device}{roles}")?;
    }
    Ok(())
}

/// Sends "Hello!" from the first lab device to the second and prints the
/// result to stdout.
pub fn default_simulation() -> Result<(), SimulationError> {
    let registry = Registry::default();
    let mut pipeline = Pipeline::default();
    let stdout = io::stdout();
    walkthrough(
        &mut pipeline,
        "Hello!",
        registry.route(),
        &mut stdout.lock(),
        |_, _| Ok(()),
    )
}
