//! Parses the command line arguments.
//!
//! Basic usage, sending a message from lab device 2 to lab device 3 with
//! logging on:
//!
//! ```cargo run -- --sender 2 --receiver 3 --message "Hi there" --log```
//!
//! Requires calling parse_args() at the start of main.

use crate::simulation::{list_devices, walkthrough, SimulationError};
use clap::Parser;
use osi_core::{
    config::{DEFAULT_SEGMENT_LENGTH, DEFAULT_TOKEN_LENGTH},
    Direction, Layer, Pipeline, PipelineConfig, Registry,
};
use std::{
    fs::{create_dir_all, OpenOptions},
    io::{self, BufRead, Write},
    sync::Arc,
};
use tracing_subscriber::FmtSubscriber;

/// Stores the different command line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "Walks a message through the seven OSI layers")]
struct Args {
    /// Logging flag. Used to turn logging on or off.
    #[arg(short, long)]
    log: bool,
    /// The message handed to the application layer
    #[arg(short, long, default_value = "Hello!")]
    message: String,
    /// Catalog index of the sending device
    #[arg(short, long, default_value_t = 0)]
    sender: usize,
    /// Catalog index of the receiving device
    #[arg(short, long, default_value_t = 1)]
    receiver: usize,
    /// Characters per transport segment
    #[arg(long, default_value_t = DEFAULT_SEGMENT_LENGTH)]
    segment_length: usize,
    /// Characters per session token
    #[arg(long, default_value_t = DEFAULT_TOKEN_LENGTH)]
    token_length: usize,
    /// Seed for reproducible session tokens
    #[arg(long)]
    seed: Option<u64>,
    /// Print the device catalog and exit
    #[arg(short, long)]
    devices: bool,
    /// Wait for Enter before every stage
    #[arg(short, long)]
    interactive: bool,
}

/// Parses command line arguments and runs the walkthrough they describe.
pub fn parse_args() -> Result<(), SimulationError> {
    let args = Args::parse();
    // Capture log flag for turning logging on or off
    if args.log {
        initialize_logging()?;
    }
    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), SimulationError> {
    let mut registry = Registry::default();
    // The listing shows the default roles, so indices are not checked.
    if args.devices {
        list_devices(out, &registry)?;
        return Ok(());
    }
    registry.select_sender(args.sender)?;
    registry.select_receiver(args.receiver)?;

    let mut builder = PipelineConfig::builder()
        .segment_length(args.segment_length)
        .token_length(args.token_length);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut pipeline = Pipeline::new(builder.build()?);

    let interactive = args.interactive;
    walkthrough(
        &mut pipeline,
        &args.message,
        registry.route(),
        out,
        |direction, layer| {
            if interactive {
                wait_for_operator(direction, layer)
            } else {
                Ok(())
            }
        },
    )
}

/// Blocks until the operator presses Enter.
fn wait_for_operator(direction: Direction, layer: Layer) -> io::Result<()> {
    eprint!("Press Enter to {direction} {layer}...");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Initializes the event protocol. Only should be called once when the sim starts.
/// Allows for event! to be called and writes to a log file in ./logs.
/// During Tests -- cargo test -- logs will not be generated
fn initialize_logging() -> Result<(), SimulationError> {
    let main_path = "./logs";
    create_dir_all(main_path)?;
    let file_path = format!(
        "{}/debug-{}.log",
        main_path,
        chrono::offset::Local::now().format("%y-%m-%d_%H-%M-%S")
    );
    let file = OpenOptions::new()
        .write(true)
        .append(true)
        .create(true)
        .open(file_path)?;
    let subscriber = FmtSubscriber::builder()
        .with_writer(Arc::new(file))
        .json()
        .finish();
    // set the global default so all events/logs go to the same subscriber and
    // subsequently the same file
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
