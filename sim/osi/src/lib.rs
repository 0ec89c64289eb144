//! Command-line front end for the OSI layer simulator.
//!
//! The core state machine lives in [`osi_core`]. This crate selects devices,
//! drives the pipeline stage by stage and prints what every layer produced.

pub mod cli;
pub mod simulation;
