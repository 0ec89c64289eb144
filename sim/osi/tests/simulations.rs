use osi::simulation::{default_simulation, walkthrough};
use osi_core::{Layer, Pipeline, PipelineConfig, Registry};
use std::io;

#[test]
fn default() -> anyhow::Result<()> {
    default_simulation()?;
    Ok(())
}

#[test]
fn every_route_round_trips() {
    let registry = Registry::default();
    let count = registry.catalog().len();
    for sender in 0..count {
        for receiver in 0..count {
            let mut registry = registry.clone();
            registry.select_sender(sender).unwrap();
            registry.select_receiver(receiver).unwrap();
            let mut pipeline =
                Pipeline::new(PipelineConfig::builder().seed(sender as u64).build().unwrap());
            walkthrough(
                &mut pipeline,
                "route check",
                registry.route(),
                &mut io::sink(),
                |_, _| Ok(()),
            )
            .unwrap();
            assert_eq!(pipeline.output(Layer::Application), Some("route check"));
        }
    }
}
