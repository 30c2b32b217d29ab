//! Tether Scenario Runner
//!
//! Run a scenario file and print its timeline.

use std::env;

use tether_sim::{Scenario, Simulation};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or("usage: tether-sim <scenario.json>")?;

    let scenario = Scenario::load(&path)?;
    let report = Simulation::run_scenario(&scenario)?;

    for event in &report.events {
        println!("{}", serde_json::to_string(event)?);
    }

    eprintln!();
    eprintln!("Scenario complete:");
    eprintln!("  Frames:   {}", report.frames);
    eprintln!("  Events:   {}", report.events.len());
    eprintln!("  Selected: {}", report.selected.as_deref().unwrap_or("-"));
    eprintln!("  Plugged:  {}", report.plugged.as_deref().unwrap_or("-"));
    eprintln!("  Releases: {}", report.releases);

    Ok(())
}
