//! Render the attenuation ladder calibration scene to an image file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use planetarium::{
    save_normalized_image,
    sims::{log_spaced, AttenuationLadder},
    ViewArgs,
};

#[derive(Parser, Debug)]
#[command(version, about = "Reference vs. attenuated star ladder")]
struct Args {
    /// log10 of the smallest optical depth
    #[arg(long, default_value_t = -4.0, allow_hyphen_values = true)]
    min_log_tau: f64,

    /// log10 of the largest optical depth
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    max_log_tau: f64,

    /// Number of ladder columns
    #[arg(long, default_value_t = 40)]
    steps: usize,

    /// Output image path
    #[arg(short, long, default_value = "test_output/attenuation_ladder.png")]
    output: PathBuf,

    #[command(flatten)]
    view: ViewArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.view.resolve().context("Invalid view configuration")?;
    let ladder = AttenuationLadder {
        taus: log_spaced(args.min_log_tau, args.max_log_tau, args.steps),
        ..AttenuationLadder::default()
    };

    println!(
        "Attenuation ladder: {} columns, tau 1e{} to 1e{}",
        ladder.taus.len(),
        args.min_log_tau,
        args.max_log_tau
    );

    let frame = ladder.render(&config);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    save_normalized_image(&frame, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;
    println!("Ladder saved to {}", args.output.display());

    Ok(())
}
