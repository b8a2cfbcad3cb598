//! Render one star field frame from a catalog and save it as an 8-bit image.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use planetarium::{render_frame, save_normalized_image, Catalog, ViewArgs, BUNDLED_CATALOG};

#[derive(Parser, Debug)]
#[command(version, about = "Render a star catalog to an image file")]
struct Args {
    /// CSV catalog with a header row and magnitude, ra, dec (degrees) columns
    #[arg(long, default_value = BUNDLED_CATALOG)]
    catalog: PathBuf,

    /// Output image path; format follows the extension
    #[arg(short, long, default_value = "test_output/planetarium.png")]
    output: PathBuf,

    /// Also write the resolved view configuration as JSON
    #[arg(long)]
    save_config: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.view.resolve().context("Invalid view configuration")?;
    let catalog = Catalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;

    println!("Planetarium renderer");
    println!("====================");
    println!("Catalog: {} ({} stars)", args.catalog.display(), catalog.len());
    println!(
        "Screen: {}x{} px at {:.3} m",
        config.screen_width, config.screen_height, config.screen_distance
    );
    println!(
        "Attitude: RA {:.2}°, Dec {:.2}°",
        config.attitude_ra.to_degrees(),
        config.attitude_dec.to_degrees()
    );

    let frame = render_frame(&catalog, &config);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    save_normalized_image(&frame, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;
    println!("Frame saved to {}", args.output.display());

    if let Some(path) = &args.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    }

    Ok(())
}
