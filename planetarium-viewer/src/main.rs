mod display;

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::Array2;
use sdl2::event::Event;
use sdl2::video::FullscreenType;
use std::path::PathBuf;

use display::{frame_to_rgb24, key_action, letterbox_rect, SdlResultExt, ViewerAction};
use planetarium::{save_normalized_image, Catalog, Planetarium, ViewArgs, BUNDLED_CATALOG};

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive planetarium viewer", long_about = None)]
struct Args {
    /// CSV catalog with a header row and magnitude, ra, dec (degrees) columns
    #[arg(long, default_value = BUNDLED_CATALOG)]
    catalog: PathBuf,

    #[arg(short, long, help = "Display index to use (0-based)")]
    display: Option<u32>,

    #[arg(long, help = "Start in fullscreen")]
    fullscreen: bool,

    #[arg(short, long, help = "Where the S key saves the current frame")]
    output: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,
}

fn save_frame(frame: &Array2<f64>, output: Option<&PathBuf>) {
    let Some(path) = output else {
        log::warn!("No --output path given, frame not saved");
        return;
    };
    match save_normalized_image(frame, path) {
        Ok(()) => println!("Frame saved to {}", path.display()),
        Err(e) => log::error!("Failed to save frame to {}: {e}", path.display()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.view.resolve().context("Invalid view configuration")?;
    let catalog = Catalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let mut planetarium = Planetarium::new(config)?;

    let (frame_width, frame_height) = planetarium.config().dimensions();
    let frame_width = u32::try_from(frame_width).context("Screen width too large")?;
    let frame_height = u32::try_from(frame_height).context("Screen height too large")?;

    let sdl_context = sdl2::init().sdl_context("SDL init failed")?;
    let video_subsystem = sdl_context
        .video()
        .sdl_context("Video subsystem init failed")?;

    let display_index = args.display.unwrap_or(0);
    let num_displays = video_subsystem
        .num_video_displays()
        .sdl_context("Failed to get display count")?;
    if display_index >= num_displays as u32 {
        anyhow::bail!("Display {display_index} not found (have {num_displays} displays)");
    }
    let bounds = video_subsystem
        .display_bounds(display_index as i32)
        .sdl_context("Failed to get display bounds")?;

    let mut window_builder = video_subsystem.window("Planetarium", frame_width, frame_height);
    window_builder.position(bounds.x(), bounds.y()).resizable();
    if args.fullscreen {
        window_builder.fullscreen_desktop();
    }
    let window = window_builder.build().context("Failed to create window")?;

    let mut canvas = window
        .into_canvas()
        .build()
        .context("Failed to create canvas")?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(
            sdl2::pixels::PixelFormatEnum::RGB24,
            frame_width,
            frame_height,
        )
        .map_err(|e| anyhow::anyhow!("Failed to create texture: {:?}", e))?;

    let mut event_pump = sdl_context.event_pump().sdl_context("Failed to get event pump")?;

    println!(
        "Rendering {} stars on a {}x{} screen",
        catalog.len(),
        frame_width,
        frame_height
    );
    println!("Arrows: move attitude, F: fullscreen, S: save, Esc/Q: quit");

    let mut frame = planetarium.render(&catalog);
    let mut frame_dirty = true;

    'running: loop {
        if frame_dirty {
            texture
                .update(None, &frame_to_rgb24(&frame), frame_width as usize * 3)
                .map_err(|e| anyhow::anyhow!("Failed to update texture: {e}"))?;
            frame_dirty = false;
        }

        let dst_rect = letterbox_rect(
            canvas.output_size().sdl_context("Failed to get output size")?,
            (frame_width, frame_height),
        );
        canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        canvas.clear();
        canvas
            .copy(&texture, None, Some(dst_rect))
            .sdl_context("Failed to copy texture")?;
        canvas.present();

        // Block until the next event; every render finishes before input is read again
        match event_pump.wait_event() {
            Event::Quit { .. } => break 'running,
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => match key_action(keycode) {
                Some(ViewerAction::Move(command)) => {
                    frame = planetarium.apply_and_render(command, &catalog);
                    frame_dirty = true;
                }
                Some(ViewerAction::ToggleFullscreen) => {
                    let window = canvas.window_mut();
                    let next = match window.fullscreen_state() {
                        FullscreenType::Off => FullscreenType::Desktop,
                        _ => FullscreenType::Off,
                    };
                    window
                        .set_fullscreen(next)
                        .sdl_context("Failed to toggle fullscreen")?;
                }
                Some(ViewerAction::SaveFrame) => save_frame(&frame, args.output.as_ref()),
                Some(ViewerAction::Exit) => break 'running,
                None => {}
            },
            // Exposure, resizes and everything else just trigger a redraw
            _ => {}
        }
    }

    Ok(())
}
