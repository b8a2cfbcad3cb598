use anyhow::Result;
use ndarray::Array2;
use sdl2::keyboard::Keycode;
use sdl2::rect::Rect;

use planetarium::{image_proc::to_u8_image, AttitudeCommand};

pub trait SdlResultExt<T> {
    fn sdl_context(self, msg: &str) -> Result<T>;
}

impl<T> SdlResultExt<T> for std::result::Result<T, String> {
    fn sdl_context(self, msg: &str) -> Result<T> {
        self.map_err(|e| anyhow::anyhow!("{msg}: {e}"))
    }
}

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Move(AttitudeCommand),
    ToggleFullscreen,
    SaveFrame,
    Exit,
}

/// Map a key to a viewer action. Unbound keys give `None`.
pub fn key_action(keycode: Keycode) -> Option<ViewerAction> {
    match keycode {
        Keycode::Left => Some(ViewerAction::Move(AttitudeCommand::RaDecrease)),
        Keycode::Right => Some(ViewerAction::Move(AttitudeCommand::RaIncrease)),
        Keycode::Up => Some(ViewerAction::Move(AttitudeCommand::DecIncrease)),
        Keycode::Down => Some(ViewerAction::Move(AttitudeCommand::DecDecrease)),
        Keycode::F => Some(ViewerAction::ToggleFullscreen),
        Keycode::S => Some(ViewerAction::SaveFrame),
        Keycode::Escape | Keycode::Q => Some(ViewerAction::Exit),
        _ => None,
    }
}

/// Grayscale frame as packed RGB24 rows, ready for a streaming texture
pub fn frame_to_rgb24(frame: &Array2<f64>) -> Vec<u8> {
    let gray = to_u8_image(frame);
    let mut rgb = Vec::with_capacity(gray.len() * 3);
    for &value in gray.iter() {
        rgb.extend_from_slice(&[value, value, value]);
    }
    rgb
}

/// Largest centered rectangle with the frame's aspect ratio that fits the window
pub fn letterbox_rect(window: (u32, u32), frame: (u32, u32)) -> Rect {
    let (window_width, window_height) = window;
    let (frame_width, frame_height) = frame;

    let scale_x = window_width as f32 / frame_width as f32;
    let scale_y = window_height as f32 / frame_height as f32;
    let scale = scale_x.min(scale_y);

    let scaled_width = (frame_width as f32 * scale) as u32;
    let scaled_height = (frame_height as f32 * scale) as u32;

    let x = (window_width - scaled_width) / 2;
    let y = (window_height - scaled_height) / 2;

    Rect::new(x as i32, y as i32, scaled_width, scaled_height)
}
