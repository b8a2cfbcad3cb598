//! Canned scenes built directly in screen coordinates

pub mod attenuation;

pub use attenuation::{log_spaced, AttenuationLadder};
