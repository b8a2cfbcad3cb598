//! Small numeric helpers shared by the projection and scene code.

pub mod angle;

pub use angle::normalize_angle;
