//! ReelForge Ambisonics offline host
//!
//! File-in, file-out rendering on top of `rf-ambi`:
//! - `encode`: mono WAV to an ACN/SN3D ambisonic WAV
//! - `decode`: ambisonic WAV to binaural stereo
//! - `binaural`: mono WAV straight to binaural stereo

pub mod render;
pub mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, RenderConfig, Sweep};
pub use wav::{AudioData, load_wav, write_wav};
