// Utils compartidos

pub mod constants;
pub mod marker_icon;

#[cfg(target_arch = "wasm32")]
pub mod here_ffi;

pub use constants::*;
