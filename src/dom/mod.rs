// ============================================================================
// DOM MODULE - Helpers de DOM para la página anfitriona
// ============================================================================

pub mod search;

#[cfg(target_arch = "wasm32")]
pub mod element;

#[cfg(target_arch = "wasm32")]
pub use element::*;
