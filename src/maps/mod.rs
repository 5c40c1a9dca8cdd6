// Módulo de mapas: traits comunes + implementación HERE para web

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod traits;

pub use traits::{HostPage, InitialView, MapSdk, MarkerOverlay, RouteStyle};
