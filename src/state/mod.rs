// ============================================================================
// STATE MODULE - Estado de la sesión del mapa
// ============================================================================

pub mod map_session;

pub use map_session::*;
