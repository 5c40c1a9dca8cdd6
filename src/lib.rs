// ============================================================================
// HERE MAP SYNC - Adaptador WASM entre la app anfitriona y HERE Maps JS
// ============================================================================
// Flujo de cada updateMap:
// - PayloadDecoder: JSON -> UpdateCommand (si falla, no se toca nada)
// - SessionService: asegura la sesión (reconstruye si el contenedor cambió)
// - OverlayViewModel: limpia y agrega marcadores / rutas
// - CameraViewModel: ajusta la vista (ruta > último marcador > center)
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

mod dom;

#[cfg(test)]
mod testing;

pub use app::{MapAdapter, UpdateReport};
pub use config::{AdapterConfig, CONFIG};
pub use error::{AdapterError, ConfigurationError, DecodeError, GeometryError, MapError};

#[cfg(target_arch = "wasm32")]
pub use exports::*;

#[cfg(target_arch = "wasm32")]
mod exports {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::MapAdapter;
    use crate::config::CONFIG;
    use crate::dom;
    use crate::maps::web::{HereMapSdk, WebHostPage};
    use crate::utils::constants::DEBUG_GLOBAL;

    type WebMapAdapter = MapAdapter<HereMapSdk, WebHostPage>;

    // Instancia única del adaptador para toda la página
    thread_local! {
        static ADAPTER: RefCell<Option<WebMapAdapter>> = const { RefCell::new(None) };
    }

    fn with_adapter<R>(f: impl FnOnce(&mut WebMapAdapter) -> R) -> R {
        ADAPTER.with(|cell| {
            let mut slot = cell.borrow_mut();
            let adapter = slot.get_or_insert_with(|| {
                MapAdapter::new(HereMapSdk::new(), WebHostPage::new(), CONFIG.clone())
            });
            f(adapter)
        })
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        // El nivel real se ajusta al construir la sesión (toggle de debug)
        wasm_logger::init(Config::new(log::Level::Debug));
        let debug = CONFIG.debug_logging || dom::window_flag(DEBUG_GLOBAL);
        log::set_max_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
        log::info!("🚀 [HERE] adaptador de mapa cargado");
    }

    /// window.updateMap(payloadJsonString, containerId)
    #[wasm_bindgen(js_name = updateMap)]
    pub fn update_map(payload: &str, container_id: Option<String>) {
        with_adapter(|adapter| match adapter.update_map(payload, container_id.as_deref()) {
            Ok(report) => log::debug!(
                "✅ [HERE] update aplicado: {} marcadores, {} tramos, cámara {:?}",
                report.rendered.markers.rendered,
                report.rendered.route.rendered,
                report.camera
            ),
            Err(e) => log::error!("❌ [HERE] {}", e),
        });
    }

    /// Fuerza el recálculo del viewport (p. ej. tras un cambio de layout)
    #[wasm_bindgen(js_name = resizeHereMap)]
    pub fn resize_here_map(container_id: Option<String>) {
        with_adapter(|adapter| {
            if let Err(e) = adapter.resize(container_id.as_deref()) {
                log::error!("❌ [HERE] {}", e);
            }
        });
    }

    /// ¿Hay (o se pudo crear) un mapa vivo en ese contenedor?
    #[wasm_bindgen(js_name = hereMapReady)]
    pub fn here_map_ready(container_id: Option<String>) -> bool {
        with_adapter(|adapter| adapter.ensure_session(container_id.as_deref()))
    }

    /// Libera el mapa actual (hot restart, cambio de pantalla)
    #[wasm_bindgen(js_name = disposeHereMap)]
    pub fn dispose_here_map() {
        with_adapter(|adapter| adapter.dispose());
    }
}
