use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::utils::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub default_container_id: String,
    pub api_key: Option<String>,
    pub debug_logging: bool,
    pub map_config: MapConfig,
    pub overlay_config: OverlayConfig,
    pub lookup_config: LookupConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            default_container_id: DEFAULT_CONTAINER_ID.to_string(),
            api_key: None,
            debug_logging: false,
            map_config: MapConfig::default(),
            overlay_config: OverlayConfig::default(),
            lookup_config: LookupConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub marker_focus_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: DEFAULT_CENTER_LAT,
            default_center_lng: DEFAULT_CENTER_LNG,
            default_zoom: DEFAULT_ZOOM,
            marker_focus_zoom: MARKER_FOCUS_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub brand_color: String,
    pub marker_size: u32,
    pub marker_z_index: i32,
    pub route_line_width: u32,
    pub route_z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            brand_color: BRAND_BLUE.to_string(),
            marker_size: MARKER_SIZE,
            marker_z_index: MARKER_Z_INDEX,
            route_line_width: ROUTE_LINE_WIDTH,
            route_z_index: ROUTE_Z_INDEX,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub max_scan_nodes: usize,
    pub min_api_key_length: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_scan_nodes: MAX_SCAN_NODES,
            min_api_key_length: MIN_API_KEY_LENGTH,
        }
    }
}

impl AdapterConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_container_id: option_env!("HERE_MAP_CONTAINER_ID")
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(DEFAULT_CONTAINER_ID)
                .to_string(),
            api_key: option_env!("HERE_API_KEY")
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| key.to_string()),
            debug_logging: option_env!("HERE_MAP_DEBUG").is_some_and(truthy_flag),
            map_config: MapConfig {
                marker_focus_zoom: option_env!("MARKER_FOCUS_ZOOM")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(MARKER_FOCUS_ZOOM),
                ..defaults.map_config
            },
            overlay_config: OverlayConfig {
                route_line_width: option_env!("ROUTE_LINE_WIDTH")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(ROUTE_LINE_WIDTH),
                ..defaults.overlay_config
            },
            lookup_config: LookupConfig {
                max_scan_nodes: option_env!("MAX_SCAN_NODES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(MAX_SCAN_NODES),
                ..defaults.lookup_config
            },
        }
    }

    /// Id del contenedor a usar: el del llamador, el del override de página o el por defecto
    pub fn container_id(&self, requested: Option<&str>, page_override: Option<String>) -> String {
        requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .or_else(|| page_override.filter(|id| !id.trim().is_empty()))
            .unwrap_or_else(|| self.default_container_id.clone())
    }

    /// Resuelve la API key: primer candidato no vacío, luego la de compilación.
    pub fn resolve_api_key<I>(&self, candidates: I) -> Result<String, ConfigurationError>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let key = candidates
            .into_iter()
            .flatten()
            .map(|candidate| candidate.trim().to_string())
            .find(|candidate| !candidate.is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or(ConfigurationError::MissingCredential)?;

        let length = key.chars().count();
        if length < self.lookup_config.min_api_key_length {
            return Err(ConfigurationError::InvalidCredential { length });
        }
        Ok(key)
    }
}

/// Toggle en texto: "true" (sin importar mayúsculas) o un número distinto de 0.
/// Mismo criterio para la variable de compilación y el flag de la página.
pub fn truthy_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value.parse::<f64>().is_ok_and(|n| n != 0.0 && !n.is_nan())
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AdapterConfig = AdapterConfig::from_env();
}
