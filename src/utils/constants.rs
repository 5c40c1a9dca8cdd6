/// Id del contenedor cuando el llamador no pasa uno
pub const DEFAULT_CONTAINER_ID: &str = "here_map_container";

/// Centro inicial del mapa (Ciudad Ho Chi Minh)
pub const DEFAULT_CENTER_LAT: f64 = 10.776;
pub const DEFAULT_CENTER_LNG: f64 = 106.700;
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Zoom al centrar sobre el último marcador si el payload no trae zoom
pub const MARKER_FOCUS_ZOOM: f64 = 15.0;

/// Azul de marca para marcadores y rutas
pub const BRAND_BLUE: &str = "#1A73E8";
pub const ROUTE_LINE_WIDTH: u32 = 6;
pub const MARKER_SIZE: u32 = 34;

/// Marcadores siempre por encima de las rutas
pub const MARKER_Z_INDEX: i32 = 10;
pub const ROUTE_Z_INDEX: i32 = 1;

/// Tope de nodos recorridos al buscar el contenedor dentro de shadow roots
pub const MAX_SCAN_NODES: usize = 3500;

/// Longitud mínima aceptable de la API key
pub const MIN_API_KEY_LENGTH: usize = 10;

/// Retardo del resize diferido tras construir el mapa (ms)
pub const DEFERRED_RESIZE_MS: u32 = 250;

/// Globals de window donde se busca la API key, en orden
pub const API_KEY_GLOBALS: &[&str] = &["HERE_API_KEY", "HERE_MAPS_API_KEY", "hereApiKey"];

/// Meta tag alternativo: <meta name="here-api-key" content="...">
pub const API_KEY_META_NAME: &str = "here-api-key";

pub const CONTAINER_ID_GLOBAL: &str = "HERE_MAP_CONTAINER_ID";
pub const DEBUG_GLOBAL: &str = "HERE_MAP_DEBUG";

