// ============================================================================
// UPDATE COMMAND - Comando ya decodificado de una llamada a updateMap
// ============================================================================

use serde::Serialize;

use super::coordinates::LatLng;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub label: Option<String>,
    pub color: Option<String>,
    pub title: Option<String>,
}

/// De dónde salió la lista de marcadores. `Markers`/`Stops` indican que el
/// payload trajo una lista no vacía, aunque todas sus entradas se descarten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MarkerSource {
    #[default]
    None,
    Markers,
    Stops,
}

/// Geometría de ruta: se consume una sola representación por llamada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RouteInput {
    /// Uno o varios tramos en flexible polyline
    Encoded(Vec<String>),
    /// Formato legacy: array de puntos crudos, un solo tramo
    Points(Vec<LatLng>),
}

impl RouteInput {
    pub fn segment_count(&self) -> usize {
        match self {
            Self::Encoded(segments) => segments.len(),
            Self::Points(_) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpdateCommand {
    pub clear_markers: bool,
    pub clear_routes: bool,
    pub markers: Vec<MarkerSpec>,
    pub marker_source: MarkerSource,
    pub route: Option<RouteInput>,
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
}

impl UpdateCommand {
    /// Una lista nueva de marcadores (markers o stops) reemplaza a la anterior
    /// aunque no venga clearMarkers ni sobreviva ninguna entrada
    pub fn should_clear_markers(&self) -> bool {
        self.clear_markers || self.marker_source != MarkerSource::None || !self.markers.is_empty()
    }

    pub fn should_clear_routes(&self) -> bool {
        self.clear_routes
    }
}
