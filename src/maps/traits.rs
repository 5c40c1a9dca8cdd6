use crate::error::MapError;
use crate::models::{BoundingBox, LatLng};

/// Vista inicial con la que se construye el mapa
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    pub center: LatLng,
    pub zoom: f64,
}

/// Marcador ya resuelto (label, color, icono) listo para el SDK
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOverlay {
    pub position: LatLng,
    pub label: String,
    pub color: String,
    pub title: Option<String>,
    pub icon_svg: String,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub line_width: u32,
    pub stroke_color: String,
    pub z_index: i32,
}

/// Superficie del SDK de mapas que consume el adaptador.
///
/// El widget agrupa mapa, plataforma, comportamiento y controles UI: se
/// crean juntos y se destruyen juntos en `dispose`.
pub trait MapSdk {
    /// Elemento anfitrión; `PartialEq` compara identidad
    type Host: Clone + PartialEq;
    type Widget;
    type Group;
    type Watcher;

    /// ¿Está cargado el runtime del SDK en la página?
    fn is_loaded(&self) -> bool;

    fn create_widget(
        &self,
        host: &Self::Host,
        api_key: &str,
        view: &InitialView,
    ) -> Result<Self::Widget, MapError>;

    /// Crea un grupo vacío y lo agrega al widget
    fn create_group(&self, widget: &Self::Widget) -> Result<Self::Group, MapError>;

    /// Observa cambios de tamaño del anfitrión y de la ventana
    fn watch_resize(&self, host: &Self::Host, widget: &Self::Widget) -> Result<Self::Watcher, MapError>;

    /// Libera la superficie de render y desconecta el watcher
    fn dispose(&self, widget: Self::Widget, watcher: Option<Self::Watcher>);

    fn clear_group(&self, group: &Self::Group) -> Result<(), MapError>;

    fn add_marker(&self, group: &Self::Group, marker: &MarkerOverlay) -> Result<(), MapError>;

    /// Decodifica un flexible polyline a puntos (sin validar)
    fn decode_route(&self, encoded: &str) -> Result<Vec<LatLng>, MapError>;

    fn add_polyline(&self, group: &Self::Group, path: &[LatLng], style: &RouteStyle) -> Result<(), MapError>;

    fn fit_bounds(&self, widget: &Self::Widget, bounds: &BoundingBox) -> Result<(), MapError>;

    fn set_center(&self, widget: &Self::Widget, center: LatLng, animate: bool) -> Result<(), MapError>;

    fn set_zoom(&self, widget: &Self::Widget, zoom: f64, animate: bool) -> Result<(), MapError>;

    fn resize(&self, widget: &Self::Widget) -> Result<(), MapError>;
}

/// Página anfitriona: búsqueda del contenedor y entradas de configuración
pub trait HostPage {
    type Element: Clone + PartialEq;

    /// Busca el contenedor por id, incluyendo shadow roots, recorriendo como
    /// mucho `scan_limit` nodos
    fn find_container(&self, container_id: &str, scan_limit: usize) -> Option<Self::Element>;

    /// Candidatos de API key en orden de preferencia
    fn api_key_candidates(&self) -> Vec<Option<String>>;

    fn default_container_id(&self) -> Option<String>;

    fn debug_enabled(&self) -> bool;
}
