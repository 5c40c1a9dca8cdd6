// ============================================================================
// HERE FFI - Bindings de HERE Maps JS (window.H)
// ============================================================================
// Solo declaraciones - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // --- H.service ---------------------------------------------------------
    #[wasm_bindgen(js_namespace = ["H", "service"])]
    pub type Platform;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "service"])]
    pub fn new(options: &JsValue) -> Result<Platform, JsValue>;

    #[wasm_bindgen(method, catch, js_name = createDefaultLayers)]
    pub fn create_default_layers(this: &Platform) -> Result<JsValue, JsValue>;

    // --- H.Map ---------------------------------------------------------------
    #[wasm_bindgen(js_namespace = H, js_name = Map)]
    pub type HereMap;

    #[wasm_bindgen(constructor, catch, js_namespace = H, js_class = "Map")]
    pub fn new(element: &web_sys::Element, base_layer: &JsValue, options: &JsValue) -> Result<HereMap, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Map", js_name = addObject)]
    pub fn add_object(this: &HereMap, object: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = getViewPort)]
    pub fn view_port(this: &HereMap) -> ViewPort;

    #[wasm_bindgen(method, js_class = "Map", js_name = getViewModel)]
    pub fn view_model(this: &HereMap) -> ViewModel;

    #[wasm_bindgen(method, catch, js_class = "Map", js_name = setCenter)]
    pub fn set_center(this: &HereMap, center: &JsValue, animate: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_class = "Map", js_name = setZoom)]
    pub fn set_zoom(this: &HereMap, zoom: f64, animate: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn dispose(this: &HereMap);

    pub type ViewPort;

    #[wasm_bindgen(method, catch)]
    pub fn resize(this: &ViewPort) -> Result<(), JsValue>;

    pub type ViewModel;

    #[wasm_bindgen(method, catch, js_name = setLookAtData)]
    pub fn set_look_at_data(this: &ViewModel, data: &JsValue, animate: bool) -> Result<(), JsValue>;

    // --- H.mapevents / H.ui ----------------------------------------------------
    #[wasm_bindgen(js_namespace = ["H", "mapevents"])]
    pub type MapEvents;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "mapevents"])]
    pub fn new(map: &HereMap) -> Result<MapEvents, JsValue>;

    #[wasm_bindgen(js_namespace = ["H", "mapevents"])]
    pub type Behavior;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "mapevents"])]
    pub fn new(events: &MapEvents) -> Result<Behavior, JsValue>;

    #[wasm_bindgen(method)]
    pub fn dispose(this: &Behavior);

    /// Instancia devuelta por H.ui.UI.createDefault
    pub type Ui;

    #[wasm_bindgen(catch, js_namespace = ["H", "ui", "UI"], js_name = createDefault)]
    pub fn create_default_ui(map: &HereMap, layers: &JsValue) -> Result<Ui, JsValue>;

    #[wasm_bindgen(method)]
    pub fn dispose(this: &Ui);

    // --- H.map: grupos y objetos ------------------------------------------------
    #[wasm_bindgen(js_namespace = ["H", "map"])]
    pub type Group;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "map"])]
    pub fn new() -> Result<Group, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addObject)]
    pub fn add_object(this: &Group, object: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeAll)]
    pub fn remove_all(this: &Group) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["H", "map"])]
    pub type Icon;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "map"])]
    pub fn new(bitmap: &str) -> Result<Icon, JsValue>;

    #[wasm_bindgen(js_namespace = ["H", "map"])]
    pub type Marker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "map"])]
    pub fn new(position: &JsValue, options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = setData)]
    pub fn set_data(this: &Marker, data: &JsValue);

    #[wasm_bindgen(js_namespace = ["H", "map"])]
    pub type Polyline;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "map"])]
    pub fn new(line: &LineString, options: &JsValue) -> Result<Polyline, JsValue>;

    // --- H.geo ---------------------------------------------------------------
    #[wasm_bindgen(js_namespace = ["H", "geo"])]
    pub type LineString;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "geo"])]
    pub fn new() -> Result<LineString, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["H", "geo", "LineString"], js_name = fromFlexiblePolyline)]
    pub fn line_string_from_flexible_polyline(encoded: &str) -> Result<LineString, JsValue>;

    #[wasm_bindgen(method, catch, js_name = pushPoint)]
    pub fn push_point(this: &LineString, point: &JsValue) -> Result<(), JsValue>;

    /// Array plano [lat, lng, alt, lat, lng, alt, ...]
    #[wasm_bindgen(method, js_name = getLatLngAltArray)]
    pub fn lat_lng_alt_array(this: &LineString) -> js_sys::Array;

    #[wasm_bindgen(js_namespace = ["H", "geo"])]
    pub type Rect;

    #[wasm_bindgen(constructor, catch, js_namespace = ["H", "geo"])]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Result<Rect, JsValue>;

    // --- ResizeObserver ------------------------------------------------------
    #[wasm_bindgen(js_name = ResizeObserver)]
    pub type HostResizeObserver;

    #[wasm_bindgen(constructor, catch, js_class = "ResizeObserver")]
    pub fn new(callback: &js_sys::Function) -> Result<HostResizeObserver, JsValue>;

    #[wasm_bindgen(method, js_class = "ResizeObserver")]
    pub fn observe(this: &HostResizeObserver, target: &web_sys::Element);

    #[wasm_bindgen(method, js_class = "ResizeObserver")]
    pub fn disconnect(this: &HostResizeObserver);
}

/// Mensaje legible de un error JS (Error.message o el valor crudo)
pub fn js_error_message(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}
