use gloo_timers::callback::Timeout;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::traits::{HostPage, InitialView, MapSdk, MarkerOverlay, RouteStyle};
use crate::dom;
use crate::error::MapError;
use crate::models::{BoundingBox, LatLng};
use crate::utils::constants::*;
use crate::utils::here_ffi::{self, js_error_message};

/// Mapa HERE con los servicios que nacen y mueren con él
pub struct HereWidget {
    map: here_ffi::HereMap,
    _platform: here_ffi::Platform,
    behavior: here_ffi::Behavior,
    ui: Option<here_ffi::Ui>,
}

/// Listener de window.resize + ResizeObserver sobre el contenedor
pub struct ResizeWatcher {
    on_resize: Closure<dyn FnMut()>,
    observer: Option<(here_ffi::HostResizeObserver, Closure<dyn FnMut()>)>,
    deferred: Option<Timeout>,
}

#[derive(Serialize)]
struct ApiKeyOptions<'a> {
    apikey: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: LatLng,
    zoom: f64,
    pixel_ratio: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolylineStyle<'a> {
    line_width: u32,
    stroke_color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolylineOptions<'a> {
    style: PolylineStyle<'a>,
    z_index: i32,
}

fn to_js<T: Serialize>(value: &T, operation: &'static str) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::sdk_call(operation, e.to_string()))
}

fn sdk_err(operation: &'static str) -> impl Fn(JsValue) -> MapError {
    move |e| MapError::sdk_call(operation, js_error_message(&e))
}

fn js_get(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Renderizador de mapas para web usando HERE Maps JS
#[derive(Default)]
pub struct HereMapSdk;

impl HereMapSdk {
    pub fn new() -> Self {
        Self
    }

    /// Capa base: vector.normal.map si existe, si no raster normal.map
    fn base_layer(layers: &JsValue) -> Option<JsValue> {
        let vector = js_get(layers, "vector")
            .and_then(|v| js_get(&v, "normal"))
            .and_then(|n| js_get(&n, "map"));
        vector.or_else(|| js_get(layers, "normal").and_then(|n| js_get(&n, "map")))
    }
}

impl MapSdk for HereMapSdk {
    type Host = Element;
    type Widget = HereWidget;
    type Group = here_ffi::Group;
    type Watcher = ResizeWatcher;

    fn is_loaded(&self) -> bool {
        let Some(window) = dom::window() else {
            return false;
        };
        js_get(&window, "H").is_some_and(|h| js_get(&h, "service").is_some() && js_get(&h, "Map").is_some())
    }

    fn create_widget(&self, host: &Element, api_key: &str, view: &InitialView) -> Result<HereWidget, MapError> {
        log::info!("🗺️ [HERE] Inicializando HERE Maps JS...");

        let platform = here_ffi::Platform::new(&to_js(&ApiKeyOptions { apikey: api_key }, "Platform")?)
            .map_err(sdk_err("Platform"))?;
        let layers = platform
            .create_default_layers()
            .map_err(sdk_err("createDefaultLayers"))?;
        let base_layer = Self::base_layer(&layers)
            .ok_or_else(|| MapError::sdk_call("createDefaultLayers", "no normal map layer"))?;

        let pixel_ratio = dom::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let options = to_js(
            &MapOptions {
                center: view.center,
                zoom: view.zoom,
                pixel_ratio,
            },
            "Map",
        )?;
        let map = here_ffi::HereMap::new(host, &base_layer, &options).map_err(sdk_err("Map"))?;

        let events = here_ffi::MapEvents::new(&map).map_err(sdk_err("MapEvents"))?;
        let behavior = here_ffi::Behavior::new(&events).map_err(sdk_err("Behavior"))?;

        // Sin controles UI el mapa sigue siendo usable
        let ui = match here_ffi::create_default_ui(&map, &layers) {
            Ok(ui) => Some(ui),
            Err(e) => {
                log::warn!("⚠️ [HERE] UI por defecto no disponible: {}", js_error_message(&e));
                None
            }
        };

        Ok(HereWidget {
            map,
            _platform: platform,
            behavior,
            ui,
        })
    }

    fn create_group(&self, widget: &HereWidget) -> Result<here_ffi::Group, MapError> {
        let group = here_ffi::Group::new().map_err(sdk_err("Group"))?;
        widget.map.add_object(&group).map_err(sdk_err("addObject"))?;
        Ok(group)
    }

    fn watch_resize(&self, host: &Element, widget: &HereWidget) -> Result<ResizeWatcher, MapError> {
        let window = dom::window().ok_or(MapError::NotReady)?;

        let viewport_resizer = |map: here_ffi::HereMap| {
            move || {
                if let Err(e) = map.view_port().resize() {
                    log::debug!("[HERE] resize falló: {}", js_error_message(&e));
                }
            }
        };

        let on_resize = Closure::wrap(Box::new(viewport_resizer(widget.map.clone())) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(sdk_err("addEventListener"))?;

        let observer = if js_get(&window, "ResizeObserver").is_some() {
            let callback = Closure::wrap(Box::new(viewport_resizer(widget.map.clone())) as Box<dyn FnMut()>);
            match here_ffi::HostResizeObserver::new(callback.as_ref().unchecked_ref()) {
                Ok(observer) => {
                    observer.observe(host);
                    Some((observer, callback))
                }
                Err(e) => {
                    log::debug!("[HERE] ResizeObserver no disponible: {}", js_error_message(&e));
                    None
                }
            }
        } else {
            None
        };

        // El contenedor suele recibir su tamaño final después del montaje
        let deferred = Some(Timeout::new(DEFERRED_RESIZE_MS, viewport_resizer(widget.map.clone())));

        Ok(ResizeWatcher {
            on_resize,
            observer,
            deferred,
        })
    }

    fn dispose(&self, widget: HereWidget, watcher: Option<ResizeWatcher>) {
        if let Some(mut watcher) = watcher {
            if let Some(window) = dom::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", watcher.on_resize.as_ref().unchecked_ref());
            }
            if let Some((observer, _callback)) = &watcher.observer {
                observer.disconnect();
            }
            if let Some(timeout) = watcher.deferred.take() {
                timeout.cancel();
            }
        }

        if let Some(ui) = &widget.ui {
            ui.dispose();
        }
        widget.behavior.dispose();
        widget.map.dispose();
    }

    fn clear_group(&self, group: &here_ffi::Group) -> Result<(), MapError> {
        group.remove_all().map_err(sdk_err("removeAll"))
    }

    fn add_marker(&self, group: &here_ffi::Group, marker: &MarkerOverlay) -> Result<(), MapError> {
        let icon = here_ffi::Icon::new(&marker.icon_svg).map_err(sdk_err("Icon"))?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon).map_err(sdk_err("Marker"))?;
        js_sys::Reflect::set(&options, &JsValue::from_str("zIndex"), &JsValue::from(marker.z_index))
            .map_err(sdk_err("Marker"))?;

        let position = to_js(&marker.position, "Marker")?;
        let overlay = here_ffi::Marker::new(&position, &options).map_err(sdk_err("Marker"))?;
        if let Some(title) = &marker.title {
            overlay.set_data(&JsValue::from_str(title));
        }
        group.add_object(&overlay).map_err(sdk_err("addObject"))
    }

    fn decode_route(&self, encoded: &str) -> Result<Vec<LatLng>, MapError> {
        let line = here_ffi::line_string_from_flexible_polyline(encoded)
            .map_err(sdk_err("fromFlexiblePolyline"))?;

        let flat: Vec<f64> = line
            .lat_lng_alt_array()
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect();
        Ok(flat
            .chunks_exact(3)
            .map(|triple| LatLng::new(triple[0], triple[1]))
            .collect())
    }

    fn add_polyline(&self, group: &here_ffi::Group, path: &[LatLng], style: &RouteStyle) -> Result<(), MapError> {
        let line = here_ffi::LineString::new().map_err(sdk_err("LineString"))?;
        for point in path {
            line.push_point(&to_js(point, "pushPoint")?)
                .map_err(sdk_err("pushPoint"))?;
        }

        let options = to_js(
            &PolylineOptions {
                style: PolylineStyle {
                    line_width: style.line_width,
                    stroke_color: &style.stroke_color,
                },
                z_index: style.z_index,
            },
            "Polyline",
        )?;
        let polyline = here_ffi::Polyline::new(&line, &options).map_err(sdk_err("Polyline"))?;
        group.add_object(&polyline).map_err(sdk_err("addObject"))
    }

    fn fit_bounds(&self, widget: &HereWidget, bounds: &BoundingBox) -> Result<(), MapError> {
        let rect = here_ffi::Rect::new(bounds.north, bounds.west, bounds.south, bounds.east)
            .map_err(sdk_err("Rect"))?;
        let data = js_sys::Object::new();
        js_sys::Reflect::set(&data, &JsValue::from_str("bounds"), &rect).map_err(sdk_err("setLookAtData"))?;
        widget
            .map
            .view_model()
            .set_look_at_data(&data, true)
            .map_err(sdk_err("setLookAtData"))
    }

    fn set_center(&self, widget: &HereWidget, center: LatLng, animate: bool) -> Result<(), MapError> {
        widget
            .map
            .set_center(&to_js(&center, "setCenter")?, animate)
            .map_err(sdk_err("setCenter"))
    }

    fn set_zoom(&self, widget: &HereWidget, zoom: f64, animate: bool) -> Result<(), MapError> {
        widget.map.set_zoom(zoom, animate).map_err(sdk_err("setZoom"))
    }

    fn resize(&self, widget: &HereWidget) -> Result<(), MapError> {
        widget.map.view_port().resize().map_err(sdk_err("resize"))
    }
}

/// Página real: DOM + globals de window
#[derive(Default)]
pub struct WebHostPage;

impl WebHostPage {
    pub fn new() -> Self {
        Self
    }
}

impl HostPage for WebHostPage {
    type Element = Element;

    fn find_container(&self, container_id: &str, scan_limit: usize) -> Option<Element> {
        dom::find_element_deep(container_id, scan_limit)
    }

    fn api_key_candidates(&self) -> Vec<Option<String>> {
        API_KEY_GLOBALS
            .iter()
            .map(|name| dom::window_string(name))
            .chain(std::iter::once(dom::meta_content(API_KEY_META_NAME)))
            .collect()
    }

    fn default_container_id(&self) -> Option<String> {
        dom::window_string(CONTAINER_ID_GLOBAL)
    }

    fn debug_enabled(&self) -> bool {
        dom::window_flag(DEBUG_GLOBAL)
    }
}
