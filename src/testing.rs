// Fakes en memoria de MapSdk / HostPage para los tests nativos

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::MapError;
use crate::maps::{HostPage, InitialView, MapSdk, MarkerOverlay, RouteStyle};
use crate::models::{BoundingBox, LatLng};
use crate::state::{MapSession, OverlayGroup};

pub const FAKE_API_KEY: &str = "test-api-key-0123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeElement(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeWidget(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeGroup(pub usize);

#[derive(Debug)]
pub struct FakeWatcher;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraCall {
    Fit(BoundingBox),
    Center(LatLng, bool),
    Zoom(f64, bool),
}

#[derive(Default)]
struct GroupContents {
    markers: Vec<MarkerOverlay>,
    polylines: Vec<Vec<LatLng>>,
}

#[derive(Default)]
struct SdkState {
    unloaded: bool,
    widgets_created: usize,
    widgets_disposed: usize,
    watchers_disconnected: usize,
    resizes: usize,
    groups: Vec<GroupContents>,
    camera: Vec<CameraCall>,
    calls: Vec<String>,
    last_view: Option<InitialView>,
    last_api_key: Option<String>,
}

/// SDK falso: registra cada llamada y guarda el contenido de los grupos
#[derive(Clone, Default)]
pub struct FakeSdk {
    state: Rc<RefCell<SdkState>>,
}

impl FakeSdk {
    pub fn set_loaded(&self, loaded: bool) {
        self.state.borrow_mut().unloaded = !loaded;
    }

    pub fn widgets_created(&self) -> usize {
        self.state.borrow().widgets_created
    }

    pub fn widgets_disposed(&self) -> usize {
        self.state.borrow().widgets_disposed
    }

    pub fn watchers_disconnected(&self) -> usize {
        self.state.borrow().watchers_disconnected
    }

    pub fn resizes(&self) -> usize {
        self.state.borrow().resizes
    }

    pub fn last_initial_view(&self) -> Option<InitialView> {
        self.state.borrow().last_view
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.state.borrow().last_api_key.clone()
    }

    pub fn markers_in(&self, group: &FakeGroup) -> Vec<MarkerOverlay> {
        self.state.borrow().groups[group.0].markers.clone()
    }

    pub fn polylines_in(&self, group: &FakeGroup) -> Vec<Vec<LatLng>> {
        self.state.borrow().groups[group.0].polylines.clone()
    }

    pub fn camera_calls(&self) -> Vec<CameraCall> {
        self.state.borrow().camera.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl MapSdk for FakeSdk {
    type Host = FakeElement;
    type Widget = FakeWidget;
    type Group = FakeGroup;
    type Watcher = FakeWatcher;

    fn is_loaded(&self) -> bool {
        !self.state.borrow().unloaded
    }

    fn create_widget(&self, host: &FakeElement, api_key: &str, view: &InitialView) -> Result<FakeWidget, MapError> {
        self.record(format!("create_widget {}", host.0));
        let mut state = self.state.borrow_mut();
        state.widgets_created += 1;
        state.last_view = Some(*view);
        state.last_api_key = Some(api_key.to_string());
        Ok(FakeWidget(state.widgets_created))
    }

    fn create_group(&self, _widget: &FakeWidget) -> Result<FakeGroup, MapError> {
        let mut state = self.state.borrow_mut();
        state.groups.push(GroupContents::default());
        Ok(FakeGroup(state.groups.len() - 1))
    }

    fn watch_resize(&self, _host: &FakeElement, _widget: &FakeWidget) -> Result<FakeWatcher, MapError> {
        Ok(FakeWatcher)
    }

    fn dispose(&self, widget: FakeWidget, watcher: Option<FakeWatcher>) {
        self.record(format!("dispose {}", widget.0));
        let mut state = self.state.borrow_mut();
        state.widgets_disposed += 1;
        if watcher.is_some() {
            state.watchers_disconnected += 1;
        }
    }

    fn clear_group(&self, group: &FakeGroup) -> Result<(), MapError> {
        self.record(format!("clear_group {}", group.0));
        let mut state = self.state.borrow_mut();
        let contents = &mut state.groups[group.0];
        contents.markers.clear();
        contents.polylines.clear();
        Ok(())
    }

    fn add_marker(&self, group: &FakeGroup, marker: &MarkerOverlay) -> Result<(), MapError> {
        self.record(format!("add_marker {}", group.0));
        self.state.borrow_mut().groups[group.0].markers.push(marker.clone());
        Ok(())
    }

    /// Formato de prueba: "lat,lng;lat,lng"; un "!" inicial simula un polyline corrupto
    fn decode_route(&self, encoded: &str) -> Result<Vec<LatLng>, MapError> {
        if encoded.starts_with('!') {
            return Err(MapError::sdk_call("fromFlexiblePolyline", "bad polyline"));
        }
        encoded
            .split(';')
            .map(|pair| -> Result<LatLng, MapError> {
                let (lat, lng) = pair
                    .split_once(',')
                    .ok_or_else(|| MapError::sdk_call("fromFlexiblePolyline", pair.to_string()))?;
                let parse = |v: &str| {
                    v.trim()
                        .parse::<f64>()
                        .map_err(|e| MapError::sdk_call("fromFlexiblePolyline", e.to_string()))
                };
                Ok(LatLng::new(parse(lat)?, parse(lng)?))
            })
            .collect()
    }

    fn add_polyline(&self, group: &FakeGroup, path: &[LatLng], _style: &RouteStyle) -> Result<(), MapError> {
        self.record(format!("add_polyline {}", group.0));
        self.state.borrow_mut().groups[group.0].polylines.push(path.to_vec());
        Ok(())
    }

    fn fit_bounds(&self, _widget: &FakeWidget, bounds: &BoundingBox) -> Result<(), MapError> {
        self.state.borrow_mut().camera.push(CameraCall::Fit(*bounds));
        Ok(())
    }

    fn set_center(&self, _widget: &FakeWidget, center: LatLng, animate: bool) -> Result<(), MapError> {
        self.state.borrow_mut().camera.push(CameraCall::Center(center, animate));
        Ok(())
    }

    fn set_zoom(&self, _widget: &FakeWidget, zoom: f64, animate: bool) -> Result<(), MapError> {
        self.state.borrow_mut().camera.push(CameraCall::Zoom(zoom, animate));
        Ok(())
    }

    fn resize(&self, _widget: &FakeWidget) -> Result<(), MapError> {
        self.state.borrow_mut().resizes += 1;
        Ok(())
    }
}

struct PageState {
    containers: HashMap<String, FakeElement>,
    next_element: u32,
    api_key: Option<String>,
    default_container: Option<String>,
    debug: bool,
    lookups: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            containers: HashMap::new(),
            next_element: 1,
            api_key: Some(FAKE_API_KEY.to_string()),
            default_container: None,
            debug: false,
            lookups: 0,
        }
    }
}

/// Página falsa: ids -> elementos con identidad numérica
#[derive(Clone, Default)]
pub struct FakePage {
    state: Rc<RefCell<PageState>>,
}

impl FakePage {
    pub fn with_container(id: &str) -> Self {
        let page = Self::default();
        page.add_container(id);
        page
    }

    pub fn add_container(&self, id: &str) {
        let mut state = self.state.borrow_mut();
        let element = FakeElement(state.next_element);
        state.next_element += 1;
        state.containers.insert(id.to_string(), element);
    }

    /// El framework destruye y recrea el contenedor con el mismo id
    pub fn recreate(&self, id: &str) {
        self.add_container(id);
    }

    pub fn remove_container(&self, id: &str) {
        self.state.borrow_mut().containers.remove(id);
    }

    pub fn element(&self, id: &str) -> Option<FakeElement> {
        self.state.borrow().containers.get(id).copied()
    }

    pub fn set_api_key(&self, key: Option<&str>) {
        self.state.borrow_mut().api_key = key.map(str::to_string);
    }

    pub fn set_default_container(&self, id: Option<&str>) {
        self.state.borrow_mut().default_container = id.map(str::to_string);
    }

    pub fn set_debug(&self, debug: bool) {
        self.state.borrow_mut().debug = debug;
    }

    pub fn lookups(&self) -> usize {
        self.state.borrow().lookups
    }
}

impl HostPage for FakePage {
    type Element = FakeElement;

    fn find_container(&self, container_id: &str, _scan_limit: usize) -> Option<FakeElement> {
        let mut state = self.state.borrow_mut();
        state.lookups += 1;
        state.containers.get(container_id).copied()
    }

    fn api_key_candidates(&self) -> Vec<Option<String>> {
        vec![self.state.borrow().api_key.clone()]
    }

    fn default_container_id(&self) -> Option<String> {
        self.state.borrow().default_container.clone()
    }

    fn debug_enabled(&self) -> bool {
        self.state.borrow().debug
    }
}

/// Sesión armada directamente sobre el SDK falso, sin pasar por SessionService
pub fn fake_session(sdk: &FakeSdk) -> MapSession<FakeSdk> {
    let widget = FakeWidget(0);
    let routes = sdk.create_group(&widget).unwrap_or(FakeGroup(0));
    let markers = sdk.create_group(&widget).unwrap_or(FakeGroup(1));
    MapSession {
        host: FakeElement(0),
        widget,
        routes: OverlayGroup::new(routes),
        markers: OverlayGroup::new(markers),
        watcher: None,
    }
}
