// ============================================================================
// ELEMENT HELPERS - Búsqueda del contenedor y lectura de globals
// ============================================================================
// Los frameworks que renderizan con platform views pueden meter el contenedor
// dentro de shadow roots (abiertos). La búsqueda recorre el documento y cada
// shadow root encontrado, con un tope de nodos para acotar el costo.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, ShadowRoot, Window};

use super::search::{find_deep, SearchScope};
use crate::config::truthy_flag;

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Raíz del DOM real con su lista de elementos ya consultada
struct DomScope {
    root: DomRoot,
    nodes: Option<NodeList>,
}

enum DomRoot {
    Document(Document),
    Shadow(ShadowRoot),
}

impl DomScope {
    fn new(root: DomRoot) -> Self {
        let nodes = match &root {
            DomRoot::Document(doc) => doc.query_selector_all("*").ok(),
            DomRoot::Shadow(shadow) => shadow.query_selector_all("*").ok(),
        };
        Self { root, nodes }
    }
}

impl SearchScope for DomScope {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        match &self.root {
            DomRoot::Document(doc) => doc.get_element_by_id(id),
            DomRoot::Shadow(shadow) => shadow.get_element_by_id(id),
        }
    }

    fn node_count(&self) -> u32 {
        self.nodes.as_ref().map_or(0, NodeList::length)
    }

    fn shadow_root_at(&self, index: u32) -> Option<Self> {
        let shadow = self
            .nodes
            .as_ref()?
            .item(index)?
            .dyn_into::<Element>()
            .ok()?
            .shadow_root()?;
        Some(Self::new(DomRoot::Shadow(shadow)))
    }
}

/// Busca el contenedor por id en el documento y en shadow roots anidados,
/// revisando como mucho `scan_limit` nodos
pub fn find_element_deep(id: &str, scan_limit: usize) -> Option<Element> {
    let doc = document()?;
    // Camino rápido sin listar todo el documento
    if let Some(found) = doc.get_element_by_id(id) {
        return Some(found);
    }
    find_deep(DomScope::new(DomRoot::Document(doc)), id, scan_limit)
}

/// String no vacío de window[name]
pub fn window_string(name: &str) -> Option<String> {
    let window = window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_string())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Valor "truthy" de window[name] (true, "true", "1", números distintos de 0)
pub fn window_flag(name: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(name)) else {
        return false;
    };
    if let Some(b) = value.as_bool() {
        return b;
    }
    if let Some(n) = value.as_f64() {
        return n != 0.0 && !n.is_nan();
    }
    value.as_string().is_some_and(|s| truthy_flag(&s))
}

/// Contenido de <meta name="..." content="...">
pub fn meta_content(name: &str) -> Option<String> {
    document()?
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()?
        .get_attribute("content")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
