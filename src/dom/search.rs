// ============================================================================
// DEEP SEARCH - Recorrido en anchura por documento + shadow roots
// ============================================================================
// Independiente de web_sys: el DOM real implementa `SearchScope` en
// element.rs y los tests usan un árbol en memoria.
// ============================================================================

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::collections::VecDeque;

/// Una raíz donde buscar: el documento o un shadow root
pub trait SearchScope: Sized {
    type Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Cantidad de elementos de esta raíz (sin entrar en shadow roots)
    fn node_count(&self) -> u32;

    /// Shadow root abierto del elemento `index`, si lo tiene
    fn shadow_root_at(&self, index: u32) -> Option<Self>;
}

/// Busca `id` empezando en `root` y bajando por shadow roots anidados.
/// Cada elemento revisado cuenta contra `scan_limit`; al agotarlo se corta.
pub fn find_deep<R: SearchScope>(root: R, id: &str, scan_limit: usize) -> Option<R::Element> {
    let mut scanned = 0usize;
    let mut pending = VecDeque::from([root]);

    while let Some(scope) = pending.pop_front() {
        if let Some(found) = scope.element_by_id(id) {
            return Some(found);
        }

        for i in 0..scope.node_count() {
            if scanned >= scan_limit {
                log::debug!("[HERE] búsqueda de '{}' cortada tras {} nodos", id, scanned);
                return None;
            }
            scanned += 1;

            if let Some(shadow) = scope.shadow_root_at(i) {
                if let Some(found) = shadow.element_by_id(id) {
                    return Some(found);
                }
                pending.push_back(shadow);
            }
        }
    }
    None
}
