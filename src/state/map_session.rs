// ============================================================================
// MAP SESSION - Estado vivo del mapa (una sola sesión por adaptador)
// ============================================================================

use crate::maps::MapSdk;
use crate::models::BoundingBox;

/// Grupo persistente de overlays con su contabilidad local
pub struct OverlayGroup<G> {
    pub handle: G,
    len: usize,
    bounds: Option<BoundingBox>,
}

impl<G> OverlayGroup<G> {
    pub fn new(handle: G) -> Self {
        Self {
            handle,
            len: 0,
            bounds: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Envolvente de todos los miembros actuales
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn record_added(&mut self, bounds: Option<BoundingBox>) {
        self.len += 1;
        self.bounds = match (self.bounds, bounds) {
            (Some(current), Some(added)) => Some(current.union(added)),
            (current, added) => current.or(added),
        };
    }

    pub fn record_cleared(&mut self) {
        self.len = 0;
        self.bounds = None;
    }
}

/// Sesión del mapa: anfitrión, widget, grupos y watcher de tamaño
pub struct MapSession<S: MapSdk> {
    pub host: S::Host,
    pub widget: S::Widget,
    pub routes: OverlayGroup<S::Group>,
    pub markers: OverlayGroup<S::Group>,
    pub watcher: Option<S::Watcher>,
}

impl<S: MapSdk> MapSession<S> {
    /// ¿Esta sesión renderiza en ese elemento? (identidad, no id)
    pub fn is_hosted_by(&self, host: &S::Host) -> bool {
        self.host == *host
    }

    /// Consume la sesión y libera todo en el SDK
    pub fn dispose(self, sdk: &S) {
        sdk.dispose(self.widget, self.watcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatLng;

    #[test]
    fn group_bookkeeping_unions_and_resets() {
        let mut group = OverlayGroup::new(());
        assert!(group.is_empty());

        group.record_added(BoundingBox::from_points(&[LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)]));
        group.record_added(None);
        group.record_added(BoundingBox::from_points(&[LatLng::new(-1.0, 5.0), LatLng::new(0.0, 6.0)]));
        assert_eq!(group.len(), 3);

        let bounds = group.bounds().unwrap();
        assert_eq!((bounds.south, bounds.north, bounds.west, bounds.east), (-1.0, 2.0, 1.0, 6.0));

        group.record_cleared();
        assert!(group.is_empty());
        assert!(group.bounds().is_none());
    }
}
