// ============================================================================
// CAMERA VIEWMODEL - Vista resultante de un update
// ============================================================================
// Prioridad fija, gana la primera regla que aplica:
//   1. ruta dibujada con envolvente no degenerada -> ajustar a la ruta
//   2. algún marcador dibujado                    -> centrar en el último
//   3. center explícito                           -> centrar (+ zoom si viene)
//   4. nada                                       -> la cámara no se toca
// ============================================================================

use crate::config::MapConfig;
use crate::error::MapError;
use crate::maps::MapSdk;
use crate::models::{BoundingBox, LatLng, UpdateCommand};
use crate::state::MapSession;

use super::overlay_viewmodel::RenderOutcome;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    FitBounds(BoundingBox),
    Center { center: LatLng, zoom: Option<f64> },
    Stay,
}

pub struct CameraViewModel;

impl CameraViewModel {
    pub fn plan(
        command: &UpdateCommand,
        rendered: &RenderOutcome,
        route_bounds: Option<BoundingBox>,
        map_config: &MapConfig,
    ) -> CameraMove {
        if rendered.route.rendered > 0 {
            if let Some(bounds) = route_bounds.filter(|b| !b.is_degenerate()) {
                return CameraMove::FitBounds(bounds);
            }
        }

        if let Some(last) = rendered.markers.last_position {
            return CameraMove::Center {
                center: last,
                zoom: Some(command.zoom.unwrap_or(map_config.marker_focus_zoom)),
            };
        }

        match command.center.filter(LatLng::is_valid) {
            Some(center) => CameraMove::Center {
                center,
                zoom: command.zoom,
            },
            None => CameraMove::Stay,
        }
    }

    /// Ejecuta el movimiento con animación
    pub fn apply<S: MapSdk>(sdk: &S, session: &MapSession<S>, camera: &CameraMove) -> Result<(), MapError> {
        match camera {
            CameraMove::FitBounds(bounds) => {
                log::debug!("🎯 [HERE] ajustando vista a la ruta {:?}", bounds);
                sdk.fit_bounds(&session.widget, bounds)
            }
            CameraMove::Center { center, zoom } => {
                log::debug!("🎯 [HERE] centrando en ({}, {}) zoom {:?}", center.lat, center.lng, zoom);
                sdk.set_center(&session.widget, *center, true)?;
                if let Some(zoom) = zoom {
                    sdk.set_zoom(&session.widget, *zoom, true)?;
                }
                Ok(())
            }
            CameraMove::Stay => Ok(()),
        }
    }
}
