// ============================================================================
// OVERLAY VIEWMODEL - Marcadores y rutas sobre los grupos de la sesión
// ============================================================================
// Orden fijo dentro de un update: primero se limpia, después se agrega.
// Un marcador o tramo inválido se descarta y el resto del lote sigue.
// ============================================================================

use crate::config::OverlayConfig;
use crate::error::{GeometryError, MapError};
use crate::maps::{MapSdk, MarkerOverlay, RouteStyle};
use crate::models::{BoundingBox, LatLng, MarkerSpec, RouteInput, UpdateCommand};
use crate::state::MapSession;
use crate::utils::marker_icon::marker_svg;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerOutcome {
    pub rendered: usize,
    /// Posición del último marcador válido, en orden de entrada
    pub last_position: Option<LatLng>,
    pub dropped: Vec<GeometryError>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOutcome {
    pub rendered: usize,
    pub dropped: Vec<GeometryError>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutcome {
    pub markers: MarkerOutcome,
    pub route: RouteOutcome,
}

pub struct OverlayViewModel;

impl OverlayViewModel {
    /// Aplica la parte de overlays del comando: limpiar (si toca) y agregar
    pub fn apply<S: MapSdk>(
        sdk: &S,
        session: &mut MapSession<S>,
        command: &UpdateCommand,
        style: &OverlayConfig,
    ) -> Result<RenderOutcome, MapError> {
        if command.should_clear_markers() {
            Self::clear_markers(sdk, session)?;
        }
        if command.should_clear_routes() {
            Self::clear_routes(sdk, session)?;
        }

        let markers = Self::apply_markers(sdk, session, &command.markers, style);
        let route = match &command.route {
            Some(route) => Self::apply_route(sdk, session, route, style),
            None => RouteOutcome::default(),
        };

        for issue in markers.dropped.iter().chain(route.dropped.iter()) {
            log::warn!("⚠️ [HERE] overlay descartado: {}", issue);
        }

        Ok(RenderOutcome { markers, route })
    }

    pub fn clear_markers<S: MapSdk>(sdk: &S, session: &mut MapSession<S>) -> Result<(), MapError> {
        sdk.clear_group(&session.markers.handle)?;
        session.markers.record_cleared();
        log::debug!("🧹 [HERE] marcadores limpiados");
        Ok(())
    }

    pub fn clear_routes<S: MapSdk>(sdk: &S, session: &mut MapSession<S>) -> Result<(), MapError> {
        sdk.clear_group(&session.routes.handle)?;
        session.routes.record_cleared();
        log::debug!("🧹 [HERE] rutas limpiadas");
        Ok(())
    }

    pub fn apply_markers<S: MapSdk>(
        sdk: &S,
        session: &mut MapSession<S>,
        markers: &[MarkerSpec],
        style: &OverlayConfig,
    ) -> MarkerOutcome {
        let mut outcome = MarkerOutcome::default();

        for (index, spec) in markers.iter().enumerate() {
            let position = match spec.position.validated() {
                Ok(position) => position,
                Err(e) => {
                    outcome.dropped.push(e);
                    continue;
                }
            };

            let overlay = Self::marker_overlay(index, position, spec, style);
            match sdk.add_marker(&session.markers.handle, &overlay) {
                Ok(()) => {
                    session.markers.record_added(BoundingBox::from_points(&[position]));
                    outcome.rendered += 1;
                    outcome.last_position = Some(position);
                }
                Err(e) => outcome.dropped.push(e.into()),
            }
        }

        log::info!(
            "📍 [HERE] {} marcadores dibujados ({} descartados)",
            outcome.rendered,
            outcome.dropped.len()
        );
        outcome
    }

    pub fn apply_route<S: MapSdk>(
        sdk: &S,
        session: &mut MapSession<S>,
        route: &RouteInput,
        style: &OverlayConfig,
    ) -> RouteOutcome {
        let mut outcome = RouteOutcome::default();
        let route_style = RouteStyle {
            line_width: style.route_line_width,
            stroke_color: style.brand_color.clone(),
            z_index: style.route_z_index,
        };

        let segments: Vec<Result<Vec<LatLng>, GeometryError>> = match route {
            RouteInput::Encoded(encoded) => encoded
                .iter()
                .map(|segment| {
                    sdk.decode_route(segment)
                        .map_err(|e| GeometryError::DecodeFailed(e.to_string()))
                })
                .collect(),
            RouteInput::Points(points) => vec![Ok(points.clone())],
        };

        for segment in segments {
            let path = match segment.and_then(Self::valid_path) {
                Ok(path) => path,
                Err(e) => {
                    outcome.dropped.push(e);
                    continue;
                }
            };

            match sdk.add_polyline(&session.routes.handle, &path, &route_style) {
                Ok(()) => {
                    session.routes.record_added(BoundingBox::from_points(&path));
                    outcome.rendered += 1;
                }
                Err(e) => outcome.dropped.push(e.into()),
            }
        }

        log::info!(
            "🛣️ [HERE] {} tramos de ruta dibujados ({} descartados)",
            outcome.rendered,
            outcome.dropped.len()
        );
        outcome
    }

    /// Filtra puntos inválidos; un tramo necesita al menos 2 puntos válidos
    fn valid_path(points: Vec<LatLng>) -> Result<Vec<LatLng>, GeometryError> {
        let path: Vec<LatLng> = points.into_iter().filter(LatLng::is_valid).collect();
        if path.len() < 2 {
            return Err(GeometryError::TooFewPoints { count: path.len() });
        }
        Ok(path)
    }

    fn marker_overlay(index: usize, position: LatLng, spec: &MarkerSpec, style: &OverlayConfig) -> MarkerOverlay {
        let label = spec.label.clone().unwrap_or_else(|| (index + 1).to_string());
        let color = spec.color.clone().unwrap_or_else(|| style.brand_color.clone());
        MarkerOverlay {
            position,
            icon_svg: marker_svg(&label, &color, style.marker_size),
            label,
            color,
            title: spec.title.clone(),
            z_index: style.marker_z_index,
        }
    }
}
