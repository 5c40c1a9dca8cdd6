// ============================================================================
// APP - Adaptador principal: decoder -> sesión -> overlays -> cámara
// ============================================================================

use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::maps::{HostPage, MapSdk};
use crate::services::{PayloadDecoder, SessionService};
use crate::viewmodels::{CameraMove, CameraViewModel, OverlayViewModel, RenderOutcome};

/// Resumen de un update aplicado
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub rendered: RenderOutcome,
    pub camera: CameraMove,
}

/// Adaptador del mapa: dueño único de la sesión
pub struct MapAdapter<S, P>
where
    S: MapSdk,
    P: HostPage<Element = S::Host>,
{
    sessions: SessionService<S, P>,
}

impl<S, P> MapAdapter<S, P>
where
    S: MapSdk,
    P: HostPage<Element = S::Host>,
{
    pub fn new(sdk: S, page: P, config: AdapterConfig) -> Self {
        Self {
            sessions: SessionService::new(sdk, page, config),
        }
    }

    /// Aplica un payload de updateMap. Si el JSON es inválido no se toca nada,
    /// ni siquiera se crea la sesión.
    pub fn update_map(&mut self, payload: &str, container_id: Option<&str>) -> Result<UpdateReport, AdapterError> {
        let command = PayloadDecoder::decode(payload)?;

        let overlay_config = self.sessions.config().overlay_config.clone();
        let map_config = self.sessions.config().map_config.clone();

        let (sdk, session) = self.sessions.ensure(container_id)?;
        let rendered = OverlayViewModel::apply(sdk, session, &command, &overlay_config)?;

        let camera = CameraViewModel::plan(&command, &rendered, session.routes.bounds(), &map_config);
        CameraViewModel::apply(sdk, session, &camera)?;

        Ok(UpdateReport { rendered, camera })
    }

    /// Contrato booleano de ensureSession
    pub fn ensure_session(&mut self, container_id: Option<&str>) -> bool {
        match self.sessions.ensure(container_id) {
            Ok(_) => true,
            Err(e) => {
                log::error!("❌ [HERE] {}", e);
                false
            }
        }
    }

    pub fn resize(&mut self, container_id: Option<&str>) -> Result<bool, AdapterError> {
        self.sessions.resize(container_id)
    }

    pub fn dispose(&mut self) {
        self.sessions.dispose();
    }

    pub fn sessions(&self) -> &SessionService<S, P> {
        &self.sessions
    }
}
