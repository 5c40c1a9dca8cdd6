// ============================================================================
// SESSION SERVICE - Ciclo de vida de la sesión del mapa
// ============================================================================
// ensure: reutiliza la sesión si el contenedor resuelto es el mismo elemento;
// si el framework anfitrión recreó el contenedor (re-parent), destruye la
// sesión vieja y construye una nueva. Configuración (API key, debug) se lee
// solo al construir.
// ============================================================================

use crate::config::AdapterConfig;
use crate::error::{AdapterError, ConfigurationError, MapError};
use crate::maps::{HostPage, InitialView, MapSdk};
use crate::models::LatLng;
use crate::state::{MapSession, OverlayGroup};

pub struct SessionService<S, P>
where
    S: MapSdk,
    P: HostPage<Element = S::Host>,
{
    sdk: S,
    page: P,
    config: AdapterConfig,
    session: Option<MapSession<S>>,
}

impl<S, P> SessionService<S, P>
where
    S: MapSdk,
    P: HostPage<Element = S::Host>,
{
    pub fn new(sdk: S, page: P, config: AdapterConfig) -> Self {
        Self {
            sdk,
            page,
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&MapSession<S>> {
        self.session.as_ref()
    }

    /// Garantiza una sesión viva sobre el contenedor pedido y la devuelve junto al SDK
    pub fn ensure(&mut self, container_id: Option<&str>) -> Result<(&S, &mut MapSession<S>), AdapterError> {
        if !self.sdk.is_loaded() {
            return Err(ConfigurationError::SdkMissing.into());
        }

        let container_id = self
            .config
            .container_id(container_id, self.page.default_container_id());
        let host = self
            .page
            .find_container(&container_id, self.config.lookup_config.max_scan_nodes)
            .ok_or_else(|| AdapterError::Lookup {
                container_id: container_id.clone(),
            })?;

        let reusable = self
            .session
            .as_ref()
            .is_some_and(|session| session.is_hosted_by(&host));

        if !reusable {
            if self.session.is_some() {
                log::info!("🔁 [HERE] el contenedor '{}' cambió, reconstruyendo el mapa", container_id);
                self.dispose();
            }
            let session = self.build(host)?;
            self.session = Some(session);
            log::info!("✅ [HERE] mapa inicializado en '{}'", container_id);
        }

        let sdk = &self.sdk;
        match self.session.as_mut() {
            Some(session) => Ok((sdk, session)),
            None => Err(MapError::NotReady.into()),
        }
    }

    /// Destruye la sesión actual (si existe) y libera el widget en el SDK
    pub fn dispose(&mut self) {
        if let Some(session) = self.session.take() {
            session.dispose(&self.sdk);
            log::debug!("🗑️ [HERE] sesión del mapa liberada");
        }
    }

    /// Recalcula el viewport; no hace nada si todavía no hay mapa
    pub fn resize(&mut self, container_id: Option<&str>) -> Result<bool, AdapterError> {
        if self.session.is_none() {
            log::debug!("[HERE] resize sin mapa, ignorado");
            return Ok(false);
        }
        let (sdk, session) = self.ensure(container_id)?;
        sdk.resize(&session.widget)?;
        Ok(true)
    }

    /// Debug si lo pide la página o la configuración de compilación
    pub fn log_filter(&self) -> log::LevelFilter {
        if self.page.debug_enabled() || self.config.debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    fn build(&self, host: S::Host) -> Result<MapSession<S>, AdapterError> {
        let api_key = self.config.resolve_api_key(self.page.api_key_candidates())?;

        log::set_max_level(self.log_filter());

        let map_config = &self.config.map_config;
        let view = InitialView {
            center: LatLng::new(map_config.default_center_lat, map_config.default_center_lng),
            zoom: map_config.default_zoom,
        };
        let widget = self.sdk.create_widget(&host, &api_key, &view)?;

        // Rutas primero: los marcadores quedan encima
        let groups = self
            .sdk
            .create_group(&widget)
            .and_then(|routes| Ok((routes, self.sdk.create_group(&widget)?)));
        let (routes, markers) = match groups {
            Ok(groups) => groups,
            Err(e) => {
                self.sdk.dispose(widget, None);
                return Err(e.into());
            }
        };

        let watcher = match self.sdk.watch_resize(&host, &widget) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                log::warn!("⚠️ [HERE] no se pudo observar el tamaño del contenedor: {}", e);
                None
            }
        };

        Ok(MapSession {
            host,
            widget,
            routes: OverlayGroup::new(routes),
            markers: OverlayGroup::new(markers),
            watcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePage, FakeSdk};

    fn service(sdk: &FakeSdk, page: &FakePage) -> SessionService<FakeSdk, FakePage> {
        SessionService::new(sdk.clone(), page.clone(), AdapterConfig::default())
    }

    #[test]
    fn same_element_is_reused() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        sessions.ensure(None).unwrap();
        sessions.ensure(Some("here_map_container")).unwrap();

        assert_eq!(sdk.widgets_created(), 1);
        assert_eq!(sdk.widgets_disposed(), 0);
    }

    #[test]
    fn replaced_element_is_torn_down_and_rebuilt_once() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        sessions.ensure(None).unwrap();
        page.recreate("here_map_container");
        sessions.ensure(None).unwrap();
        sessions.ensure(None).unwrap();

        assert_eq!(sdk.widgets_created(), 2);
        assert_eq!(sdk.widgets_disposed(), 1);
        assert_eq!(sdk.watchers_disconnected(), 1);
        assert!(sessions.session().unwrap().is_hosted_by(&page.element("here_map_container").unwrap()));
    }

    #[test]
    fn initial_view_and_group_order() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        let (_, session) = sessions.ensure(None).unwrap();
        assert!(session.routes.handle.0 < session.markers.handle.0);
        assert_eq!(
            sdk.last_initial_view(),
            Some(InitialView {
                center: LatLng::new(10.776, 106.700),
                zoom: 12.0
            })
        );
        assert_eq!(sdk.last_api_key().as_deref(), Some("test-api-key-0123"));
    }

    #[test]
    fn missing_sdk_fails_before_lookup() {
        let sdk = FakeSdk::default();
        sdk.set_loaded(false);
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        let err = sessions.ensure(None).err().unwrap();
        assert_eq!(err, AdapterError::Configuration(ConfigurationError::SdkMissing));
        assert_eq!(page.lookups(), 0);
        assert!(!sessions.has_session());
    }

    #[test]
    fn credential_problems_create_no_session() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        page.set_api_key(None);
        let mut sessions = service(&sdk, &page);
        assert_eq!(
            sessions.ensure(None).err(),
            Some(AdapterError::Configuration(ConfigurationError::MissingCredential))
        );

        page.set_api_key(Some("tooshort"));
        assert_eq!(
            sessions.ensure(None).err(),
            Some(AdapterError::Configuration(ConfigurationError::InvalidCredential { length: 8 }))
        );
        assert_eq!(sdk.widgets_created(), 0);
        assert!(!sessions.has_session());
    }

    #[test]
    fn lookup_failure_is_recoverable_and_keeps_the_live_session() {
        let sdk = FakeSdk::default();
        let page = FakePage::default();
        let mut sessions = service(&sdk, &page);

        assert_eq!(
            sessions.ensure(Some("late_container")).err(),
            Some(AdapterError::Lookup {
                container_id: "late_container".into()
            })
        );

        page.add_container("late_container");
        sessions.ensure(Some("late_container")).unwrap();

        page.remove_container("late_container");
        assert!(sessions.ensure(Some("late_container")).is_err());
        assert!(sessions.has_session());
        assert_eq!(sdk.widgets_disposed(), 0);
    }

    #[test]
    fn page_override_sets_the_default_container() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("flutter_map_view");
        page.set_default_container(Some("flutter_map_view"));
        let mut sessions = service(&sdk, &page);

        sessions.ensure(None).unwrap();
        assert!(sessions.has_session());
    }

    #[test]
    fn resize_without_session_is_a_no_op() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        assert_eq!(sessions.resize(None), Ok(false));
        assert_eq!(sdk.widgets_created(), 0);

        sessions.ensure(None).unwrap();
        assert_eq!(sessions.resize(None), Ok(true));
        assert_eq!(sdk.resizes(), 1);
    }

    #[test]
    fn dispose_releases_everything() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let mut sessions = service(&sdk, &page);

        sessions.ensure(None).unwrap();
        sessions.dispose();
        sessions.dispose();

        assert!(!sessions.has_session());
        assert_eq!(sdk.widgets_disposed(), 1);
    }

    #[test]
    fn debug_toggle_comes_from_page_or_build_config() {
        let sdk = FakeSdk::default();
        let page = FakePage::with_container("here_map_container");
        let sessions = service(&sdk, &page);
        assert_eq!(sessions.log_filter(), log::LevelFilter::Info);

        page.set_debug(true);
        assert_eq!(sessions.log_filter(), log::LevelFilter::Debug);

        page.set_debug(false);
        let config = AdapterConfig {
            debug_logging: true,
            ..AdapterConfig::default()
        };
        let sessions = SessionService::new(sdk.clone(), page.clone(), config);
        assert_eq!(sessions.log_filter(), log::LevelFilter::Debug);
    }
}
