// ============================================================================
// ERRORES DEL ADAPTADOR
// ============================================================================
// Todos los errores terminan la llamada actual y nada más: no se guarda
// estado de error entre llamadas. Los errores de geometría nunca escalan,
// viajan dentro de los resultados del render.
// ============================================================================

use thiserror::Error;

/// Error que aborta una llamada a `updateMap` / `resizeHereMap`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// El contenedor todavía no existe; se reintenta en la próxima llamada
    #[error("container not found: {container_id}")]
    Lookup { container_id: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Sdk(#[from] MapError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("HERE JS not loaded (window.H missing)")]
    SdkMissing,

    #[error("HERE API key missing")]
    MissingCredential,

    #[error("HERE API key looks invalid ({length} chars)")]
    InvalidCredential { length: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid payload json: {0}")]
    InvalidJson(String),

    #[error("payload must be a JSON object")]
    NotAnObject,
}

/// Un marcador o tramo de ruta descartado
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("route segment has {count} valid points, need at least 2")]
    TooFewPoints { count: usize },

    #[error("route decode failed: {0}")]
    DecodeFailed(String),

    #[error("map rejected overlay: {0}")]
    Rejected(String),
}

/// Fallo de una llamada al SDK de mapas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map is not ready")]
    NotReady,

    #[error("{operation} failed: {message}")]
    SdkCall {
        operation: &'static str,
        message: String,
    },
}

impl MapError {
    pub fn sdk_call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::SdkCall {
            operation,
            message: message.into(),
        }
    }
}

impl From<MapError> for GeometryError {
    fn from(error: MapError) -> Self {
        match error {
            MapError::SdkCall { message, .. } => Self::Rejected(message),
            other => Self::Rejected(other.to_string()),
        }
    }
}
