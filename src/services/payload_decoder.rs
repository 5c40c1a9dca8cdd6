// ============================================================================
// PAYLOAD DECODER - JSON de updateMap -> UpdateCommand
// ============================================================================
// Los campos se reconocen por presencia. Un campo ausente o con tipo
// inesperado es un no-op para esa faceta, nunca un error. Solo falla el
// JSON inválido o un top-level que no sea objeto.
// ============================================================================

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::models::{LatLng, MarkerSource, MarkerSpec, RouteInput, UpdateCommand};

const STOP_NAME_KEYS: &[&str] = &["name", "title", "label"];
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LNG_KEYS: &[&str] = &["lng", "lon", "longitude"];
const NESTED_POSITION_KEYS: &[&str] = &["position", "location", "coordinates", "coords", "latLng"];

/// Forma cruda del payload; todo opcional y sin tipar
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    clear_markers: Option<Value>,
    clear_polylines: Option<Value>,
    markers: Option<Value>,
    stops: Option<Value>,
    polyline: Option<Value>,
    polyline_encoded: Option<Value>,
    polylines_encoded: Option<Value>,
    center: Option<Value>,
    zoom: Option<Value>,
}

pub struct PayloadDecoder;

impl PayloadDecoder {
    pub fn decode(raw: &str) -> Result<UpdateCommand, DecodeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(DecodeError::NotAnObject);
        }
        let payload =
            RawPayload::deserialize(value).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        let (markers, marker_source) = Self::markers_or_stops(&payload);

        let command = UpdateCommand {
            clear_markers: flag(payload.clear_markers.as_ref()),
            clear_routes: flag(payload.clear_polylines.as_ref()),
            markers,
            marker_source,
            route: Self::route(&payload),
            center: payload.center.as_ref().and_then(Value::as_object).and_then(|center| {
                Some(LatLng::new(number(center.get("lat"))?, number(center.get("lng"))?))
            }),
            zoom: number(payload.zoom.as_ref()).filter(|z| z.is_finite()),
        };

        log::debug!(
            "📦 [HERE] payload: {} marcadores ({:?}), ruta: {}, center: {:?}, zoom: {:?}",
            command.markers.len(),
            command.marker_source,
            command.route.as_ref().map(RouteInput::segment_count).unwrap_or(0),
            command.center,
            command.zoom
        );
        Ok(command)
    }

    /// `markers` si trae algo; si no, `stops` transcodificados
    fn markers_or_stops(payload: &RawPayload) -> (Vec<MarkerSpec>, MarkerSource) {
        if let Some(entries) = non_empty_array(payload.markers.as_ref()) {
            let markers = entries.iter().map(Self::marker).collect();
            return (markers, MarkerSource::Markers);
        }

        let Some(entries) = non_empty_array(payload.stops.as_ref()) else {
            return (Vec::new(), MarkerSource::None);
        };
        let stops = entries
            .iter()
            .filter_map(Self::stop)
            .enumerate()
            .map(|(i, (name, position))| MarkerSpec {
                position,
                label: Some((i + 1).to_string()),
                color: None,
                title: Some(name),
            })
            .collect();
        (stops, MarkerSource::Stops)
    }

    /// Una entrada que no es objeto se conserva como posición inválida para no
    /// correr la numeración por defecto
    fn marker(entry: &Value) -> MarkerSpec {
        let Some(obj) = entry.as_object() else {
            return MarkerSpec {
                position: LatLng::new(f64::NAN, f64::NAN),
                label: None,
                color: None,
                title: None,
            };
        };
        MarkerSpec {
            position: LatLng::new(
                number(obj.get("lat")).unwrap_or(f64::NAN),
                number(obj.get("lng")).unwrap_or(f64::NAN),
            ),
            label: text(obj.get("label")),
            color: text(obj.get("color")),
            title: text(obj.get("title")),
        }
    }

    /// (nombre, posición) de un stop, o None si no sirve como marcador
    fn stop(entry: &Value) -> Option<(String, LatLng)> {
        let obj = entry.as_object()?;
        let name = STOP_NAME_KEYS.iter().find_map(|key| text(obj.get(*key)))?;
        let lat = coordinate(obj, LAT_KEYS)?;
        let lng = coordinate(obj, LNG_KEYS)?;

        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        // (0,0) es el "sin geocodificar" del backend, no un punto real
        if lat == 0.0 && lng == 0.0 {
            return None;
        }
        Some((name, LatLng::new(lat, lng)))
    }

    /// polylinesEncoded > polyline codificado simple > polyline de puntos
    fn route(payload: &RawPayload) -> Option<RouteInput> {
        let encoded: Vec<String> = payload
            .polylines_encoded
            .as_ref()
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(|item| text(Some(item))).collect())
            .unwrap_or_default();
        if !encoded.is_empty() {
            return Some(RouteInput::Encoded(encoded));
        }

        let single = payload
            .polyline_encoded
            .as_ref()
            .filter(|v| v.is_string())
            .or_else(|| payload.polyline.as_ref().filter(|v| v.is_string()))
            .and_then(|v| text(Some(v)));
        if let Some(encoded) = single {
            return Some(RouteInput::Encoded(vec![encoded]));
        }

        let points: Vec<LatLng> = non_empty_array(payload.polyline.as_ref())?
            .iter()
            .map(|p| {
                let obj = p.as_object();
                LatLng::new(
                    number(obj.and_then(|o| o.get("lat"))).unwrap_or(f64::NAN),
                    number(obj.and_then(|o| o.get("lng"))).unwrap_or(f64::NAN),
                )
            })
            .collect();
        Some(RouteInput::Points(points))
    }
}

fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

/// Número JSON o string numérico
fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// String no vacío; los números se aceptan como texto (labels "1", "2"...)
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => n.as_f64().map(number_text),
        _ => None,
    }
}

/// Igual que String(n) en JS para los casos comunes: 1.0 -> "1", 2.5 -> "2.5"
fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Busca la coordenada en el propio stop y luego en objetos anidados
fn coordinate(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number(obj.get(*key))).or_else(|| {
        NESTED_POSITION_KEYS
            .iter()
            .filter_map(|nested| obj.get(*nested).and_then(Value::as_object))
            .find_map(|inner| keys.iter().find_map(|key| number(inner.get(*key))))
    })
}
