use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Coordenada WGS84. Puede llegar inválida desde el payload (NaN, fuera de rango);
/// se valida en el render, no al decodificar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finita y dentro de [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn validated(self) -> Result<Self, GeometryError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeometryError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

/// Rectángulo envolvente (sin tratamiento del antimeridiano)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let seed = Self {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };
        Some(rest.iter().fold(seed, |bbox, p| bbox.extend(*p)))
    }

    pub fn extend(self, point: LatLng) -> Self {
        Self {
            north: self.north.max(point.lat),
            south: self.south.min(point.lat),
            east: self.east.max(point.lng),
            west: self.west.min(point.lng),
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Un punto repetido no define una vista que ajustar
    pub fn is_degenerate(&self) -> bool {
        self.north <= self.south && self.east <= self.west
    }
}
