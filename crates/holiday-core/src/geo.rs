//! Country geometry and the orthographic globe projection.
//!
//! The atlas is read-only. It comes either from the built-in centroid table or
//! from a GeoJSON `FeatureCollection` of `Polygon`/`MultiPolygon` features.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use crate::codes::{alpha3, geometry_name};
use crate::error::{HolidayError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub name: String,
    pub iso_a2: Option<String>,
    pub iso_a3: Option<String>,
    pub rings: Vec<Vec<GeoPoint>>,
    pub centroid: GeoPoint,
}

// lon, lat of a point well inside each country
const BUILTIN_CENTROIDS: [(&str, &str, &str, f64, f64); 15] = [
    ("United States of America", "US", "USA", -98.5, 39.8),
    ("United Kingdom", "GB", "GBR", -2.0, 54.0),
    ("Germany", "DE", "DEU", 10.4, 51.2),
    ("France", "FR", "FRA", 2.2, 46.6),
    ("Japan", "JP", "JPN", 138.3, 36.2),
    ("Canada", "CA", "CAN", -106.3, 56.1),
    ("Australia", "AU", "AUS", 133.8, -25.3),
    ("Brazil", "BR", "BRA", -51.9, -14.2),
    ("India", "IN", "IND", 78.9, 20.6),
    ("Mexico", "MX", "MEX", -102.6, 23.6),
    ("Italy", "IT", "ITA", 12.6, 41.9),
    ("Spain", "ES", "ESP", -3.7, 40.4),
    ("Netherlands", "NL", "NLD", 5.3, 52.1),
    ("Poland", "PL", "POL", 19.1, 51.9),
    ("Sweden", "SE", "SWE", 18.6, 60.1),
];

const NAME_KEYS: [&str; 4] = ["name", "NAME", "ADMIN", "admin"];
const ISO_A3_KEYS: [&str; 3] = ["ISO_A3", "iso_a3", "ADM0_A3"];
const ISO_A2_KEYS: [&str; 2] = ["ISO_A2", "iso_a2"];

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Country shapes keyed by name, alpha-2 and alpha-3.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    shapes: Vec<CountryShape>,
}

impl Atlas {
    /// Centroid markers for the static country list, no outlines.
    pub fn builtin() -> Self {
        let shapes = BUILTIN_CENTROIDS
            .iter()
            .map(|(name, a2, a3, lon, lat)| CountryShape {
                name: name.to_string(),
                iso_a2: Some(a2.to_string()),
                iso_a3: Some(a3.to_string()),
                rings: Vec::new(),
                centroid: GeoPoint::new(*lon, *lat),
            })
            .collect();
        Self { shapes }
    }

    pub fn from_geojson(text: &str) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        let shapes: Vec<CountryShape> = collection
            .features
            .into_iter()
            .filter_map(feature_to_shape)
            .collect();
        debug!(shapes = shapes.len(), "parsed geometry");
        Ok(Self { shapes })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let atlas = Self::from_geojson(&text)?;
        info!(path = %path.display(), shapes = atlas.len(), "loaded world geometry");
        Ok(atlas)
    }

    pub fn shapes(&self) -> &[CountryShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn has_outlines(&self) -> bool {
        self.shapes.iter().any(|s| !s.rings.is_empty())
    }

    /// Find the shape for an API country.
    ///
    /// Tries the alpha-3 table, then the shape's own alpha-2, then the
    /// corrected name, then the raw name.
    pub fn resolve(&self, code: &str, name: &str) -> Result<&CountryShape> {
        let by_alpha3 = alpha3(code).and_then(|three| {
            self.shapes
                .iter()
                .find(|s| s.iso_a3.as_deref().is_some_and(|a3| a3.eq_ignore_ascii_case(three)))
        });
        let by_alpha2 = || {
            self.shapes
                .iter()
                .find(|s| s.iso_a2.as_deref().is_some_and(|a2| a2.eq_ignore_ascii_case(code)))
        };
        let corrected = geometry_name(name);
        let by_name = || {
            self.shapes
                .iter()
                .find(|s| s.name == corrected)
                .or_else(|| self.shapes.iter().find(|s| s.name == name))
        };

        by_alpha3
            .or_else(by_alpha2)
            .or_else(by_name)
            .ok_or_else(|| HolidayError::UnmappedCountry(code.to_string()))
    }
}

fn feature_to_shape(feature: Feature) -> Option<CountryShape> {
    let properties = feature.properties.unwrap_or_default();
    let name = first_property(&properties, &NAME_KEYS)?;

    let rings: Vec<Vec<GeoPoint>> = match feature.geometry? {
        Geometry::Polygon { coordinates } => coordinates.into_iter().map(to_ring).collect(),
        Geometry::MultiPolygon { coordinates } => coordinates
            .into_iter()
            .flatten()
            .map(to_ring)
            .collect(),
        Geometry::Unsupported => return None,
    };

    let centroid = ring_centroid(rings.iter().max_by_key(|r| r.len())?)?;

    Some(CountryShape {
        name,
        iso_a2: first_property(&properties, &ISO_A2_KEYS),
        iso_a3: first_property(&properties, &ISO_A3_KEYS),
        rings,
        centroid,
    })
}

fn first_property(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| properties.get(*k).and_then(Value::as_str))
        // Natural Earth marks unknown codes as -99
        .find(|v| !v.is_empty() && *v != "-99")
        .map(str::to_string)
}

fn to_ring(positions: Vec<Vec<f64>>) -> Vec<GeoPoint> {
    positions
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(|p| GeoPoint::new(p[0], p[1]))
        .collect()
}

fn ring_centroid(ring: &[GeoPoint]) -> Option<GeoPoint> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let lon = ring.iter().map(|p| p.lon).sum::<f64>() / n;
    let lat = ring.iter().map(|p| p.lat).sum::<f64>() / n;
    Some(GeoPoint::new(lon, lat))
}

/// Orthographic projection onto the unit disc, centred on a rotating meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    pub center_lon: f64,
    pub center_lat: f64,
}

impl Default for Orthographic {
    fn default() -> Self {
        Self {
            center_lon: 0.0,
            center_lat: 20.0,
        }
    }
}

impl Orthographic {
    pub fn new(center_lon: f64, center_lat: f64) -> Self {
        Self {
            center_lon: wrap_longitude(center_lon),
            center_lat: center_lat.clamp(-90.0, 90.0),
        }
    }

    /// Spin the globe eastwards by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        self.center_lon = wrap_longitude(self.center_lon + degrees);
    }

    /// Project a point; `None` when it is on the far side of the globe.
    pub fn project(&self, point: &GeoPoint) -> Option<(f64, f64)> {
        let lambda = point.lon.to_radians();
        let phi = point.lat.to_radians();
        let lambda0 = self.center_lon.to_radians();
        let phi0 = self.center_lat.to_radians();
        let delta = lambda - lambda0;

        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * delta.cos();
        if cos_c < 0.0 {
            return None;
        }

        let x = phi.cos() * delta.sin();
        let y = phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * delta.cos();
        Some((x, y))
    }

    /// Line segments of a polyline whose endpoints are both visible.
    pub fn segments(&self, line: &[GeoPoint]) -> Vec<((f64, f64), (f64, f64))> {
        let projected: Vec<Option<(f64, f64)>> = line.iter().map(|p| self.project(p)).collect();
        projected
            .windows(2)
            .filter_map(|w| Some((w[0]?, w[1]?)))
            .collect()
    }

    /// Meridians and parallels every `step` degrees.
    pub fn graticule(step: f64) -> Vec<Vec<GeoPoint>> {
        let step = step.max(5.0);
        let mut lines = Vec::new();

        let mut lon = -180.0;
        while lon < 180.0 {
            lines.push(sample(-80.0, 80.0, |lat| GeoPoint::new(lon, lat)));
            lon += step;
        }

        let mut lat = -60.0;
        while lat <= 60.0 {
            lines.push(sample(-180.0, 180.0, |lon| GeoPoint::new(lon, lat)));
            lat += step;
        }

        lines
    }
}

fn sample(from: f64, to: f64, point: impl Fn(f64) -> GeoPoint) -> Vec<GeoPoint> {
    let mut points = Vec::new();
    let mut v = from;
    while v <= to {
        points.push(point(v));
        v += 5.0;
    }
    points
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
