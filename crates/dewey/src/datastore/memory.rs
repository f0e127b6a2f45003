//! In-memory datastore backed by place polygons and point libraries.
//!
//! Good enough for tests, examples, and small deployments. Distances use an
//! equirectangular projection near the query point and polygons are treated
//! as flat; survey-grade GIS belongs in a real backend.

use ahash::AHashMap;

use super::{
    DatastoreError, Geotarget, GeotargetCandidate, GeotargetKind, LibraryDatastore, LibraryRecord,
    MatchTier, NameMatch, ServiceScope, fuzzy_field_match,
};
use crate::location::Location;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A named area with a polygon boundary, vertices as (latitude, longitude).
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    target: Geotarget,
    polygon: Vec<(f64, f64)>,
}

impl Place {
    pub fn new(
        kind: GeotargetKind,
        name: impl AsRef<str>,
        polygon: impl IntoIterator<Item = (f64, f64)>,
    ) -> Self {
        Self {
            target: Geotarget::new(kind, name),
            polygon: polygon.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Geotarget {
        &self.target
    }
}

/// The area a library serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusArea {
    /// One named place; the scope follows the place kind.
    Place(Geotarget),
    /// No geographic bound, for example a digital lender.
    Everywhere,
}

impl FocusArea {
    fn scope(&self) -> ServiceScope {
        match self {
            Self::Everywhere => ServiceScope::SupraLocal,
            Self::Place(target) if target.kind() == GeotargetKind::State => {
                ServiceScope::SupraLocal
            }
            Self::Place(_) => ServiceScope::Local,
        }
    }
}

/// A library plus where it sits and what it serves.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    record: LibraryRecord,
    location: Location,
    focus: FocusArea,
}

impl LibraryEntry {
    pub fn new(record: LibraryRecord, location: Location, focus: FocusArea) -> Self {
        Self {
            record,
            location,
            focus,
        }
    }

    /// Best tier any of `terms` reaches against this record. The name and
    /// aliases match as whole fields; descriptions match word by word, so a
    /// single keyword can hit a long blurb.
    fn match_tier(&self, terms: &[String]) -> Option<MatchTier> {
        if terms
            .iter()
            .any(|term| fuzzy_field_match(&self.record.name, term))
        {
            return Some(MatchTier::Name);
        }
        if terms.iter().any(|term| {
            self.record
                .aliases
                .iter()
                .any(|alias| fuzzy_field_match(alias, term))
        }) {
            return Some(MatchTier::Alias);
        }
        let description = self.record.description.as_deref()?;
        terms
            .iter()
            .any(|term| description_matches(description, term))
            .then_some(MatchTier::Description)
    }
}

fn description_matches(description: &str, term: &str) -> bool {
    description.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| c.is_ascii_punctuation());
        !word.is_empty() && fuzzy_field_match(word, term)
    })
}

/// A [`LibraryDatastore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatastore {
    places: AHashMap<Geotarget, Vec<(f64, f64)>>,
    libraries: Vec<LibraryEntry>,
}

impl MemoryDatastore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_place(mut self, place: Place) -> Self {
        self.places.insert(place.target, place.polygon);
        self
    }

    #[must_use]
    pub fn with_library(mut self, entry: LibraryEntry) -> Self {
        self.libraries.push(entry);
        self
    }

    /// A small Brooklyn-centered dataset used by the examples and tests:
    /// a Brownsville postcode, the city, its county, New York State under
    /// both names, a neighboring city, and eight libraries from a
    /// single-postcode reading room to a nationwide digital lender.
    #[must_use]
    pub fn sample() -> Self {
        let brooklyn_box = [
            (40.570, -74.042),
            (40.740, -74.042),
            (40.740, -73.855),
            (40.570, -73.855),
        ];
        let new_york_box = [
            (40.50, -79.76),
            (45.01, -79.76),
            (45.01, -71.85),
            (40.50, -71.85),
        ];

        let place =
            |lat: f64, lon: f64| Location::new(lat, lon).expect("sample coordinates are valid");
        let focus_on = |kind: GeotargetKind, name: &str| FocusArea::Place(Geotarget::new(kind, name));

        Self::new()
            .with_place(Place::new(
                GeotargetKind::Postcode,
                "11212",
                [
                    (40.654, -73.930),
                    (40.672, -73.930),
                    (40.672, -73.900),
                    (40.654, -73.900),
                ],
            ))
            .with_place(Place::new(
                GeotargetKind::Postcode,
                "11226",
                [
                    (40.635, -73.969),
                    (40.655, -73.969),
                    (40.655, -73.944),
                    (40.635, -73.944),
                ],
            ))
            .with_place(Place::new(GeotargetKind::City, "brooklyn", brooklyn_box))
            .with_place(Place::new(
                GeotargetKind::County,
                "kings county",
                brooklyn_box,
            ))
            .with_place(Place::new(GeotargetKind::State, "ny", new_york_box))
            .with_place(Place::new(GeotargetKind::State, "new york", new_york_box))
            .with_place(Place::new(
                GeotargetKind::City,
                "yonkers",
                [
                    (40.90, -73.91),
                    (40.99, -73.91),
                    (40.99, -73.82),
                    (40.90, -73.82),
                ],
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(1, "Brownsville Community Library"),
                place(40.663, -73.915),
                focus_on(GeotargetKind::Postcode, "11212"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(2, "Brooklyn Public Library").alias("BPL"),
                place(40.6727, -73.9686),
                focus_on(GeotargetKind::City, "brooklyn"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(3, "Center for Brooklyn History")
                    .description("Research archive of Brooklyn history and genealogy"),
                place(40.6946, -73.9926),
                focus_on(GeotargetKind::City, "brooklyn"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(4, "Kings County Law Library"),
                place(40.6935, -73.9900),
                focus_on(GeotargetKind::County, "kings county"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(5, "New York State Library"),
                place(42.6526, -73.7562),
                focus_on(GeotargetKind::State, "ny"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(6, "National Digital Lending Library").alias("NDLL"),
                place(38.8899, -77.0091),
                FocusArea::Everywhere,
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(7, "Yonkers Public Library"),
                place(40.9312, -73.8987),
                focus_on(GeotargetKind::City, "yonkers"),
            ))
            .with_library(LibraryEntry::new(
                LibraryRecord::new(8, "Queens Public Library").alias("QPL"),
                place(40.7070, -73.8080),
                focus_on(GeotargetKind::City, "queens"),
            ))
    }
}

impl LibraryDatastore for MemoryDatastore {
    fn geotarget_candidates(
        &self,
        target: &Geotarget,
        radius_m: f64,
    ) -> Result<Vec<GeotargetCandidate>, DatastoreError> {
        let Some(polygon) = self.places.get(target) else {
            return Ok(Vec::new());
        };
        let mut candidates = Vec::new();
        for entry in &self.libraries {
            let distance_m = distance_to_polygon_m(entry.location, polygon);
            if distance_m > radius_m {
                continue;
            }
            candidates.push(GeotargetCandidate {
                library: entry.record.clone(),
                scope: entry.focus.scope(),
                distance_m,
                serves_target: matches!(&entry.focus, FocusArea::Place(focus) if focus == target),
            });
        }
        Ok(candidates)
    }

    fn geotarget_members(&self, target: &Geotarget) -> Result<Vec<LibraryRecord>, DatastoreError> {
        let polygon = self.places.get(target);
        let mut members = Vec::new();
        for entry in &self.libraries {
            let serves = matches!(&entry.focus, FocusArea::Place(focus) if focus == target);
            let everywhere = entry.focus == FocusArea::Everywhere;
            let inside = polygon.is_some_and(|poly| point_in_polygon(entry.location, poly));
            if serves || everywhere || inside {
                members.push(entry.record.clone());
            }
        }
        Ok(members)
    }

    fn geotarget_distance(
        &self,
        target: &Geotarget,
        location: Location,
    ) -> Result<Option<f64>, DatastoreError> {
        let Some(polygon) = self.places.get(target) else {
            return Ok(None);
        };
        let distance = distance_to_polygon_m(location, polygon);
        Ok(distance.is_finite().then_some(distance))
    }

    fn libraries_matching(
        &self,
        terms: &[String],
        location: Option<Location>,
    ) -> Result<Vec<NameMatch>, DatastoreError> {
        let mut matches = Vec::new();
        for entry in &self.libraries {
            let Some(tier) = entry.match_tier(terms) else {
                continue;
            };
            matches.push(NameMatch {
                library: entry.record.clone(),
                tier,
                distance_m: location.map(|from| haversine_m(from, entry.location)),
            });
        }
        Ok(matches)
    }
}

/// Great-circle distance between two points in meters.
fn haversine_m(a: Location, b: Location) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Distance from a point to a segment, both projected onto a flat plane
/// around the query point. Adequate at the sub-state scales searches use.
fn point_to_segment_m(point: Location, a: (f64, f64), b: (f64, f64)) -> f64 {
    let ref_cos = point.latitude().to_radians().cos();
    let to_xy =
        |lat: f64, lon: f64| (lon.to_radians() * ref_cos * EARTH_RADIUS_M, lat.to_radians() * EARTH_RADIUS_M);

    let (px, py) = to_xy(point.latitude(), point.longitude());
    let (ax, ay) = to_xy(a.0, a.1);
    let (bx, by) = to_xy(b.0, b.1);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Ray cast over the polygon edges; vertices are (latitude, longitude).
fn point_in_polygon(point: Location, polygon: &[(f64, f64)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let (py, px) = (point.latitude(), point.longitude());
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (ay, ax) = polygon[i];
        let (by, bx) = polygon[j];
        if (ay > py) != (by > py) && px < (bx - ax) * (py - ay) / (by - ay) + ax {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Zero inside the polygon, otherwise the distance to the nearest edge.
/// An empty polygon is infinitely far away.
fn distance_to_polygon_m(point: Location, polygon: &[(f64, f64)]) -> f64 {
    if polygon.is_empty() {
        return f64::INFINITY;
    }
    if point_in_polygon(point, polygon) {
        return 0.0;
    }
    let mut nearest = f64::INFINITY;
    for i in 0..polygon.len() {
        let j = (i + 1) % polygon.len();
        nearest = nearest.min(point_to_segment_m(point, polygon[i], polygon[j]));
    }
    nearest
}
