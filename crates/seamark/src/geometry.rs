//! Single-point placement for nodes and ways.
//!
//! Way centroids are the plain arithmetic mean of the member node
//! coordinates in degrees. That is not a geodesic centroid, but beacon
//! structures are small enough relative to chart scale for it not to matter.

use hashbrown::HashMap;
use nohash_hasher::BuildNoHashHasher;

use crate::element::{Element, ElementId, ElementKind, Geometry};

/// WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

/// Read-only node coordinate index, built once per run.
#[derive(Debug, Default)]
pub struct PointLookup {
    coords: HashMap<ElementId, Coord, BuildNoHashHasher<ElementId>>,
}

impl PointLookup {
    /// Index every node that carries coordinates.
    pub fn from_elements(elements: &[Element]) -> Self {
        let mut coords: HashMap<ElementId, Coord, BuildNoHashHasher<ElementId>> =
            HashMap::with_hasher(BuildNoHashHasher::default());

        for element in elements {
            if element.kind != ElementKind::Node {
                continue;
            }
            if let Some(c) = element.point() {
                coords.insert(element.id, c);
            }
        }

        Self { coords }
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> Option<Coord> {
        self.coords.get(&id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Place an element on a single point, or `None` if it cannot be placed.
///
/// References missing from the lookup are skipped. Summation follows the
/// element's own reference order so the result is bit-for-bit reproducible.
pub fn resolve(element: &Element, lookup: &PointLookup) -> Option<Coord> {
    match &element.geometry {
        Geometry::Point(c) => Some(*c),
        Geometry::Refs(refs) => centroid(refs.iter().filter_map(|&id| lookup.get(id))),
        Geometry::Unplaced => None,
    }
}

fn centroid<I: Iterator<Item = Coord>>(coords: I) -> Option<Coord> {
    let (mut sum_lon, mut sum_lat) = (0.0f64, 0.0f64);
    let mut count = 0usize;

    for c in coords {
        sum_lon += c.lon;
        sum_lat += c.lat;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(Coord {
        lon: sum_lon / n,
        lat: sum_lat / n,
    })
}
