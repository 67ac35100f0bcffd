use std::collections::BTreeMap;

use serde::Deserialize;

use crate::geometry::Coord;

/// OSM identifier, unique per kind within one source snapshot.
pub type ElementId = i64;

/// Free-form key/value tags. Key-sorted so serialized output is stable.
pub type Tags = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

/// Where an element sits, before any resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Direct coordinates.
    Point(Coord),
    /// Ordered node references (ways).
    Refs(Vec<ElementId>),
    /// Nothing to place the element with.
    Unplaced,
}

/// One raw record. Never mutated after it is read.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub id: ElementId,
    pub tags: Tags,
    pub geometry: Geometry,
}

impl Element {
    pub fn node(id: ElementId, lon: f64, lat: f64, tags: Tags) -> Self {
        Self {
            kind: ElementKind::Node,
            id,
            tags,
            geometry: Geometry::Point(Coord { lon, lat }),
        }
    }

    pub fn way(id: ElementId, refs: Vec<ElementId>, tags: Tags) -> Self {
        Self {
            kind: ElementKind::Way,
            id,
            tags,
            geometry: Geometry::Refs(refs),
        }
    }

    /// Direct coordinates, if the element carries them.
    #[inline]
    pub fn point(&self) -> Option<Coord> {
        match self.geometry {
            Geometry::Point(c) => Some(c),
            _ => None,
        }
    }
}

/// Element as it appears in Overpass JSON.
#[derive(Debug, Deserialize)]
pub(crate) struct RawElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    id: ElementId,
    lat: Option<f64>,
    lon: Option<f64>,
    nodes: Option<Vec<ElementId>>,
    #[serde(default)]
    tags: Option<Tags>,
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        // Coordinates win over references whatever the kind.
        let geometry = match (raw.lat, raw.lon, raw.kind, raw.nodes) {
            (Some(lat), Some(lon), _, _) => Geometry::Point(Coord { lon, lat }),
            (_, _, ElementKind::Way, Some(nodes)) => Geometry::Refs(nodes),
            _ => Geometry::Unplaced,
        };

        Self {
            kind: raw.kind,
            id: raw.id,
            tags: raw.tags.unwrap_or_default(),
            geometry,
        }
    }
}

/// Convenience for building tag maps from literal pairs.
pub fn tags_from<'a, I>(pairs: I) -> Tags
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Element {
        serde_json::from_str::<RawElement>(json).unwrap().into()
    }

    #[test]
    fn node_with_coordinates_is_a_point() {
        let e = parse(r#"{"type":"node","id":5,"lat":10.0,"lon":20.0}"#);
        assert_eq!(e.kind, ElementKind::Node);
        assert_eq!(e.point(), Some(Coord { lon: 20.0, lat: 10.0 }));
        assert!(e.tags.is_empty());
    }

    #[test]
    fn way_keeps_reference_order() {
        let e = parse(r#"{"type":"way","id":9,"nodes":[3,1,2],"tags":{"name":"Mole"}}"#);
        assert_eq!(e.geometry, Geometry::Refs(vec![3, 1, 2]));
        assert_eq!(e.tags.get("name").map(String::as_str), Some("Mole"));
    }

    #[test]
    fn relation_and_bare_node_are_unplaced() {
        let r = parse(r#"{"type":"relation","id":4,"tags":{"seamark:type":"light"}}"#);
        assert_eq!(r.geometry, Geometry::Unplaced);

        let n = parse(r#"{"type":"node","id":6,"lat":1.0}"#);
        assert_eq!(n.geometry, Geometry::Unplaced);
    }
}
