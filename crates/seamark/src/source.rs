//! Raw element collections from the three supported sources:
//! Overpass JSON files, Postpass query responses and OSM PBF extracts.

use std::fs::File;
use std::path::Path;

use log::{debug, warn};
use osmpbf::{Element as PbfElement, ElementReader};
use serde::Deserialize;

use crate::element::{Element, ElementId, RawElement, Tags};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct OverpassRoot {
    elements: Vec<RawElement>,
}

/// Parse an Overpass JSON document (`{"elements":[...]}`).
pub fn parse_overpass(bytes: &[u8]) -> Result<Vec<Element>> {
    let root: OverpassRoot = serde_json::from_slice(bytes)?;
    Ok(root.elements.into_iter().map(Element::from).collect())
}

/// Fast path: prefer mmap; fall back to a single read.
#[cfg(feature = "mmap")]
pub fn read_overpass<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    let file = File::open(path)?;
    let map = unsafe { memmap2::MmapOptions::new().map(&file)? };
    parse_overpass(&map)
}

#[cfg(not(feature = "mmap"))]
pub fn read_overpass<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    let bytes = std::fs::read(path)?;
    parse_overpass(&bytes)
}

#[derive(Debug, Deserialize)]
struct PostpassRoot {
    #[serde(default)]
    features: Vec<PostpassFeature>,
}

#[derive(Debug, Deserialize)]
struct PostpassFeature {
    properties: PostpassProperties,
    #[serde(default)]
    geometry: Option<PostpassGeometry>,
}

#[derive(Debug, Deserialize)]
struct PostpassProperties {
    osm_id: ElementId,
    #[serde(default)]
    tags: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PostpassGeometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Parse a Postpass FeatureCollection. Geometries are already centroids, so
/// every feature becomes a node; features without a usable point are skipped.
pub fn parse_postpass(bytes: &[u8]) -> Result<Vec<Element>> {
    let root: PostpassRoot = serde_json::from_slice(bytes)?;
    debug!("{} features returned", root.features.len());

    let mut elements = Vec::with_capacity(root.features.len());

    for feature in root.features {
        let id = feature.properties.osm_id;

        let coords = feature
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default();
        if coords.len() < 2 {
            warn!("feature {id}: no point geometry, skipped");
            continue;
        }

        let tags = decode_tags(id, feature.properties.tags)?;
        elements.push(Element::node(id, coords[0], coords[1], tags));
    }

    Ok(elements)
}

/// Postpass hands `tags` back as a JSON-encoded string; accept a plain
/// object too.
fn decode_tags(id: ElementId, value: Option<serde_json::Value>) -> Result<Tags> {
    let decoded: std::result::Result<Tags, serde_json::Error> = match value {
        None | Some(serde_json::Value::Null) => return Ok(Tags::new()),
        Some(serde_json::Value::String(s)) => serde_json::from_str(&s),
        Some(other) => serde_json::from_value(other),
    };

    decoded.map_err(|source| Error::TagsDecode { id, source })
}

/// Read nodes and ways from an OSM PBF file. Relations are ignored.
pub fn read_pbf<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    let mut elements = Vec::new();

    ElementReader::from_path(path)?.for_each(|elem| {
        let element = match elem {
            PbfElement::Node(node) => Element::node(
                node.id(),
                node.lon(),
                node.lat(),
                collect_tags(node.tags()),
            ),
            PbfElement::DenseNode(dn) => {
                Element::node(dn.id(), dn.lon(), dn.lat(), collect_tags(dn.tags()))
            }
            PbfElement::Way(way) => {
                Element::way(way.id(), way.refs().collect(), collect_tags(way.tags()))
            }
            PbfElement::Relation(_) => return,
        };
        elements.push(element);
    })?;

    Ok(elements)
}

fn collect_tags<'a, I: Iterator<Item = (&'a str, &'a str)>>(tags: I) -> Tags {
    tags.map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
}

/// Read a local source, picking the format from the extension
/// (`.pbf` is PBF, anything else is Overpass JSON).
pub fn read_elements<P: AsRef<Path>>(path: P) -> Result<Vec<Element>> {
    let path = path.as_ref();
    let is_pbf = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("pbf"))
        .unwrap_or(false);

    if is_pbf {
        debug!("reading {} as PBF", path.display());
        read_pbf(path)
    } else {
        debug!("reading {} as Overpass JSON", path.display());
        read_overpass(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Geometry;
    use crate::geometry::Coord;

    #[test]
    fn overpass_document() {
        let json = br#"{"version":0.6,"elements":[
            {"type":"node","id":1,"lat":0.0,"lon":0.0},
            {"type":"way","id":2,"nodes":[1],"tags":{"seamark:type":"light_minor"}}
        ]}"#;
        let elements = parse_overpass(json).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].geometry, Geometry::Refs(vec![1]));
    }

    #[test]
    fn overpass_without_elements_is_fatal() {
        assert!(matches!(parse_overpass(br#"{"features":[]}"#), Err(Error::Json(_))));
        assert!(matches!(parse_overpass(b"not json"), Err(Error::Json(_))));
    }

    #[test]
    fn postpass_tags_string_is_decoded() {
        let json = br#"{"type":"FeatureCollection","features":[
            {"type":"Feature",
             "geometry":{"type":"Point","coordinates":[20.0,10.0]},
             "properties":{"osm_type":"W","osm_id":42,
                           "tags":"{\"seamark:light:character\":\"Fl\",\"building\":\"yes\"}"}},
            {"type":"Feature",
             "geometry":{"type":"Point","coordinates":[]},
             "properties":{"osm_type":"N","osm_id":43,"tags":{"name":"x"}}},
            {"type":"Feature",
             "geometry":{"type":"Point","coordinates":[1.0,2.0]},
             "properties":{"osm_type":"N","osm_id":44,"tags":{"name":"y"}}}
        ]}"#;
        let elements = parse_postpass(json).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, 42);
        assert_eq!(elements[0].point(), Some(Coord { lon: 20.0, lat: 10.0 }));
        assert_eq!(
            elements[0].tags.get("seamark:light:character").map(String::as_str),
            Some("Fl")
        );
        assert_eq!(elements[1].tags.get("name").map(String::as_str), Some("y"));
    }

    #[test]
    fn postpass_bad_tags_string_is_fatal() {
        let json = br#"{"features":[
            {"geometry":{"coordinates":[1.0,2.0]},
             "properties":{"osm_id":7,"tags":"{broken"}}
        ]}"#;
        assert!(matches!(
            parse_postpass(json),
            Err(Error::TagsDecode { id: 7, .. })
        ));
    }
}
