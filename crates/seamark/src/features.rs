use std::io::{self, Write};

use log::debug;
use serde::Serialize;

use crate::attributes;
use crate::element::{Element, ElementId};
use crate::geometry::{self, Coord, PointLookup};
use crate::vocabulary::{Classification, Classifier};

/// A placed element whose light character is not in the vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFeature {
    pub id: ElementId,
    pub coord: Coord,
    pub character: String,
    pub name: Option<String>,
    pub sequence: Option<String>,
    pub period: Option<String>,
    pub group: Option<String>,
}

/// Collect non-conforming, placeable elements in input order.
///
/// The classifier tallies every non-conforming value it sees, including
/// elements later skipped for lack of a position, so `classifier.total()`
/// can exceed the number of returned features.
pub fn emit(
    elements: &[Element],
    lookup: &PointLookup,
    classifier: &mut Classifier,
) -> Vec<ClassifiedFeature> {
    let mut out = Vec::new();

    for element in elements {
        let tags = &element.tags;

        let Some(character) = attributes::light_attribute(tags, "character") else {
            continue;
        };

        if classifier.classify(character) == Classification::Conforming {
            continue;
        }

        let Some(coord) = geometry::resolve(element, lookup) else {
            debug!("element {}: non-conforming {character:?} but unplaceable", element.id);
            continue;
        };

        let owned = |v: Option<&str>| v.map(str::to_owned);

        out.push(ClassifiedFeature {
            id: element.id,
            coord,
            character: character.to_owned(),
            name: owned(attributes::name(tags)),
            sequence: owned(attributes::light_attribute(tags, "sequence")),
            period: owned(attributes::light_attribute(tags, "period")),
            group: owned(attributes::light_attribute(tags, "group")),
        });
    }

    out
}

#[derive(Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<GeoFeature<'a>>,
}

#[derive(Serialize)]
struct GeoFeature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: PointGeometry,
    properties: Properties<'a>,
}

#[derive(Serialize)]
struct PointGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

#[derive(Serialize)]
struct Properties<'a> {
    id: ElementId,
    character: &'a str,
    name: Option<&'a str>,
    sequence: Option<&'a str>,
    period: Option<&'a str>,
    group: Option<&'a str>,
}

impl<'a> From<&'a ClassifiedFeature> for GeoFeature<'a> {
    fn from(f: &'a ClassifiedFeature) -> Self {
        Self {
            kind: "Feature",
            geometry: PointGeometry {
                kind: "Point",
                coordinates: [f.coord.lon, f.coord.lat],
            },
            properties: Properties {
                id: f.id,
                character: &f.character,
                name: f.name.as_deref(),
                sequence: f.sequence.as_deref(),
                period: f.period.as_deref(),
                group: f.group.as_deref(),
            },
        }
    }
}

/// Pretty-printed GeoJSON FeatureCollection; absent properties become `null`.
pub fn write_feature_collection<W: Write>(
    mut w: W,
    features: &[ClassifiedFeature],
) -> io::Result<()> {
    let collection = FeatureCollection {
        kind: "FeatureCollection",
        features: features.iter().map(GeoFeature::from).collect(),
    };

    serde_json::to_writer_pretty(&mut w, &collection)?;
    w.flush()
}
