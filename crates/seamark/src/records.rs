use std::io::{self, Write};

use log::debug;
use serde::Serialize;

use crate::element::{Element, ElementId, Geometry, Tags};
use crate::geometry::{self, Coord, PointLookup};
use crate::tags;

/// Reduced, placed element. Tags are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub id: ElementId,
    pub coord: Coord,
    pub tags: Tags,
}

/// Counters for one reduction run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReduceStats {
    pub source_elements: usize,
    pub dropped_untagged: usize,
    pub dropped_unplaced: usize,
    pub ways_with_centroid: usize,
}

pub fn build(elements: &[Element], lookup: &PointLookup) -> Vec<CanonicalRecord> {
    build_with_stats(elements, lookup).0
}

/// Reduce every element, dropping those with no kept tags or no position.
/// The result is sorted by ascending id.
pub fn build_with_stats(
    elements: &[Element],
    lookup: &PointLookup,
) -> (Vec<CanonicalRecord>, ReduceStats) {
    let mut stats = ReduceStats {
        source_elements: elements.len(),
        ..ReduceStats::default()
    };
    let mut records = Vec::with_capacity(elements.len());

    for element in elements {
        let Some(tags) = tags::reduce(&element.tags) else {
            stats.dropped_untagged += 1;
            continue;
        };

        let Some(coord) = geometry::resolve(element, lookup) else {
            debug!("element {} has no resolvable position", element.id);
            stats.dropped_unplaced += 1;
            continue;
        };

        if matches!(element.geometry, Geometry::Refs(_)) {
            stats.ways_with_centroid += 1;
        }

        records.push(CanonicalRecord {
            id: element.id,
            coord,
            tags,
        });
    }

    // Stable, so equal ids keep source order and reruns stay byte-identical.
    records.sort_by_key(|r| r.id);

    (records, stats)
}

#[derive(Serialize)]
struct RecordLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: ElementId,
    lat: f64,
    lon: f64,
    tags: &'a Tags,
}

/// Write records as `{"elements":[` + one compact object per line + `]}`.
pub fn write_reduced<W: Write>(mut w: W, records: &[CanonicalRecord]) -> io::Result<()> {
    w.write_all(b"{\"elements\":[\n")?;

    for (index, record) in records.iter().enumerate() {
        let line = RecordLine {
            kind: "node",
            id: record.id,
            lat: record.coord.lat,
            lon: record.coord.lon,
            tags: &record.tags,
        };
        serde_json::to_writer(&mut w, &line)?;

        if index + 1 < records.len() {
            w.write_all(b",")?;
        }
        w.write_all(b"\n")?;
    }

    w.write_all(b"]}\n")?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::tags_from;

    fn sample() -> Vec<Element> {
        vec![
            Element::node(30, 1.0, 1.0, tags_from([("seamark:type", "light_minor")])),
            Element::node(1, 0.0, 0.0, Tags::new()),
            Element::node(2, 4.0, 0.0, Tags::new()),
            Element::way(20, vec![1, 2], tags_from([("seamark:light:character", "F")])),
            Element::node(5, 9.0, 9.0, tags_from([("addr:city", "Foo")])),
            Element::way(7, vec![404], tags_from([("name", "Lost")])),
        ]
    }

    #[test]
    fn drops_untagged_and_unplaced_and_sorts() {
        let elements = sample();
        let lookup = PointLookup::from_elements(&elements);
        let (records, stats) = build_with_stats(&elements, &lookup);

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![20, 30]);
        assert_eq!(records[0].coord, Coord { lon: 2.0, lat: 0.0 });

        assert_eq!(
            stats,
            ReduceStats {
                source_elements: 6,
                dropped_untagged: 3,
                dropped_unplaced: 1,
                ways_with_centroid: 1,
            }
        );
    }

    #[test]
    fn output_layout() {
        let records = vec![
            CanonicalRecord {
                id: 1,
                coord: Coord { lon: 20.0, lat: 10.0 },
                tags: tags_from([("name", "Fyr"), ("seamark:type", "light_major")]),
            },
            CanonicalRecord {
                id: 2,
                coord: Coord { lon: -1.5, lat: 2.25 },
                tags: tags_from([("name", "Øresund")]),
            },
        ];

        let mut buf = Vec::new();
        write_reduced(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = concat!(
            "{\"elements\":[\n",
            "{\"type\":\"node\",\"id\":1,\"lat\":10.0,\"lon\":20.0,\"tags\":{\"name\":\"Fyr\",\"seamark:type\":\"light_major\"}},\n",
            "{\"type\":\"node\",\"id\":2,\"lat\":2.25,\"lon\":-1.5,\"tags\":{\"name\":\"Øresund\"}}\n",
            "]}\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_output_is_still_valid_json() {
        let mut buf = Vec::new();
        write_reduced(&mut buf, &[]).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["elements"].as_array().map(Vec::len), Some(0));
    }
}
