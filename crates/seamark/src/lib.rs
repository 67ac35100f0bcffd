//! SEAMARK: reduction and character auditing for OSM lighthouse/beacon data.
//!
//! Two independent passes run over the same raw element collection:
//!
//! - Reduction: keep only `name` and `seamark:*` tags, place every element on
//!   a single point (ways collapse to the centroid of their nodes), sort by id.
//! - Audit: resolve `seamark:light:character` and report every value that is
//!   not in the fixed vocabulary as a GeoJSON point feature.
//!
//! Reduced file layout (UTF-8, one element per line so diffs stay small):
//!
//! ```text
//! {"elements":[
//! {"type":"node","id":1,"lat":..,"lon":..,"tags":{..}},
//! {"type":"node","id":7,"lat":..,"lon":..,"tags":{..}}
//! ]}
//! ```
//!
//! Lines are compact JSON, ordered by ascending id, and the whole file still
//! parses as one JSON document.
//!
//! Audit file layout: a pretty-printed GeoJSON FeatureCollection of Points,
//! properties `id`, `character`, `name`, `sequence`, `period`, `group`
//! (`null` when absent).

pub mod attributes;
pub mod element;
pub mod error;
pub mod features;
pub mod geometry;
pub mod records;
pub mod source;
pub mod tags;
pub mod vocabulary;

pub use element::{Element, ElementId, ElementKind, Geometry, Tags};
pub use error::{Error, Result};
pub use features::{emit, write_feature_collection, ClassifiedFeature};
pub use geometry::{Coord, PointLookup};
pub use records::{build, build_with_stats, write_reduced, CanonicalRecord, ReduceStats};
pub use vocabulary::{Classification, Classifier, Vocabulary};
