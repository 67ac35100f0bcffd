use thiserror::Error;

use crate::element::ElementId;

pub type Result<T> = std::result::Result<T, Error>;

/// Boundary failures. Per-element data problems never surface here; those
/// elements are dropped where they are found.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON source: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PBF read error: {0}")]
    Pbf(#[from] osmpbf::Error),

    #[error("feature {id}: tags string is not a JSON object: {source}")]
    TagsDecode {
        id: ElementId,
        #[source]
        source: serde_json::Error,
    },
}
