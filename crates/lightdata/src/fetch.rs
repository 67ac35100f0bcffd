use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use seamark::Element;

/// Every point, line or polygon carrying a light sequence or character,
/// reduced to its centroid server-side.
pub const POSTPASS_QUERY: &str = "\
SELECT
  pp.osm_type,
  pp.osm_id,
  pp.tags,
  ST_Centroid(pp.geom) AS geom
FROM postpass_pointlinepolygon pp
WHERE
  pp.tags ? 'seamark:light:sequence'
  OR pp.tags ? 'seamark:light:1:sequence'
  OR pp.tags ? 'seamark:light:character'
  OR pp.tags ? 'seamark:light:1:character'
";

/// One POST to the Postpass interpreter. Timeouts and non-2xx responses are
/// errors; there is no retry.
pub fn fetch_postpass(url: &str, timeout: Duration) -> Result<Vec<Element>> {
    info!("Querying Postpass API at {url} ...");

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("lightdata/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;

    let body = client
        .post(url)
        .form(&[("data", POSTPASS_QUERY)])
        .send()
        .context("Postpass request failed")?
        .error_for_status()
        .context("Postpass returned an error status")?
        .bytes()
        .context("reading Postpass response")?;

    let elements =
        seamark::source::parse_postpass(&body).context("decoding Postpass response")?;
    info!("  {} usable features returned", elements.len());

    Ok(elements)
}
