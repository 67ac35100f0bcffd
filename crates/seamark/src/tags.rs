use crate::element::Tags;

/// Tag namespaces that survive reduction.
pub const KEEP_PREFIXES: &[&str] = &["seamark:"];

/// Individual keys that survive reduction.
pub const KEEP_EXACT: &[&str] = &["name"];

#[inline]
pub fn keep(key: &str) -> bool {
    KEEP_EXACT.contains(&key) || KEEP_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Filtered copy of `tags`, or `None` when nothing is left.
pub fn reduce(tags: &Tags) -> Option<Tags> {
    let out: Tags = tags
        .iter()
        .filter(|(k, _)| keep(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
