//! Effective attribute values under ordered key fallbacks.
//!
//! Light attributes live either on the unnumbered key
//! (`seamark:light:period`) or, for sectored/multi-light structures, on the
//! first numbered light (`seamark:light:1:period`). The unnumbered key wins.

use crate::element::Tags;

/// Key candidates for the human-readable name, highest precedence first.
pub const NAME_KEYS: [&str; 3] = ["name", "seamark:name", "seamark:light:name"];

/// First present, non-empty value among `keys`, tried in order.
pub fn first_present<'t, K: AsRef<str>>(tags: &'t Tags, keys: &[K]) -> Option<&'t str> {
    keys.iter()
        .filter_map(|k| tags.get(k.as_ref()))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

/// Candidate keys for a light attribute, highest precedence first.
pub fn light_keys(attribute: &str) -> [String; 2] {
    [
        format!("seamark:light:{attribute}"),
        format!("seamark:light:1:{attribute}"),
    ]
}

#[inline]
pub fn light_attribute<'t>(tags: &'t Tags, attribute: &str) -> Option<&'t str> {
    first_present(tags, &light_keys(attribute))
}

#[inline]
pub fn name(tags: &Tags) -> Option<&str> {
    first_present(tags, &NAME_KEYS)
}
