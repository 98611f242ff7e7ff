//! Case-tolerant property access for upstream objects whose field names drift
//! between `ID`, `id`, `Id` and friends.

use serde_json::{Map, Value};

/// Probe `object` for each candidate name in turn, trying the lowercase,
/// UPPERCASE, Capitalized and as-given spellings of each. The first key that is
/// present wins, even when its value is `null`.
pub fn lookup_property<'a>(object: &'a Map<String, Value>, candidate_names: &[&str]) -> Option<&'a Value> {
    candidate_names
        .iter()
        .flat_map(|name| case_variants(name))
        .find_map(|variant| object.get(&variant))
}

/// Display string of the first matching property, or `default` when none of
/// the variants is present.
pub fn lookup_or(object: &Map<String, Value>, candidate_names: &[&str], default: &str) -> String {
    lookup_property(object, candidate_names)
        .map(super::format::display_value)
        .unwrap_or_else(|| default.to_string())
}

fn case_variants(name: &str) -> [String; 4] {
    [
        name.to_lowercase(),
        name.to_uppercase(),
        capitalize(name),
        name.to_string(),
    ]
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}
