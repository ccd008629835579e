//! Singular/plural naming heuristic.
//!
//! A list property named `dogs` is written as repeated `dog` keys or repeated `[dog]`
//! sections, and a `dog` key or section read back is matched to `dogs`. These two
//! functions bridge the names. They only handle regular English-ish ASCII identifiers
//! plus a short list of irregular and uncountable words, and the unmarshaller always
//! tries the exact name first, so a property whose plural does not invert cleanly can
//! simply be named with an invariant word.
//!
//! ```rust
//! use serde_inibean::inflect::{pluralize, singularize};
//!
//! assert_eq!(singularize("categories"), "category");
//! assert_eq!(pluralize("box"), "boxes");
//! assert_eq!(singularize(&pluralize("server")), "server");
//! ```

const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Singular words ending in `s` that no suffix rule recognizes.
const SINGULAR_IN_S: &[&str] = &["atlas", "canvas", "gas"];

/// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Returns the singular form of `word`, or `word` unchanged if it does not look plural.
#[must_use]
pub fn singularize(word: &str) -> String {
    if let Some(stem) = invariant_or_irregular(word, |(singular, plural)| (plural, singular)) {
        return stem;
    }

    let lower = word.to_ascii_lowercase();
    let cut = |n: usize| word[..word.len() - n].to_string();

    if lower.len() > 3 && lower.ends_with("ies") && !ends_with_vowel_before(&lower, 3) {
        return format!("{}y", cut(3));
    }
    if ["sses", "shes", "ches", "xes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return cut(2);
    }
    // waltzes, buzzes; but sizes, prizes
    if lower.ends_with("zes") && !ends_with_vowel_before(&lower, 3) {
        return cut(2);
    }
    if lower.ends_with("ses") && is_singular_in_s(&lower[..lower.len() - 2]) {
        return cut(2);
    }
    if is_singular_in_s(&lower) {
        return word.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        return cut(1);
    }

    word.to_string()
}

/// Returns the plural form of `word`.
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = invariant_or_irregular(word, |pair| pair) {
        return stem;
    }

    let lower = word.to_ascii_lowercase();

    if lower.len() > 1 && lower.ends_with('y') && !ends_with_vowel_before(&lower, 1) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{}es", word);
    }

    format!("{}s", word)
}

/// Handles uncountable words and the irregular table on the last `_`-separated segment,
/// so `dog_person` pluralizes to `dog_people`.
fn invariant_or_irregular(
    word: &str,
    orient: impl Fn((&'static str, &'static str)) -> (&'static str, &'static str),
) -> Option<String> {
    let split = word.rfind('_').map_or(0, |i| i + 1);
    let (prefix, last) = word.split_at(split);
    let last_lower = last.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&last_lower.as_str()) {
        return Some(word.to_string());
    }

    IRREGULAR.iter().find_map(|&pair| {
        let (from, to) = orient(pair);
        if last_lower == from {
            Some(format!("{}{}", prefix, match_case(last, to)))
        } else if last_lower == to {
            // already in the requested form
            Some(word.to_string())
        } else {
            None
        }
    })
}

/// `class`, `status`, `alias`, `axis`: words whose final `s` is not a plural suffix.
fn is_singular_in_s(lower: &str) -> bool {
    let last = &lower[lower.rfind('_').map_or(0, |i| i + 1)..];

    last.ends_with("ss")
        || last.ends_with("is")
        || last.ends_with("ias")
        || (last.len() > 2 && last.ends_with("us") && !ends_with_vowel_before(last, 2))
        || SINGULAR_IN_S.contains(&last)
}

fn ends_with_vowel_before(lower: &str, suffix_len: usize) -> bool {
    lower[..lower.len() - suffix_len]
        .chars()
        .last()
        .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
