//! Name folding shared by search and image-file lookup.
//!
//! Both paths go through [`fold`] so that a fighter found by searching
//! "jose aldo" is the same fighter whose portrait is `jose_aldo.png`.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical decomposition, combining marks dropped, lowercased.
#[must_use]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"['\u{2019}-]").expect("static regex"))
}

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("static regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// File-name stem for a set of name parts: empty parts are skipped, the rest
/// joined with spaces, folded, stripped to `[a-z0-9]` and joined with `_`.
///
/// `["José", "Aldo"]` becomes `jose_aldo`, `["Jon", "Jones", "Bones"]` becomes
/// `jon_jones_bones`.
#[must_use]
pub fn image_slug(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let folded = fold(&joined);
    let folded = punctuation().replace_all(&folded, "");
    let folded = non_slug_chars().replace_all(&folded, "");
    whitespace_runs()
        .replace_all(folded.trim(), "_")
        .into_owned()
}
