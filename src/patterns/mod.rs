//! Reusable match/replace rules.
//!
//! A [`Rewrite`] is a compiled pattern plus its replacement. Rules are
//! compiled once into process-wide statics and composed by the cleaners in a
//! fixed order.

pub mod labels;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A compiled regex and the replacement it applies to every match.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pattern: Regex,
    replacement: &'static str,
}

impl Rewrite {
    /// Compiles `pattern`. Only called with literal patterns.
    pub(crate) fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid regex"),
            replacement,
        }
    }

    /// Replaces every match in `text`. Borrows when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }

    /// Applies `rules` one after another.
    pub fn apply_all<'r>(rules: impl IntoIterator<Item = &'r Rewrite>, text: &str) -> String {
        rules
            .into_iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
    }
}

/// Words the stop-name casing pass must leave upper case.
pub const ACRONYMS: &[&str] = &["CI", "CN", "CNR", "GO", "HS", "II", "SS", "TTC"];

// Order matters: "C.N.R." has to be fixed before "C.N." would eat its prefix.
static ABBREVIATIONS: LazyLock<[Rewrite; 6]> = LazyLock::new(|| {
    [
        Rewrite::new(r"(?i)H\.S\.", "HS"),
        Rewrite::new(r"(?i)S\.S\.", "SS"),
        Rewrite::new(r"(?i)C\.N\.R\.", "CNR"),
        Rewrite::new(r"(?i)C\.\s*N\.", "CN"),
        Rewrite::new(r"(?i)C\.I\.", "CI"),
        Rewrite::new(r"(?i)\bii\b", "II"),
    ]
});

static GO: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"(?i)\bgo\b", "GO"));

static SIDE: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"(?i)\bside\b", ""));

/// Collapses dotted abbreviations ("H.S." -> "HS", "C. N." -> "CN").
pub fn fix_abbreviations(text: &str) -> String {
    Rewrite::apply_all(ABBREVIATIONS.iter(), text)
}

/// Puts "GO" back in upper case wherever it stands as a whole word.
pub fn preserve_go(text: &str) -> String {
    GO.apply(text).into_owned()
}

/// Deletes the standalone word "side"; the label pass collapses the gap.
pub fn remove_side(text: &str) -> String {
    SIDE.apply(text).into_owned()
}

/// Builds a case-insensitive pattern matching any of `words` as whole words.
///
/// Spaces inside a phrase match any run of whitespace.
pub(crate) fn clean_words(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("Invalid regex")
}
