//! Generic label helpers shared by every cleaner.
//!
//! These are the building blocks the agency-specific pipelines compose:
//! casing, "at"/"and" glyphs, bound stripping, street types, numbers and the
//! final label pass. Each helper is a total `&str -> String` transform.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Rewrite;

static AT_WORD: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"(?i)\bat\b", "/"));
static AT_SIGN: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"\s*@\s*", " / "));
static AND_WORD: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"(?i)\band\b", "&"));

static BOUNDS: LazyLock<[Rewrite; 2]> = LazyLock::new(|| {
    [
        Rewrite::new(r"(?i)\b(?:north|south|east|west)bound\b", ""),
        Rewrite::new(r"(?i)\b(?:nb|sb|eb|wb)\b", ""),
    ]
});

static VIA: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"(?i)\s+via\s.*$", ""));

/// "St" is only a street when nothing but punctuation, a compass word or the
/// end of the label follows it. "St Clair" stays a saint.
static STREET: LazyLock<Rewrite> = LazyLock::new(|| {
    Rewrite::new(
        r"(?i)\bst\b\.?(\s*(?:$|[^\w\s]|(?:north|south|east|west)\b))",
        "Street${1}",
    )
});

static STREET_TYPES: LazyLock<Vec<Rewrite>> = LazyLock::new(|| {
    [
        ("ave", "Avenue"),
        ("blvd", "Boulevard"),
        ("cir", "Circle"),
        ("cres", "Crescent"),
        ("crt|ct", "Court"),
        ("ctr", "Centre"),
        ("dr", "Drive"),
        ("gdns", "Gardens"),
        ("hwy", "Highway"),
        ("ln", "Lane"),
        ("pkwy", "Parkway"),
        ("pl", "Place"),
        ("rd", "Road"),
        ("sq", "Square"),
        ("stn", "Station"),
        ("terr|ter", "Terrace"),
        ("trl", "Trail"),
    ]
    .into_iter()
    .map(|(abbrev, full)| Rewrite::new(&format!(r"(?i)\b(?:{abbrev})\b\.?"), full))
    .collect()
});

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)(st|nd|rd|th)\b").expect("Invalid regex"));

static ORDINAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b")
        .expect("Invalid regex")
});

static NUMBER_SIGN: LazyLock<Rewrite> =
    LazyLock::new(|| Rewrite::new(r"(?i)\b(?:no|number)\.?\s*(\d+)\b", "#${1}"));

static MC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bMc([a-z])").expect("Invalid regex"));

static EMPTY_PARENS: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"\(\s*\)", ""));
static SPACES: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"\s+", " "));
static SPACE_BEFORE_CLOSE: LazyLock<Rewrite> =
    LazyLock::new(|| Rewrite::new(r"\s+([,.;:)])", "${1}"));
static SPACE_AFTER_OPEN: LazyLock<Rewrite> = LazyLock::new(|| Rewrite::new(r"\(\s+", "("));

/// Re-cases words written entirely in upper case ("KIPLING STN" -> "Kipling Stn").
///
/// Mixed and lower case words are left alone, as are single letters and any
/// word listed in `keep` (compared after trimming surrounding punctuation).
/// A letter is upper-cased when it starts the word or follows a character
/// that is not alphanumeric, so "O'CONNOR" becomes "O'Connor" and "1ST"
/// becomes "1st".
pub fn title_case(text: &str, keep: &[&str]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            push_word(&mut out, &word, keep);
            word.clear();
            out.push(c);
        } else {
            word.push(c);
        }
    }
    push_word(&mut out, &word, keep);

    out
}

fn push_word(out: &mut String, word: &str, keep: &[&str]) {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    let bare = word.trim_matches(|c: char| !c.is_alphanumeric());

    if letters < 2 || word.chars().any(char::is_lowercase) || keep.contains(&bare) {
        out.push_str(word);
        return;
    }

    let mut prev: Option<char> = None;
    for c in word.chars() {
        let starts_segment = prev.is_none_or(|p| !p.is_alphanumeric());
        if c.is_alphabetic() && starts_segment {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }
}

/// Normalizes "at" and "@" to a " / " separator.
pub fn clean_at(text: &str) -> String {
    let text = AT_SIGN.apply(text);
    AT_WORD.apply(&text).into_owned()
}

/// Normalizes the word "and" to "&".
pub fn clean_and(text: &str) -> String {
    AND_WORD.apply(text).into_owned()
}

/// Removes "Eastbound"-style bounds and their NB/SB/EB/WB abbreviations.
pub fn clean_bounds(text: &str) -> String {
    Rewrite::apply_all(BOUNDS.iter(), text)
}

/// Drops a trailing "via ..." clause.
pub fn remove_via(text: &str) -> String {
    VIA.apply(text).into_owned()
}

/// Expands street-type abbreviations ("Ave" -> "Avenue").
pub fn clean_street_types(text: &str) -> String {
    let text = STREET.apply(text);
    Rewrite::apply_all(STREET_TYPES.iter(), &text)
}

/// Normalizes ordinals ("1ST" -> "1st", "Second" -> "2nd") and "No. 5" -> "#5".
pub fn clean_numbers(text: &str) -> String {
    let text = ORDINAL_WORD.replace_all(text, |caps: &Captures| {
        let ordinal = match caps[1].to_lowercase().as_str() {
            "first" => "1st",
            "second" => "2nd",
            "third" => "3rd",
            "fourth" => "4th",
            "fifth" => "5th",
            "sixth" => "6th",
            "seventh" => "7th",
            "eighth" => "8th",
            "ninth" => "9th",
            _ => "10th",
        };
        ordinal.to_string()
    });
    let text = ORDINAL_SUFFIX.replace_all(&text, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_lowercase())
    });
    NUMBER_SIGN.apply(&text).into_owned()
}

/// Restores the "Mc" prefix casing lost by title-casing ("Mccowan" -> "McCowan").
pub fn fix_mc_case(text: &str) -> String {
    MC.replace_all(text, |caps: &Captures| format!("Mc{}", caps[1].to_uppercase()))
        .into_owned()
}

/// Final pass: drops empty parentheses, collapses whitespace, tightens
/// punctuation, trims dangling separators and capitalizes the first letter.
pub fn clean_label(text: &str) -> String {
    let text = EMPTY_PARENS.apply(text);
    let text = SPACES.apply(&text);
    let text = SPACE_BEFORE_CLOSE.apply(&text);
    let text = SPACE_AFTER_OPEN.apply(&text);
    let text = text.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '-' | ',' | '/' | '&' | ';' | ':')
    });

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_upper_words_only() {
        assert_eq!(title_case("KIPLING STN", &[]), "Kipling Stn");
        assert_eq!(title_case("McCowan Rd", &[]), "McCowan Rd");
        assert_eq!(title_case("east", &[]), "east");
    }

    #[test]
    fn test_title_case_segments() {
        assert_eq!(title_case("O'CONNOR DR", &[]), "O'Connor Dr");
        assert_eq!(title_case("YONGE-EGLINTON", &[]), "Yonge-Eglinton");
        assert_eq!(title_case("1ST AVE", &[]), "1st Ave");
    }

    #[test]
    fn test_title_case_keeps_listed_and_single_letters() {
        assert_eq!(title_case("KIPLING GO A", &["GO"]), "Kipling GO A");
        assert_eq!(title_case("(GO)", &["GO"]), "(GO)");
    }

    #[test]
    fn test_title_case_preserves_whitespace() {
        assert_eq!(title_case("  MAIN\tST ", &[]), "  Main\tSt ");
        assert_eq!(title_case("", &[]), "");
    }

    #[test]
    fn test_clean_at() {
        assert_eq!(clean_at("Yonge St At Bloor St"), "Yonge St / Bloor St");
        assert_eq!(clean_at("Yonge St@Bloor St"), "Yonge St / Bloor St");
        assert_eq!(clean_at("Bathurst Station"), "Bathurst Station");
    }

    #[test]
    fn test_clean_and() {
        assert_eq!(clean_and("Dundas and Bay"), "Dundas & Bay");
        assert_eq!(clean_and("Sandown"), "Sandown");
    }

    #[test]
    fn test_clean_bounds() {
        assert_eq!(clean_bounds("Queen St (Eastbound)"), "Queen St ()");
        assert_eq!(clean_bounds("Queen St EB"), "Queen St ");
        assert_eq!(clean_bounds("Boundary Rd"), "Boundary Rd");
    }

    #[test]
    fn test_remove_via() {
        assert_eq!(remove_via("Queens Quay via Union Station"), "Queens Quay");
        assert_eq!(remove_via("Viaduct"), "Viaduct");
    }

    #[test]
    fn test_street_types_expand() {
        assert_eq!(clean_street_types("Kennedy Rd"), "Kennedy Road");
        assert_eq!(clean_street_types("Eglinton Ave. East"), "Eglinton Avenue East");
        assert_eq!(clean_street_types("Kipling Stn"), "Kipling Station");
    }

    #[test]
    fn test_street_versus_saint() {
        assert_eq!(clean_street_types("Main St"), "Main Street");
        assert_eq!(clean_street_types("Queen St West"), "Queen Street West");
        assert_eq!(
            clean_street_types("Yonge St / St Clair Ave"),
            "Yonge Street / St Clair Avenue"
        );
    }

    #[test]
    fn test_clean_numbers() {
        assert_eq!(clean_numbers("1ST Ave"), "1st Ave");
        assert_eq!(clean_numbers("Second Line"), "2nd Line");
        assert_eq!(clean_numbers("Gate No. 5"), "Gate #5");
    }

    #[test]
    fn test_fix_mc_case() {
        assert_eq!(fix_mc_case("Mccowan Rd"), "McCowan Rd");
        assert_eq!(fix_mc_case("McNicoll"), "McNicoll");
    }

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("  queen   st ( ) - "), "Queen st");
        assert_eq!(clean_label("/ Main St ,"), "Main St");
        assert_eq!(clean_label("Union ( Platform 2 )"), "Union (Platform 2)");
        assert_eq!(clean_label(""), "");
    }

    #[test]
    fn test_clean_label_is_idempotent() {
        let once = clean_label(" - Foo  ,  Bar ( ) ");
        assert_eq!(clean_label(&once), once);
    }
}
