//! Stop name cleaning.

use crate::patterns::labels::{
    clean_at, clean_bounds, clean_label, clean_numbers, clean_street_types, title_case,
};
use crate::patterns::{ACRONYMS, fix_abbreviations, preserve_go, remove_side};

/// Normalizes a raw stop name.
///
/// ```
/// use ttc_bus_cleaner::clean_stop_name;
///
/// assert_eq!(
///     clean_stop_name("YONGE ST AT BLOOR ST EAST SIDE"),
///     "Yonge Street / Bloor Street East"
/// );
/// ```
pub fn clean_stop_name(name: &str) -> String {
    let name = title_case(name, ACRONYMS);
    let name = clean_at(&name);
    let name = remove_side(&name);
    let name = clean_bounds(&name);
    let name = fix_abbreviations(&name);
    let name = preserve_go(&name);
    let name = clean_street_types(&name);
    let name = clean_numbers(&name);
    clean_label(&name)
}
