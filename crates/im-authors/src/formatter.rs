//! Personal-name formatting into the ABNT form `SURNAME, Given Names`
//!
//! Provides functions for:
//! - Collapsing whitespace in raw catalog input
//! - Converting "Given Surname" and "Surname, Given" into `SURNAME, Given`
//! - Case predicates and title-casing used by list reconstruction
//! - Splitting multi-line form input into one name per line

/// Format a raw personal name as `SURNAME, Given Names`.
///
/// - Whitespace is trimmed and internal runs collapse to one space.
/// - With a comma, the text before the first comma is the surname
///   (uppercased) and the rest the given names (trimmed, casing kept).
/// - Without a comma, the last word is the surname and the preceding words
///   are the given names.
/// - A single word is a mononym and is only uppercased.
///
/// A comma followed by nothing is ignored, so `"Bach,"` gives `"BACH"` and
/// the output is always a fixed point: `format_name(&format_name(s)) ==
/// format_name(s)`.
///
/// # Examples
/// ```
/// use im_authors::format_name;
/// assert_eq!(format_name("Murilo Mendes"), "MENDES, Murilo");
/// assert_eq!(format_name("Bonvicino, Régis"), "BONVICINO, Régis");
/// assert_eq!(format_name("Bach"), "BACH");
/// assert_eq!(format_name("   "), "");
/// ```
pub fn format_name(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    if collapsed.is_empty() {
        return String::new();
    }

    // Already "Surname, Given"
    if let Some((surname, given)) = collapsed.split_once(',') {
        let given = given.trim();
        if given.is_empty() {
            return format_without_comma(surname.trim());
        }
        return format!("{}, {}", surname.trim().to_uppercase(), given);
    }

    format_without_comma(&collapsed)
}

/// "Given Names Surname" (collapsed, no comma) -> "SURNAME, Given Names"
fn format_without_comma(name: &str) -> String {
    match name.rsplit_once(' ') {
        Some((given, surname)) => format!("{}, {}", surname.to_uppercase(), given),
        None => name.to_uppercase(),
    }
}

/// Trim and collapse every run of whitespace into a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the string has at least one uppercase letter and no lowercase
/// letter. Digits and punctuation are ignored, so `"D'ÁVILA"` is uppercase
/// and `"1914"` is not.
pub fn is_all_uppercase(s: &str) -> bool {
    let mut has_upper = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
///
/// # Examples
/// ```
/// use im_authors::title_case;
/// assert_eq!(title_case("JOÃO CABRAL"), "João Cabral");
/// assert_eq!(title_case("JEAN-PAUL"), "Jean-Paul");
/// ```
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            result.push(c);
            prev_was_letter = false;
        }
    }

    result
}

/// Split free-text form input into one trimmed name per line.
///
/// Only newlines separate entries; commas belong to the ABNT form and are
/// kept. Blank lines are dropped.
pub fn split_multiline(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
