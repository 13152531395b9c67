//! Identifier case conversion helpers used across all generators.
//!
//! All functions are pure and total over ASCII identifier strings: empty
//! input yields empty output and nothing here ever fails. Generated file
//! names, Kotlin symbols, SQL column names and proto identifiers all flow
//! through these, so the conversions must agree with the conventions the
//! generated modules already rely on.

use once_cell::sync::Lazy;
use regex::Regex;

// Two-pass boundary insertion: first split an uppercase+lowercase run off
// whatever precedes it (handles acronyms: "HTTPRequest" → "HTTP_Request"),
// then split lowercase/digit → uppercase transitions.
#[allow(clippy::expect_used)]
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"));
#[allow(clippy::expect_used)]
static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// Convert PascalCase or camelCase to snake_case.
///
/// Already-delimited input is left intact apart from lowercasing.
pub fn to_snake_case(name: &str) -> String {
    let pass1 = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let pass2 = CASE_BOUNDARY.replace_all(&pass1, "${1}_${2}");
    pass2.to_lowercase()
}

/// Convert snake_case or PascalCase to camelCase.
pub fn to_camel_case(name: &str) -> String {
    if name.contains('_') {
        let mut segments = name.split('_').filter(|s| !s.is_empty());
        let first = segments.next().map(str::to_lowercase).unwrap_or_default();
        segments.fold(first, |mut acc, seg| {
            acc.push_str(&capitalize(seg));
            acc
        })
    } else {
        lower_first(name)
    }
}

/// Convert snake_case or camelCase to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    if name.contains('_') {
        name.split('_').filter(|s| !s.is_empty()).map(capitalize).collect()
    } else {
        upper_first(name)
    }
}

/// Suffix-based plural form of an entity name.
///
/// Known to be wrong for irregular plurals; downstream modules depend on
/// this exact convention, so do not "fix" it.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('y') {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s') || name.ends_with('x') || name.ends_with("ch") {
        format!("{name}es")
    } else {
        format!("{name}s")
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("OrganisationUnit"), "organisation_unit");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("alreadySnake"), "already_snake");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("Organisation"), "organisation");
        assert_eq!(to_snake_case("parentOrganisationId"), "parent_organisation_id");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("organisation_unit"), "organisationUnit");
        assert_eq!(to_camel_case("OrganisationUnit"), "organisationUnit");
        assert_eq!(to_camel_case("single"), "single");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("organisation_unit"), "OrganisationUnit");
        assert_eq!(to_pascal_case("organisationUnit"), "OrganisationUnit");
        assert_eq!(to_pascal_case("single"), "Single");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_case_round_trip() {
        assert_eq!(to_pascal_case(&to_snake_case("OrganisationUnit")), "OrganisationUnit");
        assert_eq!(to_camel_case(&to_snake_case("parentOrganisationId")), "parentOrganisationId");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Organisation"), "Organisations");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Branch"), "Branches");
    }
}
