/// Regional suffix some merchants append to the manufacturer name.
pub const REGIONAL_SUFFIX: &str = " Canada";

/// Drops every space and hyphen, then lowercases.
///
/// Used for listing titles and product models only, never for manufacturers.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

/// Manufacturer key used to look up a listing's candidate bucket.
/// Only a literal trailing `" Canada"` is removed; nothing else is touched.
pub fn lookup_manufacturer(manufacturer: &str) -> &str {
    manufacturer
        .strip_suffix(REGIONAL_SUFFIX)
        .unwrap_or(manufacturer)
}
