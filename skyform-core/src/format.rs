use chrono::NaiveDate;

use crate::airport::Airport;

pub fn pluralize(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Human readable passenger mix, e.g. "2 Adults, 1 Child, 1 Infant".
/// Zero counts are omitted; an empty party falls back to "1 Adult".
pub fn format_passenger_count(adults: u32, children: u32, infants: u32) -> String {
    let segments: Vec<String> = [
        (adults, "Adult", "Adults"),
        (children, "Child", "Children"),
        (infants, "Infant", "Infants"),
    ]
    .into_iter()
    .filter(|(count, _, _)| *count > 0)
    .map(|(count, singular, plural)| pluralize(count, singular, plural))
    .collect();

    if segments.is_empty() {
        return "1 Adult".to_string();
    }

    segments.join(", ")
}

pub fn total_travellers(adults: u32, children: u32, infants: u32) -> String {
    pluralize(adults + children + infants, "Traveller", "Travellers")
}

/// "Wed, Dec 25, 2024"; empty when no date is set.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%a, %b %d, %Y").to_string())
        .unwrap_or_default()
}

/// Display name for `code`, falling back to the code itself when the
/// airport is unknown or unnamed.
pub fn airport_name<'a>(code: &'a str, airports: &'a [Airport]) -> &'a str {
    airports
        .iter()
        .find(|a| a.code == code)
        .map(|a| a.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(code)
}
