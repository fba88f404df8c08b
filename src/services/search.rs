//! Zone catalog and free-text search.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::services::timezone::compute_details;
use crate::utils::datetime::format_hhmm;

/// Maximum number of catalog matches returned for one query.
pub const MAX_CATALOG_MATCHES: usize = 10;

/// Pseudo-zones that are always offered even if the catalog omits them.
const EXTRA_ZONES: &[&str] = &["UTC", "PST8PDT", "EST5EDT", "CST6CDT", "MST7MDT"];

/// Common abbreviations mapped to the identifier they search for.
///
/// The US abbreviations point at the POSIX-style pseudo-zones rather than a
/// city zone; that is the established behavior and is kept as is.
const ZONE_ALIASES: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("GMT", "UTC"),
    ("PST", "PST8PDT"),
    ("PDT", "PST8PDT"),
    ("EST", "EST5EDT"),
    ("EDT", "EST5EDT"),
    ("CST", "CST6CDT"),
    ("CDT", "CST6CDT"),
    ("MST", "MST7MDT"),
    ("MDT", "MST7MDT"),
    ("IST", "Asia/Kolkata"),
];

const COUNTRY_ZONES: &[(&str, &[&str])] = &[
    ("ARGENTINA", &["America/Argentina/Buenos_Aires"]),
    ("AUSTRALIA", &["Australia/Sydney", "Australia/Melbourne", "Australia/Brisbane", "Australia/Adelaide", "Australia/Perth"]),
    ("BRAZIL", &["America/Sao_Paulo", "America/Manaus"]),
    ("CANADA", &["America/Toronto", "America/Vancouver", "America/Edmonton", "America/Winnipeg", "America/Halifax", "America/St_Johns"]),
    ("CHINA", &["Asia/Shanghai"]),
    ("EGYPT", &["Africa/Cairo"]),
    ("FRANCE", &["Europe/Paris"]),
    ("GERMANY", &["Europe/Berlin"]),
    ("INDIA", &["Asia/Kolkata"]),
    ("INDONESIA", &["Asia/Jakarta", "Asia/Makassar", "Asia/Jayapura"]),
    ("ITALY", &["Europe/Rome"]),
    ("JAPAN", &["Asia/Tokyo"]),
    ("KENYA", &["Africa/Nairobi"]),
    ("MEXICO", &["America/Mexico_City", "America/Tijuana", "America/Cancun"]),
    ("NEPAL", &["Asia/Kathmandu"]),
    ("NETHERLANDS", &["Europe/Amsterdam"]),
    ("NEW ZEALAND", &["Pacific/Auckland"]),
    ("NIGERIA", &["Africa/Lagos"]),
    ("RUSSIA", &["Europe/Moscow", "Asia/Yekaterinburg", "Asia/Novosibirsk", "Asia/Vladivostok"]),
    ("SINGAPORE", &["Asia/Singapore"]),
    ("SOUTH AFRICA", &["Africa/Johannesburg"]),
    ("SOUTH KOREA", &["Asia/Seoul"]),
    ("SPAIN", &["Europe/Madrid"]),
    ("UNITED ARAB EMIRATES", &["Asia/Dubai"]),
    ("UNITED KINGDOM", &["Europe/London"]),
    ("UK", &["Europe/London"]),
    ("UNITED STATES", &["America/New_York", "America/Chicago", "America/Denver", "America/Los_Angeles", "America/Anchorage", "Pacific/Honolulu"]),
    ("USA", &["America/New_York", "America/Chicago", "America/Denver", "America/Los_Angeles", "America/Anchorage", "Pacific/Honolulu"]),
];

/// Every identifier the explorer offers, deduplicated, in stable order.
pub fn all_timezones() -> Vec<String> {
    let mut seen = HashSet::new();
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .chain(EXTRA_ZONES.iter().copied())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Looks up an abbreviation alias. The query must already be upper-cased.
pub fn resolve_alias(query: &str) -> Option<&'static str> {
    ZONE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == query)
        .map(|(_, zone)| *zone)
}

/// Zones of every country whose name contains the upper-cased query.
pub fn country_zones(query: &str) -> Vec<&'static str> {
    COUNTRY_ZONES
        .iter()
        .filter(|(country, _)| country.contains(query))
        .flat_map(|(_, zones)| zones.iter().copied())
        .collect()
}

/// Candidate identifiers for a free-text query.
///
/// Alias hit first, then country hits, then catalog zones whose identifier,
/// city, region, abbreviation or current "HH:MM" contains the query.
pub fn search(query: &str, instant: DateTime<Utc>) -> Vec<String> {
    let needle = query.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<String> = Vec::new();
    if let Some(zone) = resolve_alias(&needle) {
        results.push(zone.to_string());
    }
    results.extend(country_zones(&needle).into_iter().map(str::to_string));

    let catalog_hits = all_timezones()
        .into_iter()
        .filter(|zone| zone_matches(zone, &needle, instant))
        .take(MAX_CATALOG_MATCHES);
    results.extend(catalog_hits);

    let mut seen = HashSet::new();
    results.retain(|zone| seen.insert(zone.clone()));
    results
}

fn zone_matches(zone: &str, needle: &str, instant: DateTime<Utc>) -> bool {
    let upper = zone.to_uppercase();
    if upper.contains(needle) {
        return true;
    }

    let city = upper.rsplit('/').next().unwrap_or(&upper).replace('_', " ");
    if city.contains(needle) {
        return true;
    }

    let region = upper.split('/').next().unwrap_or(&upper);
    if region.contains(needle) {
        return true;
    }

    // Abbreviation and current time need the engine; unknown zones just don't match
    match compute_details(instant, zone) {
        Ok(snapshot) => {
            snapshot.zone_abbreviation.to_uppercase().contains(needle)
                || format_hhmm(snapshot.hour24, snapshot.minute).contains(needle)
        }
        Err(_) => false,
    }
}
