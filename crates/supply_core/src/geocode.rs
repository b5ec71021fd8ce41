//! Postal code geocoding.
//!
//! Resolves an Indian PIN code to an approximate center point. Lookup order:
//!
//! 1. Unparseable input (no leading integer) → [`DEFAULT_CENTER`]
//! 2. Metro prefix table, keyed by the first 3 characters
//! 3. Postal region table, keyed by the first character
//! 4. [`NATIONAL_CENTER`]
//!
//! More specific matches always win; `"499999"` has no metro entry and falls
//! through to region `4`, never to the national center.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Returned for input that does not start with an integer (Pune).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(18.5204, 73.8567);

/// Returned when neither the metro nor the region table matches.
pub const NATIONAL_CENTER: GeoPoint = GeoPoint::new(20.5937, 78.9629);

/// Major metros by 3-digit PIN prefix.
const METRO_PREFIXES: &[(&str, &str, GeoPoint)] = &[
    ("400", "Mumbai", GeoPoint::new(19.076, 72.8777)),
    ("110", "Delhi", GeoPoint::new(28.6139, 77.209)),
    ("560", "Bangalore", GeoPoint::new(12.9716, 77.5946)),
    ("600", "Chennai", GeoPoint::new(13.0827, 80.2707)),
    ("500", "Hyderabad", GeoPoint::new(17.385, 78.4867)),
    ("700", "Kolkata", GeoPoint::new(22.5726, 88.3639)),
    ("411", "Pune", GeoPoint::new(18.5204, 73.8567)),
    ("380", "Ahmedabad", GeoPoint::new(23.0225, 72.5714)),
    ("302", "Jaipur", GeoPoint::new(26.9124, 75.7873)),
    ("226", "Lucknow", GeoPoint::new(26.8467, 80.9462)),
    ("160", "Chandigarh", GeoPoint::new(30.7333, 76.7794)),
    ("122", "Gurgaon", GeoPoint::new(28.4595, 77.0266)),
    ("201", "Noida", GeoPoint::new(28.5355, 77.391)),
    ("452", "Indore", GeoPoint::new(22.7196, 75.8577)),
    ("440", "Nagpur", GeoPoint::new(21.1458, 79.0882)),
    ("462", "Bhopal", GeoPoint::new(23.2599, 77.4126)),
    ("682", "Kochi", GeoPoint::new(9.9312, 76.2673)),
    ("632", "Vellore", GeoPoint::new(12.9692, 79.1559)),
    ("641", "Coimbatore", GeoPoint::new(11.0168, 76.9558)),
    ("530", "Visakhapatnam", GeoPoint::new(17.6868, 83.2185)),
    ("395", "Surat", GeoPoint::new(21.1702, 72.8311)),
    ("403", "Goa", GeoPoint::new(15.2993, 74.124)),
    ("800", "Patna", GeoPoint::new(25.6093, 85.1376)),
    ("751", "Bhubaneswar", GeoPoint::new(20.2961, 85.8245)),
    ("575", "Mangalore", GeoPoint::new(12.9141, 74.856)),
    ("695", "Thiruvananthapuram", GeoPoint::new(8.5241, 76.9366)),
];

/// Postal regions by first PIN digit.
const POSTAL_REGIONS: &[(char, &str, GeoPoint)] = &[
    ('1', "Delhi / North", GeoPoint::new(28.6139, 77.209)),
    ('2', "Uttar Pradesh", GeoPoint::new(26.8467, 80.9462)),
    ('3', "Gujarat / Rajasthan", GeoPoint::new(23.0225, 72.5714)),
    ('4', "Maharashtra", GeoPoint::new(19.076, 72.8777)),
    ('5', "Andhra Pradesh / Telangana", GeoPoint::new(17.385, 78.4867)),
    ('6', "Tamil Nadu / Kerala", GeoPoint::new(13.0827, 80.2707)),
    ('7', "West Bengal / East", GeoPoint::new(22.5726, 88.3639)),
    ('8', "Bihar / Jharkhand", GeoPoint::new(25.6093, 85.1376)),
    ('9', "North-East", GeoPoint::new(26.1445, 91.7362)),
    ('0', "Jammu & Kashmir / Himachal", GeoPoint::new(34.0837, 74.7973)),
];

/// Which lookup tier produced a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum GeocodeSource {
    Metro(&'static str),
    Region(&'static str),
    NationalCenter,
    Unparseable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeocodeMatch {
    pub point: GeoPoint,
    pub source: GeocodeSource,
}

/// 3-digit prefixes with a dedicated metro center, in table order.
pub fn metro_prefixes() -> impl Iterator<Item = &'static str> {
    METRO_PREFIXES.iter().map(|(prefix, _, _)| *prefix)
}

/// Resolve a postal code to an approximate center. Never fails.
pub fn resolve(postal_code: &str) -> GeoPoint {
    resolve_with_source(postal_code).point
}

/// Like [`resolve`], also reporting which table matched.
pub fn resolve_with_source(postal_code: &str) -> GeocodeMatch {
    let located = lookup(postal_code);
    trace!(postal_code, source = ?located.source, "geocoded postal code");
    located
}

fn lookup(postal_code: &str) -> GeocodeMatch {
    if parse_leading_integer(postal_code).is_none() {
        return GeocodeMatch {
            point: DEFAULT_CENTER,
            source: GeocodeSource::Unparseable,
        };
    }

    // Keys are ASCII, so a byte slice that is not on a char boundary cannot match.
    if let Some(prefix) = postal_code.get(..3) {
        if let Some((_, city, point)) = METRO_PREFIXES.iter().find(|(key, _, _)| *key == prefix) {
            return GeocodeMatch {
                point: *point,
                source: GeocodeSource::Metro(city),
            };
        }
    }

    if let Some(first) = postal_code.chars().next() {
        if let Some((_, region, point)) = POSTAL_REGIONS.iter().find(|(key, _, _)| *key == first) {
            return GeocodeMatch {
                point: *point,
                source: GeocodeSource::Region(region),
            };
        }
    }

    GeocodeMatch {
        point: NATIONAL_CENTER,
        source: GeocodeSource::NationalCenter,
    }
}

/// Lenient integer parse: leading whitespace, optional sign, then at least one
/// ASCII digit. Anything after the digits is ignored. Saturates instead of
/// overflowing.
pub fn parse_leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metro_prefix_wins_over_region() {
        let located = resolve_with_source("400001");
        assert_eq!(located.point, GeoPoint::new(19.076, 72.8777));
        assert_eq!(located.source, GeocodeSource::Metro("Mumbai"));
    }

    #[test]
    fn unknown_prefix_falls_back_to_region() {
        let located = resolve_with_source("499999");
        assert_eq!(located.source, GeocodeSource::Region("Maharashtra"));
        assert_ne!(located.point, NATIONAL_CENTER);
    }

    #[test]
    fn unparseable_input_uses_default_center() {
        for input in ["", "abc", "   ", "-", "x400001"] {
            let located = resolve_with_source(input);
            assert_eq!(located.point, DEFAULT_CENTER, "input {input:?}");
            assert_eq!(located.source, GeocodeSource::Unparseable);
        }
    }

    #[test]
    fn short_numeric_input_uses_region() {
        assert_eq!(resolve("56"), GeoPoint::new(17.385, 78.4867));
        assert_eq!(resolve("7"), GeoPoint::new(22.5726, 88.3639));
    }

    #[test]
    fn input_without_region_digit_uses_national_center() {
        // Parses as an integer but the first character is not a region digit.
        assert_eq!(resolve(" 400001"), NATIONAL_CENTER);
        assert_eq!(resolve("+560001"), NATIONAL_CENTER);
    }

    #[test]
    fn leading_integer_parse_is_lenient() {
        assert_eq!(parse_leading_integer("560001"), Some(560001));
        assert_eq!(parse_leading_integer("  12abc"), Some(12));
        assert_eq!(parse_leading_integer("-42"), Some(-42));
        assert_eq!(parse_leading_integer("+7"), Some(7));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer(""), None);
        assert_eq!(parse_leading_integer("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn tables_have_unique_keys() {
        let mut prefixes: Vec<_> = METRO_PREFIXES.iter().map(|(key, _, _)| *key).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), METRO_PREFIXES.len());
        assert_eq!(POSTAL_REGIONS.len(), 10);
    }
}
