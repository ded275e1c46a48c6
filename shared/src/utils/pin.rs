//! PIN format utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Six digits without a leading zero, the range generated PINs are drawn from
static PIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9][0-9]{5}$").unwrap()
});

/// Check if a string has the shape of a generated PIN
pub fn is_well_formed_pin(pin: &str) -> bool {
    PIN_REGEX.is_match(pin)
}
