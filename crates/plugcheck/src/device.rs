//! Free-text device labels ("INPUT: 100-240V ~ 50/60Hz").

use regex::Regex;
use std::sync::LazyLock;

static DUAL_RANGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(100|110)\s*[–\-]?\s*240\s*V").ok());

static SINGLE_120: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b120\s*V\b").ok());

static ANY_240: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)240\s*V").ok());

/// A pattern that failed to compile never matches.
fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    Option::as_ref(pattern).is_some_and(|re| re.is_match(text))
}

/// What a device label says about its input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceVoltage {
    /// Accepts 100/110–240V
    Dual,
    /// North American single-voltage (120V only)
    Single,
}

impl DeviceVoltage {
    pub fn is_dual(self) -> bool {
        self == DeviceVoltage::Dual
    }
}

/// Inspect a device label for voltage markers.
///
/// Returns `None` when the label does not settle the question; callers then
/// fall back to the explicit dual-voltage toggle.
pub fn parse_device_label(label: &str) -> Option<DeviceVoltage> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    if matches(&DUAL_RANGE, label) {
        return Some(DeviceVoltage::Dual);
    }
    if matches(&SINGLE_120, label) && !matches(&ANY_240, label) {
        return Some(DeviceVoltage::Single);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_ranges() {
        assert_eq!(parse_device_label("100-240V"), Some(DeviceVoltage::Dual));
        assert_eq!(parse_device_label("Input: 100–240 V~ 50/60Hz"), Some(DeviceVoltage::Dual));
        assert_eq!(parse_device_label("110 240v"), Some(DeviceVoltage::Dual));
        assert_eq!(parse_device_label("AC100-240V"), Some(DeviceVoltage::Dual));
    }

    #[test]
    fn test_single_120() {
        assert_eq!(parse_device_label("120V"), Some(DeviceVoltage::Single));
        assert_eq!(parse_device_label("Input 120 V 60Hz"), Some(DeviceVoltage::Single));
        // Mentions 240V too, so it is not a plain single-voltage label
        assert_eq!(parse_device_label("120V / 240V switchable"), None);
        // 1200V is not 120V
        assert_eq!(parse_device_label("1200V"), None);
    }

    #[test]
    fn test_no_determination() {
        assert_eq!(parse_device_label(""), None);
        assert_eq!(parse_device_label("   "), None);
        assert_eq!(parse_device_label("230V"), None);
        assert_eq!(parse_device_label("hair dryer"), None);
    }
}
