//! Compatibility rules: voltage band, plug overlap and the resulting verdict.

use crate::country::Country;
use crate::device::parse_device_label;
use serde::Serialize;

/// Largest voltage difference (in volts) still treated as the same system.
///
/// Keeps 110–120V and 220–240V each within one band while separating them.
pub const VOLTAGE_TOLERANCE: f64 = 15.0;

pub fn same_voltage(from: f64, to: f64) -> bool {
    (from - to).abs() <= VOLTAGE_TOLERANCE
}

/// True when no plug type of the destination fits a plug from home.
pub fn needs_adapter(dest_plugs: &[String], from_plugs: &[String]) -> bool {
    !dest_plugs.iter().any(|p| from_plugs.contains(p))
}

/// The four possible outcomes of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Plugs fit and the voltage is fine
    Ok,
    /// Plug adapter required, voltage is fine
    AdapterOnly,
    /// Plugs fit but single-voltage devices need a converter
    VoltageWarning,
    /// Adapter and converter both required
    BothNeeded,
}

/// Display tier of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warn,
    Bad,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warn => "warn",
            Severity::Bad => "bad",
        }
    }
}

impl Verdict {
    pub fn from_checks(adapter_needed: bool, voltage_ok_or_dual: bool) -> Self {
        match (adapter_needed, voltage_ok_or_dual) {
            (false, true) => Verdict::Ok,
            (true, true) => Verdict::AdapterOnly,
            (false, false) => Verdict::VoltageWarning,
            (true, false) => Verdict::BothNeeded,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Verdict::Ok => Severity::Ok,
            Verdict::AdapterOnly | Verdict::VoltageWarning => Severity::Warn,
            Verdict::BothNeeded => Severity::Bad,
        }
    }
}

/// The traveller's device: an explicit toggle plus an optional label.
///
/// A label that settles the question overrides the toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub dual_toggle: bool,
    pub label: String,
}

impl Device {
    pub fn is_dual(&self) -> bool {
        parse_device_label(&self.label)
            .map(|v| v.is_dual())
            .unwrap_or(self.dual_toggle)
    }
}

/// Result of checking one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub adapter_needed: bool,
    pub voltage_ok: bool,
    pub dual: bool,
}

pub fn evaluate(from: &Country, to: &Country, device: &Device) -> Evaluation {
    let adapter_needed = needs_adapter(&to.plugs, &from.plugs);
    let voltage_ok = same_voltage(from.voltage, to.voltage);
    let dual = device.is_dual();
    Evaluation {
        verdict: Verdict::from_checks(adapter_needed, voltage_ok || dual),
        adapter_needed,
        voltage_ok,
        dual,
    }
}
