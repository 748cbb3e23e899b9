//! # plugcheck — travel plug and voltage compatibility
//!
//! Loads a country dataset with loosely named fields, normalizes it into
//! [`Country`] records and answers "do I need an adapter, a converter, or
//! both?" for a pair of countries.
//!
//! ```text
//! dataset (file | url) → records → Country → AppState → Evaluation → ResultView
//! ```
//!
//! Everything after the dataset read is pure: the state is an explicit value
//! changed by [`AppState::apply`], and rendering is a function of that state.

mod compat;
mod country;
pub mod dataset;
mod device;
mod error;
pub mod render;
mod state;

pub use compat::{
    Device, Evaluation, Severity, VOLTAGE_TOLERANCE, Verdict, evaluate, needs_adapter,
    same_voltage,
};
pub use country::{Country, CountryField, Required, normalize_country};
pub use dataset::{Source, load_countries};
pub use device::{DeviceVoltage, parse_device_label};
pub use error::{DatasetError, Result};
pub use render::{RenderOptions, ResultView, iso_to_flag};
pub use state::{Action, AppState, region_from_locale};
