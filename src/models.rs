//! Data models for the pay calculator.
//!
//! The `models` module defines the serialisable input and output
//! records exchanged with the presentation layer.  [`SalaryInputs`] is
//! the snapshot of everything the user has entered; [`SalaryResult`]
//! is fully derived from it and never stored.  All money is held as
//! whole rupees in `i64`.

use serde::{Deserialize, Serialize};

/// DA rate used when nothing else has been configured.
pub const DEFAULT_DA_PERCENT: f64 = 50.0;

/// Cities qualifying for the higher transport allowance rate.
pub const HIGHER_TPTA_CITIES_DESC: &str =
    "Includes: Hyderabad, Delhi, Bangalore, Mumbai, Chennai, Kolkata, Ahmedabad, Pune, etc.";

/// City classification for HRA purposes, ordered from the highest
/// allowance tier to the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CityType {
    X,
    Y,
    Z,
}

impl CityType {
    pub const ALL: [CityType; 3] = [CityType::X, CityType::Y, CityType::Z];

    /// Position of the city in the tier tables.
    pub(crate) fn tier(self) -> usize {
        match self {
            CityType::X => 0,
            CityType::Y => 1,
            CityType::Z => 2,
        }
    }
}

/// The input snapshot supplied by the presentation layer on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryInputs {
    /// Index into [`crate::matrix::PAY_LEVELS`].
    pub level_index: usize,
    /// Selected basic pay.  Expected to be one of the level's stages.
    pub basic_pay: i64,
    /// Dearness allowance rate in percent.
    pub da_percent: f64,
    pub city_type: CityType,
    /// Higher transport allowance city.  Ignored from level 14 upwards.
    pub higher_tpta_city: bool,
    pub other_allowances: i64,
    pub nps_enabled: bool,
    pub professional_tax: i64,
    /// Entered by the user; income tax is not computed.
    pub income_tax: i64,
    pub cgegis: i64,
    pub other_deductions: i64,
}

impl Default for SalaryInputs {
    fn default() -> Self {
        SalaryInputs {
            level_index: 0,
            basic_pay: 18000,
            da_percent: DEFAULT_DA_PERCENT,
            city_type: CityType::X,
            higher_tpta_city: false,
            other_allowances: 0,
            nps_enabled: true,
            professional_tax: 200,
            income_tax: 0,
            cgegis: 30,
            other_deductions: 0,
        }
    }
}

/// HRA tier percentage together with the final amount.
///
/// `percent` is the tier rate even when the city floor decided
/// `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraResult {
    pub percent: u32,
    pub amount: i64,
}

/// Earnings side of the pay slip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    pub basic_pay: i64,
    pub da_amount: i64,
    pub hra_amount: i64,
    pub ta_amount: i64,
    pub other_allowances: i64,
}

/// Deductions side of the pay slip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub nps_amount: i64,
    pub professional_tax: i64,
    pub income_tax: i64,
    pub cgegis: i64,
    pub other_deductions: i64,
}

/// Output of the totals aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub gross_earnings: i64,
    pub total_deductions: i64,
    /// May be negative when deductions exceed earnings.
    pub net_salary: i64,
}

/// Everything derived from one [`SalaryInputs`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub basic_pay: i64,
    pub da_amount: i64,
    pub hra_percent: u32,
    pub hra_amount: i64,
    /// City minimum for HRA.  The floor was applied when it equals
    /// `hra_amount`.
    pub hra_floor: i64,
    pub ta_amount: i64,
    pub nps_amount: i64,
    pub gross_earnings: i64,
    pub total_deductions: i64,
    pub net_salary: i64,
}

/// One free-entry form field.  Forms may send the typed text or a
/// number; anything else (null, booleans, ...) counts as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Text(String::new())
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl FormValue {
    fn number(&self) -> f64 {
        match self {
            FormValue::Number(v) if v.is_finite() => *v,
            FormValue::Text(text) => parse_number(text),
            _ => 0.0,
        }
    }

    /// Whole rupees, 0 when the field is empty or not a number.
    pub fn amount(&self) -> i64 {
        round_half_up(self.number())
    }

    /// Percentage, 0 when the field is empty or not a number.
    pub fn percent(&self) -> f64 {
        self.number()
    }
}

/// Form fields exactly as entered.  Every numeric field is coerced with
/// a zero fallback, so converting never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSalaryInputs {
    pub level_index: usize,
    pub basic_pay: FormValue,
    pub da_percent: FormValue,
    pub city_type: Option<CityType>,
    pub higher_tpta_city: bool,
    pub other_allowances: FormValue,
    pub nps_enabled: bool,
    pub professional_tax: FormValue,
    pub income_tax: FormValue,
    pub cgegis: FormValue,
    pub other_deductions: FormValue,
}

impl From<RawSalaryInputs> for SalaryInputs {
    fn from(raw: RawSalaryInputs) -> Self {
        SalaryInputs {
            level_index: raw.level_index,
            basic_pay: raw.basic_pay.amount(),
            da_percent: raw.da_percent.percent(),
            city_type: raw.city_type.unwrap_or(CityType::X),
            higher_tpta_city: raw.higher_tpta_city,
            other_allowances: raw.other_allowances.amount(),
            nps_enabled: raw.nps_enabled,
            professional_tax: raw.professional_tax.amount(),
            income_tax: raw.income_tax.amount(),
            cgegis: raw.cgegis.amount(),
            other_deductions: raw.other_deductions.amount(),
        }
    }
}

/// Round to the nearest integer with halves going up.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn parse_number(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
