//! Allowance and deduction calculators.
//!
//! Every calculator is a pure function of its arguments.  The policy
//! rates (HRA tiers and floors, TA bands, CGEGIS bands) live in the
//! lookup tables at the top of this module so that a rate revision
//! only touches data.  Callers are trusted to pass a basic pay that
//! belongs to the selected level.

use crate::models::{round_half_up, CityType, HraResult};

/// DA bands that select the HRA percentage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DaBand {
    /// DA up to and including 25%.
    Base,
    /// DA above 25% and below 50%.
    Above25,
    /// DA of 50% or more.
    From50,
}

impl DaBand {
    fn of(da_percent: f64) -> DaBand {
        if da_percent >= 50.0 {
            DaBand::From50
        } else if da_percent > 25.0 {
            DaBand::Above25
        } else {
            DaBand::Base
        }
    }

    fn row(self) -> usize {
        match self {
            DaBand::Base => 0,
            DaBand::Above25 => 1,
            DaBand::From50 => 2,
        }
    }
}

/// HRA percent by DA band (rows) and city tier (columns X, Y, Z).
const HRA_PERCENT: [[u32; 3]; 3] = [[24, 16, 8], [27, 18, 9], [30, 20, 10]];

/// Minimum HRA by city tier (X, Y, Z).
const HRA_FLOOR: [i64; 3] = [5400, 3600, 1800];

/// Transport allowance base rates for levels at or above `from_level`.
struct TaBand {
    from_level: f64,
    higher_tpta: i64,
    standard: i64,
}

/// Descending by level; the last band catches everything below.
static TA_BANDS: [TaBand; 4] = [
    TaBand { from_level: 14.0, higher_tpta: 15750, standard: 15750 },
    TaBand { from_level: 9.0, higher_tpta: 7200, standard: 3600 },
    TaBand { from_level: 3.0, higher_tpta: 3600, standard: 1800 },
    TaBand { from_level: f64::NEG_INFINITY, higher_tpta: 1350, standard: 900 },
];

/// Levels from which TA is flat and the TPTA toggle has no effect.
const FLAT_TA_FROM_LEVEL: f64 = 14.0;

/// Suggested CGEGIS subscription for levels at or above the threshold.
const CGEGIS_BANDS: [(f64, i64); 3] = [(10.0, 120), (6.0, 60), (f64::NEG_INFINITY, 30)];

const NPS_RATE: f64 = 0.10;

/// Dearness allowance: `basic_pay * da_percent / 100`, rounded.
pub fn compute_da(basic_pay: i64, da_percent: f64) -> i64 {
    round_half_up(basic_pay as f64 * (da_percent / 100.0))
}

/// HRA tier percentage for the given DA rate and city.
pub fn hra_percent(da_percent: f64, city: CityType) -> u32 {
    HRA_PERCENT[DaBand::of(da_percent).row()][city.tier()]
}

/// Minimum HRA payable in the given city.
pub fn hra_floor(city: CityType) -> i64 {
    HRA_FLOOR[city.tier()]
}

/// House rent allowance.
///
/// The amount is the tier percentage of basic pay, but never less than
/// the city floor.  The returned `percent` is the tier percentage even
/// when the floor wins; compare `amount` against [`hra_floor`] to tell.
pub fn compute_hra(basic_pay: i64, da_percent: f64, city: CityType) -> HraResult {
    let percent = hra_percent(da_percent, city);
    let calculated = round_half_up(basic_pay as f64 * (percent as f64 / 100.0));
    HraResult {
        percent,
        amount: calculated.max(hra_floor(city)),
    }
}

fn ta_band(level: f64) -> &'static TaBand {
    TA_BANDS
        .iter()
        .find(|band| level >= band.from_level)
        .unwrap_or(&TA_BANDS[TA_BANDS.len() - 1])
}

/// Whether the higher-TPTA-city toggle changes TA at this level.
pub fn tpta_toggle_applies(level: f64) -> bool {
    level < FLAT_TA_FROM_LEVEL
}

/// Monthly TA base rate before DA.
pub fn ta_base(level: f64, higher_tpta_city: bool) -> i64 {
    let band = ta_band(level);
    if higher_tpta_city {
        band.higher_tpta
    } else {
        band.standard
    }
}

/// Transport allowance: the band base rate plus DA on top of it.
///
/// DA is added at every level, including the flat level 14+ rate.
pub fn compute_ta(level: f64, da_percent: f64, higher_tpta_city: bool) -> i64 {
    let base = ta_base(level, higher_tpta_city);
    round_half_up(base as f64 * (1.0 + da_percent / 100.0))
}

/// NPS employee contribution: 10% of basic pay plus DA when enabled.
pub fn compute_nps(basic_pay: i64, da_amount: i64, enabled: bool) -> i64 {
    if !enabled {
        return 0;
    }
    round_half_up(basic_pay.saturating_add(da_amount) as f64 * NPS_RATE)
}

/// Default CGEGIS deduction for a level.  Advisory only; the user may
/// edit it afterwards.
pub fn suggest_cgegis(level: f64) -> i64 {
    CGEGIS_BANDS
        .iter()
        .find(|(from, _)| level >= *from)
        .map(|(_, amount)| *amount)
        .unwrap_or(30)
}
