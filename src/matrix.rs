//! The 7th CPC pay matrix.
//!
//! The matrix is a static table of pay levels.  Each level starts at an
//! entry pay and advances through a fixed number of stages ("cells"),
//! each 3% above the previous one and rounded to the nearest hundred.
//! Stages are derived on demand and never stored.

use crate::error::{Result, SalaryError};
use crate::models::round_half_up;
use serde::Serialize;

/// Stage count used for a level when the matrix does not specify one.
pub const DEFAULT_MAX_STAGES: usize = 40;

/// Annual increment applied between consecutive stages.
const INCREMENT_FACTOR: f64 = 1.03;

/// One row of the pay matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayLevel {
    /// Level identifier.  `13.5` stands for the inserted level "13A".
    pub level: f64,
    /// 6th CPC grade pay, kept for reference only.
    pub grade_pay: u32,
    /// Basic pay at stage 1.
    pub entry_pay: i64,
    /// Number of valid stages in this level.
    pub max_stages: usize,
    /// Common name for the top-of-matrix levels.
    pub designation: Option<&'static str>,
}

const fn level(level: f64, grade_pay: u32, entry_pay: i64, max_stages: usize) -> PayLevel {
    PayLevel {
        level,
        grade_pay,
        entry_pay,
        max_stages,
        designation: None,
    }
}

const fn named(
    level: f64,
    grade_pay: u32,
    entry_pay: i64,
    max_stages: usize,
    designation: &'static str,
) -> PayLevel {
    PayLevel {
        level,
        grade_pay,
        entry_pay,
        max_stages,
        designation: Some(designation),
    }
}

/// Levels 1 to 18 of the 7th CPC matrix, ascending.
pub const PAY_LEVELS: &[PayLevel] = &[
    level(1.0, 1800, 18000, DEFAULT_MAX_STAGES),
    level(2.0, 1900, 19900, DEFAULT_MAX_STAGES),
    level(3.0, 2000, 21700, DEFAULT_MAX_STAGES),
    level(4.0, 2400, 25500, DEFAULT_MAX_STAGES),
    level(5.0, 2800, 29200, DEFAULT_MAX_STAGES),
    level(6.0, 4200, 35400, DEFAULT_MAX_STAGES),
    level(7.0, 4600, 44900, DEFAULT_MAX_STAGES),
    level(8.0, 4800, 47600, DEFAULT_MAX_STAGES),
    level(9.0, 5400, 53100, DEFAULT_MAX_STAGES),
    level(10.0, 5400, 56100, DEFAULT_MAX_STAGES),
    level(11.0, 6600, 67700, 39),
    level(12.0, 7600, 78800, 34),
    level(13.0, 8700, 123100, 28),
    level(13.5, 8900, 131100, 26),
    level(14.0, 10000, 144200, 22),
    named(15.0, 0, 182200, 8, "HAG"),
    named(16.0, 0, 205400, 4, "HAG+"),
    named(17.0, 0, 225000, 1, "Apex"),
    named(18.0, 0, 250000, 1, "Cabinet Secretary"),
];

impl PayLevel {
    /// Display label: `"13A"` for the intermediate level, otherwise the
    /// plain level number.
    pub fn label(&self) -> String {
        if self.level.fract() == 0.0 {
            format!("{}", self.level as i64)
        } else {
            format!("{}A", self.level.trunc() as i64)
        }
    }

    /// The full stage sequence for this level.
    pub fn stages(&self) -> Vec<i64> {
        generate_stages(self.entry_pay, self.max_stages)
    }
}

/// Generate the ordered basic-pay stages for a level.
///
/// The first stage is `entry_pay`; each following stage is the previous
/// one raised by 3% and rounded half-up to the nearest hundred.  A
/// `count` of zero or one yields just the entry pay.
pub fn generate_stages(entry_pay: i64, count: usize) -> Vec<i64> {
    let mut stages = Vec::with_capacity(count.max(1));
    stages.push(entry_pay);
    let mut current = entry_pay;
    for _ in 1..count {
        let next = round_half_up(current as f64 * INCREMENT_FACTOR / 100.0) * 100;
        stages.push(next);
        current = next;
    }
    stages
}

/// Look up a level by its position in [`PAY_LEVELS`].
pub fn level_at(index: usize) -> Result<&'static PayLevel> {
    PAY_LEVELS.get(index).ok_or(SalaryError::UnknownLevel {
        index,
        count: PAY_LEVELS.len(),
    })
}

/// Stage sequence for the level at `index`.
pub fn stages_for_index(index: usize) -> Result<Vec<i64>> {
    level_at(index).map(PayLevel::stages)
}
