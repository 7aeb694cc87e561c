//! Salary computation engine.
//!
//! The `engine` module turns a [`SalaryInputs`] snapshot into a
//! [`SalaryResult`].  It wires the individual calculators from
//! [`crate::allowances`] together, aggregates the totals and owns the
//! one stateful transition in the system: the cascade that runs when
//! the selected pay level changes.  The stage table uses [`rayon`] to
//! evaluate every stage of a level in parallel.

use crate::allowances::{
    compute_da, compute_hra, compute_nps, compute_ta, hra_floor, suggest_cgegis,
};
use crate::error::Result;
use crate::matrix::{level_at, stages_for_index};
use crate::models::{Deductions, Earnings, SalaryInputs, SalaryResult, Totals};
use log::debug;
use rayon::prelude::*;

/// Sum the earnings and deductions of a pay slip.
///
/// Net salary may be negative.  Sums saturate at the `i64` bounds.
pub fn aggregate(earnings: &Earnings, deductions: &Deductions) -> Totals {
    // Free-entry amounts can sit at the i64 bounds
    let gross_earnings = [
        earnings.da_amount,
        earnings.hra_amount,
        earnings.ta_amount,
        earnings.other_allowances,
    ]
    .iter()
    .fold(earnings.basic_pay, |sum, amount| sum.saturating_add(*amount));
    let total_deductions = [
        deductions.professional_tax,
        deductions.income_tax,
        deductions.cgegis,
        deductions.other_deductions,
    ]
    .iter()
    .fold(deductions.nps_amount, |sum, amount| sum.saturating_add(*amount));
    Totals {
        gross_earnings,
        total_deductions,
        net_salary: gross_earnings.saturating_sub(total_deductions),
    }
}

/// Compute the full result for an input snapshot.
///
/// The basic pay is used as given; stage membership is enforced at the
/// boundary by [`normalize_stage`] or [`on_level_change`].  Fails only
/// when `level_index` is outside the pay matrix.
pub fn calculate(inputs: &SalaryInputs) -> Result<SalaryResult> {
    let level = level_at(inputs.level_index)?;
    let basic_pay = inputs.basic_pay;

    // Allowances all key off the same DA rate; NPS needs the DA amount
    let da_amount = compute_da(basic_pay, inputs.da_percent);
    let hra = compute_hra(basic_pay, inputs.da_percent, inputs.city_type);
    let ta_amount = compute_ta(level.level, inputs.da_percent, inputs.higher_tpta_city);
    let nps_amount = compute_nps(basic_pay, da_amount, inputs.nps_enabled);

    let earnings = Earnings {
        basic_pay,
        da_amount,
        hra_amount: hra.amount,
        ta_amount,
        other_allowances: inputs.other_allowances,
    };
    let deductions = Deductions {
        nps_amount,
        professional_tax: inputs.professional_tax,
        income_tax: inputs.income_tax,
        cgegis: inputs.cgegis,
        other_deductions: inputs.other_deductions,
    };
    let totals = aggregate(&earnings, &deductions);

    // Report the floor alongside the amount so callers can tell when it applied
    Ok(SalaryResult {
        basic_pay,
        da_amount,
        hra_percent: hra.percent,
        hra_amount: hra.amount,
        hra_floor: hra_floor(inputs.city_type),
        ta_amount,
        nps_amount,
        gross_earnings: totals.gross_earnings,
        total_deductions: totals.total_deductions,
        net_salary: totals.net_salary,
    })
}

/// Reset the basic pay to the level's first stage when it is not one of
/// the level's stages.  Everything else is left alone.
pub fn normalize_stage(inputs: &SalaryInputs) -> Result<SalaryInputs> {
    let stages = stages_for_index(inputs.level_index)?;
    let mut next = inputs.clone();
    if !stages.contains(&inputs.basic_pay) {
        debug!(
            "basic pay {} is not a stage of level index {}; resetting to {}",
            inputs.basic_pay, inputs.level_index, stages[0]
        );
        next.basic_pay = stages[0];
    }
    Ok(next)
}

/// Apply a change of pay level to the previous inputs.
///
/// In order: the new level's stages are generated, the selected basic
/// pay is kept only if it is one of those stages (otherwise the first
/// stage is selected) and CGEGIS is replaced by the new level's
/// suggestion.  All other fields carry over.
pub fn on_level_change(new_level_index: usize, previous: &SalaryInputs) -> Result<SalaryInputs> {
    let level = level_at(new_level_index)?;
    let mut next = previous.clone();
    next.level_index = new_level_index;
    // Keep the basic pay only if the new level has that stage
    let mut next = normalize_stage(&next)?;
    // The suggestion overwrites whatever CGEGIS the user had entered
    next.cgegis = suggest_cgegis(level.level);
    debug!(
        "level changed to {} (basic pay {}, cgegis {})",
        level.label(),
        next.basic_pay,
        next.cgegis
    );
    Ok(next)
}

/// Results for every stage of the selected level, in stage order.
///
/// Each stage is evaluated with the caller's other inputs unchanged.
pub fn stage_table(inputs: &SalaryInputs) -> Result<Vec<SalaryResult>> {
    let stages = level_at(inputs.level_index)?.stages();
    // Every stage is independent, so fan out across the rayon pool;
    // `collect` keeps the stage order.
    stages
        .into_par_iter()
        .map(|basic_pay| {
            let row = SalaryInputs {
                basic_pay,
                ..inputs.clone()
            };
            calculate(&row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalaryError;
    use crate::matrix::PAY_LEVELS;
    use crate::models::{CityType, RawSalaryInputs};
    use proptest::prelude::{prop_assert_eq, proptest};

    fn level_ten_inputs() -> SalaryInputs {
        SalaryInputs {
            level_index: 9,
            basic_pay: 56100,
            da_percent: 50.0,
            city_type: CityType::X,
            higher_tpta_city: true,
            other_allowances: 0,
            nps_enabled: true,
            professional_tax: 200,
            income_tax: 0,
            cgegis: 120,
            other_deductions: 0,
        }
    }

    #[test]
    fn test_level_ten_end_to_end() {
        let result = calculate(&level_ten_inputs()).unwrap();
        assert_eq!(result.da_amount, 28050);
        assert_eq!(result.hra_percent, 30);
        assert_eq!(result.hra_amount, 16830);
        assert_eq!(result.ta_amount, 10800);
        assert_eq!(result.gross_earnings, 111780);
        assert_eq!(result.nps_amount, 8415);
        assert_eq!(result.total_deductions, 8735);
        assert_eq!(result.net_salary, 103045);
    }

    #[test]
    fn test_aggregate_allows_negative_net() {
        let earnings = Earnings {
            basic_pay: 18000,
            ..Default::default()
        };
        let deductions = Deductions {
            income_tax: 25000,
            ..Default::default()
        };
        let totals = aggregate(&earnings, &deductions);
        assert_eq!(totals.gross_earnings, 18000);
        assert_eq!(totals.total_deductions, 25000);
        assert_eq!(totals.net_salary, -7000);
    }

    #[test]
    fn test_extreme_inputs_clamp_instead_of_overflowing() {
        let inputs = SalaryInputs {
            da_percent: 1e17,
            ..Default::default()
        };
        let result = calculate(&inputs).unwrap();
        assert_eq!(result.da_amount, i64::MAX);
        assert_eq!(result.gross_earnings, i64::MAX);
        assert!(result.nps_amount > 0);
        assert_eq!(
            result.net_salary,
            result.gross_earnings - result.total_deductions
        );

        let raw = RawSalaryInputs {
            basic_pay: "18000".into(),
            other_allowances: "1e30".into(),
            income_tax: "-1e30".into(),
            ..Default::default()
        };
        let result = calculate(&SalaryInputs::from(raw)).unwrap();
        assert_eq!(result.gross_earnings, i64::MAX);
        assert_eq!(result.total_deductions, i64::MIN);
        assert_eq!(result.net_salary, i64::MAX);
    }

    #[test]
    fn test_floor_is_reported() {
        let inputs = SalaryInputs {
            da_percent: 10.0,
            city_type: CityType::Z,
            ..Default::default()
        };
        let result = calculate(&inputs).unwrap();
        assert_eq!(result.hra_percent, 8);
        assert_eq!(result.hra_amount, 1800);
        assert_eq!(result.hra_amount, result.hra_floor);
    }

    #[test]
    fn test_unknown_level_fails() {
        let inputs = SalaryInputs {
            level_index: 99,
            ..Default::default()
        };
        assert!(matches!(
            calculate(&inputs),
            Err(SalaryError::UnknownLevel { index: 99, .. })
        ));
        assert!(on_level_change(99, &inputs).is_err());
    }

    #[test]
    fn test_level_change_resets_stage_and_cgegis() {
        let previous = SalaryInputs::default();
        let next = on_level_change(9, &previous).unwrap();
        assert_eq!(next.level_index, 9);
        assert_eq!(next.basic_pay, 56100);
        assert_eq!(next.cgegis, 120);
        assert_eq!(next.da_percent, previous.da_percent);
        assert_eq!(next.professional_tax, previous.professional_tax);
    }

    #[test]
    fn test_level_change_keeps_shared_stage() {
        // 47600 is a stage of level 7 and the entry pay of level 8.
        let previous = SalaryInputs {
            level_index: 6,
            basic_pay: 47600,
            cgegis: 500,
            ..Default::default()
        };
        assert!(PAY_LEVELS[6].stages().contains(&47600));
        let next = on_level_change(7, &previous).unwrap();
        assert_eq!(next.basic_pay, 47600);
        assert_eq!(next.cgegis, 60);

        let back = on_level_change(6, &next).unwrap();
        assert_eq!(back.basic_pay, 47600);
    }

    #[test]
    fn test_normalize_stage_leaves_cgegis() {
        let inputs = SalaryInputs {
            basic_pay: 18001,
            cgegis: 999,
            ..Default::default()
        };
        let fixed = normalize_stage(&inputs).unwrap();
        assert_eq!(fixed.basic_pay, 18000);
        assert_eq!(fixed.cgegis, 999);
        assert_eq!(normalize_stage(&fixed).unwrap(), fixed);
    }

    #[test]
    fn test_stage_table_follows_stage_order() {
        let inputs = level_ten_inputs();
        let table = stage_table(&inputs).unwrap();
        let stages = PAY_LEVELS[9].stages();
        assert_eq!(table.len(), stages.len());
        for (row, stage) in table.iter().zip(&stages) {
            assert_eq!(row.basic_pay, *stage);
        }
        assert_eq!(table[0], calculate(&inputs).unwrap());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_calculate_is_pure(
            level_index in 0usize..19,
            stage in 0usize..40,
            da in 0u32..120,
            tax in 0i64..50_000,
        ) {
            let stages = PAY_LEVELS[level_index].stages();
            let inputs = SalaryInputs {
                level_index,
                basic_pay: stages[stage % stages.len()],
                da_percent: da as f64,
                income_tax: tax,
                ..Default::default()
            };
            let first = calculate(&inputs).unwrap();
            prop_assert_eq!(first, calculate(&inputs).unwrap());
            prop_assert_eq!(first.net_salary, first.gross_earnings - first.total_deductions);
        }
    }
}
