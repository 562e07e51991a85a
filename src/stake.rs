//! Kelly criterion stake sizing with a hard cap on the bankroll fraction.

use crate::error::InvalidInput;

/// Largest fraction of the bankroll staked on a single selection.
pub const DEFAULT_CAP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakeRecommendation {
    pub stake: f64,
    /// Fraction of the bankroll, in `[0, cap]`.
    pub fraction: f64,
}

/// Sizes a stake on a selection priced at `decimal_odds` that wins with
/// `win_probability_percent` chance. A selection without a positive edge gets no stake.
pub fn compute_stake(
    bankroll: f64,
    decimal_odds: f64,
    win_probability_percent: f64,
    cap: f64,
) -> Result<StakeRecommendation, InvalidInput> {
    check(bankroll, "bankroll", "finite and non-negative", |v| v >= 0.0)?;
    check(decimal_odds, "decimal odds", "finite and greater than 1", |v| v > 1.0)?;
    check(
        win_probability_percent,
        "win probability",
        "a finite percentage in [0, 100]",
        |v| (0.0..=100.0).contains(&v),
    )?;
    check(cap, "cap", "a finite fraction in [0, 1]", |v| (0.0..=1.0).contains(&v))?;

    let fraction = kelly_fraction(decimal_odds, win_probability_percent / 100.0).clamp(0.0, cap);
    Ok(StakeRecommendation {
        stake: bankroll * fraction,
        fraction,
    })
}

/// Full Kelly fraction for net odds `decimal_odds - 1` and win probability `p`.
fn kelly_fraction(decimal_odds: f64, p: f64) -> f64 {
    let b = decimal_odds - 1.0;
    (b * p - (1.0 - p)) / b
}

fn check(
    value: f64,
    argument: &'static str,
    constraint: &'static str,
    valid: impl FnOnce(f64) -> bool,
) -> Result<(), InvalidInput> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(InvalidInput {
            argument,
            constraint,
            value,
        })
    }
}

/// A stake calculator with a configured cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KellyStaker {
    pub cap: f64,
}
impl KellyStaker {
    pub fn new(cap: f64) -> Self {
        Self { cap }
    }

    pub fn stake(
        &self,
        bankroll: f64,
        decimal_odds: f64,
        win_probability_percent: f64,
    ) -> Result<StakeRecommendation, InvalidInput> {
        compute_stake(bankroll, decimal_odds, win_probability_percent, self.cap)
    }
}

impl Default for KellyStaker {
    fn default() -> Self {
        Self::new(DEFAULT_CAP)
    }
}
