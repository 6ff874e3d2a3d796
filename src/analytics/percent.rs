//! The one place percentages are computed and formatted.
//!
//! Every percentage the API emits goes through [Percent], so the
//! zero-baseline rules and the wire formats cannot drift between the
//! analytics views.

use serde::{Serialize, Serializer};

/// A percentage field in an analytics payload.
///
/// Formatted percentages serialize as a string with exactly one decimal
/// digit, e.g. `"87.5"`. Positions where the payload has always carried a
/// bare numeric `0` instead — categories without a budget record, breakdown
/// rows when the period total is zero — use [Percent::Zero], which
/// serializes as the number `0`. Clients parse the literal payload, so both
/// representations are part of the output contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percent {
    /// A computed percentage, rendered with one decimal place.
    Formatted(f64),
    /// A bare numeric zero.
    Zero,
}

impl Percent {
    /// The share of `total` that `amount` represents.
    ///
    /// A non-positive `total` yields [Percent::Zero]: a share of nothing is
    /// reported as the bare zero, not as a formatted "0.0".
    pub fn share_of_total(amount: f64, total: f64) -> Self {
        if total > 0.0 {
            Percent::Formatted(amount / total * 100.0)
        } else {
            Percent::Zero
        }
    }

    /// How much of `budgeted` the `actual` spend consumed.
    ///
    /// A zero budget yields a formatted "0.0" rather than [Percent::Zero];
    /// the bare zero is reserved for categories with no budget record at all.
    pub fn budget_usage(actual: f64, budgeted: f64) -> Self {
        let percentage = if budgeted > 0.0 {
            actual / budgeted * 100.0
        } else {
            0.0
        };

        Percent::Formatted(percentage)
    }

    /// The period-over-period change from `previous` to `current`.
    ///
    /// A zero or negative baseline is reported as a 0.0% change regardless of
    /// `current`. This mirrors the behaviour clients already rely on, even
    /// though a change from 0 to a nonzero value is arguably undefined.
    pub fn change(current: f64, previous: f64) -> Self {
        let percentage = if previous > 0.0 {
            (current - previous) / previous * 100.0
        } else {
            0.0
        };

        Percent::Formatted(percentage)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Percent::Formatted(value) => serializer.serialize_str(&format!("{value:.1}")),
            Percent::Zero => serializer.serialize_u8(0),
        }
    }
}
