use itertools::Itertools;

use crate::{quantity::cost::Cost, tariff::schedule::HourWindow};

/// Sum one day's half-hourly charges, forgiving the most valuable
/// non-peak clock hour («hour of free power»).
///
/// The customer is assumed to have shifted usage optimally, so the
/// eligible hour with the greatest charge is the one taken for free.
/// Selection uses a strict comparison: on a tie the earliest hour wins.
/// The benefit only applies to complete days of 48 half-hours; anything
/// else is summed as-is.
pub fn total_with_free_hour(charges: &[Cost], peak_windows: &[HourWindow]) -> Cost {
    if charges.len() != 48 {
        return charges.iter().copied().sum();
    }

    let hourly: Vec<Cost> =
        charges.iter().copied().tuples().map(|(first, second)| first + second).collect();

    let mut free_hour = 0_usize;
    let mut free_hour_charge = Cost::ZERO;
    for (hour, charge) in hourly.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        if peak_windows.iter().any(|window| window.contains_hour(hour as u32)) {
            continue;
        }
        if *charge > free_hour_charge {
            free_hour_charge = *charge;
            free_hour = hour;
        }
    }

    hourly
        .into_iter()
        .enumerate()
        .filter(|(hour, _)| *hour != free_hour)
        .map(|(_, charge)| charge)
        .sum()
}
