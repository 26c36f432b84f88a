use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::{
    quantity::{cost::Cost, rate::KilowattHourRate},
    tariff::{
        free_hour::total_with_free_hour,
        schedule::{EVENING_PEAK, HourWindow, MORNING_PEAK, is_weekend},
    },
};

/// Tariff components a plan's rate card may set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Component {
    #[display("variable")]
    Variable,

    #[display("offpeak")]
    Offpeak,

    #[display("night")]
    Night,

    #[display("daily")]
    Daily,

    #[display("surcharge")]
    Surcharge,

    #[display("bonus")]
    Bonus,
}

/// A plan's rate card does not set a rate its schedule references.
#[derive(Debug, thiserror::Error)]
#[error("no `{component}` rate is set for `{plan}`")]
pub struct MissingRate {
    pub plan: String,
    pub component: Component,
}

/// Rate card for one plan.
///
/// Per-kilowatt-hour rates are in cents, the daily charge in cents per
/// calendar day, the surcharge a fraction of the subtotal, and the
/// joining bonus in whole dollars.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateTable {
    pub variable: Option<KilowattHourRate>,
    pub offpeak: Option<KilowattHourRate>,
    pub night: Option<KilowattHourRate>,
    pub daily: Option<Cost>,
    pub surcharge: Option<f64>,
    pub bonus: Option<f64>,
}

/// Time-of-use behavior attached to a plan name.
///
/// Rate differences between sibling offers (the «low user» spellings)
/// are catalog data; the variant only selects the schedule and the
/// daily aggregation rule.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Variant {
    /// Single rate around the clock: the fallback for names the
    /// registry does not recognize.
    Flat,

    /// 07:00–21:00 at the variable rate, off-peak otherwise.
    DayNight,

    /// Free power from 21:00 to midnight, the variable rate otherwise.
    FreeNights,

    /// Free power 09:00–17:00 on weekends, the variable rate otherwise.
    FreeWeekends,

    /// Free power 03:00–06:00, daytime 07:00–21:00 at the variable
    /// rate, off-peak otherwise.
    FreeEarlyHours,

    /// Peaks 07:00–11:00 and 17:00–21:00 every day of the week.
    DoublePeak,

    /// Weekday peaks 07:00–09:00 and 17:00–21:00, everything else
    /// off-peak, with one free hour per day.
    WeekdayPeakFreeHour,

    /// Weekday peaks with day and evening shoulders and a night floor,
    /// with one free hour per day.
    ShoulderFreeHour,

    /// Weekday peak/shoulder/night tiers; weekends flatten to
    /// off-peak daytime over a night floor.
    ThreeTierWeekday,
}

impl Variant {
    /// Components the variant's schedule references.
    ///
    /// The daily charge is deliberately absent: it defaults to zero.
    pub const fn required(self) -> &'static [Component] {
        match self {
            Self::Flat | Self::FreeNights | Self::FreeWeekends => &[Component::Variable],
            Self::DayNight
            | Self::FreeEarlyHours
            | Self::DoublePeak
            | Self::WeekdayPeakFreeHour => &[Component::Variable, Component::Offpeak],
            Self::ShoulderFreeHour | Self::ThreeTierWeekday => {
                &[Component::Variable, Component::Offpeak, Component::Night]
            }
        }
    }

    const fn has_free_hour(self) -> bool {
        matches!(self, Self::WeekdayPeakFreeHour | Self::ShoulderFreeHour)
    }
}

/// A priced retail offering: immutable once constructed, read-only
/// across the whole evaluation run.
#[derive(Clone, Debug)]
pub struct Plan {
    name: String,
    variant: Variant,
    rates: RateTable,
}

impl Plan {
    pub const fn new(name: String, variant: Variant, rates: RateTable) -> Self {
        Self { name, variant, rates }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether the plan priced with a specialized schedule rather than
    /// the generic fallback.
    pub const fn is_custom(&self) -> bool {
        !matches!(self.variant, Variant::Flat)
    }

    /// Capability check: the rate card must set every component the
    /// schedule references.
    pub fn validate(&self) -> Result<(), MissingRate> {
        for component in self.variant.required() {
            self.rate(*component)?;
        }
        Ok(())
    }

    /// Per-kilowatt-hour rate in force at the given moment.
    pub fn variable_rate(&self, at: NaiveDateTime) -> Result<KilowattHourRate, MissingRate> {
        match self.variant {
            Variant::Flat => self.rate(Component::Variable),

            Variant::DayNight => {
                if HourWindow::new(7, 21).contains(at) {
                    self.rate(Component::Variable)
                } else {
                    self.rate(Component::Offpeak)
                }
            }

            Variant::FreeNights => {
                if at.hour() >= 21 {
                    Ok(KilowattHourRate::ZERO)
                } else {
                    self.rate(Component::Variable)
                }
            }

            Variant::FreeWeekends => {
                if is_weekend(at) && HourWindow::new(9, 17).contains(at) {
                    Ok(KilowattHourRate::ZERO)
                } else {
                    self.rate(Component::Variable)
                }
            }

            Variant::FreeEarlyHours => {
                if HourWindow::new(3, 6).contains(at) {
                    Ok(KilowattHourRate::ZERO)
                } else if HourWindow::new(7, 21).contains(at) {
                    self.rate(Component::Variable)
                } else {
                    self.rate(Component::Offpeak)
                }
            }

            Variant::DoublePeak => {
                if HourWindow::new(7, 11).contains(at) || EVENING_PEAK.contains(at) {
                    self.rate(Component::Variable)
                } else {
                    self.rate(Component::Offpeak)
                }
            }

            Variant::WeekdayPeakFreeHour => {
                if !is_weekend(at) && (MORNING_PEAK.contains(at) || EVENING_PEAK.contains(at)) {
                    self.rate(Component::Variable)
                } else {
                    self.rate(Component::Offpeak)
                }
            }

            Variant::ShoulderFreeHour => {
                if !is_weekend(at) && (MORNING_PEAK.contains(at) || EVENING_PEAK.contains(at)) {
                    self.rate(Component::Variable)
                } else if HourWindow::new(9, 17).contains(at) || HourWindow::new(21, 23).contains(at)
                {
                    self.rate(Component::Offpeak)
                } else {
                    self.rate(Component::Night)
                }
            }

            Variant::ThreeTierWeekday => {
                if is_weekend(at) {
                    if HourWindow::new(7, 23).contains(at) {
                        self.rate(Component::Offpeak)
                    } else {
                        self.rate(Component::Night)
                    }
                } else if HourWindow::new(7, 11).contains(at) || EVENING_PEAK.contains(at) {
                    self.rate(Component::Variable)
                } else if HourWindow::new(11, 17).contains(at) || HourWindow::new(21, 23).contains(at)
                {
                    self.rate(Component::Offpeak)
                } else {
                    self.rate(Component::Night)
                }
            }
        }
    }

    /// Flat charge per observed calendar day. Zero when the catalog
    /// sets none.
    pub fn fixed_daily_charge(&self) -> Cost {
        self.rates.daily.unwrap_or(Cost::ZERO)
    }

    /// Collapse one day's charges into the day's usage total.
    pub fn daily_total(&self, charges: &[Cost]) -> Cost {
        if self.variant.has_free_hour() {
            total_with_free_hour(charges, &[MORNING_PEAK, EVENING_PEAK])
        } else {
            charges.iter().copied().sum()
        }
    }

    /// Apply the percentage surcharge. Identity when none is set.
    pub fn adjusted_total(&self, subtotal: Cost) -> Cost {
        subtotal * (1.0 + self.rates.surcharge.unwrap_or_default())
    }

    /// One-off joining credit, converted from dollars.
    pub fn signup_bonus(&self) -> Cost {
        Cost::from_dollars(self.rates.bonus.unwrap_or_default())
    }

    fn rate(&self, component: Component) -> Result<KilowattHourRate, MissingRate> {
        let rate = match component {
            Component::Variable => self.rates.variable,
            Component::Offpeak => self.rates.offpeak,
            Component::Night => self.rates.night,
            Component::Daily | Component::Surcharge | Component::Bonus => None,
        };
        rate.ok_or_else(|| MissingRate { plan: self.name.clone(), component })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;

    fn plan(variant: Variant, rates: RateTable) -> Plan {
        Plan::new("TestPlan".to_owned(), variant, rates)
    }

    fn two_tier() -> RateTable {
        RateTable {
            variable: Some(KilowattHourRate::from(30.0)),
            offpeak: Some(KilowattHourRate::from(15.0)),
            ..RateTable::default()
        }
    }

    fn three_tier() -> RateTable {
        RateTable { night: Some(KilowattHourRate::from(10.0)), ..two_tier() }
    }

    /// 2024-07-03 is a Wednesday.
    fn weekday(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    /// 2024-07-06 is a Saturday.
    fn saturday(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 6).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_day_night_boundary() {
        let plan = plan(Variant::DayNight, two_tier());
        assert_eq!(plan.variable_rate(weekday(6, 59, 59)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(weekday(7, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(21, 0, 0)).unwrap(), KilowattHourRate::from(15.0));
    }

    #[test]
    fn test_free_nights() {
        let plan = plan(Variant::FreeNights, two_tier());
        assert_eq!(plan.variable_rate(weekday(20, 59, 59)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(21, 0, 0)).unwrap(), KilowattHourRate::ZERO);
        assert_eq!(plan.variable_rate(weekday(23, 30, 0)).unwrap(), KilowattHourRate::ZERO);
    }

    #[test]
    fn test_free_weekends() {
        let plan = plan(Variant::FreeWeekends, two_tier());
        assert_eq!(plan.variable_rate(saturday(9, 0)).unwrap(), KilowattHourRate::ZERO);
        assert_eq!(plan.variable_rate(saturday(16, 30)).unwrap(), KilowattHourRate::ZERO);
        assert_eq!(plan.variable_rate(saturday(17, 0)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(12, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
    }

    #[test]
    fn test_free_early_hours() {
        let plan = plan(Variant::FreeEarlyHours, two_tier());
        assert_eq!(plan.variable_rate(weekday(3, 0, 0)).unwrap(), KilowattHourRate::ZERO);
        assert_eq!(plan.variable_rate(weekday(6, 30, 0)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(weekday(12, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
    }

    #[test]
    fn test_weekday_peak_flattens_weekends() {
        let plan = plan(Variant::WeekdayPeakFreeHour, two_tier());
        assert_eq!(plan.variable_rate(weekday(18, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(12, 0, 0)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(saturday(18, 0)).unwrap(), KilowattHourRate::from(15.0));
    }

    #[test]
    fn test_shoulder_schedule() {
        let plan = plan(Variant::ShoulderFreeHour, three_tier());
        assert_eq!(plan.variable_rate(weekday(8, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(12, 0, 0)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(weekday(23, 30, 0)).unwrap(), KilowattHourRate::from(10.0));
        // The peak windows are weekday-only, so a Saturday morning
        // falls through the shoulder checks to the night rate.
        assert_eq!(plan.variable_rate(saturday(8, 0)).unwrap(), KilowattHourRate::from(10.0));
        assert_eq!(plan.variable_rate(saturday(12, 0)).unwrap(), KilowattHourRate::from(15.0));
    }

    #[test]
    fn test_three_tier_weekday_schedule() {
        let plan = plan(Variant::ThreeTierWeekday, three_tier());
        assert_eq!(plan.variable_rate(weekday(8, 0, 0)).unwrap(), KilowattHourRate::from(30.0));
        assert_eq!(plan.variable_rate(weekday(12, 0, 0)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(weekday(23, 30, 0)).unwrap(), KilowattHourRate::from(10.0));
        assert_eq!(plan.variable_rate(saturday(8, 0)).unwrap(), KilowattHourRate::from(15.0));
        assert_eq!(plan.variable_rate(saturday(23, 30)).unwrap(), KilowattHourRate::from(10.0));
    }

    #[test]
    fn test_missing_rate_names_plan_and_component() {
        let plan = plan(Variant::DayNight, RateTable {
            variable: Some(KilowattHourRate::from(30.0)),
            ..RateTable::default()
        });
        let error = plan.variable_rate(weekday(23, 0, 0)).unwrap_err();
        assert_eq!(error.to_string(), "no `offpeak` rate is set for `TestPlan`");
    }

    #[test]
    fn test_validate_rejects_missing_night_rate() {
        assert!(plan(Variant::ShoulderFreeHour, two_tier()).validate().is_err());
        assert!(plan(Variant::ShoulderFreeHour, three_tier()).validate().is_ok());
    }

    #[test]
    fn test_adjusted_total_defaults_to_identity() {
        let plan = plan(Variant::Flat, two_tier());
        assert_abs_diff_eq!(plan.adjusted_total(Cost::from(1000.0)).0, 1000.0);
    }

    #[test]
    fn test_adjusted_total_applies_surcharge() {
        let plan =
            plan(Variant::Flat, RateTable { surcharge: Some(0.05), ..two_tier() });
        assert_abs_diff_eq!(plan.adjusted_total(Cost::from(1000.0)).0, 1050.0);
    }

    #[test]
    fn test_fixed_daily_charge_defaults_to_zero() {
        assert_eq!(plan(Variant::Flat, two_tier()).fixed_daily_charge(), Cost::ZERO);
    }
}
