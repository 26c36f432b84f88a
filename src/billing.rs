use bon::Builder;
use chrono::{NaiveDate, TimeDelta};
use ordered_float::OrderedFloat;

use crate::{prelude::*, quantity::cost::Cost, tariff::plan::Plan, usage::UsageReading};

/// Fixed 365-day comparison year.
const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Readings longer than this are meter artifacts, not usage.
const MAX_READING_SECONDS: i64 = 3600;

/// One plan's cost over the observed period and scaled to a year.
#[derive(Debug)]
pub struct Evaluation {
    pub plan_name: String,
    pub custom: bool,
    pub period_cost: Cost,
    pub annual_cost: Cost,
}

/// Prices an ordered usage stream under one plan.
#[derive(Builder)]
pub struct Evaluator<'a> {
    plan: &'a Plan,
    readings: &'a [UsageReading],
    observed: TimeDelta,
}

impl Evaluator<'_> {
    #[instrument(name = "Pricing…", fields(plan = self.plan.name()), skip_all)]
    pub fn run(self) -> Result<Evaluation> {
        let total = self.aggregate()?;
        Ok(self.annualize(total))
    }

    /// Fold the readings into calendar-day buckets: each day closes
    /// with the plan's daily aggregation rule plus the fixed daily
    /// charge. The daily charge accrues once per distinct date
    /// observed — gaps in the data do not synthesize days.
    fn aggregate(&self) -> Result<Cost> {
        let mut total = Cost::ZERO;
        let mut current_day: Option<NaiveDate> = None;
        let mut day_charges: Vec<Cost> = Vec::new();

        for reading in self.readings {
            if reading.interval.duration().num_seconds() > MAX_READING_SECONDS {
                continue;
            }
            let charge = reading.energy
                * self
                    .plan
                    .variable_rate(reading.interval.start)
                    .with_context(|| format!("while pricing the reading at {:?}", reading.interval))?;
            let date = reading.interval.start.date();
            match current_day {
                Some(day) if day == date => day_charges.push(charge),
                Some(_) => {
                    total += self.plan.daily_total(&day_charges) + self.plan.fixed_daily_charge();
                    day_charges.clear();
                    day_charges.push(charge);
                    current_day = Some(date);
                }
                None => {
                    current_day = Some(date);
                    day_charges.push(charge);
                }
            }
        }

        // Close the final day. An empty stream has no observed day and
        // accrues nothing.
        if current_day.is_some() {
            total += self.plan.daily_total(&day_charges) + self.plan.fixed_daily_charge();
        }
        Ok(total)
    }

    /// Scale the period total to the fixed comparison year, credit the
    /// joining bonus, and rescale back for the period-level sort key.
    fn annualize(&self, total: Cost) -> Evaluation {
        let subtotal = self.plan.adjusted_total(total);
        let scalar = SECONDS_PER_YEAR / self.observed.as_seconds_f64();
        let annual_cost = subtotal * scalar - self.plan.signup_bonus();
        Evaluation {
            plan_name: self.plan.name().to_owned(),
            custom: self.plan.is_custom(),
            period_cost: annual_cost / scalar,
            annual_cost,
        }
    }
}

/// Evaluate every plan against the same usage stream, cheapest first.
///
/// A plan that fails to price is logged with its identity and left
/// out; no partial result is published and the batch carries on.
pub fn rank(plans: &[Plan], readings: &[UsageReading], observed: TimeDelta) -> Vec<Evaluation> {
    let mut evaluations: Vec<Evaluation> = plans
        .iter()
        .filter_map(|plan| {
            Evaluator::builder()
                .plan(plan)
                .readings(readings)
                .observed(observed)
                .build()
                .run()
                .map_err(|error| warn!(plan = plan.name(), ?error, "skipping the plan"))
                .ok()
        })
        .collect();
    evaluations.sort_by_key(|evaluation| OrderedFloat(evaluation.period_cost.0));
    evaluations
}
