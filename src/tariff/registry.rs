use crate::{
    config::{Catalog, PlanConfig},
    prelude::*,
    tariff::plan::{Plan, Variant},
};

/// Attach the time-of-use behavior to a configured plan name.
///
/// Names the catalog does not recognize price with the generic flat
/// schedule.
pub fn resolve(config: PlanConfig) -> Plan {
    let variant = variant_for(&config.name).unwrap_or(Variant::Flat);
    Plan::new(config.name, variant, config.rates)
}

/// Resolve the whole catalog into evaluable plans.
///
/// A plan whose rate card misses a component its schedule references
/// is reported and left out; the rest of the catalog still evaluates.
pub fn build(catalog: Catalog) -> Vec<Plan> {
    let mut plans = Vec::with_capacity(catalog.plans.len());
    for config in catalog.plans {
        let plan = resolve(config);
        match plan.validate() {
            Ok(()) => plans.push(plan),
            Err(error) => {
                error!(plan = plan.name(), %error, "excluding the plan from the comparison");
            }
        }
    }
    plans
}

fn variant_for(name: &str) -> Option<Variant> {
    let variant = match name {
        "ContactGoodCharge" | "ContactGoodChargeLowUser" | "GenesisEV" => Variant::DayNight,
        "ContactGoodNights" | "ContactGoodNightsLowUser" => Variant::FreeNights,
        "ContactGoodWeekends" | "ContactGoodWeekendsLowUser" => Variant::FreeWeekends,
        "ZEv" | "ZEvLowUser" => Variant::FreeEarlyHours,
        "FlickOffPeak" | "FlickOffPeakLowUser" => Variant::DoublePeak,
        "ElectricKiwi"
        | "ElectricKiwiKiwi"
        | "ElectricKiwiKiwiLowUser"
        | "ElectricKiwiPrepay300"
        | "ElectricKiwiPrepay300LowUser" => Variant::WeekdayPeakFreeHour,
        "ElectricKiwiMoveMaster" | "ElectricKiwiMoveMasterLowUser" => Variant::ShoulderFreeHour,
        "OctopusFixed" | "OctopusFixedLowUser" => Variant::ThreeTierWeekday,
        _ => return None,
    };
    Some(variant)
}
