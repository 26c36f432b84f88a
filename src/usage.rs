use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};

use crate::{
    prelude::*,
    quantity::{energy::KilowattHours, interval::Interval},
};

/// Fixed column positions in the retailer's usage export.
const PERIOD_START_COLUMN: usize = 9;
const PERIOD_END_COLUMN: usize = 10;
const USAGE_COLUMN: usize = 12;

/// Exports mix both renditions, sometimes within one file.
const DATETIME_FORMATS: [&str; 2] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];

/// One metered period and the energy drawn in it.
#[derive(Copy, Clone, Debug)]
pub struct UsageReading {
    pub interval: Interval,
    pub energy: KilowattHours,
}

/// The whole export, in file (start time) order.
pub struct UsageHistory {
    pub readings: Vec<UsageReading>,

    /// Total metered span. Accumulated over every row, anomalous ones
    /// included: anomalies are filtered at aggregation, not here.
    pub observed: TimeDelta,
}

impl UsageHistory {
    pub fn read_from(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open the usage export `{}`", path.display()))?;
        let mut readings = Vec::new();
        let mut observed = TimeDelta::zero();
        for (index, record) in reader.records().enumerate() {
            let record = record.context("failed to read the usage export")?;
            let reading = parse_record(&record)
                .with_context(|| format!("malformed usage row #{}", index + 1))?;
            observed += reading.interval.duration();
            readings.push(reading);
        }
        info!(n_readings = readings.len(), "loaded the usage history");
        Ok(Self { readings, observed })
    }

    pub fn observed_days(&self) -> f64 {
        self.observed.as_seconds_f64() / 86_400.0
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<UsageReading> {
    let start = parse_timestamp(field(record, PERIOD_START_COLUMN)?)?;
    let end = parse_timestamp(field(record, PERIOD_END_COLUMN)?)?;
    let usage = field(record, USAGE_COLUMN)?;
    let energy = usage
        .parse::<f64>()
        .map(KilowattHours::from)
        .with_context(|| format!("could not parse the usage `{usage}`"))?;
    Ok(UsageReading { interval: Interval::new(start, end), energy })
}

fn field<'r>(record: &'r csv::StringRecord, index: usize) -> Result<&'r str> {
    record.get(index).with_context(|| format!("column #{index} is missing"))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .with_context(|| format!("could not parse the timestamp `{value}`"))
}
