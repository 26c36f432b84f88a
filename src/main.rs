#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod billing;
mod cli;
mod config;
mod prelude;
mod quantity;
mod tables;
mod tariff;
mod usage;

use chrono::TimeDelta;
use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    config::Catalog,
    prelude::*,
    tables::{build_catalog_table, build_ranking_table},
    tariff::registry,
    usage::UsageHistory,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Rank(args) => {
            let catalog = Catalog::read_from(&args.catalog.path)?;
            let plans = registry::build(catalog);
            ensure!(!plans.is_empty(), "the catalog contains no evaluable plans");

            let history = UsageHistory::read_from(&args.usage_file)?;
            ensure!(
                history.observed > TimeDelta::zero(),
                "the usage export contains no readings"
            );
            info!(days = history.observed_days(), "metered period");

            let evaluations = billing::rank(&plans, &history.readings, history.observed);
            println!("{}", build_ranking_table(&evaluations));
        }

        Command::Plans(args) => {
            let catalog = Catalog::read_from(&args.catalog.path)?;
            let entries: Vec<_> = catalog
                .plans
                .into_iter()
                .map(|config| {
                    let plan = registry::resolve(config);
                    let validation = plan.validate();
                    (plan, validation)
                })
                .collect();
            println!("{}", build_catalog_table(&entries));
        }
    }

    info!("done!");
    Ok(())
}
