use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: price every catalog plan against a usage export
    /// and rank them cheapest-first.
    #[clap(name = "rank")]
    Rank(Box<RankArgs>),

    /// Inspect the configured plan catalog.
    #[clap(name = "plans")]
    Plans(Box<PlansArgs>),
}

#[derive(Parser)]
pub struct RankArgs {
    /// Path to the half-hourly usage CSV export.
    pub usage_file: PathBuf,

    #[clap(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Parser)]
pub struct PlansArgs {
    #[clap(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Path to the plan catalog.
    #[clap(long = "plans", env = "KEA_PLANS_PATH", default_value = "plans.toml")]
    pub path: PathBuf,
}
