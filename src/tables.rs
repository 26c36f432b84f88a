use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    billing::Evaluation,
    tariff::plan::{MissingRate, Plan},
};

/// Render the ranking, cheapest first. Period costs at or below the
/// median are green, the rest red.
pub fn build_ranking_table(evaluations: &[Evaluation]) -> Table {
    let median_cost = evaluations.get(evaluations.len() / 2).map(|evaluation| evaluation.period_cost);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Plan", "Period cost", "Annual cost", "Pricing"]);
    for evaluation in evaluations {
        table.add_row(vec![
            Cell::new(&evaluation.plan_name),
            Cell::new(evaluation.period_cost).set_alignment(CellAlignment::Right).fg(
                if Some(evaluation.period_cost) <= median_cost {
                    Color::Green
                } else {
                    Color::Red
                },
            ),
            Cell::new(evaluation.annual_cost).set_alignment(CellAlignment::Right),
            Cell::new(if evaluation.custom { "custom" } else { "generic" })
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

/// Render the configured catalog with each plan's resolved schedule
/// and validation status.
pub fn build_catalog_table(entries: &[(Plan, Result<(), MissingRate>)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Plan", "Schedule", "Status"]);
    for (plan, validation) in entries {
        table.add_row(vec![
            Cell::new(plan.name()),
            Cell::new(plan.variant()).add_attribute(Attribute::Dim),
            match validation {
                Ok(()) => Cell::new("ok").fg(Color::Green),
                Err(error) => Cell::new(error).fg(Color::Red),
            },
        ]);
    }
    table
}
