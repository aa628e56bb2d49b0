//! Plan output: plain text for the terminal, CSV for downstream tools.
//!
//! CSV columns: `step, kind, direction, street, miles, item`.  Columns that do
//! not apply to a command kind are left empty.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::command::DeliveryCommand;
use crate::{DeliveryPlan, PlanResult};

/// One CSV row per command.
#[derive(Debug, Serialize)]
pub struct CommandRow<'a> {
    pub step:      usize,
    pub kind:      &'static str,
    pub direction: Option<&'static str>,
    pub street:    Option<&'a str>,
    pub miles:     Option<f64>,
    pub item:      Option<&'a str>,
}

impl<'a> CommandRow<'a> {
    pub fn new(step: usize, command: &'a DeliveryCommand) -> Self {
        let mut row = Self {
            step,
            kind: command.kind(),
            direction: None,
            street: None,
            miles: None,
            item: None,
        };
        match command {
            DeliveryCommand::Proceed { direction, street, miles } => {
                row.direction = Some(direction.as_str());
                row.street = Some(&**street);
                row.miles = Some(*miles);
            }
            DeliveryCommand::Turn { direction, street } => {
                row.direction = Some(direction.as_str());
                row.street = Some(&**street);
            }
            DeliveryCommand::Deliver { item } => row.item = Some(item.as_str()),
        }
        row
    }
}

/// Write `plan` as CSV to a new file at `path`.
pub fn write_plan_csv(path: &Path, plan: &DeliveryPlan) -> PlanResult<()> {
    write_plan_csv_to(File::create(path)?, plan)
}

/// Write `plan` as CSV to any writer.
pub fn write_plan_csv_to<W: Write>(out: W, plan: &DeliveryPlan) -> PlanResult<()> {
    let mut writer = Writer::from_writer(out);
    for (i, command) in plan.commands.iter().enumerate() {
        writer.serialize(CommandRow::new(i + 1, command))?;
    }
    writer.flush()?;
    Ok(())
}

/// One command per line, then the routed total.
pub fn write_plan_text<W: Write>(out: &mut W, plan: &DeliveryPlan) -> PlanResult<()> {
    for command in &plan.commands {
        writeln!(out, "{command}")?;
    }
    writeln!(out, "Total travel distance: {:.2} miles", plan.total_miles)?;
    Ok(())
}
