use std::path::PathBuf;

use clap::Args;
use schedule_builder_core::{compute_grid, AvailabilityReport, Config, EntityStore};

#[derive(Args)]
pub struct ReportArgs {
    /// Roster file (JSON export of the people store)
    #[arg(long)]
    pub roster: PathBuf,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store: EntityStore = super::read_json(&args.roster)?;
    let config = Config::load_or_default();
    let report = AvailabilityReport::build(&store, &compute_grid(&config.grid));

    for student in &report.students {
        if student.hidden_slots > 0 {
            tracing::warn!(
                name = %student.name,
                hidden = student.hidden_slots,
                "student has slots outside the configured grid"
            );
        }
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
