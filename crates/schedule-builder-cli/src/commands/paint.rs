use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use schedule_builder_core::selection::replay;
use schedule_builder_core::{
    Config, GestureStep, ScheduleCollection, SelectionEngine, SelectionMode, SlotChange,
};

#[derive(Args)]
pub struct PaintArgs {
    /// Gesture script (JSON array of steps)
    #[arg(long)]
    pub script: PathBuf,
    /// Starting schedule (JSON array of slots); empty if omitted
    #[arg(long)]
    pub schedule: Option<PathBuf>,
    /// Mode active before the first step; defaults to the configured mode
    #[arg(long)]
    pub mode: Option<SelectionMode>,
    /// Print the individual changes instead of the final schedule
    #[arg(long)]
    pub changes: bool,
}

pub fn run(args: PaintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let steps: Vec<GestureStep> = super::read_json(&args.script)?;
    let start: ScheduleCollection = match &args.schedule {
        Some(path) => super::read_json(path)?,
        None => ScheduleCollection::new(),
    };
    let mode = match args.mode {
        Some(mode) => mode,
        None => Config::load_or_default().default_mode,
    };

    let mut engine = SelectionEngine::with_schedule(mode, start);
    let changes = replay(&mut engine, &steps);
    let cells: BTreeSet<_> = changes.iter().map(SlotChange::key).collect();
    tracing::info!(
        steps = steps.len(),
        changes = changes.len(),
        cells = cells.len(),
        "script replayed"
    );

    if args.changes {
        println!("{}", serde_json::to_string_pretty(&changes)?);
    } else {
        println!("{}", serde_json::to_string_pretty(engine.schedule())?);
    }
    Ok(())
}
