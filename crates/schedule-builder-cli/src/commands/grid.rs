use std::path::PathBuf;

use clap::Args;
use schedule_builder_core::{
    compute_grid, day_label, time_label, Config, GridConfig, GridModel, ScheduleCollection,
    SelectionMode,
};

#[derive(Args)]
pub struct GridArgs {
    /// First hour shown (0-23)
    #[arg(long)]
    pub start_hour: Option<i32>,
    /// Hour the grid ends at (0-23)
    #[arg(long)]
    pub end_hour: Option<i32>,
    /// Block size in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub block: Option<u32>,
    /// Show Saturday (`--saturday=false` hides it)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub saturday: Option<bool>,
    /// Show Sunday (`--sunday=false` hides it)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub sunday: Option<bool>,
    /// Overlay a schedule (JSON array of slots)
    #[arg(long)]
    pub schedule: Option<PathBuf>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl GridArgs {
    /// Config file values with command-line overrides applied.
    pub fn grid_config(&self, base: GridConfig) -> GridConfig {
        GridConfig {
            start_hour: self.start_hour.unwrap_or(base.start_hour),
            end_hour: self.end_hour.unwrap_or(base.end_hour),
            block_size_minutes: self.block.unwrap_or(base.block_size_minutes),
            include_saturday: self.saturday.unwrap_or(base.include_saturday),
            include_sunday: self.sunday.unwrap_or(base.include_sunday),
        }
    }
}

pub fn run(args: GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let grid = compute_grid(&args.grid_config(config.grid));
    let schedule: ScheduleCollection = match &args.schedule {
        Some(path) => super::read_json(path)?,
        None => ScheduleCollection::new(),
    };

    if args.json {
        let days: Vec<_> = grid
            .days
            .iter()
            .map(|&d| serde_json::json!({ "day": d, "label": day_label(d) }))
            .collect();
        let rows: Vec<_> = grid
            .rows
            .iter()
            .map(|&t| serde_json::json!({ "time": t, "label": time_label(t) }))
            .collect();
        let out = serde_json::json!({
            "days": days,
            "rows": rows,
            "start_minutes": grid.start_minutes,
            "end_minutes": grid.end_minutes,
            "block_size_minutes": grid.block_size_minutes,
            "cells": grid.cell_count(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_table(&grid, &schedule));
    }
    Ok(())
}

fn mode_glyph(mode: Option<SelectionMode>) -> char {
    match mode {
        None => '.',
        Some(SelectionMode::Cannot) => 'x',
        Some(SelectionMode::PreferNot) => '-',
        Some(SelectionMode::Available) => 'o',
        Some(SelectionMode::Preferred) => '*',
    }
}

pub fn render_table(grid: &GridModel, schedule: &ScheduleCollection) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>9}", ""));
    for &day in &grid.days {
        out.push_str(&format!("{:>5}", day_label(day)));
    }
    out.push('\n');

    for &time in &grid.rows {
        out.push_str(&format!("{:>9}", time_label(time)));
        for &day in &grid.days {
            out.push_str(&format!("{:>5}", mode_glyph(schedule.get(day, time))));
        }
        out.push('\n');
    }

    let hidden = schedule
        .iter()
        .filter(|s| !grid.contains(s.day, s.time))
        .count();
    if hidden > 0 {
        out.push_str(&format!("({hidden} slot(s) outside this grid not shown)\n"));
    }
    out
}
