use std::path::{Path, PathBuf};

use clap::Subcommand;
use schedule_builder_core::people::parse_allowed_values;
use schedule_builder_core::{Attributes, EntityStore};

#[derive(Subcommand)]
pub enum RosterAction {
    /// Add a required student attribute
    Require {
        /// Roster file; created if missing
        #[arg(long)]
        roster: PathBuf,
        /// Attribute name
        name: String,
        /// Comma-separated allowed values; free-form if omitted
        #[arg(long)]
        values: Option<String>,
    },
    /// Enroll a student
    AddStudent {
        #[arg(long)]
        roster: PathBuf,
        name: String,
        /// Attribute as key=value (repeatable)
        #[arg(long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
    },
    /// Add an educator
    AddEducator {
        #[arg(long)]
        roster: PathBuf,
        name: String,
        /// Attribute as key=value (repeatable)
        #[arg(long = "attr", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,
        /// Subject taught (repeatable)
        #[arg(long = "subject")]
        subjects: Vec<String>,
    },
    /// Print the roster
    Show {
        #[arg(long)]
        roster: PathBuf,
    },
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn load(path: &Path) -> Result<EntityStore, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(EntityStore::new());
    }
    Ok(super::read_json(path)?)
}

fn save(path: &Path, store: &EntityStore) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(store)?)?;
    Ok(())
}

pub fn run(action: RosterAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RosterAction::Require {
            roster,
            name,
            values,
        } => {
            let mut store = load(&roster)?;
            let values = values.as_deref().and_then(parse_allowed_values);
            store.add_required_attribute(&name, values)?;
            save(&roster, &store)?;
            println!("ok");
        }
        RosterAction::AddStudent {
            roster,
            name,
            attrs,
        } => {
            let mut store = load(&roster)?;
            let id = store.add_student(&name, Attributes::from_pairs(attrs)?, Vec::new())?;
            save(&roster, &store)?;
            println!("{id}");
        }
        RosterAction::AddEducator {
            roster,
            name,
            attrs,
            subjects,
        } => {
            let mut store = load(&roster)?;
            let id = store.add_educator(&name, Attributes::from_pairs(attrs)?, subjects)?;
            save(&roster, &store)?;
            println!("{id}");
        }
        RosterAction::Show { roster } => {
            let store = load(&roster)?;
            println!("{}", serde_json::to_string_pretty(&store)?);
        }
    }
    Ok(())
}
