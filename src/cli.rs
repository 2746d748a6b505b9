use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gantt", about = "Track project activities and chart them per person", version)]
pub struct Cli {
    /// Path to the activities workbook [default: ~/.gantt/gantt.xlsx]
    #[arg(long, env = "GANTT_WORKBOOK", global = true)]
    pub workbook: Option<PathBuf>,

    /// Path to the config file [default: ~/.gantt/config.toml]
    #[arg(long, env = "GANTT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an activity
    Add {
        /// Activity name
        name: String,
        /// Start date (YYYY-MM-DD or DD/MM/YYYY)
        start: String,
        /// End date, after the start date
        end: String,
        /// Person responsible for the activity
        person: String,
        /// Status (NotStarted, InProgress, Completed, Delayed, Paused)
        #[arg(short, long, default_value = "InProgress")]
        status: String,
    },

    /// Edit an activity
    Edit {
        /// Activity ID
        id: u32,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New start date
        #[arg(long)]
        start: Option<String>,
        /// New end date
        #[arg(long)]
        end: Option<String>,
        /// New person
        #[arg(short, long)]
        person: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
        /// Set a field by name (repeatable); unknown fields are ignored
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
    },

    /// Remove an activity
    Rm {
        /// Activity ID
        id: u32,
    },

    /// Show activity details
    Show {
        /// Activity ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List activities
    List {
        /// Only activities of this person
        #[arg(short, long)]
        person: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct persons, in first-seen order
    Persons,

    /// Render the Gantt chart as PNG
    Chart {
        /// Only activities of this person
        #[arg(short, long)]
        person: Option<String>,
        /// Output file [default: <chart dir>/gantt_<person>.png]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all activities to a workbook
    Export {
        /// Output .xlsx file
        path: PathBuf,
    },

    /// Add a set of sample activities
    Demo,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}
