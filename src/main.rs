mod cli;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use gantt::config::Config;
use gantt::{chart, output, paths, ActivityStore, ActivityUpdate, Status};

const DEMO_ACTIVITIES: [(&str, &str, &str, &str, Status); 5] = [
    ("Frontend development", "2024-05-01", "2024-05-15", "Marco", Status::InProgress),
    ("Backend development", "2024-05-10", "2024-05-30", "Laura", Status::NotStarted),
    ("Testing", "2024-05-25", "2024-06-05", "Marco", Status::NotStarted),
    ("Documentation", "2024-06-01", "2024-06-10", "Giulia", Status::NotStarted),
    ("Deployment", "2024-06-10", "2024-06-15", "Laura", Status::NotStarted),
];

fn init_logging() {
    let filter = EnvFilter::try_from_env("GANTT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn load_store(workbook: &Path) -> Result<ActivityStore> {
    ActivityStore::load_or_default(workbook)
        .with_context(|| format!("failed to load {}", workbook.display()))
}

fn save_store(store: &ActivityStore, workbook: &Path) -> Result<()> {
    ensure_parent_dir(workbook)?;
    store
        .save(workbook)
        .with_context(|| format!("failed to save {}", workbook.display()))
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(paths::config_path);
    let config = Config::load_from(&config_path)?;
    let workbook: PathBuf = cli
        .workbook
        .or(config.store.workbook)
        .unwrap_or_else(paths::default_workbook);

    match cli.command {
        Command::Add {
            name,
            start,
            end,
            person,
            status,
        } => {
            let mut store = load_store(&workbook)?;
            let status = Status::parse(&status)?;
            let id = store.add(&name, start.as_str(), end.as_str(), &person, status)?;
            save_store(&store, &workbook)?;
            eprintln!("Added activity {id} '{name}'");
        }

        Command::Edit {
            id,
            name,
            start,
            end,
            person,
            status,
            set,
        } => {
            let mut store = load_store(&workbook)?;
            let (mut update, ignored) = ActivityUpdate::from_pairs(set)?;
            for field in &ignored {
                eprintln!("Ignoring unknown field '{field}'");
            }
            if name.is_some() {
                update.name = name;
            }
            if let Some(s) = start {
                update.start_date = Some(gantt::dates::parse_date(&s)?);
            }
            if let Some(e) = end {
                update.end_date = Some(gantt::dates::parse_date(&e)?);
            }
            if person.is_some() {
                update.person = person;
            }
            if let Some(s) = status {
                update.status = Some(Status::parse(&s)?);
            }
            if update.is_empty() {
                bail!("nothing to update");
            }
            if !store.update(id, &update)? {
                eprintln!("Activity {id} not found");
                std::process::exit(1);
            }
            save_store(&store, &workbook)?;
            eprintln!("Updated activity {id}");
        }

        Command::Rm { id } => {
            let mut store = load_store(&workbook)?;
            if !store.delete(id) {
                eprintln!("Activity {id} not found");
                std::process::exit(1);
            }
            save_store(&store, &workbook)?;
            eprintln!("Removed activity {id}");
        }

        Command::Show { id, json } => {
            let store = load_store(&workbook)?;
            let Some(activity) = store.get(id) else {
                eprintln!("Activity {id} not found");
                std::process::exit(1);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(activity)?);
            } else {
                print!("{}", output::format_activity_detail(activity));
            }
        }

        Command::List { person, json } => {
            let store = load_store(&workbook)?;
            let activities = match person.as_deref() {
                Some(p) => store.activities_for(p),
                None => store.activities().iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&activities)?);
            } else if activities.is_empty() {
                eprintln!("No activities");
            } else {
                print!("{}", output::format_activity_table(activities));
            }
        }

        Command::Persons => {
            let store = load_store(&workbook)?;
            print!("{}", output::format_persons(&store.unique_persons()));
        }

        Command::Chart {
            person,
            output: out,
        } => {
            let person = person.filter(|p| !p.trim().is_empty());
            let store = load_store(&workbook)?;
            let path = match out {
                Some(p) => p,
                None => config
                    .chart
                    .dir
                    .clone()
                    .unwrap_or_else(paths::default_chart_dir)
                    .join(paths::chart_file_name(person.as_deref())),
            };
            ensure_parent_dir(&path)?;
            match chart::render(store.activities(), person.as_deref(), &path, config.chart.size())? {
                Some(path) => println!("{}", path.display()),
                None => {
                    eprintln!("No activities to chart");
                    std::process::exit(1);
                }
            }
        }

        Command::Export { path } => {
            let store = load_store(&workbook)?;
            ensure_parent_dir(&path)?;
            let path = gantt::workbook::export(store.activities(), &path)
                .with_context(|| format!("failed to export to {}", path.display()))?;
            eprintln!("Exported {} activities to {}", store.len(), path.display());
        }

        Command::Demo => {
            let mut store = load_store(&workbook)?;
            for (name, start, end, person, status) in DEMO_ACTIVITIES {
                store.add(name, start, end, person, status)?;
            }
            save_store(&store, &workbook)?;
            eprintln!("Added {} sample activities", DEMO_ACTIVITIES.len());
        }
    }

    Ok(())
}
