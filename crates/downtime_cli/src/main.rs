//! Command-line tool for editing the downtime ranges of one parent object.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use downtime_core::{
    db::database_file, Config, ConfigRenderer, Database, ObjectType, RangeSet, ScheduledDowntime,
    StoreSummary,
};
use std::collections::BTreeMap;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};


#[derive(Parser)]
#[command(name = "downtime-ranges", about = "Scheduled downtime range editor", version)]
struct Cli {
    /// Database directory (can also be set via DB_PATH env var)
    #[arg(short, long, env = "DB_PATH", global = true)]
    db: Option<String>,

    /// Parent table the ranges belong to
    #[arg(long, env = "RANGE_PARENT_TABLE", global = true)]
    table: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List the stored ranges
    Show { parent_id: i64 },
    /// Replace all ranges with the given key=value pairs
    Set {
        parent_id: i64,
        #[arg(value_parser = parse_assignment)]
        ranges: Vec<(String, String)>,
    },
    /// Add or change a single range
    Put {
        parent_id: i64,
        key: String,
        value: String,
    },
    /// Remove a single range
    Unset { parent_id: i64, key: String },
    /// Remove every range
    Clear { parent_id: i64 },
    /// Print the rendered config block
    Render {
        parent_id: i64,
        /// Treat the parent as a template
        #[arg(long)]
        template: bool,
    },
}

/// Split a `key=value` argument at the first `=`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected key=value, got '{}'", raw));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("range key must not be empty in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn format_values(values: &BTreeMap<String, String>, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(values)?);
    }
    let rows: Vec<String> = values
        .iter()
        .map(|(key, value)| format!("{}\t{}", key, value))
        .collect();
    Ok(rows.join("\n"))
}

fn format_summary(summary: &StoreSummary, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "upserted": summary.upserted,
            "deleted": summary.deleted,
        }))?);
    }
    if summary.deleted.is_empty() {
        return Ok(format!("Stored {} range(s)", summary.upserted.len()));
    }
    Ok(format!(
        "Stored {} range(s), deleted: {}",
        summary.upserted.len(),
        summary.deleted.join(", ")
    ))
}

fn open_database(config: &Config) -> anyhow::Result<Database> {
    let exists = database_file(&config.db_path).exists();
    if !exists && !config.auto_create_db {
        bail!(
            "No range database at '{}' and AUTO_CREATE_DB is off",
            config.db_path
        );
    }
    Database::new(&config.db_path)
        .with_context(|| format!("failed to open range database at '{}'", config.db_path))
}

fn resolve_config(db: Option<String>, table: Option<String>) -> Config {
    let mut config = Config::from_env();
    if let Some(db) = db {
        config.db_path = db;
    }
    if let Some(table) = table {
        config.parent_table = table;
    }
    config
}

fn parent(config: &Config, parent_id: i64, object_type: ObjectType) -> ScheduledDowntime {
    ScheduledDowntime::stored(parent_id, object_type).with_table_name(config.parent_table.clone())
}

fn store_if_modified(
    ranges: &mut RangeSet<ScheduledDowntime>,
    db: &Database,
    json: bool,
) -> anyhow::Result<()> {
    if !ranges.has_been_modified() {
        tracing::info!("No changes to store");
        return Ok(());
    }
    let summary = ranges.store(&db.ranges)?;
    println!("{}", format_summary(&summary, json)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "downtime_ranges=info,downtime_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Cli {
        db,
        table,
        json,
        command,
    } = Cli::parse();

    run(command, &resolve_config(db, table), json)
}

/// Execute one subcommand. The database is only opened by commands that need it.
fn run(command: Commands, config: &Config, json: bool) -> anyhow::Result<()> {
    let connect = || -> anyhow::Result<Database> {
        let database = open_database(config)?;
        tracing::debug!("Using range database at {}", config.db_path);
        Ok(database)
    };

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Show { parent_id } => {
            let database = connect()?;
            let owner = parent(config, parent_id, ObjectType::Object);
            let ranges = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            println!("{}", format_values(&ranges.values(), json)?);
        }
        Commands::Set { parent_id, ranges } => {
            let database = connect()?;
            let owner = parent(config, parent_id, ObjectType::Object);
            let mut set = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            set.set(ranges.iter().map(|(key, value)| (key, Some(value))));
            store_if_modified(&mut set, &database, json)?;
        }
        Commands::Put {
            parent_id,
            key,
            value,
        } => {
            let database = connect()?;
            let owner = parent(config, parent_id, ObjectType::Object);
            let mut set = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            set.set_range(&key, Some(value.as_str()));
            store_if_modified(&mut set, &database, json)?;
        }
        Commands::Unset { parent_id, key } => {
            let database = connect()?;
            let owner = parent(config, parent_id, ObjectType::Object);
            let mut set = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            if !set.contains(&key) {
                tracing::warn!("Range '{}' is not set for parent {}", key, parent_id);
            }
            set.remove(&key);
            store_if_modified(&mut set, &database, json)?;
        }
        Commands::Clear { parent_id } => {
            let database = connect()?;
            let owner = parent(config, parent_id, ObjectType::Object);
            let mut set = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            set.clear();
            store_if_modified(&mut set, &database, json)?;
        }
        Commands::Render {
            parent_id,
            template,
        } => {
            let object_type = if template {
                ObjectType::Template
            } else {
                ObjectType::Object
            };
            let database = connect()?;
            let owner = parent(config, parent_id, object_type);
            let ranges = RangeSet::load_for_stored_object(owner, &database.ranges)?;
            print!("{}", ranges.to_config_string()?);
        }
    }

    Ok(())
}
