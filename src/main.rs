#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;

use seat_planner::PlanController;
use seat_planner::config::CanvasSettings;
use seat_planner::model::{ConstraintKind, ConstraintPriority, RelationshipKind, SeatingPlan, TableShape};
use seat_planner::persistence::{JsonFileStore, PlanStore};
use seat_planner::types::{GuestId, TableId};

/// Lay out tables, seat guests and check seating constraints
#[derive(Parser, Debug)]
#[command(name = "seat-planner", version)]
struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seating plan JSON file
    #[arg(value_name = "PLAN")]
    plan: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty plan file
    Init {
        #[arg(long, default_value = "Untitled event")]
        name: String,
        /// Overwrite an existing plan
        #[arg(long)]
        force: bool,
    },
    /// Add a table with the shape's default size and seats
    AddTable {
        #[arg(long, default_value = "round")]
        shape: TableShape,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    MoveTable {
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Remove a table; its guests become unplaced
    RemoveTable { id: String },
    AddGuest {
        first_name: String,
        last_name: String,
        #[arg(long)]
        group: Option<String>,
    },
    RemoveGuest { id: String },
    /// Seat a guest at a table
    Seat {
        guest: String,
        table: String,
        #[arg(long)]
        seat: Option<u32>,
    },
    /// Place a guest on the canvas away from any table
    Float {
        guest: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Set the relationship from one guest to another
    Relate {
        from: String,
        to: String,
        kind: RelationshipKind,
        #[arg(long)]
        strength: Option<u8>,
    },
    /// Declare a seating constraint over two or more guests
    Constrain {
        kind: ConstraintKind,
        #[arg(required = true, num_args = 1..)]
        guests: Vec<String>,
        #[arg(long)]
        preferred: bool,
        #[arg(long)]
        description: Option<String>,
    },
    /// List constraint violations
    Check {
        #[arg(long)]
        table: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Find guests and tables by name
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
}

/// `LOG_LEVEL` wins over the configured level; unknown names mean info
fn resolve_level(env: Option<&str>, configured: &str) -> TraceLevel {
    match env.unwrap_or(configured).to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn build_subscriber<W>(level: TraceLevel, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(writer)
        .finish()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env_level = std::env::var("LOG_LEVEL").ok();

    // Settings decide the final level, so load them under a scoped subscriber
    // to keep their load and clamp messages visible
    let bootstrap = build_subscriber(resolve_level(env_level.as_deref(), "info"), std::io::stderr);
    let settings = tracing::subscriber::with_default(bootstrap, || match &args.config {
        Some(path) => CanvasSettings::load_from(path),
        None => CanvasSettings::load(),
    })?;

    let level = resolve_level(env_level.as_deref(), &settings.log_level);
    tracing::subscriber::set_global_default(build_subscriber(level, std::io::stderr))
        .context("Failed to install tracing subscriber")?;

    if let Command::Init { name, force } = &args.command {
        if args.plan.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", args.plan.display());
        }
        JsonFileStore::new(&args.plan).save(&SeatingPlan::new(name.as_str()))?;
        println!("Created {}", args.plan.display());
        return Ok(());
    }

    let mut controller = PlanController::new(settings, JsonFileStore::new(&args.plan))?;
    let changed = run(&mut controller, args.command)?;
    if changed {
        controller.save()?;
    }
    Ok(())
}

/// Execute one command; returns whether the plan needs saving
fn run(controller: &mut PlanController<JsonFileStore>, command: Command) -> Result<bool> {
    match command {
        Command::Init { .. } => Ok(false),
        Command::AddTable { shape, x, y, name, capacity } => {
            let id = controller.add_table(shape, x, y);
            if name.is_some() || capacity.is_some() {
                controller.update_table(&id, name, capacity);
            }
            println!("{id}");
            Ok(true)
        }
        Command::MoveTable { id, x, y } => {
            let id = existing_table(controller, &id)?;
            controller.move_table(&id, x, y);
            Ok(true)
        }
        Command::RemoveTable { id } => {
            let id = existing_table(controller, &id)?;
            let seated = controller.plan().occupancy(&id);
            controller.remove_table(&id);
            println!("Removed {id} ({seated} guests unplaced)");
            Ok(true)
        }
        Command::AddGuest { first_name, last_name, group } => {
            let id = controller.add_guest(&first_name, &last_name);
            if group.is_some() {
                controller.set_group(&id, group);
            }
            println!("{id}");
            Ok(true)
        }
        Command::RemoveGuest { id } => {
            let id = existing_guest(controller, &id)?;
            controller.remove_guest(&id);
            Ok(true)
        }
        Command::Seat { guest, table, seat } => {
            let guest = existing_guest(controller, &guest)?;
            let table = existing_table(controller, &table)?;
            controller.assign_guest_to_table(&guest, Some(&table), seat);
            if controller.plan().is_over_capacity(&table) {
                println!("Warning: {table} is over capacity");
            }
            Ok(true)
        }
        Command::Float { guest, x, y } => {
            let guest = existing_guest(controller, &guest)?;
            controller.detach_guest_from_table(&guest, x, y);
            Ok(true)
        }
        Command::Relate { from, to, kind, strength } => {
            let from = existing_guest(controller, &from)?;
            let to = existing_guest(controller, &to)?;
            if from == to {
                bail!("A guest cannot have a relationship with themselves");
            }
            controller.relate(&from, &to, kind, strength);
            Ok(true)
        }
        Command::Constrain { kind, guests, preferred, description } => {
            let guest_ids = guests
                .iter()
                .map(|id| existing_guest(controller, id))
                .collect::<Result<Vec<_>>>()?;
            let priority = if preferred {
                ConstraintPriority::Preferred
            } else {
                ConstraintPriority::Required
            };
            let id = controller
                .add_constraint(kind, priority, guest_ids, description)
                .context("Constraint needs at least one guest")?;
            println!("{id}");
            Ok(true)
        }
        Command::Check { table, json } => {
            let violations = match table {
                Some(table) => {
                    let table = existing_table(controller, &table)?;
                    controller.violations_for_table(&table)
                }
                None => controller.detect_violations(),
            };
            info!(count = violations.len(), "Checked constraints");
            if json {
                println!("{}", serde_json::to_string_pretty(&violations)?);
            } else if violations.is_empty() {
                println!("No violations");
            } else {
                for v in &violations {
                    let tables: Vec<&str> = v.table_ids.iter().map(TableId::as_str).collect();
                    println!("[{}] {} ({})", v.priority, v.description, tables.join(", "));
                }
            }
            Ok(false)
        }
        Command::Search { query, json } => {
            let results = controller.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for r in &results {
                    match &r.detail {
                        Some(detail) => println!("{:.2}  {}  ({detail})", r.score, r.label),
                        None => println!("{:.2}  {}", r.score, r.label),
                    }
                }
            }
            Ok(false)
        }
    }
}

fn existing_table(controller: &PlanController<JsonFileStore>, id: &str) -> Result<TableId> {
    let id = TableId::new(id);
    if controller.plan().table(&id).is_none() {
        bail!("No table with id {id}");
    }
    Ok(id)
}

fn existing_guest(controller: &PlanController<JsonFileStore>, id: &str) -> Result<GuestId> {
    let id = GuestId::new(id);
    if controller.plan().guest(&id).is_none() {
        bail!("No guest with id {id}");
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_env_level_overrides_config() {
        assert_eq!(resolve_level(Some("debug"), "warn"), TraceLevel::DEBUG);
        assert_eq!(resolve_level(Some("ERROR"), "trace"), TraceLevel::ERROR);
    }

    #[test]
    fn test_config_level_used_without_env() {
        assert_eq!(resolve_level(None, "warn"), TraceLevel::WARN);
        assert_eq!(resolve_level(None, "nonsense"), TraceLevel::INFO);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_settings_clamp_warning_reaches_bootstrap_subscriber() {
        let path = std::env::temp_dir()
            .join(format!("seat-planner-main-{}", std::process::id()))
            .join("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"grid_size": 0}"#).unwrap();

        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = build_subscriber(resolve_level(None, "info"), move || sink.clone());
        let settings = tracing::subscriber::with_default(subscriber, || CanvasSettings::load_from(&path)).unwrap();
        let _ = std::fs::remove_dir_all(path.parent().unwrap());

        assert_eq!(settings.grid_size, 1.0);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("grid_size out of range"), "missing clamp warning in {output:?}");
        assert!(output.contains("Loaded config"));
    }

    #[test]
    fn test_cli_parses_negative_coordinates() {
        let args = Args::try_parse_from(["seat-planner", "plan.json", "move-table", "table-1", "-40", "-2.5"]).unwrap();
        match args.command {
            Command::MoveTable { id, x, y } => {
                assert_eq!(id, "table-1");
                assert_eq!((x, y), (-40.0, -2.5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
