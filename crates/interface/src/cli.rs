//! CLI - Command Line Interface
//!
//! Commands:
//! - petcare                       - Open the terminal UI (same as `petcare tui`)
//! - petcare list                  - List pets
//! - petcare show <pet>            - Details, care tasks and recent health records
//! - petcare add-pet ...           - Add a pet with its default care schedule
//! - petcare remove <pet>          - Remove a pet
//! - petcare add-task <pet> ...    - Add a recurring care task
//! - petcare done <pet> <task>     - Mark a care task as done today
//! - petcare health <pet> ...      - Add a health record
//! - petcare overdue               - Overdue tasks across all pets

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use petcare_core::{
    ConfigError, DogSize, HealthRecordKind, Pet, PetCareConfig, PetCareConfigLoader, PetCareError,
    PetKind, PetRegistry, Species, parse_date,
};
use petcare_persistence::{JsonStore, PetStore, SharedStore, Snapshot, StorageError};
use petcare_tui::{PetCareApp, StatusLevel, run_tui};

use crate::logging::{LOG_FILE, LogTarget, init_tracing};
use crate::report;

/// CLI Errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] PetCareError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Everything a one-shot command needs besides its arguments.
#[derive(Clone)]
pub struct CliContext {
    pub store: SharedStore,
    pub today: NaiveDate,
    pub output: OutputFormat,
    pub health_preview_limit: usize,
}

/// PetCare CLI
#[derive(Parser, Debug)]
#[command(name = "petcare")]
#[command(author, version, about = "Track pets, their care schedules and health records", long_about = None)]
pub(crate) struct Cli {
    /// JSON data file (overrides config and PETCARE_DATA_FILE)
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum Commands {
    /// Open the interactive terminal UI
    Tui,

    /// List all pets
    List,

    /// Show one pet in detail
    Show(PetArg),

    /// Add a pet with the default care schedule for its kind
    AddPet(AddPetArgs),

    /// Remove a pet and all of its records
    Remove(PetArg),

    /// Add a recurring care task
    AddTask(AddTaskArgs),

    /// Mark a care task as done today
    Done(DoneArgs),

    /// Add a health record
    Health(HealthArgs),

    /// List overdue care tasks across all pets
    Overdue,
}

#[derive(Args, Debug, PartialEq)]
pub(crate) struct PetArg {
    /// Pet name (case-insensitive)
    pub pet: String,
}

#[derive(Args, Debug, PartialEq)]
pub(crate) struct AddPetArgs {
    /// dog, cat or bird
    #[arg(short, long)]
    pub kind: Species,

    #[arg(short, long)]
    pub name: String,

    /// Age in years
    #[arg(short, long)]
    pub age: u32,

    #[arg(short, long, default_value = "")]
    pub breed: String,

    /// Dog size: small, medium or large
    #[arg(long, value_parser = parse_size_arg)]
    pub size: Option<DogSize>,

    /// Cat lives outdoors
    #[arg(long)]
    pub outdoor: bool,

    /// Bird cannot fly
    #[arg(long)]
    pub cannot_fly: bool,
}

impl AddPetArgs {
    fn pet_kind(&self) -> Result<PetKind, CliError> {
        let misplaced = match self.kind {
            Species::Dog => self.outdoor || self.cannot_fly,
            Species::Cat => self.size.is_some() || self.cannot_fly,
            Species::Bird => self.size.is_some() || self.outdoor,
        };
        if misplaced {
            return Err(CliError::InvalidArguments(format!(
                "--size is for dogs, --outdoor for cats and --cannot-fly for birds (got a {})",
                self.kind
            )));
        }
        Ok(match self.kind {
            Species::Dog => PetKind::Dog {
                size: self.size.clone().unwrap_or_default(),
            },
            Species::Cat => PetKind::Cat {
                indoor: !self.outdoor,
            },
            Species::Bird => PetKind::Bird {
                can_fly: !self.cannot_fly,
            },
        })
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, PetCareError> {
    parse_date(raw)
}

// Only the known sizes are accepted here; files may still carry others.
fn parse_size_arg(raw: &str) -> Result<DogSize, String> {
    raw.parse()
}

#[derive(Args, Debug, PartialEq)]
pub(crate) struct AddTaskArgs {
    pub pet: String,

    /// Task name, e.g. "Nail Trim"
    #[arg(short, long)]
    pub task: String,

    /// Frequency in days
    #[arg(short, long, allow_negative_numbers = true)]
    pub every: i64,

    /// Last completion date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    pub last_done: Option<NaiveDate>,
}

#[derive(Args, Debug, PartialEq)]
pub(crate) struct DoneArgs {
    pub pet: String,

    /// Task name (case-insensitive)
    pub task: String,
}

#[derive(Args, Debug, PartialEq)]
pub(crate) struct HealthArgs {
    pub pet: String,

    /// Vaccination, Checkup, Treatment, Medication, Other, or any label
    #[arg(short, long, default_value = "Checkup")]
    pub kind: HealthRecordKind,

    #[arg(long)]
    pub description: String,

    /// Record date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

/// Parse CLI arguments and execute commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli, |key| std::env::var(key).ok())
        .context("failed to load configuration")?;

    let command = cli.command.unwrap_or(Commands::Tui);
    let target = if command == Commands::Tui {
        LogTarget::File(config.data_dir().join(LOG_FILE))
    } else {
        LogTarget::Stderr
    };
    init_tracing(&config, cli.verbose, target)?;

    let store: SharedStore = Arc::new(
        JsonStore::open(&config.data_file)
            .await
            .with_context(|| format!("failed to open {}", config.data_file.display()))?,
    );

    if command == Commands::Tui {
        return run_tui_session(&config, store).await.map_err(Into::into);
    }

    let ctx = CliContext {
        store,
        today: petcare_core::today(),
        output: cli.output.unwrap_or(OutputFormat::Pretty),
        health_preview_limit: config.health_preview_limit,
    };
    let text = execute(command, &ctx).await?;
    println!("{}", text);
    Ok(())
}

/// Config file and environment (read through `lookup`), then flags on top.
pub(crate) fn resolve_config<F>(cli: &Cli, lookup: F) -> Result<PetCareConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PetCareConfigLoader::new()
        .with_path(cli.config.clone())
        .load_with(lookup)?;
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    Ok(config)
}

/// The app as the TUI first shows it, warning about entries that did not load.
pub(crate) fn startup_app(
    snapshot: Snapshot,
    today: NaiveDate,
    config: &PetCareConfig,
    location: &str,
) -> PetCareApp {
    let skipped = snapshot.skipped;
    let mut app = PetCareApp::new(
        PetRegistry::from_pets(snapshot.pets),
        today,
        config.health_preview_limit,
    );
    if skipped > 0 {
        app.set_status(
            StatusLevel::Warning,
            format!("Skipped {} unreadable pet entries in {}", skipped, location),
        );
    }
    app
}

async fn run_tui_session(config: &PetCareConfig, store: SharedStore) -> Result<(), CliError> {
    let snapshot = store.load().await?;
    let mut app = startup_app(snapshot, petcare_core::today(), config, &store.location());
    run_tui(&mut app, store, Duration::from_millis(config.tick_rate_ms)).await?;
    Ok(())
}

async fn load_registry(ctx: &CliContext) -> Result<PetRegistry, CliError> {
    let snapshot = ctx.store.load().await?;
    if snapshot.skipped > 0 {
        warn!(
            skipped = snapshot.skipped,
            "Some pet entries in {} could not be read",
            ctx.store.location()
        );
    }
    Ok(PetRegistry::from_pets(snapshot.pets))
}

async fn save_registry(ctx: &CliContext, registry: &PetRegistry) -> Result<(), CliError> {
    ctx.store.save(registry.pets()).await?;
    info!(pets = registry.len(), "Saved to {}", ctx.store.location());
    Ok(())
}

/// Pretty text, or the pet as JSON.
fn pet_output(ctx: &CliContext, message: String, pet: &Pet) -> Result<String, CliError> {
    match ctx.output {
        OutputFormat::Pretty => Ok(message),
        OutputFormat::Json => Ok(report::json(pet)?),
    }
}

fn find_pet<'a>(registry: &'a PetRegistry, name: &str) -> Result<&'a Pet, CliError> {
    registry
        .find_by_name(name)
        .ok_or_else(|| PetCareError::PetNotFound(name.to_string()).into())
}

/// Run a one-shot command and return what should be printed.
pub(crate) async fn execute(command: Commands, ctx: &CliContext) -> Result<String, CliError> {
    match command {
        Commands::Tui => Err(CliError::InvalidArguments(
            "the terminal UI cannot run as a one-shot command".to_string(),
        )),
        Commands::List => cmd_list(ctx).await,
        Commands::Show(args) => cmd_show(args, ctx).await,
        Commands::AddPet(args) => cmd_add_pet(args, ctx).await,
        Commands::Remove(args) => cmd_remove(args, ctx).await,
        Commands::AddTask(args) => cmd_add_task(args, ctx).await,
        Commands::Done(args) => cmd_done(args, ctx).await,
        Commands::Health(args) => cmd_health(args, ctx).await,
        Commands::Overdue => cmd_overdue(ctx).await,
    }
}

async fn cmd_list(ctx: &CliContext) -> Result<String, CliError> {
    let registry = load_registry(ctx).await?;
    match ctx.output {
        OutputFormat::Pretty => Ok(report::pet_list(&registry)),
        OutputFormat::Json => Ok(report::json(registry.pets())?),
    }
}

async fn cmd_show(args: PetArg, ctx: &CliContext) -> Result<String, CliError> {
    let registry = load_registry(ctx).await?;
    let pet = find_pet(&registry, &args.pet)?;
    pet_output(
        ctx,
        report::pet_report(pet, ctx.today, ctx.health_preview_limit),
        pet,
    )
}

async fn cmd_add_pet(args: AddPetArgs, ctx: &CliContext) -> Result<String, CliError> {
    let kind = args.pet_kind()?;
    let mut registry = load_registry(ctx).await?;
    let pet = Pet::new(args.name, args.age, args.breed, kind, ctx.today)?;
    let name = registry.add_pet(pet)?.name.clone();
    save_registry(ctx, &registry).await?;

    let pet = find_pet(&registry, &name)?;
    pet_output(ctx, format!("{} has been added to your pets!", name), pet)
}

async fn cmd_remove(args: PetArg, ctx: &CliContext) -> Result<String, CliError> {
    let mut registry = load_registry(ctx).await?;
    let removed = registry.remove_by_name(&args.pet)?;
    save_registry(ctx, &registry).await?;

    match ctx.output {
        OutputFormat::Pretty => Ok(removed
            .iter()
            .map(|pet| format!("{} has been removed", pet.name))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(report::json(&removed)?),
    }
}

async fn cmd_add_task(args: AddTaskArgs, ctx: &CliContext) -> Result<String, CliError> {
    let mut registry = load_registry(ctx).await?;
    let pet = registry.find_by_name_mut(&args.pet)?;
    let last_done = args.last_done.unwrap_or(ctx.today);
    let task = pet.add_care_task(args.task, args.every, last_done)?.task.clone();
    let name = pet.name.clone();
    save_registry(ctx, &registry).await?;

    let pet = find_pet(&registry, &name)?;
    pet_output(ctx, format!("Task '{}' added successfully!", task), pet)
}

async fn cmd_done(args: DoneArgs, ctx: &CliContext) -> Result<String, CliError> {
    let mut registry = load_registry(ctx).await?;
    let pet = registry.find_by_name_mut(&args.pet)?;
    let index = pet.find_task(&args.task).ok_or_else(|| PetCareError::TaskNotFound {
        pet: pet.name.clone(),
        task: args.task.clone(),
    })?;
    let task = pet.complete_task(index, ctx.today)?.task.clone();
    let name = pet.name.clone();
    save_registry(ctx, &registry).await?;

    let pet = find_pet(&registry, &name)?;
    pet_output(ctx, format!("Task '{}' marked as done!", task), pet)
}

async fn cmd_health(args: HealthArgs, ctx: &CliContext) -> Result<String, CliError> {
    let mut registry = load_registry(ctx).await?;
    let pet = registry.find_by_name_mut(&args.pet)?;
    pet.add_health_record(args.kind, args.description, args.date.unwrap_or(ctx.today))?;
    let name = pet.name.clone();
    save_registry(ctx, &registry).await?;

    let pet = find_pet(&registry, &name)?;
    pet_output(ctx, "Health record added successfully!".to_string(), pet)
}

async fn cmd_overdue(ctx: &CliContext) -> Result<String, CliError> {
    let registry = load_registry(ctx).await?;
    match ctx.output {
        OutputFormat::Pretty => Ok(report::overdue_report(&registry, ctx.today)),
        OutputFormat::Json => Ok(report::json(&registry.all_overdue_tasks(ctx.today))?),
    }
}
