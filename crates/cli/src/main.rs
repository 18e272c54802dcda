// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use contract_line::{
    ContractLineConfig, ContractParameters, CoreError, LienDeadline, LienDeadlineParameters,
    PendingLink, PersistenceMode, TracingLog, WorkflowReport, add_contract_lines,
    calculate_lien_deadline, resume_linking,
};
use contract_line_domain::{Date, EntityReference, Record, RecordId, ValidatedBid, parse_date};
use contract_line_persistence::SqliteDataService;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Contract line tool - creates contract lines from a service contract's child bids
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load seed records from a JSON file into the store
    Import {
        /// JSON array of records
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Create one contract line per eligible child bid of a contract
    AddContractLines(AddContractLinesArgs),
    /// Retry the link update of a contract line left incomplete by a two-phase run
    ResumeLinking {
        /// JSON file holding the pending link reported by the failed run
        #[arg(short, long)]
        pending: PathBuf,
    },
    /// Compute a lien deadline from the state's day offset
    LienDeadline(LienDeadlineArgs),
}

#[derive(clap::Args, Debug)]
struct AddContractLinesArgs {
    /// Contract number the child bids carry
    #[arg(long)]
    contract_number: String,

    /// First active day of each line (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start_date: Date,

    /// Expiry day of each line (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end_date: Date,

    /// Identifier of the billing party
    #[arg(long)]
    bill_to_id: RecordId,

    #[arg(long, default_value = "account")]
    bill_to_type: String,

    /// Entity name of the lines to create
    #[arg(long, default_value = "contractdetail")]
    target_type: String,

    /// Attribute linking each line to its parent
    #[arg(long, default_value = "contractid")]
    parent_field: String,

    /// Identifier of the parent contract
    #[arg(long)]
    parent_id: RecordId,

    #[arg(long, default_value = "contract")]
    parent_type: String,

    /// Text attribute set on every line, as name=value (repeatable)
    #[arg(long = "extra-field", value_parser = parse_extra_field)]
    extra_fields: Vec<(String, String)>,

    /// Create each line first and link it in a second write
    #[arg(long)]
    two_phase: bool,

    /// Do not mark source bids as converted
    #[arg(long)]
    no_claim: bool,

    /// Records to import before running
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct LienDeadlineArgs {
    /// Jurisdiction key of the job's location
    #[arg(long)]
    state: String,

    /// Final date of work (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    final_date: Date,

    /// Records to import before running
    #[arg(long)]
    seed: Option<PathBuf>,
}

/// Parses a `name=value` pair.
fn parse_extra_field(value: &str) -> Result<(String, String), String> {
    let (name, field_value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{value}'"))?;
    let name: &str = name.trim();
    if name.is_empty() {
        return Err(format!("missing attribute name in '{value}'"));
    }
    Ok((name.to_string(), field_value.to_string()))
}

impl AddContractLinesArgs {
    fn config(&self) -> ContractLineConfig {
        let extra_fields: Vec<(String, String)> = self.extra_fields.clone();
        let mut config: ContractLineConfig = ContractLineConfig::new(
            &self.target_type,
            &self.parent_field,
            EntityReference::new(&self.parent_type, self.parent_id),
        )
        .with_extra_fields(move |record: &mut Record, _: &ValidatedBid| {
            for (name, value) in &extra_fields {
                record.set(name, value.as_str());
            }
        });

        if self.two_phase {
            config = config.with_persistence(PersistenceMode::TwoPhase);
        }
        if self.no_claim {
            config = config.without_bid_claims();
        }
        config
    }

    fn parameters(&self) -> ContractParameters {
        ContractParameters {
            contract_number: self.contract_number.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            bill_to: EntityReference::new(&self.bill_to_type, self.bill_to_id),
        }
    }
}

fn open_store(database: Option<&Path>) -> Result<SqliteDataService, Box<dyn std::error::Error>> {
    let service: SqliteDataService = if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path.display());
        SqliteDataService::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteDataService::new_in_memory()?
    };
    Ok(service)
}

fn seed_store(
    service: &mut SqliteDataService,
    seed: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = seed {
        let ids: Vec<RecordId> = service.import_file(path)?;
        info!(count = ids.len(), "Seeded store from {}", path.display());
    }
    Ok(())
}

fn run_add_contract_lines(
    service: &mut SqliteDataService,
    args: &AddContractLinesArgs,
) -> Result<WorkflowReport, Box<dyn std::error::Error>> {
    seed_store(service, args.seed.as_deref())?;

    match add_contract_lines(service, &args.config(), &args.parameters(), &mut TracingLog) {
        Ok(report) => Ok(report),
        Err(CoreError::LinkingIncomplete { pending, source }) => {
            error!(
                pending = %serde_json::to_string(&pending)?,
                "Contract line left unlinked; save the pending link and run resume-linking"
            );
            Err(Box::new(CoreError::LinkingIncomplete { pending, source }))
        }
        Err(err) => Err(Box::new(err)),
    }
}

fn run_resume_linking(
    service: &mut SqliteDataService,
    pending_file: &Path,
) -> Result<PendingLink, Box<dyn std::error::Error>> {
    let pending: PendingLink = serde_json::from_str(&std::fs::read_to_string(pending_file)?)?;
    Ok(resume_linking(service, &pending, &mut TracingLog)?)
}

fn run_lien_deadline(
    service: &mut SqliteDataService,
    args: &LienDeadlineArgs,
) -> Result<LienDeadline, Box<dyn std::error::Error>> {
    seed_store(service, args.seed.as_deref())?;

    let params: LienDeadlineParameters = LienDeadlineParameters {
        location_state: args.state.clone(),
        final_date_of_work: args.final_date,
    };
    Ok(calculate_lien_deadline(service, &params, &mut TracingLog)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut service: SqliteDataService = open_store(args.database.as_deref())?;

    match args.command {
        Command::Import { file } => {
            let ids: Vec<RecordId> = service.import_file(&file)?;
            print_json(&ids)
        }
        Command::AddContractLines(command) => {
            let report: WorkflowReport = run_add_contract_lines(&mut service, &command)?;
            print_json(&report)
        }
        Command::ResumeLinking { pending } => {
            let completed: PendingLink = run_resume_linking(&mut service, &pending)?;
            print_json(&completed)
        }
        Command::LienDeadline(command) => {
            let deadline: LienDeadline = run_lien_deadline(&mut service, &command)?;
            print_json(&deadline)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting contract line tool");

    run(args)
}
