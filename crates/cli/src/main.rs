//! Command-line front end for the ctOMOP records API.
//!
//! Network commands resolve configuration from `--config`/`CTOMOP_CONFIG` and `CTOMOP_*`
//! environment variables, and log in first when credentials are configured. The
//! `classify`, `therapies`, `age` and `tnbc` commands run offline.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::ImportKind;
use ctomop_client::{ClientConfig, PatientService, ZipLookup};
use ctomop_core::{
    age_today, compute_age_from_str, compute_tnbc, parse_date, tab_groups, therapy_display_options,
    ClinicalCategory, EditorTab, MutationField, RecordEditor, TherapyLine,
};
use ctomop_types::PersonId;

#[derive(Parser)]
#[command(name = "ctomop")]
#[command(about = "ctOMOP patient record editor CLI")]
struct Cli {
    /// YAML configuration file (overrides CTOMOP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the signed-in user
    Whoami,
    /// List all patients
    List,
    /// Show a patient record grouped by editor tab
    Show {
        person_id: PersonId,
        /// Only this tab (general, disease, treatment, blood, labs, behavior)
        #[arg(long)]
        tab: Option<EditorTab>,
    },
    /// Set one field from text input and save
    Set {
        person_id: PersonId,
        field: String,
        /// Value to store; an empty string clears the field
        value: String,
    },
    /// Change the gene of a genetic mutation entry and save
    SetGene {
        person_id: PersonId,
        index: usize,
        gene: String,
    },
    /// Set the mutation, origin or interpretation of a genetic mutation entry and save
    SetMutation {
        person_id: PersonId,
        index: usize,
        part: MutationField,
        value: String,
    },
    /// Append a genetic mutation entry and save
    AddMutation {
        person_id: PersonId,
        /// Gene for the new entry
        #[arg(long)]
        gene: Option<String>,
    },
    /// Remove a genetic mutation entry and save
    RemoveMutation { person_id: PersonId, index: usize },
    /// Change the patient's display name and save
    Rename { person_id: PersonId, name: String },
    /// Delete patients
    Delete {
        #[arg(required = true)]
        person_ids: Vec<PersonId>,
    },
    /// Import patients from a CSV file
    ImportCsv { file: PathBuf },
    /// Import patients from a FHIR bundle (JSON)
    ImportFhir { file: PathBuf },
    /// Classify a disease label
    Classify { disease: String },
    /// List therapy options for a disease and treatment line
    Therapies {
        disease: String,
        line: TherapyLine,
        /// Currently stored value, kept selectable when outside the list
        #[arg(long)]
        current: Option<String>,
    },
    /// Compute age from a date of birth
    Age {
        date_of_birth: String,
        /// Reference date (YYYY-MM-DD, default today)
        #[arg(long)]
        on: Option<String>,
    },
    /// Compute triple-negative status from ER, PR and HER2 ("" for unset)
    Tnbc { er: String, pr: String, her2: String },
    /// Look up city and state for a US zip code
    Zip { code: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ctomop=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'ctomop --help' for commands");
        return Ok(());
    };
    let config_path = cli.config;

    match command {
        Commands::Classify { disease } => {
            let category = ClinicalCategory::classify(Some(&disease));
            println!("{} ({})", category, category.tab_label());
        }
        Commands::Therapies {
            disease,
            line,
            current,
        } => {
            let category = ClinicalCategory::classify(Some(&disease));
            for option in therapy_display_options(category, line, current.as_deref()) {
                println!("{option}");
            }
        }
        Commands::Age { date_of_birth, on } => {
            let age = match on {
                Some(on) => {
                    let today =
                        parse_date(&on).with_context(|| format!("invalid --on date: {on}"))?;
                    compute_age_from_str(&date_of_birth, today)
                }
                None => age_today(&date_of_birth),
            };
            match age {
                Some(age) => println!("{age}"),
                None => println!("unknown"),
            }
        }
        Commands::Tnbc { er, pr, her2 } => {
            let status = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
            let (er, pr, her2) = (status(&er), status(&pr), status(&her2));
            match compute_tnbc(er.as_deref(), pr.as_deref(), her2.as_deref()) {
                Some(true) => println!("Yes"),
                Some(false) => println!("No"),
                None => println!("unknown"),
            }
        }
        Commands::Zip { code } => {
            let config = load_config(config_path)?;
            let lookup = ZipLookup::from_config(&config)?;
            match lookup.lookup(&code).await {
                Some(place) => println!("{}, {}", place.city, place.region),
                None => println!("No match for {code}"),
            }
        }
        Commands::Whoami => {
            let service = connect(config_path).await?;
            let session = service.api().current_user().await?;
            println!("{}", session.display_name());
        }
        Commands::List => {
            let service = connect(config_path).await?;
            let patients = service.api().list_patients().await?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for patient in patients {
                println!(
                    "ID: {}, Name: {}, Age: {}, Disease: {}, Stage: {}",
                    patient.person_id,
                    patient.patient_name,
                    patient.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
                    patient.disease.as_deref().unwrap_or("-"),
                    patient.stage.as_deref().unwrap_or("-"),
                );
            }
        }
        Commands::Show { person_id, tab } => {
            let service = connect(config_path).await?;
            let editor = service.load(person_id).await?;
            print_record(&editor, tab);
        }
        Commands::Set {
            person_id,
            field,
            value,
        } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            if let Some(place) = service.set_input(&mut editor, &field, &value).await? {
                println!("Located {}, {}", place.city, place.region);
            }
            save(&service, &mut editor).await?;
        }
        Commands::SetGene {
            person_id,
            index,
            gene,
        } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            editor.set_mutation_gene(index, &gene)?;
            save(&service, &mut editor).await?;
        }
        Commands::SetMutation {
            person_id,
            index,
            part,
            value,
        } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            editor.set_mutation_field(index, part, &value)?;
            save(&service, &mut editor).await?;
        }
        Commands::AddMutation { person_id, gene } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            let index = editor.add_mutation()?;
            if let Some(gene) = gene {
                editor.set_mutation_gene(index, &gene)?;
            }
            println!("Added mutation entry {index}");
            save(&service, &mut editor).await?;
        }
        Commands::RemoveMutation { person_id, index } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            let removed = editor.remove_mutation(index)?;
            println!("Removed {}", removed.summary());
            save(&service, &mut editor).await?;
        }
        Commands::Rename { person_id, name } => {
            let service = connect(config_path).await?;
            let mut editor = service.load(person_id).await?;
            editor.set_display_name(&name)?;
            save(&service, &mut editor).await?;
        }
        Commands::Delete { person_ids } => {
            let service = connect(config_path).await?;
            let res = service.api().bulk_delete(&person_ids).await?;
            println!("Deleted {} patient(s)", res.deleted_count);
            for error in res.errors {
                eprintln!("  {error}");
            }
        }
        Commands::ImportCsv { file } => {
            let service = connect(config_path).await?;
            import(&service, ImportKind::Csv, file).await?;
        }
        Commands::ImportFhir { file } => {
            let service = connect(config_path).await?;
            import(&service, ImportKind::FhirBundle, file).await?;
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<ClientConfig> {
    ClientConfig::from_env(config_path).context("failed to load configuration")
}

/// Builds the client and logs in when credentials are configured.
async fn connect(config_path: Option<PathBuf>) -> anyhow::Result<PatientService> {
    let config = load_config(config_path)?;
    tracing::debug!(api = config.api_base_url(), "client configured");
    let service = PatientService::new(&config)?;
    if let Some((username, password)) = config.credentials() {
        service.api().login(username, password).await?;
    }
    Ok(service)
}

async fn save(service: &PatientService, editor: &mut RecordEditor) -> anyhow::Result<()> {
    let outcome = service.save(editor).await?;
    if outcome.is_noop() {
        println!("No changes to save.");
    } else {
        println!(
            "Saved {} field(s){}",
            outcome.fields_sent,
            if outcome.name_updated { " and name" } else { "" }
        );
    }
    Ok(())
}

async fn import(service: &PatientService, kind: ImportKind, file: PathBuf) -> anyhow::Result<()> {
    let res = service.api().import(kind, &file).await?;
    println!("Created {} patient(s)", res.created_count);
    for error in &res.errors {
        eprintln!("  {error}");
    }
    Ok(())
}

fn print_record(editor: &RecordEditor, only: Option<EditorTab>) {
    let category = editor.category();
    let today = chrono::Local::now().date_naive();
    println!("{} (ID {})", editor.display_name(), editor.person_id());

    let tabs: Vec<EditorTab> = match only {
        Some(tab) => vec![tab],
        None => EditorTab::ALL.to_vec(),
    };
    for tab in tabs {
        println!("\n== {} ==", tab.label(category));
        for group in tab_groups(tab, category) {
            println!("-- {}", group.name);
            for field in group.fields {
                let value = editor.display_value(field.key, today);
                println!(
                    "  {}: {}",
                    field.label,
                    if value.is_empty() { "-" } else { value.as_str() }
                );
            }
        }
    }
}
