use clap::{Parser, Subcommand};
use registry_core::{
    config::patient_data_file_from_env_value, CoreConfig, NewPatient, Patient, PatientService,
    PatientUpdate, Statistics,
};

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Patient registry CLI")]
struct Cli {
    /// Patient data file (overrides PATIENT_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Register a new patient
    Create {
        /// Full name
        name: String,
        /// Age in whole years
        age: String,
        /// Phone number
        phone: String,
    },
    /// Show one patient
    Show {
        /// Patient id
        id: u64,
    },
    /// Search by name fragment or exact id
    Search {
        /// Name fragment (case-insensitive) or id
        term: String,
    },
    /// Update fields of an existing patient
    Update {
        /// Patient id
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a patient permanently
    Delete {
        /// Patient id
        id: u64,
    },
    /// Show count and age figures
    Stats,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("registry_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_file = patient_data_file_from_env_value(data_file_setting(
        cli.data_file,
        std::env::var("PATIENT_DATA_FILE").ok(),
    ));
    let cfg = CoreConfig::new(data_file)?;
    let service = PatientService::from_config(&cfg);

    match cli.command {
        Some(Commands::List) => print_patients(&service.list()?),
        Some(Commands::Create { name, age, phone }) => {
            let patient = service.create(NewPatient::new(&name, &age, &phone)?)?;
            println!("Created patient {}", format_patient(&patient));
        }
        Some(Commands::Show { id }) => println!("{}", format_patient(&service.get_by_id(id)?)),
        Some(Commands::Search { term }) => print_patients(&service.find_by_name(&term)?),
        Some(Commands::Update {
            id,
            name,
            age,
            phone,
        }) => {
            let fields = PatientUpdate::new(name.as_deref(), age.as_deref(), phone.as_deref())?;
            if fields.is_empty() {
                anyhow::bail!("nothing to update: pass --name, --age or --phone");
            }
            let patient = service.update(id, fields)?;
            println!("Updated patient {}", format_patient(&patient));
        }
        Some(Commands::Delete { id }) => {
            service.delete(id)?;
            println!("Deleted patient {}", id);
        }
        Some(Commands::Stats) => println!("{}", format_statistics(&service.statistics()?)),
        None => {
            println!("Use 'registry --help' for commands");
        }
    }

    Ok(())
}

/// The `--data-file` flag wins over the environment unless it is blank.
fn data_file_setting(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.filter(|v| !v.trim().is_empty()).or(env)
}

fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients found.");
    } else {
        for patient in patients {
            println!("{}", format_patient(patient));
        }
    }
}

fn format_patient(patient: &Patient) -> String {
    format!(
        "ID: {}, Name: {}, Age: {}, Phone: {}, Registered: {}",
        patient.id, patient.name, patient.age, patient.phone, patient.created_at
    )
}

fn format_statistics(stats: &Statistics) -> String {
    let mut out = format!("Total patients: {}", stats.count);
    if let (Some(mean), Some(min), Some(max)) =
        (stats.mean_age_rounded(), stats.min_age, stats.max_age)
    {
        out.push_str(&format!(
            "\nMean age: {mean:.1}\nYoungest age: {min}\nOldest age: {max}"
        ));
    }
    if let Some(oldest) = &stats.oldest {
        out.push_str(&format!("\nOldest patient: {} ({})", oldest.name, oldest.id));
    }
    out
}
