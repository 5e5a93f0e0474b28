//! Command-line front end for the geoprep tutor and evaluation lab.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use geoprep_core::model::{AppMode, EvaluationModule, ProfileType};

mod commands;

#[derive(Parser)]
#[command(
    name = "geoprep",
    version,
    about = "HPSC Geography tutor and answer evaluator"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding users and evaluation logs (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DashboardFormat {
    Text,
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter geoprep.toml
    Init,

    /// Register a student account
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// Fresher, "Working Professional", "UPSC Aspirant" or General
        #[arg(long, default_value = "General")]
        profile: ProfileType,
    },

    /// Interactive chat with the mentor
    Chat {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// syllabus, interview or haryana
        #[arg(long, default_value = "syllabus")]
        mode: AppMode,
    },

    /// Send a single chat message and print the reply
    Ask {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "syllabus")]
        mode: AppMode,

        /// The message to send
        message: String,
    },

    /// Grade an answer in the evaluation lab
    Evaluate {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// interview, teaching or research
        #[arg(long, default_value = "interview")]
        module: EvaluationModule,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        question: Option<String>,

        /// The answer text
        #[arg(long, conflicts_with = "answer_file", required_unless_present = "answer_file")]
        answer: Option<String>,

        /// Read the answer from a file
        #[arg(long)]
        answer_file: Option<PathBuf>,
    },

    /// Show a student's evaluation history
    History {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Admin dashboard over all evaluations
    Dashboard {
        #[arg(long)]
        admin_code: String,

        #[arg(long, value_enum, default_value = "text")]
        format: DashboardFormat,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete every evaluation log
    ClearLogs {
        #[arg(long)]
        admin_code: String,

        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// List evaluation topics, modes and modules
    Topics,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("geoprep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Signup {
            username,
            password,
            profile,
        } => commands::signup::execute(&paths, username, password, profile),
        Commands::Chat {
            username,
            password,
            mode,
        } => commands::chat::execute(&paths, username, password, mode).await,
        Commands::Ask {
            username,
            password,
            mode,
            message,
        } => commands::ask::execute(&paths, username, password, mode, message).await,
        Commands::Evaluate {
            username,
            password,
            module,
            topic,
            question,
            answer,
            answer_file,
        } => {
            commands::evaluate::execute(
                &paths,
                username,
                password,
                module,
                topic,
                question,
                answer,
                answer_file,
            )
            .await
        }
        Commands::History { username, password } => {
            commands::history::execute(&paths, username, password)
        }
        Commands::Dashboard {
            admin_code,
            format,
            output,
        } => commands::dashboard::execute(&paths, admin_code, format, output),
        Commands::ClearLogs { admin_code, yes } => {
            commands::clear_logs::execute(&paths, admin_code, yes)
        }
        Commands::ListModels { provider } => commands::list_models::execute(&paths, provider).await,
        Commands::Topics => commands::topics::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
