//! notekeep: command-line front end for the notes API.
//!
//! Each invocation resumes the session saved by the previous one, runs one
//! command, and saves the resulting session again.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notekeep_client::logging::SUBSYSTEM_CLI;
use notekeep_client::{
    render, session_file, Action, ClientConfig, HttpNoteStore, NoteId, NoteStore, Notice,
};

#[derive(Parser)]
#[command(name = "notekeep")]
#[command(author, version, about = "Keep short text notes on a notekeep server")]
#[command(propagate_version = true)]
struct Cli {
    /// Server base URL (overrides NOTEKEEP_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where the session is saved between invocations
    #[arg(long, global = true, env = "NOTEKEEP_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (does not log in)
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and save the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List notes, newest first
    List,

    /// Show a single note
    Show {
        id: NoteId,
    },

    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,
    },

    /// Replace a note's title and content
    Edit {
        id: NoteId,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,
    },

    /// Delete a note
    Rm {
        id: NoteId,
    },

    /// Search notes; an empty query lists everything
    Search {
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Default filter: warnings from notekeep's own targets only.
const DEFAULT_LOG_FILTER: &str = "notekeep=warn,notekeep_client=warn,notekeep_core=warn";

/// Logs go to stderr so command output stays clean.
///
/// Environment variables:
///   RUST_LOG    - filter directives (default: [`DEFAULT_LOG_FILTER`])
///   LOG_FORMAT  - "json" or "text" (default: "text")
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let session_path = cli
        .session_file
        .or_else(session_file::default_path)
        .context("no config directory available; pass --session-file")?;
    let session = session_file::load(&session_path)
        .with_context(|| format!("reading {}", session_path.display()))?;

    let store = HttpNoteStore::with_session(config, session)?;
    let outcome = execute(&store, cli.command).await;

    session_file::save(&session_path, &store.session().await)
        .with_context(|| format!("writing {}", session_path.display()))?;

    Ok(match outcome {
        Ok(Some(notice)) => {
            println!("{}", notice);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(notice) => {
            tracing::debug!(subsystem = SUBSYSTEM_CLI, notice = %notice, "Command failed");
            eprintln!("{}", notice);
            ExitCode::FAILURE
        }
    })
}

async fn execute(store: &HttpNoteStore, command: Commands) -> Result<Option<Notice>, Notice> {
    match command {
        Commands::Register { username, password } => {
            store
                .register(&username, &password)
                .await
                .map_err(|e| Notice::for_error(Action::Register, &e))?;
            Ok(Notice::for_success(Action::Register, None))
        }
        Commands::Login { username, password } => {
            store
                .login(&username, &password)
                .await
                .map_err(|e| Notice::for_error(Action::Login, &e))?;
            Ok(Notice::for_success(Action::Login, Some(&username)))
        }
        Commands::Logout => {
            store.logout().await;
            Ok(Notice::for_success(Action::Logout, None))
        }
        Commands::Whoami => match store.current_user().await {
            Some(username) => {
                println!("{}", username);
                Ok(None)
            }
            None => Err(Notice::LoginRequired),
        },
        Commands::List => {
            let notes = store
                .list_notes()
                .await
                .map_err(|e| Notice::for_error(Action::List, &e))?;
            print!("{}", render::note_list(&notes));
            Ok(None)
        }
        Commands::Show { id } => {
            let note = store
                .get_note(&id)
                .await
                .map_err(|e| Notice::for_error(Action::Show, &e))?;
            print!("{}", render::note_card(&note));
            Ok(None)
        }
        Commands::Add { title, content } => {
            let note = store
                .create_note(&title, &content)
                .await
                .map_err(|e| Notice::for_error(Action::Create, &e))?;
            print!("{}", render::note_card(&note));
            Ok(Notice::for_success(Action::Create, None))
        }
        Commands::Edit { id, title, content } => {
            let note = store
                .update_note(&id, &title, &content)
                .await
                .map_err(|e| Notice::for_error(Action::Update, &e))?;
            print!("{}", render::note_card(&note));
            Ok(Notice::for_success(Action::Update, None))
        }
        Commands::Rm { id } => {
            store
                .delete_note(&id)
                .await
                .map_err(|e| Notice::for_error(Action::Delete, &e))?;
            Ok(Notice::for_success(Action::Delete, None))
        }
        Commands::Search { query } => {
            let notes = store
                .search_notes(&query.join(" "))
                .await
                .map_err(|e| Notice::for_error(Action::Search, &e))?;
            print!("{}", render::note_list(&notes));
            Ok(None)
        }
    }
}
