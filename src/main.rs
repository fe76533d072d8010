use anyhow::{bail, Context};
use bpmlens::document::{DocumentStore, REFERENCE_FILE, SUBJECT_SUFFIX};
use bpmlens::http::{AppState, HttpServer};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bpmlens", version, about = "BPM industry insight engine")]
struct Cli {
    /// Directory holding the reference and industry documents
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive console (default)
    Console,
    /// Start the web upload/query server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Directory for uploaded documents
        #[arg(long, default_value = "uploads")]
        uploads_dir: PathBuf,
    },
}

/// The reference document and at least one subject document must exist
/// before anything else runs. This is the only fatal path.
fn check_seed_files(data_dir: &Path) -> anyhow::Result<()> {
    if !data_dir.join(REFERENCE_FILE).exists() {
        bail!(
            "required data file missing: {:?}",
            data_dir.join(REFERENCE_FILE)
        );
    }

    let has_subject = std::fs::read_dir(data_dir)
        .with_context(|| format!("cannot read data directory {data_dir:?}"))?
        .filter_map(|entry| entry.ok())
        .any(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(SUBJECT_SUFFIX))
        });
    if !has_subject {
        bail!("no *{SUBJECT_SUFFIX} files found in {data_dir:?}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    check_seed_files(&cli.data_dir)?;

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            let mut store = DocumentStore::open(&cli.data_dir);
            bpmlens::console::run(&mut store)?;
        }
        Commands::Serve { port, uploads_dir } => {
            let state = Arc::new(AppState::new(
                uploads_dir,
                cli.data_dir.join(REFERENCE_FILE),
            ));
            let server = HttpServer::new(state, port);
            server
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
    }

    Ok(())
}
