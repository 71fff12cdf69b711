use anyhow::Result;
use clap::{Parser, Subcommand};
use gittuf_viz::config::CoreConfig;
use gittuf_viz::service::PolicyService;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Inspect gittuf policy history and metadata from the command line
#[derive(Parser)]
#[command(name = "gittuf-viz", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List commits on the policy ref of a repository
    Commits {
        /// Remote repository URL
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,
        /// Local repository path
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Fetch and decode a metadata file at a commit
    Metadata {
        /// Remote repository URL
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,
        /// Local repository path
        #[arg(long)]
        path: Option<PathBuf>,
        /// Commit hash or symbolic name
        #[arg(long, default_value = "HEAD")]
        commit: String,
        /// File path inside the commit tree
        #[arg(long)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let service = PolicyService::new(CoreConfig::new()?)?;
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Commits { url, path } => {
            let commits = match (url, path) {
                (Some(url), None) => service.list_remote_commits(&url, &cancel).await?,
                (None, Some(path)) => service.list_local_commits(&path).await?,
                _ => anyhow::bail!("pass exactly one of --url or --path"),
            };
            println!("{}", serde_json::to_string_pretty(&commits)?);
        }
        Command::Metadata {
            url,
            path,
            commit,
            file,
        } => {
            let document = match (url, path) {
                (Some(url), None) => {
                    service
                        .fetch_remote_metadata(&url, &commit, &file, &cancel)
                        .await?
                }
                (None, Some(path)) => service.fetch_local_metadata(&path, &commit, &file).await?,
                _ => anyhow::bail!("pass exactly one of --url or --path"),
            };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
