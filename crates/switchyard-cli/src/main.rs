//! switchyard CLI
//!
//! Command-line tool for inspecting route manifests and resolving requests
//! against them.

mod manifest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use switchyard::{Handler, RequestContext};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::manifest::Manifest;

/// Inspect and resolve switchyard route manifests.
#[derive(Parser)]
#[command(name = "switchyard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route manifest (JSON).
    #[arg(short, long, env = "SWITCHYARD_MANIFEST", default_value = "routes.json")]
    manifest: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes with their normalized patterns.
    Routes,

    /// Compile every pattern and report problems.
    Check,

    /// Route one request and print the handler's result.
    Resolve {
        /// HTTP method, e.g. GET.
        method: String,

        /// Request URI; query string and fragment are ignored.
        uri: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let manifest = Manifest::load(&cli.manifest)?;
    let router = manifest.build()?;

    match cli.command {
        Commands::Routes => {
            println!("{:<24} {:<40} HANDLER", "METHODS", "PATTERN");
            println!("{:-<80}", "");
            for route in router.routes() {
                let methods: Vec<_> = route.methods().iter().map(|m| m.as_str()).collect();
                let handler = match route.handler() {
                    Handler::Inline(_) => "<inline>".to_string(),
                    Handler::Controller(target) => target.to_string(),
                };
                println!("{:<24} {:<40} {handler}", methods.join(","), route.pattern());
            }
        }

        Commands::Check => {
            info!(
                routes = router.routes().len(),
                "All patterns in {} compiled",
                cli.manifest.display()
            );
        }

        Commands::Resolve { method, uri } => {
            let request = RequestContext::parse(&method, &uri)?;
            let out = router.run(&request)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
