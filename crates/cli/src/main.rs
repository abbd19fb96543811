use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use courselib_db::LibraryStore;
use courselib_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "courselib", version, about = "Course library service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty store instead of the demo catalogue
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the merged OpenAPI document
    Openapi,
    /// Print the resolved settings
    Settings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load course-library settings")?;

    match cli.command {
        Command::Serve {
            host,
            port,
            no_seed,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if no_seed {
                settings.store.seed_demo_data = false;
            }
            tokio::runtime::Runtime::new()
                .context("failed to start async runtime")?
                .block_on(course_library::bootstrap::run(settings))
        }
        Command::Openapi => {
            let registry = course_library::bootstrap::build_registry(Arc::new(LibraryStore::new()));
            let document = courselib_http::openapi::collect(&registry);
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        Command::Settings => {
            println!("{settings:#?}");
            Ok(())
        }
    }
}
