//! Command handlers for codementor
//!
//! Each CLI subcommand gets a handler module: interactive chat, code and
//! image analysis, the project workspace REPL, and the learning path.
//! Handlers take the loaded configuration plus a backend handle so they
//! can be driven by a fake backend in tests.

pub mod analyze;
pub mod chat;
pub mod learn;
pub mod special_commands;
pub mod workspace;

use crate::api::{HttpBackend, MentorBackend};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;

use std::sync::Arc;

/// Dispatch a parsed CLI invocation to its handler
pub async fn handle_command(cli: Cli, config: Config) -> Result<()> {
    let backend: Arc<dyn MentorBackend> = Arc::new(HttpBackend::new(&config.backend)?);

    match cli.command {
        Commands::Chat { agent } => chat::run(&config, backend, agent).await,
        Commands::Analyze {
            file,
            language,
            teach,
        } => {
            analyze::run(
                &config,
                backend,
                file.as_deref(),
                language.as_deref(),
                teach,
            )
            .await
        }
        Commands::Image {
            path,
            task,
            context,
        } => analyze::run_image(backend, &path, &task, context.as_deref()).await,
        Commands::Workspace { upload, project } => {
            workspace::run(&config, backend, upload.as_deref(), project.as_deref()).await
        }
        Commands::Learn { user } => learn::run(&config, backend, user).await,
    }
}
