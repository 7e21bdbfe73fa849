//! Command-line interface definition for codementor
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for agent chat, code analysis, image analysis,
//! the project workspace, and the learning path.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// codementor - Interactive AI code mentor CLI
///
/// Chat with mentor agents, analyze code for bugs with teaching
/// drill-downs, work on uploaded projects, and follow a learning path,
/// all against a Live Code Mentor backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "codementor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL override
    #[arg(short, long, env = "CODEMENTOR_BACKEND")]
    pub backend: Option<String>,

    /// Skill level override (beginner, intermediate, advanced)
    #[arg(short, long)]
    pub skill: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for codementor
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session with a mentor agent
    Chat {
        /// Agent persona (coding, health, travel, business, english)
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Analyze a source file or snippet for bugs, with teaching drill-downs
    Analyze {
        /// Path to the source file to analyze (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Language of the source (inferred from the extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Open the interactive teach-me prompt after printing findings
        #[arg(short, long)]
        teach: bool,
    },

    /// Analyze an image (code screenshot, whiteboard photo, text)
    Image {
        /// Path to the image file
        path: PathBuf,

        /// Task type: code_screenshot, whiteboard, english_text, general
        #[arg(short, long, default_value = "general")]
        task: String,

        /// Additional context sent with the image
        #[arg(long)]
        context: Option<String>,
    },

    /// Open the project workspace REPL against an uploaded project
    Workspace {
        /// Path to a project ZIP archive to upload
        #[arg(short, long)]
        upload: Option<PathBuf>,

        /// Existing project id to attach to instead of uploading
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Start or continue a learning path (onboarding, roadmap, mentor chat)
    Learn {
        /// User id for progress tracking (generated when omitted)
        #[arg(short, long)]
        user: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_agent() {
        let cli = Cli::parse_from(["codementor", "chat", "--agent", "travel"]);
        match cli.command {
            Commands::Chat { agent } => assert_eq!(agent.as_deref(), Some("travel")),
            other => panic!("expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::parse_from(["codementor", "analyze", "--file", "main.py"]);
        match cli.command {
            Commands::Analyze {
                file,
                language,
                teach,
            } => {
                assert_eq!(file.unwrap().to_str(), Some("main.py"));
                assert!(language.is_none());
                assert!(!teach);
            }
            other => panic!("expected Analyze, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_workspace_upload() {
        let cli = Cli::parse_from(["codementor", "workspace", "--upload", "proj.zip"]);
        match cli.command {
            Commands::Workspace { upload, project } => {
                assert!(upload.is_some());
                assert!(project.is_none());
            }
            other => panic!("expected Workspace, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_backend_flag() {
        let cli = Cli::parse_from(["codementor", "--backend", "http://x.example", "chat"]);
        assert_eq!(cli.backend.as_deref(), Some("http://x.example"));
    }

    #[test]
    fn test_parse_image_task_default() {
        let cli = Cli::parse_from(["codementor", "image", "shot.png"]);
        match cli.command {
            Commands::Image { task, .. } => assert_eq!(task, "general"),
            other => panic!("expected Image, got {:?}", other),
        }
    }
}
