//! Project workspace REPL
//!
//! Opens a workspace against an uploaded (or attached) project and runs
//! a small command loop over it: browse the file tree, open and edit
//! tabs, save, run files, install dependencies, execute terminal
//! commands, and fetch the full project analysis. Closing a dirty tab
//! warns about the unsaved edits but never saves on the user's behalf.

use crate::api::types::FileNode;
use crate::api::MentorBackend;
use crate::config::Config;
use crate::error::{MentorError, Result};
use crate::notify;
use crate::workspace::{EntryKind, TerminalEntry, Workspace};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;
use std::sync::Arc;

fn print_tree(nodes: &[FileNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.is_dir() {
            println!("{}{}/", indent, node.name.blue().bold());
            print_tree(&node.children, depth + 1);
        } else {
            println!("{}{}", indent, node.name);
        }
    }
}

fn print_entry(entry: &TerminalEntry) {
    match entry.kind {
        EntryKind::Command => println!("{} {}", "$".bold(), entry.text.bold()),
        EntryKind::Stdout => println!("{}", entry.text),
        EntryKind::Stderr => println!("{}", entry.text.red()),
        EntryKind::Explanation => println!("{} {}", "explain:".yellow(), entry.text),
        EntryKind::Suggestion => println!("{} {}", "try:".green(), entry.text),
        EntryKind::Status => println!("{}", entry.text.dimmed()),
    }
}

fn print_new_entries(workspace: &Workspace, from: usize) {
    for entry in &workspace.terminal().entries()[from..] {
        print_entry(entry);
    }
}

fn print_tabs(workspace: &Workspace) {
    if workspace.tabs().is_empty() {
        println!("{}", "no open files".dimmed());
        return;
    }
    for (i, file) in workspace.tabs().files().iter().enumerate() {
        let marker = if workspace.tabs().active_index() == Some(i) {
            "*"
        } else {
            " "
        };
        let dirty = if file.dirty { " [modified]" } else { "" };
        println!("{} {}{}", marker, file.path, dirty.yellow());
    }
}

fn print_overview(workspace: &Workspace) {
    let Some(project) = workspace.project() else {
        println!("{}", "no project loaded".dimmed());
        return;
    };
    println!("{} ({})", project.name.bold(), project.project_id);
    println!("Files: {}", project.total_files);
    for stat in &project.languages {
        println!("  {}: {:.1}%", stat.name, stat.percentage);
    }
    if let Some(readme) = &project.readme_content {
        let preview: String = readme.lines().take(10).collect::<Vec<_>>().join("\n");
        println!("\n{}\n", preview.dimmed());
    }
}

fn print_analysis(workspace: &Workspace) {
    let Some(analysis) = workspace.analysis() else {
        println!("{}", "no analysis yet; run 'analyze'".dimmed());
        return;
    };
    println!("{}", "Architecture".bold().underline());
    println!("{}\n", analysis.architecture_overview);
    if !analysis.entry_points.is_empty() {
        println!("Entry points: {}", analysis.entry_points.join(", "));
    }
    for issue in &analysis.issues {
        println!("{} {}", "issue:".red(), issue);
    }
    for suggestion in &analysis.suggestions {
        println!("{} {}", "suggest:".green(), suggestion);
    }
}

fn print_workspace_help() {
    println!(
        r#"
Workspace Commands
==================

PROJECT:
  tree              - Show the project file tree
  overview          - Show project name, languages, and readme
  analyze           - Fetch the full project analysis
  analysis          - Show the last fetched analysis

FILES:
  open <path>       - Open a file (switches tabs if already open)
  close <path>      - Close a tab (warns on unsaved edits)
  tabs              - List open tabs; * marks the active one
  show              - Print the active file's content
  edit <local-file> - Replace the active buffer from a local file
  save              - Save the active file

RUNNING (one at a time):
  run [path]        - Run a file (defaults to the active one)
  deps              - Install project dependencies
  sh <command>      - Execute a terminal command in the project

SESSION:
  log               - Reprint the whole terminal transcript
  help              - Show this help message
  exit / quit       - Leave the workspace
"#
    );
}

async fn handle_line(workspace: &mut Workspace, input: &str) -> Result<()> {
    let (command, rest) = match input.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (input, ""),
    };
    match command {
        "help" => print_workspace_help(),
        "tree" => match workspace.project() {
            Some(project) => print_tree(&project.file_tree, 0),
            None => println!("{}", "no project loaded".dimmed()),
        },
        "overview" => {
            workspace.refresh_overview().await?;
            print_overview(workspace);
        }
        "analysis" => print_analysis(workspace),
        "analyze" => {
            workspace.analyze_full().await?;
            print_analysis(workspace);
        }
        "open" => {
            if rest.is_empty() {
                return Err(MentorError::Validation("usage: open <path>".to_string()).into());
            }
            workspace.open_file(rest).await?;
            if let Some(file) = workspace.tabs().active() {
                println!("{} ({})", file.path.bold(), file.language.dimmed());
            }
        }
        "close" => {
            if rest.is_empty() {
                return Err(MentorError::Validation("usage: close <path>".to_string()).into());
            }
            let was_dirty = workspace.close_file(rest)?;
            if was_dirty {
                notify::warn(&format!("closed {} with unsaved edits", rest));
            }
        }
        "tabs" => print_tabs(workspace),
        "show" => match workspace.tabs().active() {
            Some(file) => println!("{}", file.content),
            None => println!("{}", "no active file".dimmed()),
        },
        "edit" => {
            if rest.is_empty() {
                return Err(
                    MentorError::Validation("usage: edit <local-file>".to_string()).into(),
                );
            }
            let content = std::fs::read_to_string(rest)?;
            workspace.edit_active(content)?;
            notify::info("buffer replaced; use 'save' to persist");
        }
        "save" => {
            workspace.save_active().await?;
            notify::info("saved");
        }
        "run" => {
            let before = workspace.terminal().len();
            if rest.is_empty() {
                workspace.run_active().await?;
            } else {
                workspace.run_file(rest).await?;
            }
            print_new_entries(workspace, before);
        }
        "deps" => {
            let before = workspace.terminal().len();
            workspace.install_deps().await?;
            print_new_entries(workspace, before);
        }
        "sh" => {
            let before = workspace.terminal().len();
            workspace.exec(rest).await?;
            print_new_entries(workspace, before);
        }
        "log" => {
            for entry in workspace.terminal().entries() {
                print_entry(entry);
            }
        }
        other => {
            return Err(MentorError::Validation(format!(
                "unknown command: {} (try 'help')",
                other
            ))
            .into());
        }
    }
    Ok(())
}

/// Run the `workspace` command
///
/// Exactly one of `upload` and `project` must be given: either a ZIP to
/// upload or an existing project id to attach to.
pub async fn run(
    config: &Config,
    backend: Arc<dyn MentorBackend>,
    upload: Option<&Path>,
    project: Option<&str>,
) -> Result<()> {
    let mut workspace = Workspace::new(backend, config.skill_level());

    match (upload, project) {
        (Some(path), None) => {
            let archive_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("project.zip")
                .to_string();
            let bytes = std::fs::read(path)?;
            workspace.upload(&archive_name, bytes).await?;
        }
        (None, Some(project_id)) => {
            workspace.attach(project_id).await?;
        }
        _ => {
            return Err(MentorError::Validation(
                "pass exactly one of --upload <zip> or --project <id>".to_string(),
            )
            .into());
        }
    }

    if let Some(project) = workspace.project() {
        println!(
            "{} workspace - {} ({} files)",
            "codementor".bold(),
            project.name,
            project.total_files
        );
    }
    println!("Type 'help' for commands, 'exit' to leave.\n");

    let mut rl = DefaultEditor::new().map_err(|e| MentorError::Config(e.to_string()))?;
    loop {
        match rl.readline("workspace >> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);
                if input == "exit" || input == "quit" {
                    break;
                }
                if let Err(e) = handle_line(&mut workspace, input).await {
                    notify::error(&e.to_string());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }
    let dirty: Vec<&str> = workspace
        .tabs()
        .files()
        .iter()
        .filter(|f| f.dirty)
        .map(|f| f.path.as_str())
        .collect();
    if !dirty.is_empty() {
        notify::warn(&format!("unsaved edits left behind: {}", dirty.join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SkillLevel;
    use crate::test_utils::FakeBackend;

    #[tokio::test]
    async fn test_handle_line_open_and_tabs() {
        let fake = Arc::new(FakeBackend::new());
        let mut ws = Workspace::new(fake.clone(), SkillLevel::Beginner);
        ws.upload("demo.zip", vec![1, 2, 3]).await.unwrap();

        handle_line(&mut ws, "open main.py").await.unwrap();
        assert_eq!(ws.tabs().len(), 1);
        assert_eq!(fake.call_count("get_file"), 1);
    }

    #[tokio::test]
    async fn test_handle_line_unknown_command() {
        let fake = Arc::new(FakeBackend::new());
        let mut ws = Workspace::new(fake, SkillLevel::Beginner);
        let err = handle_line(&mut ws, "teleport").await.unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }

    #[tokio::test]
    async fn test_handle_line_open_requires_path() {
        let fake = Arc::new(FakeBackend::new());
        let mut ws = Workspace::new(fake.clone(), SkillLevel::Beginner);
        assert!(handle_line(&mut ws, "open").await.is_err());
        assert_eq!(fake.call_count("get_file"), 0);
    }

    #[tokio::test]
    async fn test_handle_line_run_records_transcript() {
        let fake = Arc::new(FakeBackend::new());
        let mut ws = Workspace::new(fake, SkillLevel::Beginner);
        ws.upload("demo.zip", vec![1]).await.unwrap();
        handle_line(&mut ws, "run main.py").await.unwrap();
        assert!(!ws.terminal().is_empty());
    }
}
