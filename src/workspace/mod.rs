//! Project workspace
//!
//! Presents one uploaded project: its file tree, a tabbed set of open
//! file buffers, a terminal transcript, and a full-analysis side panel.
//! Every operation is an independent request/response round trip; a
//! failed fetch surfaces one notice to the caller and leaves all prior
//! workspace state untouched.
//!
//! Run-class operations (run, install-deps, terminal commands) share the
//! terminal transcript, so they are serialized through a command gate: a
//! second submission while one is in flight is rejected as busy rather
//! than allowed to interleave its log entries.

pub mod tabs;
pub mod terminal;

pub use tabs::{OpenFile, TabStrip};
pub use terminal::{EntryKind, TerminalEntry, TerminalLog};

use crate::agents::SkillLevel;
use crate::api::types::{
    FileNode, FullAnalysisResponse, LanguageStat, RunFileRequest, SaveFileRequest,
    TerminalRequest, UploadProjectResponse,
};
use crate::api::MentorBackend;
use crate::error::{MentorError, Result};

use std::sync::Arc;

/// An uploaded, server-held project
///
/// Created once per upload; read-only afterwards except for individual
/// file saves. The overview fields are filled in by a project analysis.
#[derive(Debug, Clone)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub file_tree: Vec<FileNode>,
    pub languages: Vec<LanguageStat>,
    pub total_files: u32,
    pub readme_content: Option<String>,
}

/// Workspace state for one project
pub struct Workspace {
    backend: Arc<dyn MentorBackend>,
    skill: SkillLevel,
    project: Option<Project>,
    tabs: TabStrip,
    terminal: TerminalLog,
    analysis: Option<FullAnalysisResponse>,
    running: Option<&'static str>,
}

impl Workspace {
    /// Create a workspace with no project loaded
    pub fn new(backend: Arc<dyn MentorBackend>, skill: SkillLevel) -> Self {
        Self {
            backend,
            skill,
            project: None,
            tabs: TabStrip::new(),
            terminal: TerminalLog::new(),
            analysis: None,
            running: None,
        }
    }

    /// The loaded project, if any
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// The open-file tab strip
    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    /// The terminal transcript
    pub fn terminal(&self) -> &TerminalLog {
        &self.terminal
    }

    /// The full-analysis panel content, once fetched
    pub fn analysis(&self) -> Option<&FullAnalysisResponse> {
        self.analysis.as_ref()
    }

    /// The run-class operation currently in flight, if any
    pub fn running(&self) -> Option<&'static str> {
        self.running
    }

    fn require_project(&self) -> Result<&Project> {
        self.project.as_ref().ok_or_else(|| {
            MentorError::NoProject("upload or attach a project first".to_string()).into()
        })
    }

    fn try_begin(&mut self, op: &'static str) -> Result<()> {
        if let Some(current) = self.running {
            return Err(MentorError::WorkspaceBusy(format!(
                "{} is still running; wait for it to finish",
                current
            ))
            .into());
        }
        self.running = Some(op);
        Ok(())
    }

    fn finish(&mut self) {
        self.running = None;
    }

    /// Upload a project ZIP and make it the workspace's project
    ///
    /// Replaces any previously loaded project; tabs, transcript, and the
    /// analysis panel are cleared because they referred to the old one.
    pub async fn upload(&mut self, archive_name: &str, zip_bytes: Vec<u8>) -> Result<()> {
        let response: UploadProjectResponse =
            self.backend.upload_project(archive_name, zip_bytes).await?;
        let name = archive_name
            .trim_end_matches(".zip")
            .rsplit('/')
            .next()
            .unwrap_or(archive_name)
            .to_string();
        tracing::info!(
            "Uploaded project {} ({} files)",
            response.project_id,
            response.files_count
        );
        self.project = Some(Project {
            project_id: response.project_id,
            name,
            file_tree: response.files,
            languages: Vec::new(),
            total_files: response.files_count,
            readme_content: None,
        });
        self.tabs.clear();
        self.terminal.clear();
        self.analysis = None;
        Ok(())
    }

    /// Attach to an already uploaded project by id
    ///
    /// The file tree is only known from an upload, so an attached
    /// project starts with an empty tree; the overview fetch fills in
    /// name, languages, and counts.
    pub async fn attach(&mut self, project_id: &str) -> Result<()> {
        let overview = self
            .backend
            .analyze_project(project_id, &self.skill.to_string())
            .await?;
        self.project = Some(Project {
            project_id: project_id.to_string(),
            name: overview.name,
            file_tree: Vec::new(),
            languages: overview.languages,
            total_files: overview.total_files,
            readme_content: overview.readme_content,
        });
        self.tabs.clear();
        self.terminal.clear();
        self.analysis = None;
        Ok(())
    }

    /// Refresh the project overview (languages, counts, readme)
    pub async fn refresh_overview(&mut self) -> Result<()> {
        let project_id = self.require_project()?.project_id.clone();
        let overview = self
            .backend
            .analyze_project(&project_id, &self.skill.to_string())
            .await?;
        if let Some(project) = self.project.as_mut() {
            if !overview.name.is_empty() {
                project.name = overview.name;
            }
            project.languages = overview.languages;
            project.total_files = overview.total_files;
            project.readme_content = overview.readme_content;
        }
        Ok(())
    }

    /// Open a file, or just switch tabs when it is already open
    ///
    /// An already-open path never issues a network call.
    pub async fn open_file(&mut self, path: &str) -> Result<()> {
        if let Some(index) = self.tabs.index_of(path) {
            self.tabs.activate(index);
            return Ok(());
        }
        let project_id = self.require_project()?.project_id.clone();
        let file = self.backend.get_file(&project_id, path).await?;
        self.tabs
            .open(OpenFile::new(file.path, file.content, file.language));
        Ok(())
    }

    /// Close an open tab by path
    ///
    /// Returns true when the closed buffer had unsaved edits, so the
    /// caller can warn. Closing never saves.
    pub fn close_file(&mut self, path: &str) -> Result<bool> {
        let index = self
            .tabs
            .index_of(path)
            .ok_or_else(|| MentorError::UnknownFile(path.to_string()))?;
        let removed = self.tabs.close(index);
        Ok(removed.map(|f| f.dirty).unwrap_or(false))
    }

    /// Replace the active buffer's content, marking it dirty
    pub fn edit_active(&mut self, content: impl Into<String>) -> Result<()> {
        if self.tabs.edit_active(content) {
            Ok(())
        } else {
            Err(MentorError::InvalidState("no active file".to_string()).into())
        }
    }

    /// Save the active file
    ///
    /// Sends only the active buffer; on success its dirty flag clears.
    /// A failure (transport or `success: false` ack) keeps the flag set.
    pub async fn save_active(&mut self) -> Result<()> {
        let project_id = self.require_project()?.project_id.clone();
        let active = self
            .tabs
            .active()
            .ok_or_else(|| MentorError::InvalidState("no active file".to_string()))?;
        let request = SaveFileRequest {
            project_id,
            path: active.path.clone(),
            content: active.content.clone(),
        };
        let ack = self.backend.save_file(&request).await?;
        if !ack.success {
            return Err(MentorError::Backend(
                ack.message
                    .unwrap_or_else(|| "save rejected by backend".to_string()),
            )
            .into());
        }
        self.tabs.mark_active_saved();
        Ok(())
    }

    /// Run a file, appending its transcript entries
    ///
    /// Serialized by the command gate. A transport failure appends
    /// nothing; a successful response is always recorded, including
    /// failing exit codes with their error chain.
    pub async fn run_file(&mut self, path: &str) -> Result<i32> {
        let project_id = self.require_project()?.project_id.clone();
        self.try_begin("run")?;
        let request = RunFileRequest {
            project_id,
            file_path: path.to_string(),
            skill_level: self.skill.to_string(),
        };
        let result = self.backend.run_file(&request).await;
        self.finish();
        let response = result?;
        self.terminal.record_run(path, &response);
        Ok(response.exit_code)
    }

    /// Run the active file
    pub async fn run_active(&mut self) -> Result<i32> {
        let path = self
            .tabs
            .active()
            .map(|f| f.path.clone())
            .ok_or_else(|| MentorError::InvalidState("no active file".to_string()))?;
        self.run_file(&path).await
    }

    /// Install project dependencies, appending transcript entries
    pub async fn install_deps(&mut self) -> Result<bool> {
        let project_id = self.require_project()?.project_id.clone();
        self.try_begin("install-deps")?;
        let result = self.backend.install_deps(&project_id).await;
        self.finish();
        let response = result?;
        self.terminal.record_install(&response);
        Ok(response.success)
    }

    /// Execute an arbitrary terminal command, appending transcript entries
    pub async fn exec(&mut self, command: &str) -> Result<()> {
        if command.trim().is_empty() {
            return Err(MentorError::Validation("command is empty".to_string()).into());
        }
        let project_id = self.require_project()?.project_id.clone();
        self.try_begin("terminal")?;
        let request = TerminalRequest {
            project_id,
            command: command.to_string(),
        };
        let result = self.backend.terminal(&request).await;
        self.finish();
        let response = result?;
        self.terminal.record_command(command, &response);
        Ok(())
    }

    /// Fetch the full project analysis, replacing the panel wholesale
    pub async fn analyze_full(&mut self) -> Result<()> {
        let project_id = self.require_project()?.project_id.clone();
        let response = self
            .backend
            .analyze_full(&project_id, &self.skill.to_string())
            .await?;
        self.analysis = Some(response);
        Ok(())
    }
}
