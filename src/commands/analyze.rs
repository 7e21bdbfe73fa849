//! Code and image analysis command handlers
//!
//! `analyze` reads a source file (or stdin), runs the bug analysis, and
//! prints the findings table. With `--teach` it opens an interactive
//! prompt for drilling into a finding: summary first, then a deeper
//! explanation plus diagram on request, then an optional self-check.
//!
//! `image` sends a base64-encoded screenshot or photo to the image
//! analysis endpoint.

use crate::analysis::{AnalysisPanel, Language};
use crate::api::types::{Finding, ImageAnalysisRequest, Severity};
use crate::api::MentorBackend;
use crate::config::Config;
use crate::error::{MentorError, Result};
use crate::notify;
use crate::teaching::{ExplanationState, TeachingOverlay};

use base64::Engine;
use colored::Colorize;
use prettytable::{format, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

fn severity_cell(severity: Severity) -> String {
    match severity {
        Severity::Critical => severity.to_string().red().bold().to_string(),
        Severity::Warning => severity.to_string().yellow().to_string(),
        Severity::Info => severity.to_string().cyan().to_string(),
    }
}

/// Print the findings table, one row per finding
pub fn print_findings(findings: &[Finding], overall_quality: &str) {
    if findings.is_empty() {
        println!("{}", "No issues found - clean code!".green());
        if !overall_quality.is_empty() {
            println!("Overall: {}", overall_quality);
        }
        return;
    }
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "#".bold(),
        "Line".bold(),
        "Severity".bold(),
        "Message".bold(),
        "Suggestion".bold()
    ]);
    for (i, finding) in findings.iter().enumerate() {
        table.add_row(prettytable::row![
            i + 1,
            finding.line,
            severity_cell(finding.severity),
            finding.message,
            finding.suggestion
        ]);
    }
    table.printstd();
    if !overall_quality.is_empty() {
        println!("Overall: {}", overall_quality);
    }
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn resolve_language(file: Option<&Path>, language: Option<&str>) -> Result<Language> {
    if let Some(name) = language {
        return Language::parse_str(name);
    }
    if let Some(ext) = file.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        if let Some(lang) = Language::from_extension(ext) {
            return Ok(lang);
        }
    }
    // The backend's own default
    Ok(Language::Python)
}

fn print_overlay_summary(overlay: &TeachingOverlay) {
    if let Some(summary) = overlay.summary() {
        println!("\n{}", summary.concept_name.bold().underline());
        println!("\n{}\n", summary.natural_explanation);
        println!("{} {}", "Why it matters:".yellow(), summary.why_it_matters);
        println!("{} {}\n", "Common mistake:".yellow(), summary.common_mistake);
    }
}

/// One parsed teach-me prompt line
///
/// The command word is matched case-insensitively; arguments keep the
/// exact text the user typed, so an SVG path is written verbatim.
#[derive(Debug, PartialEq, Eq)]
enum TeachCommand<'a> {
    Blank,
    Quit,
    More,
    Check,
    Svg(&'a str),
    Teach(usize),
    Invalid(&'static str),
}

fn parse_teach_command(line: &str) -> TeachCommand<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TeachCommand::Blank;
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    match word.to_lowercase().as_str() {
        "quit" | "exit" => TeachCommand::Quit,
        "more" => TeachCommand::More,
        "check" => TeachCommand::Check,
        "svg" => {
            if rest.is_empty() {
                TeachCommand::Invalid("usage: svg <path>")
            } else {
                TeachCommand::Svg(rest)
            }
        }
        "teach" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => TeachCommand::Teach(n),
            _ => TeachCommand::Invalid("usage: teach <finding number>"),
        },
        _ => TeachCommand::Invalid("commands: teach <n>, more, check, svg <path>, quit"),
    }
}

async fn teach_loop(
    backend: Arc<dyn MentorBackend>,
    config: &Config,
    panel: &AnalysisPanel,
) -> Result<()> {
    println!(
        "Teach-me prompt: {} to drill into a finding, {} when done.",
        "teach <n>".cyan(),
        "quit".cyan()
    );
    let mut rl = DefaultEditor::new().map_err(|e| MentorError::Config(e.to_string()))?;
    let mut overlay: Option<TeachingOverlay> = None;

    loop {
        let line = match rl.readline("teach >> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        };
        match parse_teach_command(&line) {
            TeachCommand::Blank => continue,
            TeachCommand::Quit => break,
            TeachCommand::Invalid(usage) => notify::warn(usage),
            TeachCommand::More => match overlay.as_mut() {
                Some(overlay) => {
                    if overlay.explanation_state() != ExplanationState::SummaryReady {
                        notify::warn("load a summary first with 'teach <n>'");
                        continue;
                    }
                    match overlay.show_more().await {
                        Ok(()) => {
                            if let Some(deeper) = overlay.deeper() {
                                println!("\n{}\n", deeper.deeper_explanation);
                                for example in &deeper.code_examples {
                                    println!("{}\n", example.dimmed());
                                }
                                if !deeper.related_concepts.is_empty() {
                                    println!("Related: {}\n", deeper.related_concepts.join(", "));
                                }
                            }
                            match overlay.diagram() {
                                Some(diagram) => println!(
                                    "Diagram received ({} bytes of SVG); save it with 'svg <path>'.",
                                    diagram.svg.len()
                                ),
                                None => notify::warn("diagram unavailable for this concept"),
                            }
                        }
                        Err(e) => notify::error(&e.to_string()),
                    }
                }
                None => notify::warn("no finding selected; use 'teach <n>'"),
            },
            TeachCommand::Check => match overlay.as_mut() {
                Some(overlay) => {
                    let question = match overlay.open_self_check() {
                        Ok(question) => question.to_string(),
                        Err(e) => {
                            notify::error(&e.to_string());
                            continue;
                        }
                    };
                    println!("\n{}\n", question.bold());
                    let answer = match rl.readline("your answer >> ") {
                        Ok(answer) => answer,
                        Err(_) => {
                            overlay.close_self_check();
                            continue;
                        }
                    };
                    match overlay.submit_answer(&answer).await {
                        Ok(verdict) => {
                            let headline = if verdict.understood {
                                "Got it!".green().bold()
                            } else {
                                "Not quite.".yellow().bold()
                            };
                            println!("\n{} {}", headline, verdict.feedback);
                            println!("{}\n", verdict.encouragement.dimmed());
                        }
                        Err(e) => notify::error(&e.to_string()),
                    }
                }
                None => notify::warn("no finding selected; use 'teach <n>'"),
            },
            TeachCommand::Svg(path) => match overlay.as_ref().and_then(|o| o.diagram()) {
                Some(diagram) => {
                    std::fs::write(path, &diagram.svg)?;
                    notify::info(&format!("diagram written to {}", path));
                }
                None => notify::warn("no diagram loaded; use 'more' first"),
            },
            TeachCommand::Teach(number) => {
                let teaching_input = match panel.teaching_input(number - 1) {
                    Ok(input) => input,
                    Err(e) => {
                        notify::error(&e.to_string());
                        continue;
                    }
                };
                match TeachingOverlay::open(
                    backend.clone(),
                    config.mentor_style(),
                    teaching_input,
                )
                .await
                {
                    Ok(opened) => {
                        print_overlay_summary(&opened);
                        println!(
                            "Commands: {} / {} / {}",
                            "more".cyan(),
                            "check".cyan(),
                            "quit".cyan()
                        );
                        overlay = Some(opened);
                    }
                    Err(e) => notify::error(&e.to_string()),
                }
            }
        }
    }
    Ok(())
}

/// Run the `analyze` command
pub async fn run(
    config: &Config,
    backend: Arc<dyn MentorBackend>,
    file: Option<&Path>,
    language: Option<&str>,
    teach: bool,
) -> Result<()> {
    let source = read_source(file)?;
    let language = resolve_language(file, language)?;

    let mut panel = AnalysisPanel::new(backend.clone(), language, config.skill_level());
    panel.set_source(source);
    if !panel.can_analyze() {
        return Err(MentorError::Validation("source is empty".to_string()).into());
    }

    let count = panel.analyze().await?;
    tracing::info!("Analysis returned {} findings", count);
    print_findings(panel.findings(), panel.overall_quality());

    if teach && !panel.findings().is_empty() {
        teach_loop(backend, config, &panel).await?;
    }
    Ok(())
}

/// Run the `image` command
pub async fn run_image(
    backend: Arc<dyn MentorBackend>,
    path: &Path,
    task: &str,
    context: Option<&str>,
) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let image_data = base64::engine::general_purpose::STANDARD.encode(bytes);
    let request = ImageAnalysisRequest {
        image_data,
        task_type: task.to_string(),
        additional_context: context.map(|c| c.to_string()),
    };
    let response = backend.analyze_image(&request).await?;
    println!("\n{}\n", response.analysis);
    Ok(())
}
