//! Learning path command handler
//!
//! Walks the user through the onboarding wizard, then runs a REPL over
//! the journey: browse the roadmap skill tree and weekly plan, study a
//! topic with the mentor, mark topics complete, and check the progress
//! dashboard. In the learning phase free text goes to the mentor;
//! everywhere else input is a roadmap command.

use crate::api::types::{SkillTreeNode, TopicStatus};
use crate::api::MentorBackend;
use crate::config::Config;
use crate::error::{MentorError, Result};
use crate::learning::{JourneyPhase, LearningJourney, OnboardingWizard, WizardStep};
use crate::notify;

use colored::Colorize;
use prettytable::{format, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

fn status_marker(status: TopicStatus) -> String {
    match status {
        TopicStatus::NotStarted => "[ ]".dimmed().to_string(),
        TopicStatus::InProgress => "[~]".yellow().to_string(),
        TopicStatus::Completed => "[x]".green().to_string(),
    }
}

fn print_tree(node: &SkillTreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{}{} {} {}",
        indent,
        status_marker(node.status),
        node.name.bold(),
        format!("({})", node.id).dimmed()
    );
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

fn print_plan(journey: &LearningJourney) {
    if journey.weekly_plan().is_empty() {
        println!("{}", "no weekly plan yet".dimmed());
        return;
    }
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Done".bold(),
        "Task".bold(),
        "Minutes".bold()
    ]);
    for task in journey.weekly_plan() {
        let done = if task.completed { "yes" } else { "" };
        table.add_row(prettytable::row![done, task.title, task.estimated_minutes]);
    }
    table.printstd();
}

fn print_dashboard(journey: &LearningJourney) {
    let progress = journey.progress();
    println!("{}", "Progress".bold().underline());
    println!(
        "Topics: {}/{} completed",
        progress.completed_topics, progress.total_topics
    );
    println!("Streak: {} days", progress.streak_days);
    if let Some(profile) = journey.profile() {
        println!(
            "Goal:   {} in {} months ({} h/week)",
            profile.target_role, profile.target_months, profile.hours_per_week
        );
    }
}

fn print_learn_help() {
    println!(
        r#"
Learning Path Commands
======================

ROADMAP:
  tree              - Show the skill tree; [x] done, [~] in progress
  plan              - Show the weekly plan
  dashboard         - Show progress counters
  start <topic-id>  - Start studying a topic with the mentor
  complete <id>     - Mark a topic complete

WHILE STUDYING:
  (free text)       - Ask the mentor about the topic
  /done             - Mark the current topic complete
  /back             - Return to the roadmap

SESSION:
  help              - Show this help message
  exit / quit       - Leave
"#
    );
}

/// Prompt outcome for one wizard field
enum Answer {
    Value(String),
    Back,
    Abort,
}

fn ask(rl: &mut DefaultEditor, prompt: &str) -> Answer {
    match rl.readline(prompt) {
        Ok(line) => {
            let trimmed = line.trim().to_string();
            if trimmed.eq_ignore_ascii_case("back") {
                Answer::Back
            } else {
                Answer::Value(trimmed)
            }
        }
        Err(_) => Answer::Abort,
    }
}

fn parse_or_keep(input: &str, current: u32) -> u32 {
    if input.is_empty() {
        current
    } else {
        input.parse().unwrap_or(current)
    }
}

/// Run the four-step onboarding wizard interactively
///
/// Returns `None` when the user aborts (Ctrl-C/D).
fn run_wizard(rl: &mut DefaultEditor) -> Result<Option<OnboardingWizard>> {
    let mut wizard = OnboardingWizard::new();
    println!(
        "{}\nAnswer a few questions to build your roadmap. Type 'back' to revisit a step.\n",
        "Let's set up your learning path.".bold()
    );

    loop {
        println!(
            "{} {}",
            format!("[step {}/4]", wizard.step().index() + 1).dimmed(),
            wizard.step().title().bold()
        );
        let went_back = match wizard.step() {
            WizardStep::Goal => {
                match ask(rl, "Target role (e.g. Backend Developer): ") {
                    Answer::Value(v) if !v.is_empty() => wizard.target_role = v,
                    Answer::Value(_) => {}
                    Answer::Back => {
                        notify::info("already at the first step");
                        continue;
                    }
                    Answer::Abort => return Ok(None),
                }
                match ask(rl, "Industry (optional): ") {
                    Answer::Value(v) => {
                        wizard.industry = v;
                        false
                    }
                    Answer::Back => true,
                    Answer::Abort => return Ok(None),
                }
            }
            WizardStep::Background => match ask(rl, "Your background (what have you tried?): ") {
                Answer::Value(v) => {
                    if !v.is_empty() {
                        wizard.background = v;
                    }
                    false
                }
                Answer::Back => true,
                Answer::Abort => return Ok(None),
            },
            WizardStep::Style => {
                match ask(rl, "Learning speed (relaxed/steady/intense) [steady]: ") {
                    Answer::Value(v) => {
                        if !v.is_empty() {
                            wizard.learning_speed = v;
                        }
                    }
                    Answer::Back => {
                        wizard.back();
                        continue;
                    }
                    Answer::Abort => return Ok(None),
                }
                match ask(rl, "Preferred style (hands-on/reading/video) [hands-on]: ") {
                    Answer::Value(v) => {
                        if !v.is_empty() {
                            wizard.preferred_style = v;
                        }
                        false
                    }
                    Answer::Back => true,
                    Answer::Abort => return Ok(None),
                }
            }
            WizardStep::Commitment => {
                match ask(rl, "Hours per week [5]: ") {
                    Answer::Value(v) => wizard.hours_per_week = parse_or_keep(&v, 5),
                    Answer::Back => {
                        wizard.back();
                        continue;
                    }
                    Answer::Abort => return Ok(None),
                }
                match ask(rl, "Target months [6]: ") {
                    Answer::Value(v) => {
                        wizard.target_months = parse_or_keep(&v, 6);
                        false
                    }
                    Answer::Back => true,
                    Answer::Abort => return Ok(None),
                }
            }
        };

        if went_back {
            wizard.back();
            continue;
        }
        match wizard.advance() {
            Ok(true) => {}
            Ok(false) => return Ok(Some(wizard)),
            Err(e) => notify::error(&e.to_string()),
        }
    }
}

async fn handle_roadmap_line(journey: &mut LearningJourney, input: &str) -> Result<()> {
    let (command, rest) = match input.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (input, ""),
    };
    match command {
        "help" => print_learn_help(),
        "tree" => match journey.skill_tree() {
            Some(root) => print_tree(root, 0),
            None => println!("{}", "no skill tree".dimmed()),
        },
        "plan" => print_plan(journey),
        "dashboard" => {
            journey.open_dashboard()?;
            print_dashboard(journey);
            journey.back_to_roadmap()?;
        }
        "start" => {
            if rest.is_empty() {
                return Err(MentorError::Validation("usage: start <topic-id>".to_string()).into());
            }
            journey.start_topic(rest)?;
            if let Some(message) = journey.mentor_log().messages().first() {
                println!("\n{}\n", message.content.green());
            }
        }
        "complete" => {
            if rest.is_empty() {
                return Err(MentorError::Validation("usage: complete <topic-id>".to_string()).into());
            }
            let progress = journey.complete_topic(rest).await?;
            println!(
                "{} {}/{} topics done",
                "Topic completed!".green().bold(),
                progress.completed_topics,
                progress.total_topics
            );
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

async fn handle_learning_line(journey: &mut LearningJourney, input: &str) -> Result<bool> {
    match input {
        "/back" => {
            journey.back_to_roadmap()?;
            return Ok(true);
        }
        "/done" => {
            let topic = journey
                .current_topic()
                .map(|t| t.to_string())
                .ok_or_else(|| MentorError::InvalidState("no topic in progress".to_string()))?;
            let progress = journey.complete_topic(&topic).await?;
            println!(
                "{} {}/{} topics done",
                "Topic completed!".green().bold(),
                progress.completed_topics,
                progress.total_topics
            );
            return Ok(true);
        }
        _ => {}
    }
    let reply = journey.mentor_say(input).await?;
    println!("\n{}\n", reply);
    if let Some(quiz) = journey.last_quiz() {
        println!("{} {}\n", "Quick check:".yellow().bold(), quiz.question);
    }
    Ok(false)
}

/// Run the `learn` command
pub async fn run(
    _config: &Config,
    backend: Arc<dyn MentorBackend>,
    user: Option<String>,
) -> Result<()> {
    let user_id = user.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut journey = LearningJourney::new(backend, user_id);
    let mut rl = DefaultEditor::new().map_err(|e| MentorError::Config(e.to_string()))?;

    let Some(wizard) = run_wizard(&mut rl)? else {
        println!("Onboarding cancelled.");
        return Ok(());
    };
    let profile = wizard.finish()?;
    journey.complete_onboarding(profile).await?;

    println!("\n{}", "Your roadmap is ready!".green().bold());
    if let Some(root) = journey.skill_tree() {
        print_tree(root, 0);
    }
    println!("\nType 'help' for commands, 'exit' to leave.\n");

    loop {
        let prompt = match journey.phase() {
            JourneyPhase::Learning => format!(
                "{} >> ",
                journey.current_topic().unwrap_or("topic").yellow()
            ),
            _ => "learn >> ".to_string(),
        };
        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);
                if input == "exit" || input == "quit" {
                    break;
                }
                let result = match journey.phase() {
                    JourneyPhase::Learning => {
                        handle_learning_line(&mut journey, input).await.map(|_| ())
                    }
                    _ => handle_roadmap_line(&mut journey, input).await,
                };
                if let Err(e) = result {
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
    print_dashboard(&journey);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{LearningProfile, LearningProgress, OnboardResponse};
    use crate::test_utils::FakeBackend;

    fn profile() -> LearningProfile {
        LearningProfile {
            target_role: "Backend Developer".to_string(),
            industry: String::new(),
            background: "beginner".to_string(),
            hours_per_week: 5,
            learning_speed: "steady".to_string(),
            preferred_style: "hands-on".to_string(),
            target_months: 6,
        }
    }

    async fn journey_with_topic(fake: Arc<FakeBackend>) -> LearningJourney {
        fake.script_onboard(OnboardResponse {
            profile: profile(),
            skill_tree: SkillTreeNode {
                id: "root".to_string(),
                name: "Path".to_string(),
                status: TopicStatus::NotStarted,
                children: vec![SkillTreeNode {
                    id: "sql".to_string(),
                    name: "SQL".to_string(),
                    status: TopicStatus::NotStarted,
                    children: vec![],
                }],
            },
            weekly_plan: vec![],
            progress: LearningProgress::default(),
        });
        let mut journey = LearningJourney::new(fake, "user-1");
        journey.complete_onboarding(profile()).await.unwrap();
        journey
    }

    #[tokio::test]
    async fn test_roadmap_start_moves_to_learning() {
        let fake = Arc::new(FakeBackend::new());
        let mut journey = journey_with_topic(fake).await;
        handle_roadmap_line(&mut journey, "start sql").await.unwrap();
        assert_eq!(journey.phase(), JourneyPhase::Learning);
    }

    #[tokio::test]
    async fn test_learning_free_text_goes_to_mentor() {
        let fake = Arc::new(FakeBackend::new());
        let mut journey = journey_with_topic(fake.clone()).await;
        handle_roadmap_line(&mut journey, "start sql").await.unwrap();
        let left = handle_learning_line(&mut journey, "what is a join?")
            .await
            .unwrap();
        assert!(!left);
        assert_eq!(fake.call_count("mentor_chat"), 1);
    }

    #[tokio::test]
    async fn test_learning_back_returns_to_roadmap() {
        let fake = Arc::new(FakeBackend::new());
        let mut journey = journey_with_topic(fake.clone()).await;
        handle_roadmap_line(&mut journey, "start sql").await.unwrap();
        let left = handle_learning_line(&mut journey, "/back").await.unwrap();
        assert!(left);
        assert_eq!(journey.phase(), JourneyPhase::Roadmap);
        assert_eq!(fake.call_count("mentor_chat"), 0);
    }

    #[tokio::test]
    async fn test_learning_done_completes_current_topic() {
        let fake = Arc::new(FakeBackend::new());
        let mut journey = journey_with_topic(fake.clone()).await;
        handle_roadmap_line(&mut journey, "start sql").await.unwrap();
        let left = handle_learning_line(&mut journey, "/done").await.unwrap();
        assert!(left);
        assert_eq!(fake.call_count("complete_topic"), 1);
        assert_eq!(journey.phase(), JourneyPhase::Roadmap);
    }

    #[tokio::test]
    async fn test_roadmap_unknown_command() {
        let fake = Arc::new(FakeBackend::new());
        let mut journey = journey_with_topic(fake).await;
        assert!(handle_roadmap_line(&mut journey, "frobnicate").await.is_err());
    }

    #[test]
    fn test_parse_or_keep() {
        assert_eq!(parse_or_keep("", 5), 5);
        assert_eq!(parse_or_keep("12", 5), 12);
        assert_eq!(parse_or_keep("twelve", 5), 5);
    }
}
