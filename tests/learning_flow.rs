//! HTTP contract tests for the learning path
//!
//! Onboarding, topic mentoring, and topic completion against a wiremock
//! backend, pinning the learning endpoints' request and response shapes.

use serde_json::json;
use std::sync::Arc;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codementor::api::types::{LearningProfile, TopicStatus};
use codementor::api::{HttpBackend, MentorBackend};
use codementor::config::BackendConfig;
use codementor::learning::{find_node, JourneyPhase, LearningJourney};

fn backend_for(server: &MockServer) -> Arc<dyn MentorBackend> {
    let config = BackendConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    Arc::new(HttpBackend::new(&config).unwrap())
}

fn wizard_profile() -> LearningProfile {
    LearningProfile {
        target_role: "Data Engineer".to_string(),
        industry: "logistics".to_string(),
        background: "complete beginner".to_string(),
        hours_per_week: 8,
        learning_speed: "steady".to_string(),
        preferred_style: "hands-on".to_string(),
        target_months: 9,
    }
}

fn onboard_body() -> serde_json::Value {
    json!({
        "profile": {
            "target_role": "Data Engineer",
            "industry": "logistics",
            "background": "complete beginner",
            "hours_per_week": 8,
            "learning_speed": "steady",
            "preferred_style": "hands-on",
            "target_months": 9
        },
        "skill_tree": {
            "id": "root",
            "name": "Data Engineer",
            "status": "not_started",
            "children": [
                {"id": "sql-basics", "name": "SQL Basics", "status": "not_started", "children": []},
                {"id": "pipelines", "name": "Pipelines", "status": "not_started", "children": []}
            ]
        },
        "weekly_plan": [
            {"id": "task-1", "title": "SELECT and WHERE drills", "estimated_minutes": 45}
        ],
        "progress": {"completed_topics": 0, "total_topics": 3, "streak_days": 1}
    })
}

async fn mount_onboard(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/learning/onboard"))
        .and(body_partial_json(json!({
            "target_role": "Data Engineer",
            "hours_per_week": 8
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(onboard_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_onboarding_round_trip_fills_roadmap() {
    let server = MockServer::start().await;
    mount_onboard(&server).await;

    let mut journey = LearningJourney::new(backend_for(&server), "user-7");
    journey.complete_onboarding(wizard_profile()).await.unwrap();

    assert_eq!(journey.phase(), JourneyPhase::Roadmap);
    assert_eq!(journey.progress().total_topics, 3);
    assert_eq!(journey.weekly_plan().len(), 1);
    let tree = journey.skill_tree().unwrap();
    assert!(find_node(tree, "pipelines").is_some());
}

#[tokio::test]
async fn test_mentor_chat_sends_topic_and_history() {
    let server = MockServer::start().await;
    mount_onboard(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/learning/mentor"))
        .and(body_partial_json(json!({
            "message": "what is a primary key?",
            "topic": "sql-basics",
            "user_profile": { "target_role": "Data Engineer" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "A primary key uniquely identifies a row.",
            "quiz": {
                "question": "Can a table have two primary keys?",
                "concept": "keys"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut journey = LearningJourney::new(backend_for(&server), "user-7");
    journey.complete_onboarding(wizard_profile()).await.unwrap();
    journey.start_topic("sql-basics").unwrap();

    let reply = journey.mentor_say("what is a primary key?").await.unwrap();
    assert!(reply.contains("uniquely identifies"));
    assert_eq!(journey.last_quiz().unwrap().concept, "keys");
    // welcome + user turn + mentor turn
    assert_eq!(journey.mentor_log().len(), 3);
}

#[tokio::test]
async fn test_complete_topic_posts_ids_and_merges_progress() {
    let server = MockServer::start().await;
    mount_onboard(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/learning/complete-topic"))
        .and(body_partial_json(json!({
            "topic_id": "sql-basics",
            "user_id": "user-7"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "progress": {"completed_topics": 1, "total_topics": 3, "streak_days": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut journey = LearningJourney::new(backend_for(&server), "user-7");
    journey.complete_onboarding(wizard_profile()).await.unwrap();
    journey.start_topic("sql-basics").unwrap();

    let progress = journey.complete_topic("sql-basics").await.unwrap();
    assert_eq!(progress.completed_topics, 1);
    assert_eq!(journey.phase(), JourneyPhase::Roadmap);

    let tree = journey.skill_tree().unwrap();
    assert_eq!(
        find_node(tree, "sql-basics").unwrap().status,
        TopicStatus::Completed
    );
    assert_eq!(
        find_node(tree, "pipelines").unwrap().status,
        TopicStatus::NotStarted
    );
}

#[tokio::test]
async fn test_backend_error_during_onboarding_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/learning/onboard"))
        .respond_with(ResponseTemplate::new(500).set_body_string("planner overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let mut journey = LearningJourney::new(backend_for(&server), "user-7");
    let err = journey
        .complete_onboarding(wizard_profile())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"), "got: {}", err);
    assert_eq!(journey.phase(), JourneyPhase::Onboarding);

    server.reset().await;
    mount_onboard(&server).await;
    journey.complete_onboarding(wizard_profile()).await.unwrap();
    assert_eq!(journey.phase(), JourneyPhase::Roadmap);
}
