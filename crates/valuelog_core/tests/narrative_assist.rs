use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mockito::Matcher;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use valuelog_core::{
    AssistError, AssistState, GeminiClient, Language, NarrativeAssist, Starr, TagSuggestions,
    TextGenerator,
};

/// Replays canned replies and records every prompt it receives.
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_json(&self, prompt: &str, _schema: &serde_json::Value) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted reply left")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn starr_json() -> String {
    json!({
        "situation": "Weekend robotics camp.",
        "task": "Build a line-following robot.",
        "action": "Wired the sensors and tuned the motors.",
        "result": "The robot finished the track.",
        "reflection": "Testing early saves time."
    })
    .to_string()
}

fn sample_starr() -> Starr {
    Starr {
        situation: "Weekend robotics camp.".to_string(),
        task: "Build a line-following robot.".to_string(),
        action: "Wired the sensors and tuned the motors.".to_string(),
        result: "The robot finished the track.".to_string(),
        reflection: "Testing early saves time.".to_string(),
    }
}

#[tokio::test]
async fn refine_decodes_complete_object() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![Ok(starr_json())]));

    let starr = assist
        .refine_to_starr("robot camp, line follower, worked", Language::Ja)
        .await;
    assert_eq!(starr, sample_starr());

    let prompts = assist.generator().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("日本語"));
    assert!(prompts[0].contains("robot camp, line follower, worked"));
}

#[tokio::test]
async fn refine_absorbs_transport_errors() {
    let assist =
        NarrativeAssist::new(ScriptedGenerator::new(vec![Err(anyhow!("connection reset"))]));

    assert_eq!(
        assist.refine_to_starr("notes", Language::En).await,
        Starr::default()
    );
}

#[tokio::test]
async fn refine_absorbs_malformed_and_partial_output() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![
        Ok("not json at all".to_string()),
        Ok(json!({ "situation": "only one field" }).to_string()),
    ]));

    assert!(assist.refine_to_starr("notes", Language::En).await.is_blank());
    assert!(assist.refine_to_starr("notes", Language::En).await.is_blank());
}

#[tokio::test]
async fn try_variants_report_failure_kind() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![
        Err(anyhow!("timeout")),
        Ok("[]".to_string()),
    ]));

    assert!(matches!(
        assist.try_refine_to_starr("notes", Language::En).await,
        Err(AssistError::Transport(_))
    ));
    assert!(matches!(
        assist.try_suggest_tags(&sample_starr()).await,
        Err(AssistError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn suggest_tags_passes_through_service_choices() {
    let reply = json!({
        "activityTags": ["Science", "Robotics"],
        "competencyTags": ["Problem Solving"]
    })
    .to_string();
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![Ok(reply)]));

    let suggestions = assist.suggest_tags(&sample_starr()).await;
    assert_eq!(
        suggestions,
        TagSuggestions {
            activity_tags: vec!["Science".to_string(), "Robotics".to_string()],
            competency_tags: vec!["Problem Solving".to_string()],
        }
    );

    let prompt = &assist.generator().prompts()[0];
    assert!(prompt.contains("Situation: Weekend robotics camp."));
    assert!(prompt.contains("Communication"));
}

#[tokio::test]
async fn suggest_tags_absorbs_missing_lists() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![
        Ok(json!({ "activityTags": ["Art"] }).to_string()),
        Err(anyhow!("HTTP 500")),
    ]));

    assert!(assist.suggest_tags(&sample_starr()).await.is_empty());
    assert!(assist.suggest_tags(&sample_starr()).await.is_empty());
}

#[tokio::test]
async fn assist_notes_skips_service_for_blank_notes() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(Vec::new()));

    assert!(assist.assist_notes("  \n ", Language::En).await.is_none());
    assert!(assist.generator().prompts().is_empty());
}

#[tokio::test]
async fn assist_notes_refines_then_suggests() {
    let tags = json!({ "activityTags": ["Science"], "competencyTags": ["Grit"] }).to_string();
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![Ok(starr_json()), Ok(tags)]));

    let draft = assist
        .assist_notes("robot camp", Language::En)
        .await
        .expect("notes are not blank");
    assert_eq!(draft.starr, sample_starr());
    assert_eq!(draft.suggestions.competency_tags, vec!["Grit".to_string()]);
    assert_eq!(assist.generator().prompts().len(), 2);
}

#[tokio::test]
async fn assist_state_tracks_one_request() {
    let assist = NarrativeAssist::new(ScriptedGenerator::new(vec![Err(anyhow!("offline"))]));
    let mut state: AssistState<Starr> = AssistState::default();

    assert!(state.begin());
    let result = assist.try_refine_to_starr("notes", Language::En).await;
    assert!(state.settle(result));
    assert!(matches!(&state, AssistState::Failed(message) if message.contains("offline")));
}

fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn gemini_client_posts_schema_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex("^/models/test-model:generateContent".to_string()))
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(&starr_json()))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key")
        .unwrap()
        .with_base_url(server.url())
        .with_model("test-model");
    let assist = NarrativeAssist::new(client);

    let starr = assist.refine_to_starr("robot camp", Language::Es).await;
    assert_eq!(starr, sample_starr());
    mock.assert_async().await;
}

#[tokio::test]
async fn gemini_http_errors_become_empty_values() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex("^/models/test-model:generateContent".to_string()))
        .with_status(503)
        .with_body("{\"error\":{\"message\":\"overloaded\"}}")
        .expect(2)
        .create_async()
        .await;

    let client = GeminiClient::new("test-key")
        .unwrap()
        .with_base_url(server.url())
        .with_model("test-model");
    let assist = NarrativeAssist::new(client);

    assert!(matches!(
        assist.try_suggest_tags(&sample_starr()).await,
        Err(AssistError::Transport(_))
    ));
    assert!(assist.suggest_tags(&sample_starr()).await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn gemini_transport_errors_do_not_reveal_api_key() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new("secret-key-123")
        .unwrap()
        .with_base_url(format!("http://{addr}/v1beta"))
        .with_model("test-model");
    let assist = NarrativeAssist::new(client);

    match assist.try_refine_to_starr("robot camp", Language::En).await {
        Err(err @ AssistError::Transport(_)) => {
            let text = format!("{err} {err:?}");
            assert!(!text.contains("secret-key-123"), "key leaked: {text}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
