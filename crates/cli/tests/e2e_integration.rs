//! End-to-end tests for the Memoria assistant.
//!
//! These drive whole chat sessions from submission to rendered transcript,
//! on Tokio's paused clock so the simulated latency costs nothing.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use memoria_assistant::templates::FALLBACK_RESPONSES;
use memoria_assistant::{
    ChatSession, LatencyPolicy, ResponseEngine, SessionState, StdRandom, SubmitOutcome,
};
use memoria_config::AppConfig;
use memoria_core::error::ResponderError;
use memoria_core::event::SessionEvent;
use memoria_core::message::Sender;
use memoria_core::responder::Responder;

// ── Helpers ──────────────────────────────────────────────────────────────

fn default_session() -> ChatSession {
    let config = AppConfig::default();
    ChatSession::new(
        Arc::new(ResponseEngine::new(StdRandom::seeded(2024))),
        config.assistant.greeting.clone(),
    )
    .with_random(StdRandom::seeded(7))
}

async fn ask(session: &ChatSession, text: &str) -> String {
    let outcome = session.submit(text);
    assert!(outcome.is_accepted(), "'{text}' was not accepted: {outcome:?}");
    session.settled().await;
    session
        .transcript()
        .last()
        .map(|m| m.content().to_string())
        .unwrap_or_default()
}

/// Stand-in for a remote model: counts calls and takes a while.
struct CountingBackend {
    calls: AtomicUsize,
    work: Duration,
}

#[async_trait::async_trait]
impl Responder for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    async fn respond(&self, utterance: &str) -> Result<String, ResponderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.work).await;
        Ok(format!("remote reply to: {utterance}"))
    }
}

// ── Conversations ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_suggested_prompt_conversation() {
    let session = default_session();
    assert_eq!(session.len(), 1);
    assert!(session.suggestions_visible());
    assert!(session
        .transcript()
        .last()
        .unwrap()
        .content()
        .starts_with("Hello! I'm your personal AI assistant."));

    assert!(session.select_prompt("What should I do this weekend?"));
    assert_eq!(session.len(), 1, "selecting a prompt must not send it");
    assert!(session.send_input().is_accepted());
    session.settled().await;

    let reply = session.transcript().last().unwrap().content().to_string();
    assert!(reply.starts_with(
        "Based on your interests and past activities, here are some suggestions for this weekend:"
    ));
    assert_eq!(reply.matches('•').count(), 4);
    assert_eq!(session.len(), 3);
    assert!(!session.suggestions_visible());

    let birthdays = ask(&session, "Remind me about upcoming birthdays").await;
    assert!(birthdays.contains("Mom's birthday is in 8 days"));
    assert!(birthdays.contains("Sarah's birthday is next month"));

    let quote = ask(&session, "Give me a motivational quote").await;
    assert!(quote.contains("it's about what you inspire others to do."));

    let fallback = ask(&session, "asdf random text").await;
    assert!(FALLBACK_RESPONSES.contains(&fallback.as_str()));

    assert_eq!(session.len(), 9);
    assert!(!session.suggestions_visible());
}

#[tokio::test(start_paused = true)]
async fn e2e_priority_resolves_overlapping_keywords() {
    let session = default_session();
    let reply = ask(&session, "Can you help me plan a surprise for the weekend birthday").await;
    assert!(reply.starts_with("Based on your interests and past activities"));
    assert!(!reply.contains("upcoming birthdays"));
    assert!(!reply.contains("I'd love to help you plan a surprise"));
}

#[tokio::test(start_paused = true)]
async fn e2e_fallback_varies_across_exchanges() {
    let mut seen = std::collections::HashSet::new();
    let session = ChatSession::new(Arc::new(ResponseEngine::default()), "Hi")
        .with_latency(LatencyPolicy::immediate());
    for _ in 0..60 {
        seen.insert(ask(&session, "nothing in particular").await);
    }
    assert!(seen.len() > 1);
    assert!(seen.iter().all(|r| FALLBACK_RESPONSES.contains(&r.as_str())));
}

// ── Single-flight and ordering ───────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_burst_of_submissions_yields_one_exchange() {
    let session = default_session();
    let mut rx = session.subscribe();

    let outcomes: Vec<_> = (0..10).map(|i| session.submit(&format!("msg {i}"))).collect();
    assert!(outcomes[0].is_accepted());
    assert!(outcomes[1..].iter().all(|o| *o == SubmitOutcome::IgnoredBusy));

    session.settled().await;
    assert_eq!(session.len(), 3);

    let mut appended = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::MessageAppended { sender, position, .. } = event.as_ref() {
            appended.push((*sender, *position));
        }
    }
    assert_eq!(appended, vec![(Sender::User, 1), (Sender::Assistant, 2)]);
}

#[tokio::test(start_paused = true)]
async fn e2e_transcript_alternates_over_many_exchanges() {
    let session = default_session();
    for i in 0..12 {
        let start = tokio::time::Instant::now();
        ask(&session, &format!("tell me something {i}")).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed <= Duration::from_millis(3000));
    }

    let t = session.transcript();
    assert_eq!(t.len(), 25);
    for (i, message) in t.iter().enumerate() {
        let expected = if i % 2 == 1 { Sender::User } else { Sender::Assistant };
        assert_eq!(message.sender(), expected, "position {i}");
    }
    let ids: Vec<_> = t.iter().map(|m| m.id()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

// ── Pluggable backend ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_remote_backend_keeps_single_flight() {
    let backend = Arc::new(CountingBackend {
        calls: AtomicUsize::new(0),
        work: Duration::from_millis(500),
    });
    let session = ChatSession::new(backend.clone(), "Hi").with_random(StdRandom::seeded(1));

    assert!(session.submit("first").is_accepted());
    // Past the shortest delay, but the backend needs another 500ms at least
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(session.submit("second"), SubmitOutcome::IgnoredBusy);

    session.settled().await;
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        session.transcript().last().unwrap().content(),
        "remote reply to: first"
    );
}

// ── Teardown ─────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_closed_session_never_appends() {
    let backend = Arc::new(CountingBackend {
        calls: AtomicUsize::new(0),
        work: Duration::ZERO,
    });
    let session = ChatSession::new(backend.clone(), "Hi");
    assert!(session.submit("hello").is_accepted());
    session.close();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.len(), 2);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

// ── Configuration ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_config_file_drives_session() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[assistant]
latency_min_ms = 200
latency_max_ms = 400
greeting = "Good evening."
suggested_prompts = ["What memories did I create last month?"]
"#
    )
    .unwrap();

    let config = AppConfig::load_from(file.path()).unwrap();
    let session = ChatSession::from_config(&config.assistant);
    assert_eq!(session.transcript().last().unwrap().content(), "Good evening.");
    assert_eq!(session.select_suggestion(0).as_deref(), Some("What memories did I create last month?"));

    let start = tokio::time::Instant::now();
    assert!(session.send_input().is_accepted());
    session.settled().await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200) && elapsed <= Duration::from_millis(400));
    assert!(session
        .transcript()
        .last()
        .unwrap()
        .content()
        .contains("you created 12 memories"));
}

#[tokio::test(start_paused = true)]
async fn e2e_transcript_exports_as_json() {
    let session = default_session();
    ask(&session, "How can I be more organized?").await;

    let json = serde_json::to_value(session.transcript()).unwrap();
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["sender"], "user");
    assert_eq!(messages[1]["content"], "How can I be more organized?");
    assert_eq!(messages[2]["sender"], "assistant");
    assert!(messages[2]["content"].as_str().unwrap().contains("\n• "));
}
