//! `memoria ask` — One question, one reply.

use memoria_assistant::rules::{self, RULES};
use memoria_assistant::{ChatSession, SubmitOutcome};
use memoria_config::AppConfig;

use crate::screen;

pub async fn run(config: AppConfig, text: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = ChatSession::from_config(&config.assistant);

    match session.submit(&text) {
        SubmitOutcome::Accepted(_) => {}
        SubmitOutcome::IgnoredEmpty => return Err("Nothing to ask — the message is empty.".into()),
        other => return Err(format!("Message was not accepted: {other:?}").into()),
    }

    if !json {
        screen::show_thinking();
    }
    session.settled().await;
    if !json {
        screen::clear_thinking();
    }

    let transcript = session.transcript();

    if json {
        let intent = rules::first_match(RULES, text.trim()).map(|rule| rule.intent);
        let out = serde_json::json!({
            "session_id": session.id(),
            "intent": intent,
            "transcript": transcript,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if let Some(reply) = transcript.last() {
        println!("{}", reply.content());
    }

    Ok(())
}
