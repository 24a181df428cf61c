//! `memoria chat` — The interactive assistant screen.
//!
//! The screen owns one session for as long as it runs. It re-renders on
//! every session event and closes the session on the way out, so a reply
//! still in flight is dropped rather than printed after exit.

use memoria_assistant::{ChatSession, SubmitOutcome};
use memoria_config::AppConfig;
use memoria_core::event::SessionEvent;
use memoria_core::message::Sender;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::input::{self, LineCommand};
use crate::screen;

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = ChatSession::from_config(&config.assistant);
    let mut events = session.subscribe();
    let mut lines = input::spawn_stdin_reader();

    println!("{}", screen::banner());
    if let Some(greeting) = session.transcript().last() {
        screen::show_message(greeting);
    }
    print!("{}", screen::format_suggestions(&session.suggestions()));
    screen::prompt();

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(Ok(line)) => {
                    if handle_line(&session, &line) == Flow::Quit {
                        break;
                    }
                }
                Some(Err(e)) => {
                    screen::notice(format!("Keyboard input stopped: {e}"));
                    break;
                }
                None => break,
            },
            event = events.recv() => match event {
                Ok(event) => render_event(&session, &event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Screen fell behind on session events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    session.close();
    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_line(session: &ChatSession, line: &str) -> Flow {
    match input::parse_line(line) {
        LineCommand::Quit => return Flow::Quit,
        LineCommand::Select(index) => match session.select_suggestion(index) {
            Some(prompt) => screen::show_draft(&prompt),
            None => screen::notice("That suggestion isn't available."),
        },
        LineCommand::SendDraft => log_outcome(session.send_input()),
        LineCommand::Say(text) => {
            // A busy session keeps the draft for after the reply
            session.set_input(text);
            log_outcome(session.send_input());
        }
    }

    if !session.is_awaiting() {
        screen::prompt();
    }
    Flow::Continue
}

fn log_outcome(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Accepted(id) => debug!(message_id = %id, "Sent"),
        other => debug!(?other, "Submission ignored"),
    }
}

fn render_event(session: &ChatSession, event: &SessionEvent) {
    match event {
        SessionEvent::MessageAppended { message_id, sender, .. } => {
            // The user's own line is already on screen
            if *sender == Sender::Assistant {
                if let Some(message) = session.transcript().get(*message_id) {
                    screen::show_message(message);
                }
            }
        }
        SessionEvent::AwaitingChanged { awaiting: true, .. } => screen::show_thinking(),
        SessionEvent::AwaitingChanged { awaiting: false, .. } => {
            screen::clear_thinking();
            screen::prompt();
        }
        SessionEvent::ResponderFailed { error_message, .. } => {
            screen::notice(format!("The assistant had trouble replying: {error_message}"));
        }
        SessionEvent::Closed { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn selecting_then_enter_sends_prompt() {
        let session = ChatSession::from_config(&AppConfig::default().assistant);
        assert_eq!(handle_line(&session, "/2"), Flow::Continue);
        assert_eq!(session.input(), "Remind me about upcoming birthdays");
        assert_eq!(session.len(), 1);

        assert_eq!(handle_line(&session, ""), Flow::Continue);
        assert_eq!(session.len(), 2);
        assert!(session.is_awaiting());
        session.settled().await;
        assert_eq!(session.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_while_busy_keeps_the_text() {
        let session = ChatSession::from_config(&AppConfig::default().assistant);
        handle_line(&session, "hello");
        handle_line(&session, "follow-up");
        assert_eq!(session.len(), 2);
        assert_eq!(session.input(), "follow-up");

        session.settled().await;
        handle_line(&session, "");
        assert_eq!(session.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_word_ends_loop() {
        let session = ChatSession::from_config(&AppConfig::default().assistant);
        assert_eq!(handle_line(&session, "exit"), Flow::Quit);
        assert_eq!(session.len(), 1);
    }
}
