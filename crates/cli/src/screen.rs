//! Rendering for the terminal assistant screen.

use std::io::Write;

use memoria_assistant::THINKING_LABEL;
use memoria_core::message::{Message, Sender};

pub fn banner() -> String {
    [
        "",
        "  ╔══════════════════════════════════════════════╗",
        "  ║        Memoria — Chat with Your Assistant      ║",
        "  ╚══════════════════════════════════════════════╝",
        "",
        "  Type your message and press Enter.",
        "  Type 'exit' or Ctrl+C to quit.",
        "",
    ]
    .join("\n")
}

/// One message as it appears in the transcript, line breaks kept.
pub fn format_message(message: &Message) -> String {
    let label = match message.sender() {
        Sender::User => "You",
        Sender::Assistant => "Assistant",
    };
    let mut out = format!("  {label} · {}\n", message.display_time());
    for line in message.content().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn format_suggestions(prompts: &[String]) -> String {
    if prompts.is_empty() {
        return String::new();
    }
    let mut out = String::from("  Try asking:\n");
    for (i, prompt) in prompts.iter().enumerate() {
        out.push_str(&format!("    /{} {prompt}\n", i + 1));
    }
    out.push_str("  (type /N to fill in a suggestion, then Enter to send)\n");
    out
}

pub fn show_message(message: &Message) {
    println!();
    print!("{}", format_message(message));
    println!();
}

pub fn show_draft(draft: &str) {
    println!("  Draft > {draft}");
    println!("  (press Enter to send)");
}

pub fn show_thinking() {
    eprint!("  {THINKING_LABEL}");
}

pub fn clear_thinking() {
    let blank = " ".repeat(THINKING_LABEL.len() + 2);
    eprint!("\r{blank}\r");
}

/// A non-fatal problem worth telling the user about.
pub fn notice(text: impl std::fmt::Display) {
    eprintln!("  [Notice] {text}");
}

pub fn prompt() {
    print!("  You > ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::message::Transcript;

    #[test]
    fn message_lines_are_indented_verbatim() {
        let mut t = Transcript::with_greeting("Hi");
        let id = t.append(Sender::Assistant, "Here you go:\n\n• one\n• two");
        let text = format_message(t.get(id).unwrap());

        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("  Assistant · "));
        assert_eq!(lines[1], "    Here you go:");
        assert_eq!(lines[2], "    ");
        assert_eq!(lines[3], "    • one");
        assert_eq!(lines[4], "    • two");
    }

    #[test]
    fn user_messages_are_labelled() {
        let mut t = Transcript::with_greeting("Hi");
        let id = t.append(Sender::User, "hello");
        assert!(format_message(t.get(id).unwrap()).starts_with("  You · "));
    }

    #[test]
    fn suggestions_are_numbered_from_one() {
        let text = format_suggestions(&["a".to_string(), "b".to_string()]);
        assert!(text.contains("/1 a"));
        assert!(text.contains("/2 b"));
        assert!(format_suggestions(&[]).is_empty());
    }
}
