//! The chat session: transcript store plus single-flight submission pipeline.
//!
//! ```text
//!   Idle ──submit(non-blank)──▶ Awaiting ──delay elapsed──▶ Idle
//!                                  │
//!                                  └── submit ignored
//! ```
//!
//! The user message is appended synchronously by [`ChatSession::submit`]. The
//! reply is appended by a spawned task once the drawn delay has elapsed.
//! Closing or dropping the session cancels that task; nothing is appended
//! after teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use memoria_config::AssistantConfig;
use memoria_core::event::{EventBus, SessionEvent};
use memoria_core::message::{MessageId, Sender, SessionId, Transcript};
use memoria_core::random::RandomSource;
use memoria_core::responder::Responder;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::ResponseEngine;
use crate::latency::LatencyPolicy;
use crate::random::StdRandom;
use crate::suggestions::SuggestedPrompts;

/// Shown while a reply is pending.
pub const THINKING_LABEL: &str = "AI is thinking...";

/// Appended in place of a reply when the responder fails.
pub const FAILED_REPLY: &str =
    "Sorry, I couldn't come up with a reply just now. Could you try asking again?";

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was appended with this id
    Accepted(MessageId),
    /// Nothing but whitespace
    IgnoredEmpty,
    /// A reply is still pending
    IgnoredBusy,
    /// The session has been closed
    IgnoredClosed,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
    Closed,
}

struct PendingRequest {
    user_message_id: MessageId,
    cancel: CancellationToken,
}

struct SessionInner {
    transcript: Transcript,
    pending: Option<PendingRequest>,
    draft: String,
    closed: bool,
}

fn lock(inner: &Mutex<SessionInner>) -> MutexGuard<'_, SessionInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One assistant conversation, owned by the screen that shows it.
pub struct ChatSession {
    id: SessionId,
    inner: Arc<Mutex<SessionInner>>,
    responder: Arc<dyn Responder>,
    latency: LatencyPolicy,
    rng: Mutex<Box<dyn RandomSource>>,
    suggestions: SuggestedPrompts,
    events: Arc<EventBus>,
    shutdown: CancellationToken,
}

impl ChatSession {
    /// Start a session whose transcript holds only `greeting`.
    pub fn new(responder: Arc<dyn Responder>, greeting: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            inner: Arc::new(Mutex::new(SessionInner {
                transcript: Transcript::with_greeting(greeting),
                pending: None,
                draft: String::new(),
                closed: false,
            })),
            responder,
            latency: LatencyPolicy::default(),
            rng: Mutex::new(Box::new(StdRandom::new())),
            suggestions: SuggestedPrompts::default(),
            events: Arc::new(EventBus::default()),
            shutdown: CancellationToken::new(),
        }
    }

    /// A rule-engine session configured from `config`.
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(Arc::new(ResponseEngine::default()), config.greeting.clone())
            .with_latency(LatencyPolicy::from_config(config))
            .with_suggestions(SuggestedPrompts::from_config(config))
            .with_event_capacity(config.event_capacity)
    }

    pub fn with_latency(mut self, latency: LatencyPolicy) -> Self {
        self.latency = latency;
        self
    }

    /// Source used to draw reply delays.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn with_suggestions(mut self, suggestions: SuggestedPrompts) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.events = Arc::new(EventBus::new(capacity));
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Receive a [`SessionEvent`] after every append and state change.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SessionEvent>> {
        self.events.subscribe()
    }

    // ── Submission ──

    /// Submit `utterance`.
    ///
    /// Blank input, or input arriving while a reply is pending, is ignored
    /// and leaves the session untouched. Must be called from within a Tokio
    /// runtime.
    pub fn submit(&self, utterance: &str) -> SubmitOutcome {
        self.submit_locked(lock(&self.inner), utterance)
    }

    /// Submit the current input draft. The draft is cleared only if accepted.
    pub fn send_input(&self) -> SubmitOutcome {
        let state = lock(&self.inner);
        let draft = state.draft.clone();
        self.submit_locked(state, &draft)
    }

    fn submit_locked(&self, mut state: MutexGuard<'_, SessionInner>, utterance: &str) -> SubmitOutcome {
        if state.closed {
            return SubmitOutcome::IgnoredClosed;
        }

        let text = utterance.trim();
        if text.is_empty() {
            debug!(session_id = %self.id, "Ignoring blank submission");
            return SubmitOutcome::IgnoredEmpty;
        }

        if let Some(pending) = &state.pending {
            debug!(
                session_id = %self.id,
                pending = %pending.user_message_id,
                "Ignoring submission while a reply is pending"
            );
            return SubmitOutcome::IgnoredBusy;
        }

        let message_id = state.transcript.append(Sender::User, text);
        let position = state.transcript.len() - 1;
        state.draft.clear();

        let delay = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.latency.draw(&mut **rng)
        };
        let cancel = self.shutdown.child_token();
        state.pending = Some(PendingRequest {
            user_message_id: message_id,
            cancel: cancel.clone(),
        });
        drop(state);

        publish_appended(&self.events, &self.id, message_id, Sender::User, position);
        publish_awaiting(&self.events, &self.id, true);

        info!(
            session_id = %self.id,
            message_id = %message_id,
            delay_ms = delay.as_millis() as u64,
            "Utterance accepted, awaiting reply"
        );

        let job = ReplyJob {
            session_id: self.id.clone(),
            inner: Arc::clone(&self.inner),
            events: Arc::clone(&self.events),
            responder: Arc::clone(&self.responder),
            utterance: text.to_string(),
            delay,
            cancel,
        };
        tokio::spawn(job.run());

        SubmitOutcome::Accepted(message_id)
    }

    // ── Input draft ──

    pub fn input(&self) -> String {
        lock(&self.inner).draft.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        lock(&self.inner).draft = text.into();
    }

    /// Whether a send would currently be accepted.
    pub fn can_send(&self) -> bool {
        let state = lock(&self.inner);
        !state.closed && state.pending.is_none() && !state.draft.trim().is_empty()
    }

    /// Put a suggested prompt into the draft without sending it.
    ///
    /// Returns `false` if `prompt` is not offered right now.
    pub fn select_prompt(&self, prompt: &str) -> bool {
        let mut state = lock(&self.inner);
        if state.closed || !self.suggestions.is_visible(&state.transcript) {
            return false;
        }
        match self.suggestions.find(prompt) {
            Some(found) => {
                state.draft = found.to_string();
                true
            }
            None => false,
        }
    }

    /// [`select_prompt`](Self::select_prompt) by position in the list.
    pub fn select_suggestion(&self, index: usize) -> Option<String> {
        let prompt = self.suggestions.get(index)?.to_string();
        self.select_prompt(&prompt).then_some(prompt)
    }

    // ── Read access ──

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        lock(&self.inner).transcript.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).transcript.is_empty()
    }

    pub fn state(&self) -> SessionState {
        let state = lock(&self.inner);
        if state.closed {
            SessionState::Closed
        } else if state.pending.is_some() {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    pub fn is_awaiting(&self) -> bool {
        self.state() == SessionState::Awaiting
    }

    /// Id of the user message whose reply is pending.
    pub fn pending_message_id(&self) -> Option<MessageId> {
        lock(&self.inner).pending.as_ref().map(|p| p.user_message_id)
    }

    pub fn suggestions_visible(&self) -> bool {
        let state = lock(&self.inner);
        !state.closed && self.suggestions.is_visible(&state.transcript)
    }

    /// The suggested prompts to show, empty once the conversation started.
    pub fn suggestions(&self) -> Vec<String> {
        let state = lock(&self.inner);
        self.suggestions.visible(&state.transcript).to_vec()
    }

    /// Resolve once no reply is pending.
    pub async fn settled(&self) {
        let mut rx = self.events.subscribe();
        loop {
            if !self.is_awaiting() {
                return;
            }
            match rx.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    // ── Teardown ──

    /// Cancel any pending reply and stop accepting input.
    pub fn close(&self) {
        let mut state = lock(&self.inner);
        if state.closed {
            return;
        }
        state.closed = true;
        let cancelled = state.pending.take();
        drop(state);

        self.shutdown.cancel();
        if let Some(pending) = cancelled {
            debug!(
                session_id = %self.id,
                pending = %pending.user_message_id,
                "Cancelled pending reply"
            );
            publish_awaiting(&self.events, &self.id, false);
        }
        self.events.publish(SessionEvent::Closed {
            session_id: self.id.clone(),
            timestamp: Utc::now(),
        });
        info!(session_id = %self.id, "Chat session closed");
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// The deferred half of a submission.
struct ReplyJob {
    session_id: SessionId,
    inner: Arc<Mutex<SessionInner>>,
    events: Arc<EventBus>,
    responder: Arc<dyn Responder>,
    utterance: String,
    delay: Duration,
    cancel: CancellationToken,
}

impl ReplyJob {
    async fn run(self) {
        let reply = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            reply = async {
                tokio::time::sleep(self.delay).await;
                self.responder.respond(&self.utterance).await
            } => Some(reply),
        };

        let Some(reply) = reply else {
            debug!(session_id = %self.session_id, "Reply task cancelled before completion");
            return;
        };

        let (content, failure) = match reply {
            Ok(text) => (text, None),
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    responder = self.responder.name(),
                    error = %e,
                    "Responder failed, appending stand-in reply"
                );
                (FAILED_REPLY.to_string(), Some(e.to_string()))
            }
        };

        let mut state = lock(&self.inner);
        if self.cancel.is_cancelled() || state.closed {
            return;
        }
        let message_id = state.transcript.append(Sender::Assistant, content);
        let position = state.transcript.len() - 1;
        state.pending = None;
        drop(state);

        if let Some(error_message) = failure {
            self.events.publish(SessionEvent::ResponderFailed {
                session_id: self.session_id.clone(),
                error_message,
                timestamp: Utc::now(),
            });
        }
        publish_appended(&self.events, &self.session_id, message_id, Sender::Assistant, position);
        publish_awaiting(&self.events, &self.session_id, false);

        info!(
            session_id = %self.session_id,
            message_id = %message_id,
            "Assistant reply appended"
        );
    }
}

fn publish_appended(
    events: &EventBus,
    session_id: &SessionId,
    message_id: MessageId,
    sender: Sender,
    position: usize,
) {
    events.publish(SessionEvent::MessageAppended {
        session_id: session_id.clone(),
        message_id,
        sender,
        position,
        timestamp: Utc::now(),
    });
}

fn publish_awaiting(events: &EventBus, session_id: &SessionId, awaiting: bool) {
    events.publish(SessionEvent::AwaitingChanged {
        session_id: session_id.clone(),
        awaiting,
        timestamp: Utc::now(),
    });
}
