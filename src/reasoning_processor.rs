//! Reasoning Processor Module
//!
//! Coalesces streamed reasoning deltas into rate-limited UI messages.
//!
//! Untitled reasoning streams live, batched to at most one `reasoning`
//! message per flush interval. Titled reasoning (leading `**Title**`
//! marker, see `title_parser`) is never streamed; `complete` surfaces it
//! as one tool-call / tool-call-result pair. Completion takes the final
//! text as the source of truth and never re-emits content that already
//! streamed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::StreamConfig;
use crate::events::{UiMessage, THINKING_TOOL_NAME};
use crate::title_parser::{self, TitleDetection};

/// Callback invoked with each emitted message
pub type EmitCallback = Arc<dyn Fn(UiMessage) + Send + Sync>;

/// Mutable session state, shared with the deferred-flush task
struct SessionState {
    /// Full reasoning text reconstructed from deltas
    accumulated: String,
    /// Bytes of `accumulated` already delivered as reasoning messages
    emitted_len: usize,
    /// Resolved once, then fixed for the session
    detection: TitleDetection,
    /// Timestamp of the last flush; `None` means the first flush is due
    last_flush: Option<Instant>,
    /// The single outstanding deferred flush, if any
    flush_timer: Option<JoinHandle<()>>,
    /// Bumped on every cancel; a stale timer that raced past `abort`
    /// sees the mismatch and returns without emitting
    timer_epoch: u64,
    completed: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            accumulated: String::new(),
            emitted_len: 0,
            detection: TitleDetection::Pending,
            last_flush: None,
            flush_timer: None,
            timer_epoch: 0,
            completed: false,
        }
    }

    fn cancel_timer(&mut self) {
        self.timer_epoch += 1;
        if let Some(handle) = self.flush_timer.take() {
            handle.abort();
        }
    }

    /// Take the unflushed suffix as a reasoning message, if any
    fn take_unflushed(&mut self) -> Option<UiMessage> {
        if self.emitted_len >= self.accumulated.len() {
            return None;
        }
        let message = self.accumulated[self.emitted_len..].to_string();
        self.emitted_len = self.accumulated.len();
        self.last_flush = Some(Instant::now());
        tracing::debug!(bytes = message.len(), "flushing reasoning chunk");
        Some(UiMessage::Reasoning { message })
    }
}

/// Streaming reasoning coalescer for one model turn.
///
/// Feed fragments with [`process_delta`](Self::process_delta) and finish
/// with exactly one [`complete`](Self::complete). Must live on a tokio
/// runtime: the deferred flush is a spawned task on the same runtime.
pub struct ReasoningProcessor {
    state: Arc<Mutex<SessionState>>,
    emit: EmitCallback,
    flush_interval: Duration,
}

impl ReasoningProcessor {
    pub fn new(emit: EmitCallback, config: &StreamConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            emit,
            flush_interval: Duration::from_millis(config.flush_interval_ms),
        }
    }

    /// Feed one streamed fragment of reasoning text.
    ///
    /// Empty fragments are ignored. While classification is pending, and
    /// for titled sessions, deltas buffer silently. Untitled sessions
    /// flush immediately when the interval has elapsed since the last
    /// flush, otherwise a single deferred flush is armed.
    pub fn process_delta(&self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }

        let message = {
            let mut state = self.state.lock().unwrap();
            if state.completed {
                tracing::debug!("delta after completion ignored");
                return;
            }
            state.accumulated.push_str(fragment);

            if state.detection == TitleDetection::Pending {
                state.detection = title_parser::detect_title(&state.accumulated);
            }
            match state.detection {
                TitleDetection::Pending | TitleDetection::Titled => return,
                TitleDetection::Untitled => {}
            }

            let now = Instant::now();
            match state.last_flush {
                Some(last) if now.duration_since(last) < self.flush_interval => {
                    if state.flush_timer.is_none() {
                        self.schedule_flush(&mut state, last + self.flush_interval);
                    }
                    None
                }
                _ => {
                    state.cancel_timer();
                    state.take_unflushed()
                }
            }
        };

        // Emit outside the lock so a re-entrant callback cannot deadlock
        if let Some(message) = message {
            (self.emit)(message);
        }
    }

    /// Arm the single deferred flush. Callers hold the lock and have
    /// checked that no timer is outstanding.
    fn schedule_flush(&self, state: &mut SessionState, deadline: Instant) {
        let epoch = state.timer_epoch;
        let shared = Arc::clone(&self.state);
        let emit = Arc::clone(&self.emit);
        tracing::debug!("deferring reasoning flush");
        state.flush_timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let message = {
                let mut state = shared.lock().unwrap();
                if state.completed || state.timer_epoch != epoch {
                    return;
                }
                state.flush_timer = None;
                state.take_unflushed()
            };
            if let Some(message) = message {
                emit(message);
            }
        }));
    }

    /// Deliver the authoritative final text and terminate the session.
    ///
    /// Cancels any pending deferred flush before emitting, so nothing
    /// fires after this returns. A second call is ignored.
    pub fn complete(&self, final_text: &str) {
        let messages = {
            let mut state = self.state.lock().unwrap();
            if state.completed {
                tracing::debug!("duplicate completion ignored");
                return;
            }
            state.completed = true;
            state.cancel_timer();

            if state.detection == TitleDetection::Pending {
                state.detection = title_parser::resolve_title(final_text);
            }

            match state.detection {
                TitleDetection::Titled => {
                    let (title, body) = title_parser::split_title(final_text);
                    let tool_call_id = Uuid::new_v4().to_string();
                    vec![
                        UiMessage::ToolCall {
                            tool_call_id: tool_call_id.clone(),
                            tool_name: THINKING_TOOL_NAME.to_string(),
                            title,
                        },
                        UiMessage::ToolCallResult {
                            tool_call_id,
                            tool_name: THINKING_TOOL_NAME.to_string(),
                            result: body,
                        },
                    ]
                }
                _ => match final_suffix(final_text, state.emitted_len) {
                    Some(rest) => vec![UiMessage::Reasoning {
                        message: rest.to_string(),
                    }],
                    None => Vec::new(),
                },
            }
        };

        for message in messages {
            (self.emit)(message);
        }
    }
}

/// Unstreamed suffix of the completion text, `None` when streaming has
/// already covered it. If the completion text diverged from the stream
/// and `emitted_len` splits a char, the suffix starts at the next
/// boundary rather than re-emitting bytes.
fn final_suffix(final_text: &str, emitted_len: usize) -> Option<&str> {
    if emitted_len >= final_text.len() {
        return None;
    }
    let mut start = emitted_len;
    while start < final_text.len() && !final_text.is_char_boundary(start) {
        start += 1;
    }
    let rest = &final_text[start..];
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}
