// crates/gemchat-client/src/session.rs
// Chat session state machine: Idle -> Sending -> Displaying -> Idle

use serde_json::Value;

use crate::attachment::{Attachment, AttachmentSlot};
use crate::guard::RequestGuard;
use crate::markdown::render_markdown;
use crate::reply::extract_reply_text;
use crate::reveal::RevealSchedule;
use crate::ClientError;

/// Suggestion chips shown while the conversation is empty
pub const SUGGESTIONS: &[&str] = &[
    "Explain how HTTP caching works",
    "Write a haiku about the ocean",
    "Give me three ideas for a weekend project",
    "Summarize the plot of Hamlet in a paragraph",
];

// ═══════════════════════════════════════
// DATA STRUCTURES
// ═══════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Request issued, waiting on the relay
    Sending,
    /// Reply received, reveal animation running
    Displaying,
}

/// One entry in the visible message list
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    User {
        id: u64,
        text: String,
        image_preview: Option<String>,
    },
    Assistant {
        id: u64,
        /// Final rendered markdown
        html: String,
        /// Raw text shown while the reveal runs; `None` once `html` is shown
        revealing: Option<String>,
    },
    Error {
        id: u64,
        message: String,
    },
}

impl Turn {
    pub fn id(&self) -> u64 {
        match self {
            Turn::User { id, .. } | Turn::Assistant { id, .. } | Turn::Error { id, .. } => *id,
        }
    }
}

/// A completed user turn and the upstream payload it produced
#[derive(Debug, Clone)]
pub struct Exchange<A> {
    pub user_text: String,
    pub attachment: Option<A>,
    pub reply: Value,
}

/// What the UI should send to the relay
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingRequest<A> {
    /// `application/json` `{"prompt": ...}`
    Json { prompt: String },
    /// `multipart/form-data` with `prompt` and `image`
    Multipart { prompt: String, image: A },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission<A> {
    /// Pass back to [`ChatSession::receive`] with the outcome
    pub ticket: u64,
    pub request: OutgoingRequest<A>,
}

/// How a received outcome should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPlan {
    /// Full reply rendered at once (image turns)
    Immediate,
    /// Drive [`ChatSession::reveal_step`] with this ticket until it returns false
    Reveal,
    /// Error bubble appended
    Failed,
    /// Outcome belongs to a cycle that was reset; ignored
    Stale,
}

struct InFlight<A> {
    ticket: u64,
    text: String,
    attachment: Option<A>,
}

struct ActiveReveal {
    ticket: u64,
    turn_id: u64,
    schedule: RevealSchedule,
}

// ═══════════════════════════════════════
// SESSION
// ═══════════════════════════════════════

/// In-memory conversation for one page load.
pub struct ChatSession<A> {
    turns: Vec<Turn>,
    exchanges: Vec<Exchange<A>>,
    attachment: AttachmentSlot<A>,
    guard: RequestGuard,
    phase: Phase,
    in_flight: Option<InFlight<A>>,
    reveal: Option<ActiveReveal>,
    next_turn_id: u64,
    theme: Theme,
}

impl<A> Default for ChatSession<A> {
    fn default() -> Self {
        Self {
            turns: Vec::new(),
            exchanges: Vec::new(),
            attachment: AttachmentSlot::new(),
            guard: RequestGuard::new(),
            phase: Phase::Idle,
            in_flight: None,
            reveal: None,
            next_turn_id: 0,
            theme: Theme::default(),
        }
    }
}

impl<A: Attachment> ChatSession<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn exchanges(&self) -> &[Exchange<A>] {
        &self.exchanges
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Waiting on the relay (drives the typing indicator)
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Sending
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn pending_attachment(&self) -> Option<&A> {
        self.attachment.get()
    }

    /// Replace the pending attachment; returns the displaced one
    pub fn attach(&mut self, attachment: A) -> Option<A> {
        self.attachment.attach(attachment)
    }

    pub fn remove_attachment(&mut self) -> Option<A> {
        self.attachment.remove()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Start a request cycle.
    ///
    /// Returns `None` without touching state when a cycle is already running
    /// or when there is neither text nor an attachment. Otherwise the user
    /// turn is appended immediately and the pending attachment moves into
    /// the request.
    pub fn submit(&mut self, text: &str) -> Option<Submission<A>> {
        if self.guard.is_busy() {
            log::debug!("Submission dropped: request already in flight");
            return None;
        }

        let text = text.trim();
        if text.is_empty() && self.attachment.is_empty() {
            return None;
        }

        let ticket = self.guard.try_acquire()?;
        let attachment = self.attachment.remove();

        let id = self.next_id();
        self.turns.push(Turn::User {
            id,
            text: text.to_string(),
            image_preview: attachment.as_ref().map(|a| a.preview_url().to_string()),
        });

        let request = match &attachment {
            Some(image) => OutgoingRequest::Multipart {
                prompt: text.to_string(),
                image: image.clone(),
            },
            None => OutgoingRequest::Json {
                prompt: text.to_string(),
            },
        };

        self.in_flight = Some(InFlight {
            ticket,
            text: text.to_string(),
            attachment,
        });
        self.phase = Phase::Sending;

        Some(Submission { ticket, request })
    }

    /// Apply the outcome of the request issued under `ticket`.
    pub fn receive(&mut self, ticket: u64, outcome: Result<Value, ClientError>) -> DisplayPlan {
        if !self.guard.holds(ticket) {
            log::debug!("Ignoring reply for reset cycle {}", ticket);
            return DisplayPlan::Stale;
        }
        let Some(in_flight) = self.in_flight.take_if(|f| f.ticket == ticket) else {
            return DisplayPlan::Stale;
        };

        let reply = outcome.and_then(|payload| {
            let text = extract_reply_text(&payload)?;
            Ok((payload, text))
        });

        let (payload, text) = match reply {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Request failed: {}", e);
                self.fail(e);
                return DisplayPlan::Failed;
            }
        };

        let html = render_markdown(&text);
        let image_turn = in_flight.attachment.is_some();
        self.exchanges.push(Exchange {
            user_text: in_flight.text,
            attachment: in_flight.attachment,
            reply: payload,
        });

        let id = self.next_id();
        if image_turn {
            self.turns.push(Turn::Assistant {
                id,
                html,
                revealing: None,
            });
            self.finish_cycle();
            DisplayPlan::Immediate
        } else {
            self.turns.push(Turn::Assistant {
                id,
                html,
                revealing: Some(String::new()),
            });
            self.reveal = Some(ActiveReveal {
                ticket,
                turn_id: id,
                schedule: RevealSchedule::new(&text),
            });
            self.phase = Phase::Displaying;
            DisplayPlan::Reveal
        }
    }

    /// Advance the reveal started for `ticket` by one token.
    ///
    /// Returns `true` while more steps remain. The call after the last token
    /// swaps the raw text for the rendered HTML and ends the cycle. Returns
    /// `false` without touching anything when `ticket` is not the reveal in
    /// progress.
    pub fn reveal_step(&mut self, ticket: u64) -> bool {
        let Some(active) = self.reveal.as_mut().filter(|r| r.ticket == ticket) else {
            return false;
        };

        let turn_id = active.turn_id;
        let next = active
            .schedule
            .advance()
            .then(|| active.schedule.visible().to_string());
        let more = next.is_some();

        if let Some(Turn::Assistant { revealing, .. }) =
            self.turns.iter_mut().find(|t| t.id() == turn_id)
        {
            *revealing = next;
        }

        if !more {
            self.reveal = None;
            self.finish_cycle();
        }
        more
    }

    /// Drop every turn, exchange and attachment.
    ///
    /// Returns the attachments released so the UI can free their previews.
    /// A request still in flight is orphaned; its reply is ignored.
    pub fn clear_history(&mut self) -> Vec<A> {
        let mut released: Vec<A> = self
            .exchanges
            .drain(..)
            .filter_map(|exchange| exchange.attachment)
            .collect();
        released.extend(self.in_flight.take().and_then(|f| f.attachment));
        released.extend(self.attachment.remove());

        self.turns.clear();
        self.reveal = None;
        self.finish_cycle();
        released
    }

    fn fail(&mut self, error: ClientError) {
        let id = self.next_id();
        self.turns.push(Turn::Error {
            id,
            message: error.to_string(),
        });
        self.finish_cycle();
    }

    fn finish_cycle(&mut self) {
        self.guard.release();
        self.phase = Phase::Idle;
    }

    fn next_id(&mut self) -> u64 {
        self.next_turn_id += 1;
        self.next_turn_id
    }
}
