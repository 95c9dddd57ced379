// crates/gemchat-client/src/lib.rs
// Browser-independent chat client state for gemchat.
// The Leptos app drives this from DOM events and timers.

pub mod attachment;
pub mod error;
pub mod guard;
pub mod markdown;
pub mod reply;
pub mod reveal;
pub mod session;

pub use attachment::{Attachment, AttachmentSlot};
pub use error::ClientError;
pub use guard::RequestGuard;
pub use markdown::render_markdown;
pub use reply::extract_reply_text;
pub use reveal::{REVEAL_INTERVAL_MS, RevealSchedule};
pub use session::{
    ChatSession, DisplayPlan, Exchange, OutgoingRequest, Phase, SUGGESTIONS, Submission, Theme,
    Turn,
};
