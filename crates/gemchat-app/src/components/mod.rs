// crates/gemchat-app/src/components/mod.rs
// Chat component re-exports

mod composer;
mod header;
mod message_list;
mod suggestions;

pub use composer::Composer;
pub use header::ChatHeader;
pub use message_list::MessageList;
pub use suggestions::Suggestions;

use gemchat_client::ChatSession;
use leptos::prelude::*;

use crate::attachment::ImageAttachment;

/// Session handle shared by every component. `File` is not `Send`, so the
/// session lives in local storage.
pub type SessionSignal = RwSignal<ChatSession<ImageAttachment>, LocalStorage>;
