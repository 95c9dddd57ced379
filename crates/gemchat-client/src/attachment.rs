// crates/gemchat-client/src/attachment.rs
// Single-slot pending image attachment

/// A locally selected image the UI can preview.
///
/// The handle is transient (a browser `File` plus an object URL in the
/// app); nothing here is persisted.
pub trait Attachment: Clone {
    /// URL usable as an `<img src>` thumbnail
    fn preview_url(&self) -> &str;
}

/// Holds at most one pending attachment.
#[derive(Debug, Clone)]
pub struct AttachmentSlot<A> {
    pending: Option<A>,
}

impl<A> Default for AttachmentSlot<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> AttachmentSlot<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending attachment, returning the one displaced
    pub fn attach(&mut self, attachment: A) -> Option<A> {
        self.pending.replace(attachment)
    }

    /// Clear the slot. `None` if nothing was pending.
    pub fn remove(&mut self) -> Option<A> {
        self.pending.take()
    }

    pub fn get(&self) -> Option<&A> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
