// crates/gemchat-app/src/attachment.rs
// Browser image attachment backed by a File and an object URL

use gemchat_client::Attachment;
use wasm_bindgen::JsValue;
use web_sys::{File, Url};

#[derive(Debug, Clone)]
pub struct ImageAttachment {
    file: File,
    preview_url: String,
}

impl ImageAttachment {
    pub fn from_file(file: File) -> Result<Self, JsValue> {
        let preview_url = Url::create_object_url_with_blob(&file)?;
        Ok(Self { file, preview_url })
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    /// Revoke the preview URL. Call once the attachment is no longer shown.
    pub fn release(self) {
        if let Err(e) = Url::revoke_object_url(&self.preview_url) {
            log::warn!("Failed to revoke preview URL: {:?}", e);
        }
    }
}

impl Attachment for ImageAttachment {
    fn preview_url(&self) -> &str {
        &self.preview_url
    }
}
