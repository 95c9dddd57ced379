// crates/gemchat-app/src/components/composer.rs
// Prompt input, image picker with preview, send button

use gemchat_client::Attachment;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use super::SessionSignal;
use crate::attachment::ImageAttachment;

#[component]
pub fn Composer(
    session: SessionSignal,
    input: RwSignal<String>,
    on_send: Callback<String>,
) -> impl IntoView {
    let busy = move || session.with(|s| s.is_busy());
    let can_send = move || {
        !busy() && (!input.get().trim().is_empty() || session.with(|s| s.pending_attachment().is_some()))
    };

    let on_file = move |ev: leptos::ev::Event| {
        let picker: HtmlInputElement = event_target(&ev);
        if let Some(file) = picker.files().and_then(|files| files.get(0)) {
            match ImageAttachment::from_file(file) {
                Ok(image) => {
                    if let Some(displaced) = session.try_update(|s| s.attach(image)).flatten() {
                        displaced.release();
                    }
                }
                Err(e) => log::warn!("Could not preview selected file: {:?}", e),
            }
        }
        // Allow re-selecting the same file
        picker.set_value("");
    };

    let remove = move |_| {
        if let Some(removed) = session.try_update(|s| s.remove_attachment()).flatten() {
            removed.release();
        }
    };

    view! {
        <div class="chat-input-area">
            {move || session.with(|s| s.pending_attachment().map(|a| a.preview_url().to_string())).map(|src| view! {
                <div class="attachment-preview">
                    <img src=src alt="Selected image"/>
                    <button class="attachment-remove" title="Remove image" on:click=remove>"×"</button>
                </div>
            })}

            <form
                class="chat-input-wrapper"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_send.run(input.get());
                }
            >
                <label class="attach-btn" title="Attach image">
                    "+"
                    <input
                        type="file"
                        accept="image/*"
                        class="hidden"
                        prop:disabled=busy
                        on:change=on_file
                    />
                </label>
                <input
                    type="text"
                    placeholder="Ask anything..."
                    class="chat-input"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button type="submit" class="chat-send-btn" prop:disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
