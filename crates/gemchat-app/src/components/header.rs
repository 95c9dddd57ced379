// crates/gemchat-app/src/components/header.rs
// Title bar with theme toggle and clear button

use gemchat_client::Theme;
use leptos::prelude::*;

use super::SessionSignal;

#[component]
pub fn ChatHeader(session: SessionSignal) -> impl IntoView {
    let toggle_theme = move |_| {
        session.update(|s| {
            s.toggle_theme();
        });
    };

    let clear = move |_| {
        let confirmed = window()
            .confirm_with_message("Clear the whole conversation?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        if let Some(released) = session.try_update(|s| s.clear_history()) {
            log::info!("Conversation cleared");
            released.into_iter().for_each(|a| a.release());
        }
    };

    view! {
        <header class="chat-header">
            <span class="chat-title">"Gemini Chat"</span>
            <div class="ml-auto flex items-center gap-2">
                <button class="icon-btn" title="Toggle theme" on:click=toggle_theme>
                    {move || match session.with(|s| s.theme()) {
                        Theme::Light => "Dark mode",
                        Theme::Dark => "Light mode",
                    }}
                </button>
                <button
                    class="icon-btn"
                    title="Clear conversation"
                    prop:disabled=move || session.with(|s| s.is_empty() && s.pending_attachment().is_none())
                    on:click=clear
                >
                    "Clear"
                </button>
            </div>
        </header>
    }
}
