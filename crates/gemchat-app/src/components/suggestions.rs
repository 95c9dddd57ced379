// crates/gemchat-app/src/components/suggestions.rs
// Starter prompts shown on an empty conversation

use gemchat_client::SUGGESTIONS;
use leptos::prelude::*;

#[component]
pub fn Suggestions(on_pick: Callback<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center h-full">
            <div class="text-center text-muted py-12">
                <p class="mb-2">"Start a conversation"</p>
                <div class="suggestions">
                    {SUGGESTIONS
                        .iter()
                        .map(|text| {
                            view! {
                                <button
                                    class="suggestion-chip"
                                    on:click=move |_| on_pick.run(text.to_string())
                                >
                                    {*text}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
