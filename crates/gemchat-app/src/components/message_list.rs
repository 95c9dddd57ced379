// crates/gemchat-app/src/components/message_list.rs
// Visible conversation: user, assistant and error bubbles

use gemchat_client::Turn;
use leptos::html;
use leptos::prelude::*;

use super::SessionSignal;

#[component]
pub fn MessageList(session: SessionSignal) -> impl IntoView {
    let messages_ref = NodeRef::<html::Div>::new();

    // Auto-scroll on every change, including reveal ticks
    Effect::new(move |_| {
        session.track();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let turn_ids = move || session.with(|s| s.turns().iter().map(Turn::id).collect::<Vec<_>>());

    view! {
        <div class="chat-container h-full overflow-y-auto" node_ref=messages_ref>
            <For
                each=turn_ids
                key=|id| *id
                children=move |id| {
                    let turn = Signal::derive(move || {
                        session.with(|s| s.turns().iter().find(|t| t.id() == id).cloned())
                    });
                    view! { <TurnBubble turn=turn/> }
                }
            />

            {move || session.with(|s| s.is_loading()).then(|| view! {
                <div class="message assistant">
                    <div class="message-bubble">
                        <div class="typing-indicator">
                            <span></span>
                            <span></span>
                            <span></span>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

#[component]
fn TurnBubble(turn: Signal<Option<Turn>>) -> impl IntoView {
    move || match turn.get() {
        Some(Turn::User { text, image_preview, .. }) => view! {
            <div class="message user">
                <div class="message-bubble">
                    {image_preview.map(|src| view! {
                        <img class="message-image" src=src alt="Attached image"/>
                    })}
                    {(!text.is_empty()).then(|| view! { <p class="message-text">{text}</p> })}
                </div>
            </div>
        }
        .into_any(),
        Some(Turn::Assistant { revealing: Some(partial), .. }) => view! {
            <div class="message assistant">
                <div class="message-bubble">
                    <p class="message-text">{partial}</p>
                </div>
            </div>
        }
        .into_any(),
        Some(Turn::Assistant { html, revealing: None, .. }) => view! {
            <div class="message assistant">
                <div class="message-bubble">
                    <div class="markdown" inner_html=html></div>
                </div>
            </div>
        }
        .into_any(),
        Some(Turn::Error { message, .. }) => view! {
            <div class="message error">
                <div class="message-bubble">{message}</div>
            </div>
        }
        .into_any(),
        None => ().into_any(),
    }
}
