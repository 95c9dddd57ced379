// crates/gemchat-app/src/lib.rs
// gemchat - Leptos WASM chat client (CSR)

mod api;
mod attachment;
mod components;

use gemchat_client::{ChatSession, DisplayPlan, REVEAL_INTERVAL_MS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::attachment::ImageAttachment;
use crate::components::{ChatHeader, Composer, MessageList, SessionSignal, Suggestions};

// ============================================================================
// WASM Entry Point
// ============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("gemchat starting...");

    leptos::mount::mount_to_body(App);
}

// ============================================================================
// Request cycle
// ============================================================================

/// Tick the reveal for `ticket` until it finishes or its cycle is cleared
async fn run_reveal(session: SessionSignal, ticket: u64) {
    loop {
        TimeoutFuture::new(REVEAL_INTERVAL_MS).await;
        if session.try_update(|s| s.reveal_step(ticket)) != Some(true) {
            break;
        }
    }
}

fn submit(session: SessionSignal, input: RwSignal<String>, text: String) {
    let Some(submission) = session.try_update(|s| s.submit(&text)).flatten() else {
        return;
    };
    input.set(String::new());

    spawn_local(async move {
        let outcome = api::send_generate(&submission.request).await;
        let plan = session.try_update(|s| s.receive(submission.ticket, outcome));
        log::debug!("Reply for ticket {}: {:?}", submission.ticket, plan);

        if plan == Some(DisplayPlan::Reveal) {
            run_reveal(session, submission.ticket).await;
        }
    });
}

// ============================================================================
// App Root
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(ChatSession::<ImageAttachment>::new());
    let input = RwSignal::new(String::new());

    let on_send = Callback::new(move |text: String| submit(session, input, text));
    let empty = Memo::new(move |_| session.with(|s| s.is_empty()));

    view! {
        <div class=move || format!("app {}", session.with(|s| s.theme().css_class()))>
            <div class="min-h-screen flex flex-col bg-background">
                <ChatHeader session=session/>

                <main class="flex-1 overflow-hidden">
                    {move || {
                        if empty.get() {
                            view! { <Suggestions on_pick=on_send/> }.into_any()
                        } else {
                            view! { <MessageList session=session/> }.into_any()
                        }
                    }}
                </main>

                <Composer session=session input=input on_send=on_send/>
            </div>
        </div>
    }
}
