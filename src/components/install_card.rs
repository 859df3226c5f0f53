//! Install Card Component
//!
//! In-page replacement for the browser's install prompt. Hidden until the
//! browser reports the app as installable.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn InstallCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    view! {
        <section
            id="install-card"
            class="card"
            style:display=move || if store.install_available().get() { "block" } else { "none" }
        >
            <h2>"Install App"</h2>
            <p>"Add this app to your home screen to use it offline."</p>
            <button
                id="install-btn"
                on:click=move |_| spawn_local(async move { ctx.install_app().await })
            >
                "📲 Install"
            </button>
        </section>
    }
}
