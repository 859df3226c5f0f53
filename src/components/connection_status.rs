//! Connection Status Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ConnectionStatus() -> impl IntoView {
    let store = use_app_store();
    let online = move || store.online().get();

    view! {
        <p
            id="connection-status"
            class=move || if online() { "status online" } else { "status offline" }
        >
            {move || if online() { "Online ✅" } else { "Offline ⚠️" }}
        </p>
    }
}
