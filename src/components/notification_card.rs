//! Notification Card Component
//!
//! Permission status, enable button and a test notification button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use pwa_shared::Permission;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

fn status_color(permission: Permission) -> &'static str {
    match permission {
        Permission::Granted => "#4CAF50",
        Permission::Denied => "#f44336",
        _ => "#666",
    }
}

fn enable_label(permission: Permission) -> &'static str {
    match permission {
        Permission::Granted => "Notifications Enabled",
        Permission::Denied => "Notifications Blocked",
        _ => "Enable Notifications",
    }
}

#[component]
pub fn NotificationCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let permission = move || store.permission().get();

    view! {
        <section class="card">
            <h2>"Notifications"</h2>
            <p id="notification-status" style:color=move || status_color(permission())>
                {move || permission().status_text()}
            </p>
            <button
                id="enable-notifications"
                prop:disabled=move || matches!(permission(), Permission::Granted | Permission::Denied)
                on:click=move |_| spawn_local(async move { ctx.enable_notifications().await })
            >
                {move || enable_label(permission())}
            </button>
            <button
                id="send-notification"
                prop:disabled=move || !permission().is_granted()
                on:click=move |_| ctx.send_test_notification()
            >
                "Send Test Notification"
            </button>
        </section>
    }
}
