//! PWA To-Do App
//!
//! Builds the controller once, wires browser signals into it and lays out
//! the page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use reactive_stores::Store;

use crate::components::{ConnectionStatus, InstallCard, NotificationCard, TodoForm, TodoList};
use crate::context::AppContext;
use crate::platform;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let config = platform::load_config();
    let worker_path = config.worker_path.clone();

    let store = Store::new(AppState::new(
        platform::is_online(),
        platform::notification_permission(),
    ));
    provide_context(store);

    let ctx = AppContext::new(store, config);
    provide_context(ctx);

    // Registered once per page load; failure only costs offline support
    spawn_local(async move {
        match platform::register_worker(&worker_path).await {
            Ok(registration) => info!("[App] SW registered with scope {}", registration.scope()),
            Err(e) => error!("[App] SW registration failed: {}", e),
        }
    });

    platform::watch_connectivity(move |online| ctx.set_online(online));
    platform::bind_install_prompt(
        move || ctx.set_install_available(true),
        move || ctx.on_installed(),
    );
    ctx.reload();

    view! {
        <main class="app">
            <h1>"📝 PWA To-Do"</h1>
            <ConnectionStatus />
            <InstallCard />
            <NotificationCard />
            <section class="card">
                <h2>"To-Do List"</h2>
                <TodoForm />
                <TodoList />
            </section>
        </main>
    }
}
