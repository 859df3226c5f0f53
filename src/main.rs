//! PWA To-Do Frontend Entry Point

mod app;
mod components;
mod context;
mod models;
mod platform;
mod render;
mod repository;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let _ = rolling_logger::init_logger("App", log::LevelFilter::Info);
    mount_to_body(App);
}
