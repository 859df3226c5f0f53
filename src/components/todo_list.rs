//! To-Do List Component
//!
//! Renders the stored items as escaped HTML and routes clicks on rows
//! through one delegated handler.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::AppContext;
use crate::render::{render_todo_list, summary, ListAction};
use crate::store::{use_app_store, AppStateStoreFields};

/// Find the clicked row's action, if the click landed on one
fn clicked_action(ev: &web_sys::MouseEvent) -> Option<ListAction> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let action_el = target.closest("[data-action]").ok()??;
    let row = action_el.closest("li[data-id]").ok()??;
    ListAction::parse(&action_el.get_attribute("data-action")?, &row.get_attribute("data-id")?)
}

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let on_click = move |ev: web_sys::MouseEvent| match clicked_action(&ev) {
        Some(ListAction::Toggle(id)) => ctx.toggle_item(id),
        Some(ListAction::Delete(id)) => ctx.delete_item(id),
        None => {}
    };

    view! {
        <ul
            id="todo-list"
            class="todo-list"
            inner_html=move || render_todo_list(&store.items().read())
            on:click=on_click
        ></ul>
        <p class="item-count">{move || summary(&store.items().read())}</p>
    }
}
