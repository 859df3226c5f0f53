//! To-Do Form Component
//!
//! Text input plus Add button; Enter submits too.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (new_text, set_new_text) = signal(String::new());

    let add = move || {
        if ctx.add_item(&new_text.get_untracked()) {
            set_new_text.set(String::new());
        }
    };

    view! {
        <div class="todo-form">
            <input
                id="todo-input"
                type="text"
                placeholder="What needs doing?"
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        add();
                    }
                }
            />
            <button id="add-todo" on:click=move |_| add()>"Add"</button>
        </div>
    }
}
