//! Install Prompt Binding
//!
//! `BeforeInstallPromptEvent` is not in web-sys, so `prompt()` and
//! `userChoice` are reached through `Reflect`.

use std::cell::RefCell;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

thread_local! {
    /// The suppressed `beforeinstallprompt` event, kept until used
    static DEFERRED_PROMPT: RefCell<Option<web_sys::Event>> = RefCell::new(None);
}

/// Suppress the browser's own prompt and report eligibility / completion
pub fn bind_install_prompt(on_available: impl Fn() + 'static, on_installed: impl Fn() + 'static) {
    let Some(window) = web_sys::window() else { return };

    let before_install = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        ev.prevent_default();
        DEFERRED_PROMPT.with(|p| *p.borrow_mut() = Some(ev));
        on_available();
    });
    let _ = window.add_event_listener_with_callback("beforeinstallprompt", before_install.as_ref().unchecked_ref());
    before_install.forget();

    let installed = Closure::<dyn FnMut()>::new(move || {
        DEFERRED_PROMPT.with(|p| p.borrow_mut().take());
        on_installed();
    });
    let _ = window.add_event_listener_with_callback("appinstalled", installed.as_ref().unchecked_ref());
    installed.forget();
}

/// Show the deferred prompt. Returns the user's choice ("accepted" /
/// "dismissed"), or `None` when no prompt is waiting. A prompt can only be
/// shown once, so it is dropped either way.
pub async fn prompt_install() -> Result<Option<String>, String> {
    let Some(event) = DEFERRED_PROMPT.with(|p| p.borrow_mut().take()) else {
        return Ok(None);
    };
    let js_err = |e: JsValue| format!("{:?}", e);

    let prompt: Function = Reflect::get(&event, &JsValue::from_str("prompt"))
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let shown = prompt.call0(&event).map_err(js_err)?;
    if let Ok(promise) = shown.dyn_into::<Promise>() {
        JsFuture::from(promise).await.map_err(js_err)?;
    }

    let choice: Promise = Reflect::get(&event, &JsValue::from_str("userChoice"))
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let choice = JsFuture::from(choice).await.map_err(js_err)?;
    let outcome = Reflect::get(&choice, &JsValue::from_str("outcome"))
        .map_err(js_err)?
        .as_string();
    Ok(outcome)
}
