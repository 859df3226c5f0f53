//! Online / Offline Signal

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub fn is_online() -> bool {
    web_sys::window().map(|w| w.navigator().on_line()).unwrap_or(true)
}

/// Call `on_change` on every online/offline transition
pub fn watch_connectivity(on_change: impl Fn(bool) + 'static) {
    let Some(window) = web_sys::window() else { return };
    let on_change = Rc::new(on_change);

    for (event, online) in [("online", true), ("offline", false)] {
        let on_change = on_change.clone();
        let listener = Closure::<dyn FnMut()>::new(move || on_change(online));
        let _ = window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        listener.forget();
    }
}
