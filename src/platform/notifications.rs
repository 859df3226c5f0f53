//! Notification API Binding

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use pwa_shared::{NotificationSpec, Permission};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions, NotificationPermission};

pub fn notifications_supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("Notification")).unwrap_or(false))
        .unwrap_or(false)
}

/// Current permission, `Unsupported` without a Notification API
pub fn notification_permission() -> Permission {
    if !notifications_supported() {
        return Permission::Unsupported;
    }
    match Notification::permission() {
        NotificationPermission::Granted => Permission::Granted,
        NotificationPermission::Denied => Permission::Denied,
        _ => Permission::Default,
    }
}

pub async fn request_notification_permission() -> Result<Permission, String> {
    let promise = Notification::request_permission().map_err(|e| format!("{:?}", e))?;
    let result = JsFuture::from(promise).await.map_err(|e| format!("{:?}", e))?;
    Ok(Permission::from_str(&result.as_string().unwrap_or_default()))
}

pub fn show_notification(spec: &NotificationSpec) -> Result<Notification, String> {
    let options: NotificationOptions = serde_wasm_bindgen::to_value(&spec.options)
        .map_err(|e| format!("Failed to serialize options: {}", e))?
        .unchecked_into();
    Notification::new_with_options(&spec.title, &options).map_err(|e| format!("{:?}", e))
}

/// Show a notification that focuses the app when clicked and closes
/// itself after `timeout_ms`
pub fn show_transient_notification(spec: &NotificationSpec, timeout_ms: u32) -> Result<(), String> {
    let notification = show_notification(spec)?;

    let clicked = notification.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Some(window) = web_sys::window() {
            let _ = window.focus();
        }
        clicked.close();
    });
    notification.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();

    spawn_local(async move {
        TimeoutFuture::new(timeout_ms).await;
        notification.close();
    });
    Ok(())
}
