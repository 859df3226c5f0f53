//! Service Worker Registration

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ServiceWorkerContainer, ServiceWorkerRegistration, ServiceWorkerState};

use super::dialog::{confirm, reload_page};

/// Register the worker script once. When a new version finishes
/// installing while an old one controls the page, ask to reload.
pub async fn register_worker(path: &str) -> Result<ServiceWorkerRegistration, String> {
    let window = web_sys::window().ok_or("no window")?;
    let navigator = window.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        return Err("service workers are not supported".to_string());
    }
    let container = navigator.service_worker();

    let registration: ServiceWorkerRegistration = JsFuture::from(container.register(path))
        .await
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|e| format!("{:?}", e))?;

    watch_updates(&registration, container);
    Ok(registration)
}

fn watch_updates(registration: &ServiceWorkerRegistration, container: ServiceWorkerContainer) {
    let watched = registration.clone();
    let on_update_found = Closure::<dyn FnMut()>::new(move || {
        info!("[App] SW update found");
        let Some(new_worker) = watched.installing() else { return };

        let installing = new_worker.clone();
        let container = container.clone();
        let on_state_change = Closure::<dyn FnMut()>::new(move || {
            if installing.state() == ServiceWorkerState::Installed && container.controller().is_some() {
                prompt_reload();
            }
        });
        new_worker.set_onstatechange(Some(on_state_change.as_ref().unchecked_ref()));
        on_state_change.forget();
    });
    registration.set_onupdatefound(Some(on_update_found.as_ref().unchecked_ref()));
    on_update_found.forget();
}

fn prompt_reload() {
    if confirm("A new version of the app is available. Update now?") {
        reload_page();
    }
}
