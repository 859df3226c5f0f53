//! Browser Bindings
//!
//! Exports called from `sw.js`. The loader registers every listener during
//! the script's first evaluation (the platform drops late ones) and forwards
//! each event here once the wasm module is ready.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use log::{info, LevelFilter};
use pwa_shared::{AppConfig, NotificationSpec};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Cache, Client, ExtendableEvent, FetchEvent, Headers, NotificationEvent, NotificationOptions,
    PushEvent, Request, RequestDestination, RequestInit, Response, ResponseInit, ResponseType,
    ServiceWorkerGlobalScope, WindowClient,
};

use crate::cache::CacheStorage;
use crate::error::{WorkerError, WorkerResult};
use crate::http::{Destination, FetchRequest, HttpResponse, ResponseKind};
use crate::lifecycle::WorkerState;
use crate::network::Network;
use crate::notify::{ClickAction, ClientInfo};
use crate::worker::{ServiceWorker, WorkerEvent, WorkerReply};

type WebWorker = ServiceWorker<WebCaches, WebNetwork>;

thread_local! {
    static WORKER: RefCell<Option<Rc<WebWorker>>> = RefCell::new(None);
}

fn js_err(e: JsValue) -> WorkerError {
    WorkerError::Js(format!("{:?}", e))
}

fn cache_err(e: JsValue) -> WorkerError {
    WorkerError::Cache(format!("{:?}", e))
}

/// The worker instance for this global scope, built on first use.
///
/// The browser restarts idle workers, so the lifecycle state is taken from
/// the platform rather than assumed to start at `installing`.
fn worker(scope: &ServiceWorkerGlobalScope) -> Result<Rc<WebWorker>, JsValue> {
    if let Some(existing) = WORKER.with(|w| w.borrow().clone()) {
        return Ok(existing);
    }
    let registration = scope.registration();
    let state = platform_state(scope).unwrap_or_else(|| {
        if registration.active().is_some() {
            WorkerState::Activated
        } else {
            WorkerState::Installing
        }
    });
    let created = Rc::new(
        ServiceWorker::new(
            AppConfig::default(),
            &registration.scope(),
            WebCaches { storage: scope.caches()? },
            WebNetwork { scope: scope.clone() },
        )
        .with_state(state),
    );
    info!("[SW] Started in state {}", state);
    WORKER.with(|w| *w.borrow_mut() = Some(created.clone()));
    Ok(created)
}

/// `self.serviceWorker.state`; not in stable web-sys, so read by name
fn platform_state(scope: &ServiceWorkerGlobalScope) -> Option<WorkerState> {
    let this = js_sys::Reflect::get(scope, &JsValue::from_str("serviceWorker")).ok()?;
    if this.is_undefined() || this.is_null() {
        return None;
    }
    let state = js_sys::Reflect::get(&this, &JsValue::from_str("state")).ok()?;
    WorkerState::parse(&state.as_string()?)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = rolling_logger::init_logger("SW", LevelFilter::Info);
}

// ========================
// Event Exports
// ========================

#[wasm_bindgen]
pub async fn worker_install(scope: ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    if let WorkerReply::Installed { cached, skip_waiting } = worker.handle(WorkerEvent::Install).await {
        info!("[SW] Installed with {} cached files", cached);
        if skip_waiting {
            JsFuture::from(scope.skip_waiting()?).await?;
        }
    }
    Ok(())
}

#[wasm_bindgen]
pub async fn worker_activate(scope: ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    if let WorkerReply::Activated { claim: true, .. } = worker.handle(WorkerEvent::Activate).await {
        JsFuture::from(scope.clients().claim()).await?;
    }
    Ok(())
}

#[wasm_bindgen]
pub async fn worker_fetch(scope: ServiceWorkerGlobalScope, event: FetchEvent) -> Result<Response, JsValue> {
    let worker = worker(&scope)?;
    let request = read_request(&event.request()).await?;
    match worker.handle(WorkerEvent::Fetch(request)).await {
        WorkerReply::Respond(outcome) => to_web_response(&outcome.response),
        other => Err(JsValue::from_str(&format!("unexpected fetch reply: {:?}", other))),
    }
}

#[wasm_bindgen]
pub async fn worker_push(scope: ServiceWorkerGlobalScope, event: PushEvent) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    let payload = event.data().map(|data| data.text());
    if let WorkerReply::ShowNotification(spec) = worker.handle(WorkerEvent::Push(payload)).await {
        show_notification(&scope, &spec).await?;
    }
    Ok(())
}

#[wasm_bindgen]
pub async fn worker_notification_click(
    scope: ServiceWorkerGlobalScope,
    event: NotificationEvent,
) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    event.notification().close();

    let list = JsFuture::from(scope.clients().match_all()).await?;
    let clients: Vec<Client> = Array::from(&list)
        .iter()
        .filter_map(|c| c.dyn_into::<Client>().ok())
        .collect();
    let infos = clients
        .iter()
        .map(|c| ClientInfo {
            id: c.id(),
            url: c.url(),
            focusable: c.dyn_ref::<WindowClient>().is_some(),
        })
        .collect();

    let event = WorkerEvent::NotificationClick { action: event.action(), clients: infos };
    match worker.handle(event).await {
        WorkerReply::Click(ClickAction::OpenWindow(url)) => {
            JsFuture::from(scope.clients().open_window(&url)).await?;
        }
        WorkerReply::Click(ClickAction::Focus(id)) => {
            let window = clients
                .iter()
                .find(|c| c.id() == id)
                .and_then(|c| c.dyn_ref::<WindowClient>());
            if let Some(window) = window {
                JsFuture::from(window.focus()?).await?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Forwarded from the `statechange` listener on `self.serviceWorker`
#[wasm_bindgen]
pub fn worker_state_change(scope: ServiceWorkerGlobalScope) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    if let Some(state) = platform_state(&scope) {
        worker.observe(state);
    }
    Ok(())
}

/// `SyncEvent` is not in stable web-sys, so the tag is read by name
#[wasm_bindgen]
pub async fn worker_sync(scope: ServiceWorkerGlobalScope, event: ExtendableEvent) -> Result<(), JsValue> {
    let worker = worker(&scope)?;
    let tag = js_sys::Reflect::get(&event, &JsValue::from_str("tag"))?
        .as_string()
        .unwrap_or_default();
    worker.handle(WorkerEvent::Sync(tag)).await;
    Ok(())
}

async fn show_notification(scope: &ServiceWorkerGlobalScope, spec: &NotificationSpec) -> Result<(), JsValue> {
    let options: NotificationOptions = serde_wasm_bindgen::to_value(&spec.options)?.unchecked_into();
    let shown = scope
        .registration()
        .show_notification_with_options(&spec.title, &options)?;
    JsFuture::from(shown).await?;
    Ok(())
}

// ========================
// Conversions
// ========================

fn read_headers(headers: &Headers) -> Vec<(String, String)> {
    let Ok(Some(entries)) = js_sys::try_iter(headers.as_ref()) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let pair = Array::from(&entry);
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect()
}

fn build_headers(pairs: &[(String, String)]) -> Result<Headers, JsValue> {
    let headers = Headers::new()?;
    for (name, value) in pairs {
        headers.append(name, value)?;
    }
    Ok(headers)
}

async fn read_request(request: &Request) -> Result<FetchRequest, JsValue> {
    let method = request.method();
    let body = if method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD") {
        None
    } else {
        let buffer = JsFuture::from(request.array_buffer()?).await?;
        Some(Uint8Array::new(&buffer).to_vec())
    };
    let destination = match request.destination() {
        RequestDestination::Document => Destination::Document,
        RequestDestination::Script => Destination::Script,
        RequestDestination::Style => Destination::Style,
        RequestDestination::Image => Destination::Image,
        RequestDestination::Manifest => Destination::Manifest,
        _ => Destination::Other,
    };
    Ok(FetchRequest {
        url: request.url(),
        method,
        destination,
        headers: read_headers(&request.headers()),
        body,
    })
}

fn to_web_request(request: &FetchRequest) -> Result<Request, JsValue> {
    let init = RequestInit::new();
    init.set_method(&request.method);
    init.set_headers(&build_headers(&request.headers)?);
    if let Some(body) = &request.body {
        init.set_body(&Uint8Array::from(body.as_slice()));
    }
    Request::new_with_str_and_init(&request.url, &init)
}

async fn read_response(response: &Response) -> WorkerResult<HttpResponse> {
    let buffer = JsFuture::from(response.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let kind = match response.type_() {
        ResponseType::Basic => ResponseKind::Basic,
        ResponseType::Cors => ResponseKind::Cors,
        ResponseType::Opaque | ResponseType::Opaqueredirect => ResponseKind::Opaque,
        ResponseType::Error => ResponseKind::Error,
        _ => ResponseKind::Default,
    };
    Ok(HttpResponse {
        status: response.status(),
        status_text: response.status_text(),
        headers: read_headers(&response.headers()),
        body: Uint8Array::new(&buffer).to_vec(),
        kind,
    })
}

fn to_web_response(response: &HttpResponse) -> Result<Response, JsValue> {
    // Opaque responses report status 0, which `new Response` rejects
    if !(200..=599).contains(&response.status) {
        return Ok(Response::error());
    }
    let init = ResponseInit::new();
    init.set_status(response.status);
    init.set_status_text(&response.status_text);
    init.set_headers(&build_headers(&response.headers)?);

    let null_body = matches!(response.status, 204 | 205 | 304) || response.body.is_empty();
    let body = if null_body { None } else { Some(Uint8Array::from(response.body.as_slice())) };
    Response::new_with_opt_buffer_source_and_init(body.as_deref(), &init)
}

// ========================
// Platform Seams
// ========================

struct WebCaches {
    storage: web_sys::CacheStorage,
}

#[async_trait(?Send)]
impl CacheStorage for WebCaches {
    async fn keys(&self) -> WorkerResult<Vec<String>> {
        let keys = JsFuture::from(self.storage.keys()).await.map_err(cache_err)?;
        Ok(Array::from(&keys).iter().filter_map(|k| k.as_string()).collect())
    }

    async fn delete(&self, cache_name: &str) -> WorkerResult<bool> {
        let deleted = JsFuture::from(self.storage.delete(cache_name))
            .await
            .map_err(cache_err)?;
        Ok(deleted.as_bool().unwrap_or(false))
    }

    async fn match_url(&self, url: &str) -> WorkerResult<Option<HttpResponse>> {
        read_match(self.storage.match_with_str(url)).await
    }

    async fn match_request(&self, request: &FetchRequest) -> WorkerResult<Option<HttpResponse>> {
        if !request.is_get() {
            return Ok(None);
        }
        let web_request = to_web_request(request).map_err(cache_err)?;
        read_match(self.storage.match_with_request(&web_request)).await
    }

    async fn put(&self, cache_name: &str, url: &str, response: HttpResponse) -> WorkerResult<()> {
        let cache: Cache = JsFuture::from(self.storage.open(cache_name))
            .await
            .map_err(cache_err)?
            .dyn_into()
            .map_err(cache_err)?;
        let response = to_web_response(&response).map_err(cache_err)?;
        JsFuture::from(cache.put_with_str(url, &response))
            .await
            .map_err(cache_err)?;
        Ok(())
    }
}

async fn read_match(found: js_sys::Promise) -> WorkerResult<Option<HttpResponse>> {
    let found = JsFuture::from(found).await.map_err(cache_err)?;
    if found.is_undefined() || found.is_null() {
        return Ok(None);
    }
    let response: Response = found.dyn_into().map_err(cache_err)?;
    Ok(Some(read_response(&response).await?))
}

struct WebNetwork {
    scope: ServiceWorkerGlobalScope,
}

#[async_trait(?Send)]
impl Network for WebNetwork {
    async fn fetch(&self, request: &FetchRequest) -> WorkerResult<HttpResponse> {
        let web_request = to_web_request(request).map_err(js_err)?;
        let response = JsFuture::from(self.scope.fetch_with_request(&web_request))
            .await
            .map_err(|e| WorkerError::Network(format!("{:?}", e)))?;
        let response: Response = response.dyn_into().map_err(js_err)?;
        read_response(&response).await
    }
}
