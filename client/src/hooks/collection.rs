//! Generic list + CRUD hook over a REST collection.
//!
//! DESIGN
//! ======
//! A hook is cheap to clone and holds only handles: the list cell, the toast
//! cell, and the API client. Every operation is `async` and reports its
//! outcome in the return value as well as in the list state, so pages can
//! branch on it (close a modal, navigate) without re-reading the cell.
//!
//! ERROR HANDLING
//! ==============
//! Failures set `error` to the normalized message and push an error toast.
//! The item list is never modified by a failed call.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use std::marker::PhantomData;

use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::net::client::{ApiClient, decode};
use crate::net::error::{ApiError, error_message};
use crate::net::resources::{Mutation, RestResource};
use crate::net::transport::Body;
use crate::state::StateCell;
use crate::state::resource::{ResourceList, decode_items};
use crate::state::toast::{ToastKind, ToastState, notify};

pub struct ResourceHook<R, C, N> {
    list: C,
    toasts: N,
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R, C: Clone, N: Clone> Clone for ResourceHook<R, C, N> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            toasts: self.toasts.clone(),
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

/// Hook backed by Leptos signals, as used by pages.
pub type SignalHook<R> = ResourceHook<R, RwSignal<ResourceList<R>>, RwSignal<ToastState>>;

impl<R, C, N> ResourceHook<R, C, N>
where
    R: RestResource,
    C: StateCell<ResourceList<R>>,
    N: StateCell<ToastState>,
{
    pub fn new(list: C, toasts: N, client: ApiClient) -> Self {
        Self { list, toasts, client, _resource: PhantomData }
    }

    pub fn list(&self) -> &C {
        &self.list
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn items(&self) -> Vec<R> {
        self.list.read_state(|list| list.items.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.list.read_state(|list| list.is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.list.read_state(|list| list.error.clone())
    }

    pub fn clear_error(&self) {
        self.list.update_state(ResourceList::clear_error);
    }

    /// Replace the list from `R::LIST_PATH`.
    pub async fn fetch_all(&self) -> bool {
        self.fetch_from(R::LIST_PATH).await
    }

    /// Replace the list from any endpoint returning items of `R`.
    pub async fn fetch_from(&self, path: &str) -> bool {
        self.list.update_state(ResourceList::begin);
        match self.client.get(path).await {
            Ok(payload) => {
                let items = decode_items::<R>(payload, R::LABEL);
                log::debug!("{}: loaded {} items", R::LABEL, items.len());
                self.list.update_state(|list| list.replace(items));
                true
            }
            Err(err) => {
                let message = error_message(&err);
                log::warn!("{}: list request failed: {err}", R::LABEL);
                self.list.update_state(|list| list.fail(message.clone()));
                if let Some(description) = R::load_failure_toast(&message) {
                    notify(&self.toasts, ToastKind::Error, "Erreur", Some(&description));
                }
                false
            }
        }
    }

    /// Load a single item without touching the list.
    ///
    /// # Errors
    ///
    /// Returns the request error; callers decide whether a `404` redirects.
    pub async fn fetch_one(&self, id: i64) -> Result<R, ApiError> {
        let result = match self.client.get(&R::item_path(id)).await {
            Ok(payload) => decode::<R>(payload),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            log::warn!("{} {id}: fetch failed: {err}", R::LABEL);
            let message = error_message(err);
            self.list.update_state(|list| list.error = Some(message));
        }
        result
    }

    /// POST a draft and append the created item.
    pub async fn create<D: Serialize>(&self, draft: &D) -> Option<R> {
        self.list.update_state(ResourceList::begin);
        let reply = match serde_json::to_value(draft) {
            Ok(payload) => self.client.post(R::COLLECTION_PATH, payload).await,
            Err(err) => Err(ApiError::decode(err)),
        };
        match reply.and_then(decode::<R>) {
            Ok(item) => {
                self.list.update_state(|list| list.apply_created(item.clone()));
                self.announce(Mutation::Create);
                Some(item)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Send a partial or full update and replace the item by id.
    pub async fn update<D: Serialize>(&self, id: i64, patch: &D) -> Option<R> {
        self.list.update_state(ResourceList::begin);
        let reply = match Body::from_json(patch) {
            Ok(body) => self.client.request(R::UPDATE_METHOD, &R::item_path(id), body).await,
            Err(err) => Err(err),
        };
        match reply.and_then(decode::<R>) {
            Ok(item) => {
                self.list.update_state(|list| list.apply_updated(item.clone(), R::id));
                self.announce(Mutation::Update);
                Some(item)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.list.update_state(ResourceList::begin);
        match self.client.delete(&R::item_path(id)).await {
            Ok(_) => {
                self.list.update_state(|list| list.apply_deleted(id, R::id));
                self.announce(Mutation::Delete);
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// POST to a detail action (e.g. `{id}/cancel/`) that returns the
    /// updated item, and replace it in the list.
    pub(crate) async fn apply_action(&self, path: &str, payload: Value, notice: Option<(&str, &str)>) -> Option<R> {
        self.list.update_state(ResourceList::begin);
        match self.client.post(path, payload).await.and_then(decode::<R>) {
            Ok(item) => {
                self.list.update_state(|list| list.apply_updated(item.clone(), R::id));
                if let Some((title, description)) = notice {
                    notify(&self.toasts, ToastKind::Success, title, Some(description));
                }
                Some(item)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    pub(crate) fn success(&self, title: &str, description: Option<&str>) {
        notify(&self.toasts, ToastKind::Success, title, description);
    }

    /// Record a failed call in the list state and toast it.
    pub(crate) fn report(&self, err: &ApiError) {
        let message = error_message(err);
        log::warn!("{}: request failed: {err}", R::LABEL);
        self.list.update_state(|list| list.fail(message.clone()));
        notify(&self.toasts, ToastKind::Error, "Erreur", Some(&message));
    }

    pub(crate) fn report_message(&self, message: &str) {
        self.list.update_state(|list| list.fail(message));
        notify(&self.toasts, ToastKind::Error, message, None);
    }

    fn announce(&self, mutation: Mutation) {
        if let Some((title, description)) = R::notice(mutation) {
            notify(&self.toasts, ToastKind::Success, &title, Some(&description));
        }
    }
}

/// Signal-backed hook for the current page with an empty list. Nothing is
/// fetched until the page asks.
pub fn use_resource<R: RestResource>() -> SignalHook<R> {
    let ctx = expect_context::<crate::app::PortalContext>();
    ResourceHook::new(RwSignal::new(ResourceList::default()), ctx.toasts, ctx.client.clone())
}

/// Like [`use_resource`], but fetches the list on mount in the browser.
pub fn use_collection<R: RestResource>() -> SignalHook<R> {
    let hook = use_resource::<R>();

    #[cfg(feature = "hydrate")]
    {
        let hook = hook.clone();
        leptos::task::spawn_local(async move {
            hook.fetch_all().await;
        });
    }

    hook
}
