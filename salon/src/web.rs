//! Browser surface: a [`Session`] backed by `localStorage`, exported with
//! `wasm-bindgen`.
//!
//! Events and results cross the boundary as JSON strings using the same serde
//! shapes as the native host, so the page never needs generated bindings for
//! the rules types. Requires a browser environment.

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::event::Event;
use crate::session::{Outcome, Session};
use crate::storage::{StorageBridge, StorageError};

// =============================================================================
// LOCAL STORAGE BRIDGE
// =============================================================================

/// [`StorageBridge`] over the window's `localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the current window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] outside a browser window or when
    /// storage access is denied.
    pub fn from_window() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Backend("no window".into()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Backend("localStorage unavailable".into()))?;
        Ok(Self { inner })
    }
}

impl StorageBridge for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, blob).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

// =============================================================================
// WEB GAME
// =============================================================================

/// One game session for the page.
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorage>,
}

#[wasm_bindgen]
impl WebGame {
    /// Load the catalog and resume whatever `localStorage` holds.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<WebGame, JsError> {
        let catalog = Catalog::from_json(catalog_json)?;
        let storage = LocalStorage::from_window()?;
        Ok(Self { session: Session::hydrate(catalog, storage) })
    }

    /// Apply one JSON-encoded event and return the report as JSON.
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsError> {
        let event: Event = serde_json::from_str(event_json)?;
        let outcomes = self.session.dispatch(event, now_ms());
        self.render(outcomes)
    }

    /// Advance the timer. Call every `TICK_INTERVAL_MS`.
    pub fn tick(&mut self, delta_ms: u32) {
        self.session.dispatch(Event::Tick { delta_ms: u64::from(delta_ms) }, now_ms());
    }

    /// The current report with no outcomes.
    pub fn snapshot(&self) -> Result<String, JsError> {
        self.render(Vec::new())
    }

    /// The level picker as JSON.
    pub fn levels(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.levels())?)
    }

    #[wasm_bindgen(js_name = isLevelLocked)]
    pub fn is_level_locked(&self, index: usize) -> bool {
        self.session.is_level_locked(index)
    }
}

impl WebGame {
    fn render(&self, outcomes: Vec<Outcome>) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.report(outcomes))?)
    }
}
