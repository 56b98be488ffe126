use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;

use crate::{PanelInfo, PanelRegistration, PanelRenderer, RendererCtor};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("panel not found: {0}")]
    PanelNotFound(String),
}

#[derive(Clone)]
struct RegisteredPanel {
    renderer: RendererCtor,
    title: String,
}

type PanelListener = Arc<dyn Fn(&[PanelInfo]) + Send + Sync>;

#[derive(Default)]
struct ListenerSet {
    entries: Vec<(u64, PanelListener)>,
    next_id: u64,
}

/// Central registry for all Dockgrid panels, both built-in and those
/// contributed by discovered packages. Provides lookup, creation, and change
/// notifications so the rest of the application can stay decoupled from
/// registration timing.
///
/// Shared as `Arc<PanelRegistry>`; the interior mutex exists for shared
/// access, not concurrent mutation. Listeners run outside the lock, so a
/// subscriber may read the registry from its callback.
#[derive(Default)]
pub struct PanelRegistry {
    panels: Mutex<HashMap<String, RegisteredPanel>>,
    listeners: Arc<Mutex<ListenerSet>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a panel renderer with an optional friendly title. The most
    /// recent registration wins when duplicate names are provided. Every
    /// subscriber is notified synchronously with the updated enumeration.
    pub fn register_panel(&self, registration: PanelRegistration) {
        let snapshot = {
            let mut panels = self.panels.lock();
            let title = registration
                .title
                .unwrap_or_else(|| format_title(&registration.name));
            panels.insert(
                registration.name,
                RegisteredPanel {
                    renderer: registration.renderer,
                    title,
                },
            );
            sorted_infos(&panels)
        };
        self.notify(&snapshot);
    }

    /// Constructs a new renderer instance for a registered panel.
    pub fn create_panel(&self, name: &str) -> Result<Box<dyn PanelRenderer>, RegistryError> {
        let ctor = self.panels.lock().get(name).map(|panel| panel.renderer);
        let ctor = ctor.ok_or_else(|| RegistryError::PanelNotFound(name.to_string()))?;
        Ok(ctor())
    }

    /// Returns all registered panels sorted by display title.
    pub fn panels(&self) -> Vec<PanelInfo> {
        sorted_infos(&self.panels.lock())
    }

    /// Looks up a panel by name. `None` when no panel is registered.
    pub fn panel_info(&self, name: &str) -> Option<PanelInfo> {
        self.panels.lock().get(name).map(|panel| PanelInfo {
            name: name.to_string(),
            title: panel.title.clone(),
        })
    }

    /// Subscribes to registry changes. The listener is invoked immediately
    /// with the current panel list, then once per mutating registration, in
    /// subscription order. Dropping the returned subscription unsubscribes.
    pub fn on_panels_changed(
        &self,
        listener: impl Fn(&[PanelInfo]) + Send + Sync + 'static,
    ) -> PanelSubscription {
        let listener: PanelListener = Arc::new(listener);
        let id = {
            let mut listeners = self.listeners.lock();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::clone(&listener)));
            id
        };
        listener(&self.panels());
        PanelSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    fn notify(&self, snapshot: &[PanelInfo]) {
        let listeners: Vec<PanelListener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

/// Handle keeping a [`PanelRegistry`] subscription alive; the listener is
/// removed when this is dropped.
pub struct PanelSubscription {
    id: u64,
    listeners: Weak<Mutex<ListenerSet>>,
}

impl PanelSubscription {
    /// Removes the subscription now instead of at end of scope.
    pub fn dispose(self) {}
}

impl Drop for PanelSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .entries
                .retain(|(listener_id, _)| *listener_id != self.id);
        }
    }
}

fn sorted_infos(panels: &HashMap<String, RegisteredPanel>) -> Vec<PanelInfo> {
    let mut infos: Vec<PanelInfo> = panels
        .iter()
        .map(|(name, panel)| PanelInfo {
            name: name.clone(),
            title: panel.title.clone(),
        })
        .collect();
    infos.sort_by(|a, b| title_order(&a.title, &b.title));
    infos
}

// Case-insensitive ordering approximates locale collation; raw ordering
// breaks ties so the result is deterministic.
fn title_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Generates a readable title from a camelCase, kebab-case, or snake_case
/// name.
fn format_title(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev_is_lower = false;
    for ch in name.chars() {
        if ch == '-' || ch == '_' {
            spaced.push(' ');
            prev_is_lower = false;
            continue;
        }
        if prev_is_lower && ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        prev_is_lower = ch.is_ascii_lowercase();
        spaced.push(ch);
    }
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}
