use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::debug;

use crate::{
    error::SettingsError,
    schema::{SettingName, SettingValue},
    settings::Settings,
    store::{ClientSettingsStore, WriteOutcome},
};

type SettingsListener = Rc<dyn Fn(&Settings)>;

struct ContainerState {
    store: ClientSettingsStore,
    current: RefCell<Settings>,
    listeners: RefCell<Vec<(usize, SettingsListener)>>,
    next_listener_id: Cell<usize>,
}

/// Shared in-memory settings, hydrated from the store by its subscribers.
///
/// Cloning the container shares the same state. It starts with the schema
/// defaults and lives as long as one of its clones or subscribers does.
#[derive(Clone)]
pub struct SettingsContainer {
    state: Rc<ContainerState>,
}

impl SettingsContainer {
    pub fn new(store: ClientSettingsStore) -> Self {
        Self {
            state: Rc::new(ContainerState {
                store,
                current: RefCell::new(Settings::default()),
                listeners: RefCell::new(vec![]),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    pub fn store(&self) -> &ClientSettingsStore {
        &self.state.store
    }

    pub fn current(&self) -> Settings {
        self.state.current.borrow().clone()
    }

    pub fn subscribers_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Registers `listener`, called with the new settings on every publish
    pub fn subscribe<F>(&self, listener: F) -> SettingsSubscriber
    where
        F: Fn(&Settings) + 'static,
    {
        let id = self.state.next_listener_id.get();
        self.state.next_listener_id.set(id + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        SettingsSubscriber {
            container: self.clone(),
            id,
            is_loaded: Cell::new(false),
        }
    }

    fn unsubscribe(&self, id: usize) {
        self.state
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn publish(&self, settings: Settings) {
        *self.state.current.borrow_mut() = settings.clone();
        // Listeners may subscribe or unsubscribe while being notified
        let listeners: Vec<SettingsListener> = self
            .state
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&settings);
        }
    }
}

/// A consumer of the shared settings, unregistered when dropped
pub struct SettingsSubscriber {
    container: SettingsContainer,
    id: usize,
    is_loaded: Cell<bool>,
}

impl SettingsSubscriber {
    pub fn settings(&self) -> Settings {
        self.container.current()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded.get()
    }

    /// Loads the persisted settings and publishes them, once per subscriber
    pub fn load(&self) {
        if self.is_loaded.get() {
            return;
        }
        let settings = self.container.store().load_settings();
        debug!("Loaded settings: {settings:?}");
        self.container.publish(settings);
        self.is_loaded.set(true);
    }

    /// Publishes the new value to every subscriber, then persists it.
    ///
    /// Values not allowed by the schema are neither published nor persisted. A
    /// persistence failure is returned but the published value is kept.
    pub fn set_setting_value(
        &self,
        name: SettingName,
        value: SettingValue,
    ) -> Result<WriteOutcome, SettingsError> {
        let current = self.container.current();
        if *current.get(name) == value {
            return Ok(WriteOutcome::Unchanged);
        }
        let Some(updated) = current.with(name, value.clone()) else {
            debug!("Ignoring value `{value}` not allowed for setting `{name}`");
            return Ok(WriteOutcome::Rejected);
        };

        self.container.publish(updated);
        self.container.store().set_setting(name, value)
    }
}

impl Drop for SettingsSubscriber {
    fn drop(&mut self) {
        self.container.unsubscribe(self.id);
    }
}
