//! Observable map of decoded containers, keyed by the locator they were
//! requested with.

use mtsp_schema::Container;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, RwLock};
use url::Url;

/// Change notification delivered to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Published { locator: Url, container: Container },
    Removed { locator: Url },
    Cleared,
}

#[derive(Default)]
pub struct ContainerStore {
    containers: RwLock<HashMap<Url, Container>>,
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl ContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locator: &Url) -> Option<Container> {
        let containers = self.containers.read().expect("container store lock poisoned");
        containers.get(locator).cloned()
    }

    pub fn contains(&self, locator: &Url) -> bool {
        let containers = self.containers.read().expect("container store lock poisoned");
        containers.contains_key(locator)
    }

    pub fn len(&self) -> usize {
        self.containers
            .read()
            .expect("container store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Requested locators currently held, sorted.
    pub fn locators(&self) -> Vec<Url> {
        let containers = self.containers.read().expect("container store lock poisoned");
        let mut locators: Vec<Url> = containers.keys().cloned().collect();
        locators.sort();
        locators
    }

    /// A point-in-time copy of the whole store.
    pub fn snapshot(&self) -> HashMap<Url, Container> {
        self.containers
            .read()
            .expect("container store lock poisoned")
            .clone()
    }

    /// Receive every change made after this call.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next
    /// change.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.subscribers
            .lock()
            .expect("container store lock poisoned")
            .push(tx);
        rx
    }

    /// Insert or replace the container for `locator` and notify subscribers.
    ///
    /// The write lock is held until subscribers are notified, so events are
    /// delivered in the order the changes were applied.
    pub fn publish(&self, locator: Url, container: Container) {
        let mut containers = self.containers.write().expect("container store lock poisoned");
        containers.insert(locator.clone(), container.clone());
        tracing::debug!("published container for {locator}");
        self.notify(&StoreEvent::Published { locator, container });
    }

    pub fn remove(&self, locator: &Url) -> Option<Container> {
        let mut containers = self.containers.write().expect("container store lock poisoned");
        let removed = containers.remove(locator);
        if removed.is_some() {
            self.notify(&StoreEvent::Removed {
                locator: locator.clone(),
            });
        }
        removed
    }

    pub fn clear(&self) {
        let mut containers = self.containers.write().expect("container store lock poisoned");
        containers.clear();
        self.notify(&StoreEvent::Cleared);
    }

    fn notify(&self, event: &StoreEvent) {
        let mut subscribers = self.subscribers.lock().expect("container store lock poisoned");
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
