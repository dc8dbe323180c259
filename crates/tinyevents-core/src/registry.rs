//! Handler storage keyed by event type
//!
//! Each event type owns a list of handlers kept sorted by descending
//! priority. A side index maps every [`HandlerId`] to the event type it was
//! registered for, so removal never has to scan all lists.

use crate::{Event, EventKey, Handler, HandlerId, HandlerInfo, Priority};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;

/// A registered handler together with its ordering data
pub(crate) struct Entry<E: Event> {
    pub id: HandlerId,
    pub priority: Priority,
    pub name: String,
    pub handler: Box<dyn Handler<E>>,
}

impl<E: Event> Entry<E> {
    fn info(&self) -> HandlerInfo {
        HandlerInfo {
            id: self.id,
            priority: self.priority,
            name: self.name.clone(),
        }
    }
}

/// Sorted handlers of a single event type
pub(crate) struct HandlerList<E: Event> {
    entries: Vec<Entry<E>>,
}

impl<E: Event> HandlerList<E> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert after every entry with the same or a higher priority
    fn insert(&mut self, entry: Entry<E>) {
        let at = self
            .entries
            .partition_point(|e| e.priority >= entry.priority);
        self.entries.insert(at, entry);
    }

    pub fn entries_mut(&mut self) -> &mut [Entry<E>] {
        &mut self.entries
    }
}

/// Type-erased view of a [`HandlerList`]
trait ErasedList: Send {
    fn len(&self) -> usize;
    fn remove(&mut self, id: HandlerId) -> bool;
    fn infos(&self) -> Vec<HandlerInfo>;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> ErasedList for HandlerList<E> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove(&mut self, id: HandlerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn infos(&self) -> Vec<HandlerInfo> {
        self.entries.iter().map(Entry::info).collect()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// All handler registrations of one bus
pub(crate) struct Registry {
    lists: IndexMap<EventKey, Box<dyn ErasedList>>,
    owners: HashMap<HandlerId, EventKey>,
    next_id: u64,
}

impl Registry {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lists: IndexMap::with_capacity(capacity),
            owners: HashMap::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Add a handler for `E` and return its new ID
    pub fn insert<E: Event>(
        &mut self,
        priority: Priority,
        handler: Box<dyn Handler<E>>,
    ) -> HandlerId {
        let id = HandlerId::new(self.next_id);
        self.next_id += 1;

        let key = EventKey::of::<E>();
        let entry = Entry {
            id,
            priority,
            name: handler.name().to_string(),
            handler,
        };

        let list = self
            .lists
            .entry(key)
            .or_insert_with(|| Box::new(HandlerList::<E>::new()));
        match list.as_any_mut().downcast_mut::<HandlerList<E>>() {
            Some(list) => list.insert(entry),
            None => unreachable!("handler list stored under the wrong event key"),
        }
        self.owners.insert(id, key);

        id
    }

    /// Remove a handler; returns the event type it was registered for
    ///
    /// Event types left without handlers are dropped from the registry.
    pub fn remove(&mut self, id: HandlerId) -> Option<EventKey> {
        let key = self.owners.remove(&id)?;
        let list = self.lists.get_mut(&key)?;
        if !list.remove(id) {
            return None;
        }
        if list.len() == 0 {
            self.lists.shift_remove(&key);
        }
        Some(key)
    }

    /// Mutable access to the handler list for `E`
    pub fn list_mut<E: Event>(&mut self) -> Option<&mut HandlerList<E>> {
        self.lists
            .get_mut(&EventKey::of::<E>())
            .and_then(|list| list.as_any_mut().downcast_mut::<HandlerList<E>>())
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn handler_count(&self, key: &EventKey) -> usize {
        self.lists.get(key).map_or(0, |list| list.len())
    }

    pub fn infos(&self, key: &EventKey) -> Vec<HandlerInfo> {
        self.lists
            .get(key)
            .map(|list| list.infos())
            .unwrap_or_default()
    }

    pub fn event_types(&self) -> impl Iterator<Item = &EventKey> {
        self.lists.keys()
    }

    pub fn event_type_count(&self) -> usize {
        self.lists.len()
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.owners.clear();
    }
}
