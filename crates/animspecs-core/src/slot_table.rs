//! Slot table for positional memoization.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::composer::{Key, NodeId};

/// Shared, interior-mutable slot value handed out by `remember`.
pub struct Owned<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&borrow)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut borrow)
    }

    pub fn replace(&self, new_value: T) {
        *self.inner.borrow_mut() = new_value;
    }
}

#[derive(Default)]
enum Slot {
    #[default]
    Empty,
    Group {
        key: Key,
    },
    Node(NodeId),
    Value(Box<dyn Any>),
}

/// Flat slot storage walked by a cursor during composition.
///
/// Groups are keyed by call-site; when the key at the cursor matches, the
/// existing group (and the remembered values inside it) is reused.
#[derive(Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    cursor: usize,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, key: Key) -> usize {
        let index = self.cursor;
        if let Some(Slot::Group { key: existing }) = self.slots.get(index) {
            if *existing == key {
                self.cursor = index + 1;
                return index;
            }
        }
        self.slots.insert(index, Slot::Group { key });
        self.cursor = index + 1;
        index
    }

    pub fn end(&mut self) {
        if self.cursor < self.slots.len() {
            self.cursor += 1;
        }
    }

    pub fn record_node(&mut self, id: NodeId) {
        if self.cursor == self.slots.len() {
            self.slots.push(Slot::Node(id));
        } else {
            self.slots[self.cursor] = Slot::Node(id);
        }
        self.cursor += 1;
    }

    pub fn read_node(&mut self) -> Option<NodeId> {
        if let Some(Slot::Node(id)) = self.slots.get(self.cursor) {
            self.cursor += 1;
            Some(*id)
        } else {
            None
        }
    }

    /// Returns the value remembered at the cursor, initializing it on the
    /// first pass. Reuse requires the stored type to match.
    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Owned<T> {
        let cursor = self.cursor;
        if let Some(Slot::Value(value)) = self.slots.get(cursor) {
            if let Some(existing) = value.downcast_ref::<Owned<T>>() {
                self.cursor += 1;
                return existing.clone();
            }
        }

        let owned = Owned::new(init());
        let boxed: Box<dyn Any> = Box::new(owned.clone());
        if cursor == self.slots.len() {
            self.slots.push(Slot::Value(boxed));
        } else {
            self.slots[cursor] = Slot::Value(boxed);
        }
        self.cursor = cursor + 1;
        owned
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::location_key;

    #[test]
    fn remember_reuses_slot_across_passes() {
        let mut table = SlotTable::new();
        let key = location_key(file!(), line!(), column!());

        table.start(key);
        let first = table.remember(|| 41);
        table.end();
        first.replace(42);

        table.reset();
        table.start(key);
        let second = table.remember(|| 0);
        table.end();

        assert_eq!(second.with(|value| *value), 42);
    }

    #[test]
    fn mismatched_group_key_inserts_new_group() {
        let mut table = SlotTable::new();
        table.start(1);
        table.end();
        table.reset();
        // Different key at the same position starts a fresh group.
        let index = table.start(2);
        assert_eq!(index, 0);
    }

    #[test]
    fn node_slots_roundtrip() {
        let mut table = SlotTable::new();
        table.start(7);
        assert_eq!(table.read_node(), None);
        table.record_node(3);
        table.end();

        table.reset();
        table.start(7);
        assert_eq!(table.read_node(), Some(3));
    }
}
