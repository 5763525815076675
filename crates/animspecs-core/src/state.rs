//! Observable state for composition.

use std::cell::RefCell;
use std::rc::Rc;

use crate::composer::with_current_composer;
use crate::runtime::RuntimeHandle;
use crate::slot_table::Owned;

#[derive(Clone)]
struct StateRecord<T: Clone> {
    value: T,
}

/// Append-only record list; the last record is the current value.
struct SnapshotState<T: Clone> {
    records: RefCell<Vec<StateRecord<T>>>,
}

impl<T: Clone> SnapshotState<T> {
    fn new(initial: T) -> Self {
        Self {
            records: RefCell::new(vec![StateRecord { value: initial }]),
        }
    }

    fn get(&self) -> T {
        self.records
            .borrow()
            .last()
            .map(|record| record.value.clone())
            .expect("state has no records")
    }

    fn set(&self, new_value: T) {
        self.records.borrow_mut().push(StateRecord { value: new_value });
    }
}

/// Observable value; every write schedules a new frame through the runtime.
#[derive(Clone)]
pub struct MutableState<T: Clone> {
    state: Rc<SnapshotState<T>>,
    runtime: RuntimeHandle,
}

impl<T: Clone> MutableState<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(SnapshotState::new(initial)),
            runtime,
        }
    }

    pub fn get(&self) -> T {
        self.state.get()
    }

    pub fn set(&self, value: T) {
        self.state.set(value);
        self.runtime.request_frame();
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut value = self.state.get();
        let result = f(&mut value);
        self.state.set(value);
        self.runtime.request_frame();
        result
    }
}

/// Remembers a value across recompositions at the current slot position.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    with_current_composer(|composer| composer.remember(init))
}

/// Creates observable state bound to the current runtime.
pub fn mutableStateOf<T: Clone + 'static>(initial: T) -> MutableState<T> {
    with_current_composer(|composer| composer.mutable_state_of(initial))
}

/// `remember { mutableStateOf(init()) }` in one call.
pub fn useState<T: Clone + 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    remember(|| mutableStateOf(init())).with(|state| state.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    #[test]
    fn set_requests_a_frame() {
        let runtime = Runtime::new();
        let _ = runtime.take_frame_request();
        let state = MutableState::new(0, runtime.handle());
        state.set(1);
        assert!(runtime.take_frame_request());
        assert_eq!(state.get(), 1);
    }

    #[test]
    fn update_sees_latest_value() {
        let runtime = Runtime::new();
        let state = MutableState::new(10, runtime.handle());
        state.update(|value| *value += 5);
        state.update(|value| *value *= 2);
        assert_eq!(state.get(), 30);
    }

    #[test]
    fn clones_share_the_same_records() {
        let runtime = Runtime::new();
        let state = MutableState::new(String::from("a"), runtime.handle());
        let alias = state.clone();
        alias.set(String::from("ab"));
        assert_eq!(state.get(), "ab");
    }
}
