//! Frame scheduling runtime.

use std::cell::Cell;
use std::rc::Rc;

struct RuntimeInner {
    needs_frame: Cell<bool>,
}

/// Owner side of the frame request flag.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                needs_frame: Cell::new(true),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Consumes a pending frame request, if any.
    pub fn take_frame_request(&self) -> bool {
        self.inner.needs_frame.replace(false)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle given to state holders so writes can schedule a frame.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn request_frame(&self) {
        self.inner.needs_frame.set(true);
    }
}

/// Runtime wrapper used by the app shell: merges frame requests coming from
/// state writes with requests the shell raises itself (e.g. while an
/// animation is still settling).
pub struct StdRuntime {
    runtime: Runtime,
    frame_requested: Cell<bool>,
}

impl StdRuntime {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            frame_requested: Cell::new(false),
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn request_frame(&self) {
        self.frame_requested.set(true);
    }

    pub fn take_frame_request(&self) -> bool {
        let from_shell = self.frame_requested.replace(false);
        from_shell || self.runtime.take_frame_request()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_frame_is_requested() {
        let runtime = Runtime::new();
        assert!(runtime.take_frame_request());
        assert!(!runtime.take_frame_request());
    }

    #[test]
    fn handle_requests_reach_the_owner() {
        let runtime = Runtime::new();
        let _ = runtime.take_frame_request();
        runtime.handle().request_frame();
        assert!(runtime.take_frame_request());
    }

    #[test]
    fn shell_requests_merge_with_state_requests() {
        let std_runtime = StdRuntime::new();
        let _ = std_runtime.take_frame_request();
        std_runtime.request_frame();
        assert!(std_runtime.take_frame_request());
        assert!(!std_runtime.take_frame_request());
    }
}
