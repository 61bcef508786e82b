use std::cell::Cell;
use std::rc::Rc;

/// Suppresses scroll handling while a pointer or touch interaction is in progress.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    depth: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_input_session(&self) -> InputSession {
        self.depth.set(self.depth.get() + 1);
        InputSession {
            depth: self.depth.clone(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.depth.get() > 0
    }
}

/// Holds the lock until ended or dropped.
#[must_use = "the session ends as soon as it is dropped"]
#[derive(Debug)]
pub struct InputSession {
    depth: Rc<Cell<usize>>,
}

impl InputSession {
    pub fn end(self) {}
}

impl Drop for InputSession {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_nest_and_release() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());

        let outer = lock.begin_input_session();
        let inner = lock.begin_input_session();
        assert!(lock.is_locked());

        inner.end();
        assert!(lock.is_locked());
        drop(outer);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_session_released_on_unwind() {
        let lock = ScrollLock::new();
        let cloned = lock.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = cloned.begin_input_session();
            panic!("interaction aborted");
        }));
        assert!(result.is_err());
        assert!(!lock.is_locked());
    }
}
