//! One-shot, process-wide value holder

use std::sync::{Mutex, OnceLock, PoisonError};

/// A value built at most once and then shared read-only.
///
/// Concurrent callers of [`Shared::get_or_try_init`] block until the first
/// caller finishes; all of them then see the same value. A failed
/// initialization leaves the cell empty.
///
/// ```
/// use backman_config::Shared;
///
/// static ANSWER: Shared<u32> = Shared::new();
///
/// let value = ANSWER.get_or_try_init(|| Ok::<_, ()>(42)).unwrap();
/// assert_eq!(*value, 42);
/// ```
#[derive(Debug)]
pub struct Shared<T> {
    cell: OnceLock<T>,
    init_lock: Mutex<()>,
}

impl<T> Shared<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// The value, if it has been built.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the value, building it with `init` on first use.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished while we waited
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        let value = init()?;
        Ok(self.cell.get_or_init(|| value))
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::new()
    }
}
