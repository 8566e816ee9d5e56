//! Single-owner handle slot and operation guard

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

/// Holds at most one handle, tagged with the id of the session it serves.
///
/// `fill` refuses to overwrite an occupied slot, so a new handle can only be
/// installed after the previous one was taken out and released.
pub struct HandleSlot<H> {
    inner: Mutex<Option<(u64, H)>>,
}

impl<H> HandleSlot<H> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub async fn is_occupied(&self) -> bool {
        self.inner.lock().await.is_some()
    }

    #[cfg(test)]
    /// Id of the held handle, if any
    pub async fn held_id(&self) -> Option<u64> {
        self.inner.lock().await.as_ref().map(|(id, _)| *id)
    }

    /// Install a handle. Gives the handle back if the slot is occupied.
    pub async fn fill(&self, id: u64, handle: H) -> Result<(), H> {
        let mut inner = self.inner.lock().await;
        if inner.is_some() {
            return Err(handle);
        }
        *inner = Some((id, handle));
        Ok(())
    }

    /// Take the handle out, whatever session it belongs to
    pub async fn take(&self) -> Option<H> {
        self.inner.lock().await.take().map(|(_, handle)| handle)
    }

    /// Take the handle out only if it belongs to session `id`
    pub async fn take_if(&self, id: u64) -> Option<H> {
        let mut inner = self.inner.lock().await;
        match inner.as_ref() {
            Some((held, _)) if *held == id => inner.take().map(|(_, handle)| handle),
            _ => None,
        }
    }
}

impl<H> Default for HandleSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Allows one operation at a time; a second one is rejected, never queued.
#[derive(Debug, Default)]
pub struct OperationGuard {
    busy: AtomicBool,
}

impl OperationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard, or None if another operation is in flight
    pub fn try_begin(&self) -> Option<OperationPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| OperationPermit { guard: self })
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the guard on drop
#[derive(Debug)]
pub struct OperationPermit<'a> {
    guard: &'a OperationGuard,
}

impl Drop for OperationPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
