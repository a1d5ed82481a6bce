//! Cooperative Cancellation
//!
//! Each outbound request gets a `CancelHandle` tagged with a generation.
//! Aborting the handle drops the request future at its next poll; the
//! completion path re-checks the handle before touching state.

use std::future::Future;

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::catalog::CatalogError;

/// Handle for one in-flight request
#[derive(Debug, Clone)]
pub struct CancelHandle {
    handle: AbortHandle,
    generation: u64,
}

impl CancelHandle {
    pub fn new(generation: u64) -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self { handle, generation }, registration)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the newest request of one kind (search or detail)
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
    current: Option<CancelHandle>,
}

impl RequestSlot {
    /// Cancel whatever is in flight and open a new generation
    pub fn begin(&mut self) -> (CancelHandle, AbortRegistration) {
        self.cancel();
        self.generation += 1;
        let (handle, registration) = CancelHandle::new(self.generation);
        self.current = Some(handle.clone());
        (handle, registration)
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    /// A reply may only be applied while its handle is the live one
    pub fn is_current(&self, handle: &CancelHandle) -> bool {
        !handle.is_cancelled() && handle.generation == self.generation
    }

    /// Release the slot once the current request settled
    pub fn finish(&mut self, handle: &CancelHandle) {
        if self.is_current(handle) {
            self.current = None;
        }
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

/// Run `request` until it completes or its registration is aborted
pub async fn run_cancellable<T, F>(registration: AbortRegistration, request: F) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    match Abortable::new(request, registration).await {
        Ok(result) => result,
        Err(_aborted) => Err(CatalogError::Cancelled),
    }
}
