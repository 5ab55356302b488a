use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::customer::{ApiError, CustomerCollection};
use crate::domain::ports::DirectoryApi;

/// What the directory area shows at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The first read is in flight and nothing has been received yet.
    Loading,
    /// No read has succeeded and the latest one failed.
    Error(ApiError),
    Ready(CustomerCollection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub state: LoadState,
    /// A read request is in flight.
    pub validating: bool,
    /// Failure of the latest read when earlier data was kept on screen.
    pub last_error: Option<ApiError>,
}

impl Default for DirectorySnapshot {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            validating: false,
            last_error: None,
        }
    }
}

impl DirectorySnapshot {
    pub fn customers(&self) -> Option<&CustomerCollection> {
        match &self.state {
            LoadState::Ready(customers) => Some(customers),
            _ => None,
        }
    }
}

/// Owns the customer list fetched from the directory endpoint.
///
/// Every read takes a ticket from a monotonically increasing sequence. When a
/// read resolves, its result is applied only if no newer read was issued in the
/// meantime, so the snapshot always reflects the latest issued request.
pub struct DirectoryStore<A> {
    api: Arc<A>,
    issued: AtomicU64,
    snapshot: watch::Sender<DirectorySnapshot>,
}

impl<A: DirectoryApi> DirectoryStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (snapshot, _) = watch::channel(DirectorySnapshot::default());
        Self {
            api,
            issued: AtomicU64::new(0),
            snapshot,
        }
    }

    /// Issues a read and returns the state once it has been applied (or discarded).
    pub async fn load(&self) -> LoadState {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot.send_modify(|snapshot| {
            snapshot.validating = true;
            if !matches!(snapshot.state, LoadState::Ready(_)) {
                snapshot.state = LoadState::Loading;
            }
        });
        log::debug!("directory read #{} issued", ticket);

        let mut guard = ReadGuard {
            snapshot: &self.snapshot,
            issued: &self.issued,
            ticket,
            armed: true,
        };
        let result = self.api.list_customers().await;
        guard.armed = false;

        if ticket != self.issued.load(Ordering::SeqCst) {
            log::debug!("directory read #{} superseded, discarding its result", ticket);
            return self.state();
        }

        self.snapshot.send_modify(|snapshot| {
            snapshot.validating = false;
            match result {
                Ok(customers) => {
                    log::debug!("directory read #{} returned {} customers", ticket, customers.len());
                    snapshot.state = LoadState::Ready(customers);
                    snapshot.last_error = None;
                }
                Err(e) => {
                    let error = e.to_api_error();
                    if matches!(snapshot.state, LoadState::Ready(_)) {
                        log::warn!("directory revalidation failed, keeping previous data: {}", error);
                        snapshot.last_error = Some(error);
                    } else {
                        log::warn!("directory read failed: {}", error);
                        snapshot.state = LoadState::Error(error);
                        snapshot.last_error = None;
                    }
                }
            }
        });
        self.state()
    }

    /// Re-issues the read. Data already on screen stays visible while it runs.
    pub async fn revalidate(&self) -> LoadState {
        self.load().await
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> LoadState {
        self.snapshot.borrow().state.clone()
    }

    /// Receiver notified on every change of the snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DirectorySnapshot> {
        self.snapshot.subscribe()
    }
}

/// Clears `validating` when a read future is dropped before its result lands.
struct ReadGuard<'a> {
    snapshot: &'a watch::Sender<DirectorySnapshot>,
    issued: &'a AtomicU64,
    ticket: u64,
    armed: bool,
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        if !self.armed || self.issued.load(Ordering::SeqCst) != self.ticket {
            return;
        }
        log::debug!("directory read #{} dropped before completion", self.ticket);
        self.snapshot
            .send_if_modified(|snapshot| std::mem::replace(&mut snapshot.validating, false));
    }
}
