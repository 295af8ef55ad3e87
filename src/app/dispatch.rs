// src/app/dispatch.rs

use crate::api::{FetchError, ListingApi};
use crate::domain::{LatLng, Listing, ListingId};
use crate::map::{PositionError, PositionRequest, PositionSource, Session};
use std::cell::Cell;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

pub type Generation = u64;

/// Tags collection requests so only the newest one may update the page.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: Generation,
}

impl RequestGeneration {
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    All,
    Search,
}

/// Result of background work, applied on the UI thread.
#[derive(Debug)]
pub enum Completion {
    Listings {
        generation: Generation,
        kind: LoadKind,
        result: Result<Vec<Listing>, FetchError>,
    },
    Detail {
        id: ListingId,
        result: Result<Listing, FetchError>,
    },
    Position {
        session: Session,
        result: Result<LatLng, PositionError>,
    },
}

/// Runs blocking I/O on worker threads and queues the completions for the
/// owner to apply. Nothing is cancelled; every job eventually reports back.
pub struct Dispatcher {
    api: Arc<dyn ListingApi>,
    positions: Arc<dyn PositionSource>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    pending: Cell<usize>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn ListingApi>, positions: Arc<dyn PositionSource>) -> Self {
        let (tx, rx) = channel();
        Self {
            api,
            positions,
            tx,
            rx,
            pending: Cell::new(0),
        }
    }

    fn spawn<F>(&self, name: &str, job: F)
    where
        F: FnOnce() -> Completion + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                // The receiver only disappears when the app is dropped.
                let _ = tx.send(job());
            });

        match spawned {
            Ok(_) => self.pending.set(self.pending.get() + 1),
            Err(e) => error!(job = name, error = %e, "failed to spawn worker"),
        }
    }

    pub fn fetch_all(&self, generation: Generation) {
        let api = Arc::clone(&self.api);
        self.spawn("fetch-all", move || Completion::Listings {
            generation,
            kind: LoadKind::All,
            result: api.fetch_all(),
        });
    }

    pub fn search(&self, generation: Generation, query: String) {
        let api = Arc::clone(&self.api);
        self.spawn("search", move || Completion::Listings {
            generation,
            kind: LoadKind::Search,
            result: api.search(&query),
        });
    }

    pub fn fetch_detail(&self, id: ListingId) {
        let api = Arc::clone(&self.api);
        self.spawn("fetch-detail", move || Completion::Detail {
            id,
            result: api.fetch_one(id),
        });
    }

    /// Jobs started but not yet handed back through `try_next`/`next_blocking`.
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    fn received(&self, completion: Completion) -> Completion {
        self.pending.set(self.pending.get().saturating_sub(1));
        completion
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.rx.try_recv().ok().map(|c| self.received(c))
    }

    /// Blocks until a job finishes. `None` when nothing is in flight.
    #[cfg(test)]
    pub fn next_blocking(&self) -> Option<Completion> {
        if self.pending() == 0 {
            return None;
        }
        match self.rx.recv() {
            Ok(c) => Some(self.received(c)),
            Err(_) => {
                debug!("completion channel closed");
                None
            }
        }
    }

    /// Like `next_blocking`, but gives up after `timeout`.
    pub fn next_within(&self, timeout: Duration) -> Option<Completion> {
        if self.pending() == 0 {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(c) => Some(self.received(c)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("completion channel closed");
                None
            }
        }
    }
}

impl PositionRequest for Dispatcher {
    fn request_position(&self, session: Session) {
        let positions = Arc::clone(&self.positions);
        self.spawn("position", move || Completion::Position {
            session,
            result: positions.current_position(),
        });
    }
}
