//! Last-write-wins publication of evaluation passes.
//!
//! A front end that evaluates off the input thread may finish passes out of
//! order. Each pass takes a ticket from [`PreviewSession::begin`]; only the
//! most recently begun pass may publish, so a slow stale pass can never
//! overwrite a newer result.

use crate::engine::DetectionEngine;
use crate::schema::ResultSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Generation number of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Published {
    generation: u64,
    results: ResultSet,
}

pub struct PreviewSession {
    engine: DetectionEngine,
    latest_begun: AtomicU64,
    published: Mutex<Published>,
}

impl PreviewSession {
    pub fn new(engine: DetectionEngine) -> Self {
        Self {
            engine,
            latest_begun: AtomicU64::new(0),
            published: Mutex::new(Published {
                generation: 0,
                results: ResultSet::empty(),
            }),
        }
    }

    pub fn engine(&self) -> &DetectionEngine {
        &self.engine
    }

    /// Start a new pass. Any pass begun earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest_begun.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish a pass's results. Returns `false`, dropping the results, when
    /// a newer pass has begun since `ticket` was issued.
    pub fn publish(&self, ticket: Ticket, results: ResultSet) -> bool {
        let mut published = self.lock();
        if ticket.0 != self.latest_begun.load(Ordering::SeqCst) || ticket.0 <= published.generation
        {
            trace!(generation = ticket.0, "dropping stale pass");
            return false;
        }
        published.generation = ticket.0;
        published.results = results;
        true
    }

    /// Begin, evaluate and publish in one step.
    pub fn submit(&self, input: &str) -> bool {
        let ticket = self.begin();
        let results = self.engine.evaluate(input);
        self.publish(ticket, results)
    }

    /// The most recently published result set.
    pub fn latest(&self) -> ResultSet {
        self.lock().results.clone()
    }

    /// Generation of the most recently published result set, 0 if none.
    pub fn published_generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> MutexGuard<'_, Published> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
