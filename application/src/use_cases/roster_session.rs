//! Roster session orchestration
//!
//! Owns the capability probe, the fetcher, the generation token, and the
//! published snapshot; the presentation layer only ever talks to this type.

use crate::ports::directory_gateway::DirectoryGateway;
use crate::use_cases::fetch_roster::{FetchError, RosterFetcher};
use crate::use_cases::probe_capability::{CapabilityProbe, ProbeError};
use roster_domain::{CapabilityState, Person, RosterKind, RosterSnapshot, aggregate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a reload ended in the failed state.
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Lifecycle of the session's roster view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

struct Published {
    phase: SessionPhase,
    snapshot: Arc<RosterSnapshot>,
}

/// One staff view's roster session.
///
/// State is only written from the orchestrating flow; concurrent `reload`s
/// race solely on publication, which the generation counter arbitrates: the
/// newest reload wins, everything older is discarded untouched. In-flight
/// branch calls are never aborted, their output just loses the race.
pub struct RosterSession<G: DirectoryGateway + 'static> {
    probe: CapabilityProbe<G>,
    fetcher: RosterFetcher<G>,
    kind: Mutex<RosterKind>,
    generation: AtomicU64,
    published: Mutex<Published>,
}

impl<G: DirectoryGateway + 'static> RosterSession<G> {
    pub fn new(gateway: Arc<G>, kind: RosterKind) -> Self {
        Self {
            probe: CapabilityProbe::new(Arc::clone(&gateway)),
            fetcher: RosterFetcher::new(gateway),
            kind: Mutex::new(kind),
            generation: AtomicU64::new(0),
            published: Mutex::new(Published {
                phase: SessionPhase::Idle,
                snapshot: Arc::new(RosterSnapshot::default()),
            }),
        }
    }

    /// People of the current snapshot, in publication order.
    pub fn roster(&self) -> Vec<Person> {
        self.snapshot().people.clone()
    }

    /// The current snapshot, shared and immutable.
    pub fn snapshot(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.published.lock().unwrap().snapshot)
    }

    pub fn phase(&self) -> SessionPhase {
        self.published.lock().unwrap().phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == SessionPhase::Loading
    }

    pub fn has_failed(&self) -> bool {
        self.phase() == SessionPhase::Failed
    }

    pub fn capability(&self) -> CapabilityState {
        self.probe.state()
    }

    pub fn kind(&self) -> RosterKind {
        *self.kind.lock().unwrap()
    }

    /// Filter the current snapshot; see [`RosterSnapshot::filter`].
    pub fn filter(&self, term: &str) -> Vec<Person> {
        self.snapshot().filter(term)
    }

    /// Switch the view to another population. Resets the session capability,
    /// forcing a re-probe on the next reload, and invalidates in-flight
    /// reloads. No-op when the kind is unchanged.
    pub fn switch_role(&self, kind: RosterKind) {
        {
            let mut current = self.kind.lock().unwrap();
            if *current == kind {
                return;
            }
            *current = kind;
        }
        self.probe.reset();
        self.generation.fetch_add(1, Ordering::SeqCst);
        info!("switched roster view to {kind}, capability reset");
    }

    /// Load the roster once: probe, fetch, aggregate, publish.
    ///
    /// If a newer reload starts before this one finishes, this result is
    /// discarded silently: no snapshot, no phase transition.
    pub async fn reload(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = self.kind();
        self.published.lock().unwrap().phase = SessionPhase::Loading;
        debug!("reload generation {generation} ({kind}) started");

        let outcome = self.load(kind).await;

        let mut published = self.published.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("reload generation {generation} superseded, discarding result");
            return;
        }

        match outcome {
            Ok(people) => {
                info!(
                    "reload generation {generation} published {} people",
                    people.len()
                );
                published.snapshot = Arc::new(RosterSnapshot::ready(generation, people));
                published.phase = SessionPhase::Ready;
            }
            Err(err) => {
                warn!("reload generation {generation} failed: {err}");
                // keep showing the last successfully loaded people
                let last_good = published.snapshot.people.clone();
                published.snapshot = Arc::new(RosterSnapshot::failed(generation, last_good));
                published.phase = SessionPhase::Failed;
            }
        }
    }

    async fn load(&self, kind: RosterKind) -> Result<Vec<Person>, ReloadError> {
        let state = self.probe.probe(kind).await?;
        let branches = self.fetcher.fetch(state, kind).await?;
        Ok(aggregate(&branches))
    }
}
