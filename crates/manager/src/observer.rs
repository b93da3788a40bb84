//! Observer lifecycle: live subscriptions, update diffing and weak-owner
//! self-cleanup.

use entitle_domain::{AuthorizationStatus, Environment, Offer, Target};
use fxhash::FxHashMap;
use std::any::Any;
use std::sync::{Arc, Weak};
use tracing::trace;

/// An authorization-status update: every observed target mapped to its
/// current aggregated status.
pub type StatusUpdate = FxHashMap<Target, AuthorizationStatus>;

/// An offers update: every observed target mapped to its current offer list,
/// `None` while no provider has supplied data yet.
pub type OffersUpdate = FxHashMap<Target, Option<Vec<Offer>>>;

/// A weak reference to the context owning a subscription. When the owner is
/// dropped, the subscription is deregistered on the next evaluation cycle
/// without a final callback.
pub type OwnerRef = Weak<dyn Any + Send + Sync>;

/// Derives an [`OwnerRef`] from any shared owning context.
pub fn owner_ref<T: Any + Send + Sync>(owner: &Arc<T>) -> OwnerRef {
    let weak: Weak<T> = Arc::downgrade(owner);
    weak
}

/// Opaque handle to a registered observer, used with
/// [`Manager::stop_observer`](crate::Manager::stop_observer).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObserverHandle {
    pub(crate) id: u64,
}

/// Shared so a handler can be invoked after the registry lock is released.
pub(crate) type StatusHandler = Arc<dyn Fn(&StatusUpdate) + Send + Sync>;
pub(crate) type OffersHandler = Arc<dyn Fn(&OffersUpdate) + Send + Sync>;

pub(crate) enum ObserverKind {
    Status {
        handler: StatusHandler,
        last_seen: Option<StatusUpdate>,
    },
    Offers {
        handler: OffersHandler,
        last_seen: Option<OffersUpdate>,
    },
}

impl std::fmt::Debug for ObserverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { last_seen, .. } => {
                f.debug_struct("Status").field("last_seen", last_seen).finish_non_exhaustive()
            },
            Self::Offers { last_seen, .. } => {
                f.debug_struct("Offers").field("last_seen", last_seen).finish_non_exhaustive()
            },
        }
    }
}

/// A live subscription: interest set, optional environment, update handler
/// and an optional weak owner.
#[derive(Debug)]
pub(crate) struct Observer {
    pub(crate) id: u64,
    pub(crate) targets: Vec<Target>,
    /// Status observers resolve relative to one environment; offer observers
    /// carry none.
    pub(crate) environment: Option<Environment>,
    pub(crate) owner: Option<OwnerRef>,
    pub(crate) kind: ObserverKind,
}

impl Observer {
    /// Whether the owning context (if any) is still alive.
    pub(crate) fn owner_alive(&self) -> bool {
        self.owner.as_ref().is_none_or(|owner| owner.strong_count() > 0)
    }

    /// Records a fresh status map and, if it differs from the last one seen
    /// (or is the initial update), returns the handler to invoke.
    ///
    /// The caller fires the returned handler after releasing the registry
    /// lock, so a blocking or re-entrant handler cannot wedge the registry.
    pub(crate) fn stage_status(&mut self, fresh: &StatusUpdate) -> Option<StatusHandler> {
        let ObserverKind::Status { handler, last_seen } = &mut self.kind else {
            return None;
        };
        if last_seen.as_ref() == Some(fresh) {
            return None;
        }
        trace!(observer = self.id, "Delivering authorization status update");
        *last_seen = Some(fresh.clone());
        Some(handler.clone())
    }

    /// Records a fresh offers map and, if it differs from the last one seen
    /// (or is the initial update), returns the handler to invoke.
    pub(crate) fn stage_offers(&mut self, fresh: &OffersUpdate) -> Option<OffersHandler> {
        let ObserverKind::Offers { handler, last_seen } = &mut self.kind else {
            return None;
        };
        if last_seen.as_ref() == Some(fresh) {
            return None;
        }
        trace!(observer = self.id, "Delivering offers update");
        *last_seen = Some(fresh.clone());
        Some(handler.clone())
    }
}

/// Exclusive owner of all [`Observer`] instances.
#[derive(Debug, Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<Observer>,
    next_id: u64,
}

impl ObserverRegistry {
    pub(crate) fn insert(
        &mut self,
        targets: Vec<Target>,
        environment: Option<Environment>,
        owner: Option<OwnerRef>,
        kind: ObserverKind,
    ) -> ObserverHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push(Observer { id, targets, environment, owner, kind });
        trace!(observer = id, "Observer registered");
        ObserverHandle { id }
    }

    /// Removes an observer; unknown ids are a benign no-op.
    pub(crate) fn remove(&mut self, handle: &ObserverHandle) {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id != handle.id);
        if self.observers.len() < before {
            trace!(observer = handle.id, "Observer stopped");
        }
    }

    /// Drops observers whose owner has been released, without invoking their
    /// handlers again.
    pub(crate) fn prune_released(&mut self) {
        self.observers.retain(|observer| {
            let alive = observer.owner_alive();
            if !alive {
                trace!(observer = observer.id, "Observer owner released; deregistering");
            }
            alive
        });
    }

    pub(crate) fn get_mut(&mut self, handle: &ObserverHandle) -> Option<&mut Observer> {
        self.observers.iter_mut().find(|observer| observer.id == handle.id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Observer> {
        self.observers.iter_mut()
    }
}
