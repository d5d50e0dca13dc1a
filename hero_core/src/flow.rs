//! Level-up flow sequencing.
//!
//! `FlowSequencer` serializes the mutually-exclusive full-screen flows
//! (level-up banner, path assignment reveal, faction selection) so that at
//! most one is ever active. Pending flows are queued by fixed priority, not
//! arrival order, and enqueuing a flow of a kind already queued replaces the
//! older entry.

use crate::{AppFlow, FlowKind, HeroPath, LevelUpNotification};
use std::collections::BTreeMap;

/// Single-writer state machine driving full-screen flow presentation.
///
/// Owned and mutated on one logical thread of control; all operations are
/// synchronous, non-blocking, and never fail. Rejected transitions leave
/// state unchanged so a bad call can never crash a user-facing surface.
/// Construct one per session and inject it into consumers.
#[derive(Debug, Default)]
pub struct FlowSequencer {
    current: AppFlow,
    // Keyed by kind: priority order and replace-not-append both fall out of
    // the map structure.
    queue: BTreeMap<FlowKind, AppFlow>,
}

impl FlowSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active flow (`Idle` means nothing is presented)
    pub fn current(&self) -> &AppFlow {
        &self.current
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_idle()
    }

    /// Kinds currently waiting in the queue, in promotion order
    pub fn queued_kinds(&self) -> Vec<FlowKind> {
        self.queue.keys().copied().collect()
    }

    /// Number of queued entries (the active flow is not counted)
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a level-up flow together with everything it unlocks.
    ///
    /// The chained path-assignment and faction-selection entries are inserted
    /// in the same call, so a consumer can never observe the level-up queued
    /// without its chain.
    pub fn enqueue_level_up(&mut self, notification: LevelUpNotification) {
        tracing::info!(
            "Enqueuing level-up {} -> {} (path: {}, faction: {})",
            notification.from_level,
            notification.to_level,
            notification.has_path_assignment(),
            notification.has_faction_unlock
        );

        if let Some(path) = notification.new_path {
            self.insert(AppFlow::PathAssignment(path));
        }
        if notification.has_faction_unlock {
            self.insert(AppFlow::FactionSelection);
        }
        self.insert(AppFlow::LevelUp(notification));
        self.promote_if_idle();
    }

    /// Enqueue a standalone path-assignment flow
    pub fn enqueue_path_assignment(&mut self, path: HeroPath) {
        self.insert(AppFlow::PathAssignment(path));
        self.promote_if_idle();
    }

    /// Enqueue a standalone faction-selection flow
    pub fn enqueue_faction_selection(&mut self) {
        self.insert(AppFlow::FactionSelection);
        self.promote_if_idle();
    }

    /// Dismiss the current flow and promote the next queued entry by
    /// priority, falling back to idle when the queue is empty.
    ///
    /// Calling this while idle with an empty queue is a no-op.
    pub fn advance(&mut self) {
        self.current = AppFlow::Idle;
        self.promote_if_idle();
    }

    /// Directly override the current flow.
    ///
    /// The transition is rejected (state unchanged) when the target would cut
    /// short an active flow of higher priority: a level-up banner must run to
    /// completion via `advance()` before any chained flow is shown.
    /// Transitioning to `Idle` is always accepted and leaves the queue
    /// untouched; only `advance()` consumes queued entries.
    pub fn transition_to(&mut self, flow: AppFlow) {
        if let (Some(current_kind), Some(target_kind)) = (self.current.kind(), flow.kind()) {
            if current_kind < target_kind {
                tracing::debug!(
                    "Rejected transition {:?} -> {:?}: higher-priority flow still active",
                    current_kind,
                    target_kind
                );
                return;
            }
        }
        tracing::debug!("Transition to {:?}", flow.kind());
        self.current = flow;
    }

    /// Clear the current flow and drop every queued entry
    pub fn reset(&mut self) {
        tracing::debug!("Resetting sequencer ({} queued entries dropped)", self.queue.len());
        self.current = AppFlow::Idle;
        self.queue.clear();
    }

    fn insert(&mut self, flow: AppFlow) {
        if let Some(kind) = flow.kind() {
            // Last enqueued of a kind wins
            if self.queue.insert(kind, flow).is_some() {
                tracing::debug!("Replaced queued {:?} flow", kind);
            }
        }
    }

    fn promote_if_idle(&mut self) {
        if !self.current.is_idle() {
            return;
        }
        if let Some((kind, flow)) = self.queue.pop_first() {
            tracing::debug!("Promoting {:?} flow", kind);
            self.current = flow;
        }
    }
}
