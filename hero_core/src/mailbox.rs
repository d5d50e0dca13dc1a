//! Marshaling seam between external collaborators and the flow sequencer.
//!
//! The sequencer is single-writer and holds no locks. Timer-driven
//! collaborators (mission countdowns, background XP jobs) complete on their
//! own threads, so they post `SequencerEvent`s through a cloneable
//! `FlowPost`; the owning context drains the mailbox into its sequencer on
//! its own thread, preserving arrival order.

use crate::{FlowSequencer, HeroPath, LevelUpNotification};
use std::sync::mpsc::{channel, Receiver, Sender};

/// An event destined for the sequencer's owning context
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequencerEvent {
    LevelUp(LevelUpNotification),
    PathAssigned(HeroPath),
    FactionUnlocked,
    Dismiss,
    Reset,
}

/// Cloneable posting handle held by external collaborators
#[derive(Clone, Debug)]
pub struct FlowPost {
    tx: Sender<SequencerEvent>,
}

impl FlowPost {
    /// Post an event for the owning context to apply.
    ///
    /// Returns `false` when the mailbox has been dropped; the event is
    /// discarded rather than raised as an error.
    pub fn post(&self, event: SequencerEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping sequencer event, mailbox closed: {}", e);
                false
            }
        }
    }
}

/// Owner-side mailbox that applies posted events to a sequencer
#[derive(Debug)]
pub struct FlowMailbox {
    tx: Sender<SequencerEvent>,
    rx: Receiver<SequencerEvent>,
}

impl FlowMailbox {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Posting handle for collaborators on other threads
    pub fn post_handle(&self) -> FlowPost {
        FlowPost {
            tx: self.tx.clone(),
        }
    }

    /// Apply all pending events to the sequencer in arrival order.
    ///
    /// Must be called from the context that owns the sequencer. Returns the
    /// number of events applied.
    pub fn drain_into(&self, sequencer: &mut FlowSequencer) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            apply(sequencer, event);
            applied += 1;
        }
        if applied > 0 {
            tracing::debug!("Applied {} sequencer events", applied);
        }
        applied
    }
}

impl Default for FlowMailbox {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(sequencer: &mut FlowSequencer, event: SequencerEvent) {
    match event {
        SequencerEvent::LevelUp(notification) => sequencer.enqueue_level_up(notification),
        SequencerEvent::PathAssigned(path) => sequencer.enqueue_path_assignment(path),
        SequencerEvent::FactionUnlocked => sequencer.enqueue_faction_selection(),
        SequencerEvent::Dismiss => sequencer.advance(),
        SequencerEvent::Reset => sequencer.reset(),
    }
}
