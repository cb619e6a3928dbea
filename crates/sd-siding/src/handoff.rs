//! Deferred delivery of compositions to the thread that owns the sidings.
//!
//! Composers post through a [`RouteSender`]; the tick loop drains the
//! [`RouteMailbox`] at the start of a tick and applies each composition with
//! [`SidingRecord::apply_composition`](crate::SidingRecord::apply_composition),
//! which discards results computed against an outdated depot association.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::{Composition, SidingError, SidingResult};

/// Posting end of a [`RouteMailbox`].  Cheap to clone; `Send`.
#[derive(Clone, Debug)]
pub struct RouteSender(Sender<Composition>);

impl RouteSender {
    pub fn post(&self, composition: Composition) -> SidingResult<()> {
        self.0.send(composition).map_err(|_| SidingError::MailboxClosed)
    }
}

/// Receiving end, owned by the tick loop.
#[derive(Debug)]
pub struct RouteMailbox {
    tx: Sender<Composition>,
    rx: Receiver<Composition>,
}

impl RouteMailbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> RouteSender {
        RouteSender(self.tx.clone())
    }

    /// Take every composition posted so far, in posting order, without
    /// blocking.
    pub fn drain(&self) -> Vec<Composition> {
        self.rx.try_iter().collect()
    }
}

impl Default for RouteMailbox {
    fn default() -> Self {
        Self::new()
    }
}
