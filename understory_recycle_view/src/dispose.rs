// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered cleanup actions run against the host.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

type Cleanup<H> = Box<dyn FnOnce(&mut H)>;

/// A list of cleanup actions, run in reverse registration order.
///
/// Resources are registered as they are created, so disposal releases
/// children before their parents.
pub struct DisposeBag<H> {
    actions: Vec<Cleanup<H>>,
    disposed: bool,
}

impl<H> fmt::Debug for DisposeBag<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBag")
            .field("pending", &self.actions.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<H> Default for DisposeBag<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> DisposeBag<H> {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            disposed: false,
        }
    }

    /// Registers a cleanup action.
    ///
    /// Adding to a bag that was already disposed runs the action immediately.
    pub fn add(&mut self, host: &mut H, action: impl FnOnce(&mut H) + 'static) {
        if self.disposed {
            action(host);
        } else {
            self.actions.push(Box::new(action));
        }
    }

    /// Number of actions not yet run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no actions are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Runs every pending action, last registered first. Later calls are no-ops.
    pub fn dispose(&mut self, host: &mut H) {
        self.disposed = true;
        while let Some(action) = self.actions.pop() {
            action(host);
        }
    }
}
