// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A live scroll session and the handle that ends it.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::{
    BindCell, CellPool, ConfigError, DisposeBag, GridLayout, LayoutConfig, RecycleSettings,
    ScrollHost, WindowTracker, WindowUpdate, capacity_for,
};

/// Snapshot of a live session, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Number of data items.
    pub item_count: usize,
    /// Cells the viewport needs, including the overscan track.
    pub capacity: usize,
    /// Cells actually instantiated (`min(capacity, item_count)`).
    pub cells: usize,
    /// First index of the current window; `None` once tracking stopped.
    pub first_index: Option<isize>,
}

/// Type-erased session, so one view can run sessions over any item type.
pub(crate) trait LiveSession<H: ScrollHost> {
    fn tick(&mut self, host: &mut H) -> WindowUpdate;
    fn teardown(&mut self, host: &mut H);
    fn stats(&self) -> SessionStats;
}

pub(crate) type SessionSlot<H> = Rc<RefCell<Option<Box<dyn LiveSession<H>>>>>;

/// Everything one `set_datas` call created.
pub(crate) struct Session<H: ScrollHost, T, B> {
    layout: GridLayout,
    capacity: usize,
    items: Vec<T>,
    binder: B,
    content: H::Node,
    pool: CellPool<H::Node>,
    tracker: WindowTracker,
    bag: DisposeBag<H>,
}

impl<H, T, B> Session<H, T, B>
where
    H: ScrollHost + 'static,
    B: BindCell<H, T>,
{
    /// Validates the settings, builds the scroll hierarchy and cell pool, and
    /// starts tracking.
    ///
    /// Validation happens before anything is created. If a later step fails,
    /// everything created so far is destroyed before the error is returned.
    pub(crate) fn start(
        host: &mut H,
        root: H::Node,
        settings: &RecycleSettings<H>,
        items: Vec<T>,
        mut binder: B,
    ) -> Result<Self, ConfigError> {
        let prefab = settings.prefab.as_ref().ok_or(ConfigError::MissingPrefab)?;
        let grid = &settings.grid;
        let config = LayoutConfig {
            axis: grid.axis,
            arrangement: grid.arrangement,
            cell_size: grid.cell_size,
            cross_limit: grid.cross_limit,
            item_count: items.len(),
        };
        config.validate()?;
        let layout = GridLayout::new(config);
        let axis = config.axis;

        let mut bag = DisposeBag::new();
        let scroller = host.create_scroller(root, axis, &settings.scroll);
        bag.add(host, move |h: &mut H| h.destroy(scroller));
        let viewport = host.create_viewport(scroller, &settings.mask);
        bag.add(host, move |h: &mut H| h.destroy(viewport));
        let viewport_size = host.rect_size(viewport);
        let content = host.create_content(viewport, &layout.content_frame(viewport_size));
        bag.add(host, move |h: &mut H| h.destroy(content));
        host.attach_content(scroller, viewport, content);

        let capacity = capacity_for(&layout, axis.primary_extent(viewport_size));
        let pool = match CellPool::build(
            host,
            Some(prefab),
            content,
            &layout,
            capacity,
            &items,
            &mut binder,
        ) {
            Ok(pool) => pool,
            Err(err) => {
                bag.dispose(host);
                return Err(err);
            }
        };

        let mut tracker = WindowTracker::new();
        tracker.start(&layout, axis.primary_of(host.local_position(content)));
        tracing::debug!(
            items = items.len(),
            capacity,
            cells = pool.len(),
            %axis,
            arrangement = %config.arrangement,
            "recycle session started"
        );

        Ok(Self {
            layout,
            capacity,
            items,
            binder,
            content,
            pool,
            tracker,
            bag,
        })
    }
}

impl<H, T, B> LiveSession<H> for Session<H, T, B>
where
    H: ScrollHost,
    B: BindCell<H, T>,
{
    fn tick(&mut self, host: &mut H) -> WindowUpdate {
        self.tracker.tick(
            host,
            self.content,
            &self.layout,
            &mut self.pool,
            &self.items,
            &mut self.binder,
        )
    }

    fn teardown(&mut self, host: &mut H) {
        if self.bag.is_disposed() {
            return;
        }
        self.tracker.stop();
        self.pool.teardown(host);
        self.bag.dispose(host);
        tracing::debug!(items = self.items.len(), "recycle session torn down");
    }

    fn stats(&self) -> SessionStats {
        SessionStats {
            item_count: self.items.len(),
            capacity: self.capacity,
            cells: self.pool.len(),
            first_index: self.tracker.first_index(),
        }
    }
}

/// Handle to the session started by
/// [`RecycleScrollView::set_datas`](crate::RecycleScrollView::set_datas).
///
/// Disposing the handle stops tracking and destroys every node the session
/// created. Disposal is idempotent, and clones share the same session, so
/// disposing any of them ends it. A handle returned for a failed start is a
/// no-op.
pub struct SessionHandle<H: ScrollHost> {
    slot: Option<SessionSlot<H>>,
}

impl<H: ScrollHost> SessionHandle<H> {
    pub(crate) fn new(slot: SessionSlot<H>) -> Self {
        Self { slot: Some(slot) }
    }

    /// A handle with nothing to dispose.
    #[must_use]
    pub const fn noop() -> Self {
        Self { slot: None }
    }

    /// Returns `true` while the session is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.as_ref().is_some_and(|s| s.borrow().is_some())
    }

    /// Snapshot of the session, if it is live.
    #[must_use]
    pub fn stats(&self) -> Option<SessionStats> {
        let slot = self.slot.as_ref()?;
        slot.borrow().as_ref().map(|s| s.stats())
    }

    /// Stops tracking and destroys the session's nodes.
    pub fn dispose(&self, host: &mut H) {
        if let Some(slot) = &self.slot {
            end_session(slot, host);
        }
    }
}

/// Takes the session out of `slot` and tears it down.
///
/// An empty slot is how the view learns that a session ended, so this also
/// serves as the tracking loop's cancellation.
pub(crate) fn end_session<H: ScrollHost>(slot: &SessionSlot<H>, host: &mut H) {
    let session = slot.borrow_mut().take();
    if let Some(mut session) = session {
        session.teardown(host);
    }
}

impl<H: ScrollHost> Clone for SessionHandle<H> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<H: ScrollHost> fmt::Debug for SessionHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("active", &self.is_active())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
