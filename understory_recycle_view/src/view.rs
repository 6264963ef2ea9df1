// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recycle scroll view: settings plus the session controller.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::num::NonZeroUsize;

use kurbo::Size;

use crate::session::{LiveSession, Session, SessionSlot, end_session};
use crate::{
    Arrangement, BindCell, ConfigError, MaskSettings, ScrollAxis, ScrollHost, ScrollSettings,
    SessionHandle, SessionStats, WindowUpdate,
};

/// Grid settings that do not depend on the host.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    /// Scroll direction.
    pub axis: ScrollAxis,
    /// Origin corner and growth direction.
    pub arrangement: Arrangement,
    /// Size of one cell (`width` × `height`).
    pub cell_size: Size,
    /// Number of cells per track along the cross axis.
    pub cross_limit: NonZeroUsize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::default(),
            arrangement: Arrangement::default(),
            cell_size: Size::new(100.0, 30.0),
            cross_limit: NonZeroUsize::MIN,
        }
    }
}

impl GridSettings {
    /// Sets the scroll axis.
    #[must_use]
    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the arrangement.
    #[must_use]
    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Sets the cell size.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: Size) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the cross-axis cell limit from a raw count.
    ///
    /// Fails with [`ConfigError::ZeroCrossLimit`] for `0`.
    pub fn with_cross_limit(mut self, limit: usize) -> Result<Self, ConfigError> {
        self.cross_limit = NonZeroUsize::new(limit).ok_or(ConfigError::ZeroCrossLimit)?;
        Ok(self)
    }
}

/// Every setting of a [`RecycleScrollView`].
///
/// Scroll and mask settings are handed to the host untouched.
pub struct RecycleSettings<H: ScrollHost> {
    /// Layout of the cell grid.
    pub grid: GridSettings,
    /// Scroll container behavior.
    pub scroll: ScrollSettings<H::Node, H::Listener>,
    /// Viewport mask.
    pub mask: MaskSettings<H::Image>,
    /// Template for cells. Starting a session without one is a configuration error.
    pub prefab: Option<H::Prefab>,
}

impl<H: ScrollHost> Default for RecycleSettings<H> {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            scroll: ScrollSettings::default(),
            mask: MaskSettings::default(),
            prefab: None,
        }
    }
}

impl<H: ScrollHost> RecycleSettings<H> {
    /// Sets the grid settings.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSettings) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the scroll container settings.
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollSettings<H::Node, H::Listener>) -> Self {
        self.scroll = scroll;
        self
    }

    /// Sets the viewport mask settings.
    #[must_use]
    pub fn with_mask(mut self, mask: MaskSettings<H::Image>) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the cell prefab.
    #[must_use]
    pub fn with_prefab(mut self, prefab: H::Prefab) -> Self {
        self.prefab = Some(prefab);
        self
    }
}

impl<H: ScrollHost> fmt::Debug for RecycleSettings<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecycleSettings")
            .field("grid", &self.grid)
            .field("scroll", &self.scroll)
            .field("show_mask_graphic", &self.mask.show_graphic)
            .field("has_prefab", &self.prefab.is_some())
            .finish_non_exhaustive()
    }
}

/// A scroll view that shows a data list through a bounded pool of recycled cells.
///
/// Call [`set_datas`](Self::set_datas) to start a session and
/// [`tick`](Self::tick) once per rendered frame to keep the visible cells in
/// step with the scroll position. Starting a new session tears down the
/// previous one first.
///
/// ## Example
///
/// ```rust,ignore
/// let settings = RecycleSettings::default()
///     .with_grid(GridSettings::default().with_cross_limit(5)?)
///     .with_prefab(cell_prefab);
/// let mut view = RecycleScrollView::new(settings);
///
/// let handle = view.set_datas(&mut host, root, items, |host: &mut Host, cell, _index, item: &Item| {
///     host.set_text(cell, &item.text);
/// });
///
/// // Every frame:
/// view.tick(&mut host);
///
/// // When done:
/// handle.dispose(&mut host);
/// ```
pub struct RecycleScrollView<H: ScrollHost> {
    settings: RecycleSettings<H>,
    current: Option<SessionSlot<H>>,
}

impl<H: ScrollHost> fmt::Debug for RecycleScrollView<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecycleScrollView")
            .field("settings", &self.settings)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl<H: ScrollHost> RecycleScrollView<H> {
    /// Creates a view with no active session.
    #[must_use]
    pub fn new(settings: RecycleSettings<H>) -> Self {
        Self {
            settings,
            current: None,
        }
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &RecycleSettings<H> {
        &self.settings
    }

    /// Returns the settings for modification. Changes apply to the next session.
    pub fn settings_mut(&mut self) -> &mut RecycleSettings<H> {
        &mut self.settings
    }

    /// Returns `true` while a session is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.borrow().is_some())
    }

    /// Snapshot of the live session, if any.
    #[must_use]
    pub fn stats(&self) -> Option<SessionStats> {
        let slot = self.current.as_ref()?;
        slot.borrow().as_ref().map(|s| s.stats())
    }

    /// Advances the live session by one frame.
    ///
    /// Hosts call this from their per-frame update. Once the session's handle
    /// has been disposed, this does nothing.
    pub fn tick(&mut self, host: &mut H) -> WindowUpdate {
        let Some(slot) = &self.current else {
            return WindowUpdate::Idle;
        };
        let update = slot.borrow_mut().as_mut().map(|s| s.tick(host));
        update.unwrap_or_else(|| {
            self.current = None;
            WindowUpdate::Idle
        })
    }

    /// Ends the live session, if any.
    pub fn dispose(&mut self, host: &mut H) {
        if let Some(slot) = self.current.take() {
            end_session(&slot, host);
        }
    }
}

impl<H: ScrollHost + 'static> RecycleScrollView<H> {
    /// Shows `items` in the view and returns a handle that ends the session.
    ///
    /// Any previous session is torn down first. Configuration errors are
    /// logged and produce a no-op handle; see
    /// [`try_set_datas`](Self::try_set_datas) to receive them instead.
    pub fn set_datas<T, B>(
        &mut self,
        host: &mut H,
        root: H::Node,
        items: impl IntoIterator<Item = T>,
        binder: B,
    ) -> SessionHandle<H>
    where
        T: 'static,
        B: BindCell<H, T> + 'static,
    {
        match self.try_set_datas(host, root, items, binder) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!(%err, "recycle view configuration error");
                SessionHandle::noop()
            }
        }
    }

    /// Like [`set_datas`](Self::set_datas), but returns configuration errors.
    ///
    /// The previous session is torn down even when this fails.
    pub fn try_set_datas<T, B>(
        &mut self,
        host: &mut H,
        root: H::Node,
        items: impl IntoIterator<Item = T>,
        binder: B,
    ) -> Result<SessionHandle<H>, ConfigError>
    where
        T: 'static,
        B: BindCell<H, T> + 'static,
    {
        self.dispose(host);

        let items: Vec<T> = items.into_iter().collect();
        let session = Session::start(host, root, &self.settings, items, binder)?;
        let boxed: Box<dyn LiveSession<H>> = Box::new(session);
        let slot: SessionSlot<H> = Rc::new(RefCell::new(Some(boxed)));
        self.current = Some(Rc::clone(&slot));
        Ok(SessionHandle::new(slot))
    }
}
