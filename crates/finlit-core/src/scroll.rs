//! The document scroll position and the listeners attached to it.
//!
//! A page registers one listener while it is mounted. Registration hands back
//! a [`ScrollListenerGuard`]; dropping the guard detaches the listener, so a
//! page that is no longer displayed can never be called back.

use crate::progress::ScrollMetrics;
use crate::section::SectionId;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

type Listener = Rc<RefCell<dyn FnMut(&ScrollMetrics)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Default)]
struct SourceInner {
    metrics: ScrollMetrics,
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Scroll state of the window hosting a page. Cloning shares the same source.
#[derive(Clone, Default)]
pub struct ScrollSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl ScrollSource {
    pub fn new(metrics: ScrollMetrics) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SourceInner {
                metrics,
                ..SourceInner::default()
            })),
        }
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.inner.borrow().metrics
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn subscribe<F>(&self, listener: F) -> ScrollListenerGuard
    where
        F: FnMut(&ScrollMetrics) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        inner.listeners.push((id, listener));
        trace!(listener = id.0, "Scroll listener attached");
        ScrollListenerGuard {
            id,
            source: Rc::downgrade(&self.inner),
        }
    }

    /// Record new geometry and notify every attached listener.
    pub fn emit(&self, metrics: ScrollMetrics) {
        // Snapshot the listeners so callbacks may attach or detach freely.
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.metrics = metrics;
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        for listener in listeners {
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(&metrics);
            }
        }
    }

    /// Move the offset to `y` (clamped to the scrollable range) and emit.
    pub fn scroll_to(&self, y: f32) {
        let metrics = self.metrics().scrolled_to(y);
        self.emit(metrics);
    }
}

impl fmt::Debug for ScrollSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollSource")
            .field("metrics", &inner.metrics)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Keeps a listener attached to its [`ScrollSource`] until dropped.
#[must_use = "dropping the guard detaches the listener immediately"]
#[derive(Debug)]
pub struct ScrollListenerGuard {
    id: ListenerId,
    source: Weak<RefCell<SourceInner>>,
}

impl Drop for ScrollListenerGuard {
    fn drop(&mut self) {
        let Some(inner) = self.source.upgrade() else {
            return;
        };
        inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != self.id);
        trace!(listener = self.id.0, "Scroll listener detached");
    }
}

/// Where the viewport should go after a section change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollRequest {
    /// Top of the whole page.
    Top,
    /// The section's anchor, minus room for a sticky header.
    Anchor { section: SectionId, offset_px: f32 },
}

impl ScrollRequest {
    /// Target offset in pixels given the anchor's position in the document.
    /// An anchor that cannot be located falls back to the page top.
    pub fn target_y(&self, anchor_top: Option<f32>) -> f32 {
        match self {
            ScrollRequest::Top => 0.0,
            ScrollRequest::Anchor { offset_px, .. } => anchor_top
                .filter(|top| top.is_finite())
                .map(|top| (top - offset_px.max(0.0)).max(0.0))
                .unwrap_or(0.0),
        }
    }
}
