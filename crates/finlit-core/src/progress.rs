//! Reading progress derived from the page's scroll position.

use serde::{Deserialize, Serialize};

/// Vertical scroll geometry of the document, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub const fn new(scroll_top: f32, scroll_height: f32, viewport_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Distance the viewport can travel; zero when the content fits.
    pub fn scrollable_range(&self) -> f32 {
        let range = self.scroll_height - self.viewport_height;
        if range.is_finite() { range.max(0.0) } else { 0.0 }
    }

    /// Same geometry with the offset moved to `y`, clamped to the range.
    pub fn scrolled_to(self, y: f32) -> Self {
        let y = if y.is_finite() { y } else { 0.0 };
        Self {
            scroll_top: y.clamp(0.0, self.scrollable_range()),
            ..self
        }
    }
}

/// Percentage of the page scrolled past, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct ReadingProgress(f32);

impl ReadingProgress {
    pub fn from_metrics(metrics: &ScrollMetrics) -> Self {
        Self(reading_progress(
            metrics.scroll_top,
            metrics.scroll_height,
            metrics.viewport_height,
        ))
    }

    pub fn percent(self) -> f32 {
        self.0
    }

    pub fn fraction(self) -> f32 {
        self.0 / 100.0
    }
}

/// `scroll_top / (scroll_height - viewport_height) * 100`, clamped to
/// `0..=100`. A zero or negative scrollable range, or any non-finite input,
/// yields `0`.
pub fn reading_progress(scroll_top: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    if !(scroll_top.is_finite() && scroll_height.is_finite() && viewport_height.is_finite()) {
        return 0.0;
    }
    let range = scroll_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    let percent = (scroll_top / range * 100.0).clamp(0.0, 100.0);
    // -0.0 survives `clamp`.
    if percent == 0.0 { 0.0 } else { percent }
}
