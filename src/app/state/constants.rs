use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Limits and layout metrics for the lesson view.
pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 32;
pub(crate) const MAX_HORIZONTAL_MARGIN: u16 = 400;
pub(crate) const MAX_VERTICAL_MARGIN: u16 = 100;
pub(crate) const MIN_WINDOW_DIMENSION: f32 = 480.0;
/// Fixed height of the page hero above the section content.
pub(crate) const PAGE_HEADER_HEIGHT_PX: f32 = 180.0;
pub(crate) const CONTENT_SPACING_PX: f32 = 24.0;
pub(crate) const SIDEBAR_WIDTH_PX: f32 = 280.0;
pub(crate) const SIGNAL_POLL_INTERVAL_MS: u64 = 250;
pub(crate) static CONTENT_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("lesson-content"));
