use finlit_core::scroll::ScrollRequest;

mod core;
mod navigation;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SaveConfig,
    ScrollTo(ScrollRequest),
    LoadPage(String),
    QuitSafely,
}
