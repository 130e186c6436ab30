use finlit_core::catalog::PageContent;
use finlit_core::section::SectionId;
use iced::keyboard::{Key, Modifiers};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(SectionId),
    NextSection,
    PreviousSection,
    MarkComplete(SectionId),
    ToggleBookmark(SectionId),
    MarkActiveComplete,
    ToggleActiveBookmark,
    OpenPage(String),
    PageLoaded {
        slug: String,
        page: Box<PageContent>,
    },
    PageLoadFailed {
        slug: String,
        error: String,
    },
    DismissPageError,
    ToggleSidebar,
    ToggleTheme,
    SafeQuit,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        scroll_top: f32,
        content_height: f32,
        viewport_height: f32,
    },
    PollSystemSignals,
}
