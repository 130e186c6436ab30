//! UI layer for the lesson viewer.
//!
//! The GUI owns the window-level [`ScrollSource`](finlit_core::scroll::ScrollSource)
//! and the currently mounted [`PageSession`](finlit_core::session::PageSession);
//! all tracking rules live in `finlit-core`.

mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use finlit_core::catalog::{PageCatalog, PageContent};
use finlit_core::config::{AppConfig, ThemeMode};
use iced::{Size, Theme, window};

/// Launch the viewer on an already-loaded page.
pub fn run_app(page: PageContent, catalog: PageCatalog, config: AppConfig) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application(App::title, App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| match app.config.theme {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        })
        .run_with(move || App::bootstrap(page, catalog, config))
}
