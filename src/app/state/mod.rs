mod constants;

use finlit_core::catalog::{PageCatalog, PageContent};
use finlit_core::config::{AppConfig, save_config};
use finlit_core::scroll::ScrollSource;
use finlit_core::session::{PageSession, ScrollBehavior};
use iced::Task;
use std::path::Path;
use tracing::{info, warn};

use super::messages::Message;

pub(crate) use constants::*;

/// Core application state: the config, the page catalog and the one mounted
/// page session.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) catalog: PageCatalog,
    pub(super) page_slugs: Vec<String>,
    pub(super) scroll: ScrollSource,
    pub(super) session: PageSession,
    pub(super) page_loading: Option<String>,
    pub(super) page_error: Option<String>,
}

impl App {
    pub(super) fn bootstrap(
        page: PageContent,
        catalog: PageCatalog,
        mut config: AppConfig,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let page_slugs = catalog.slugs().unwrap_or_else(|err| {
            warn!("Could not list lesson pages: {err:#}");
            Vec::new()
        });
        let scroll = ScrollSource::default();
        let session = PageSession::mount(page, ScrollBehavior::from(&config), &scroll);
        info!(pages = page_slugs.len(), "Viewer ready");
        let app = App {
            config,
            catalog,
            page_slugs,
            scroll,
            session,
            page_loading: None,
            page_error: None,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        format!("{} · Financial Literacy", self.session.content().title)
    }

    /// Replace the mounted page. The previous session, and with it its scroll
    /// listener, is dropped here.
    pub(super) fn mount_page(&mut self, page: PageContent) {
        let slug = page.slug.clone();
        self.session = PageSession::mount(page, ScrollBehavior::from(&self.config), &self.scroll);
        self.page_loading = None;
        self.page_error = None;
        info!(
            %slug,
            listeners = self.scroll.listener_count(),
            "Switched lesson page"
        );
    }

    pub(super) fn save_config(&self) {
        if let Err(err) = save_config(Path::new(crate::CONFIG_PATH), &self.config) {
            warn!("Failed to save config: {err:#}");
        }
    }
}

fn clamp_config(config: &mut AppConfig) {
    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.margin_horizontal = config.margin_horizontal.min(MAX_HORIZONTAL_MARGIN);
    config.margin_vertical = config.margin_vertical.min(MAX_VERTICAL_MARGIN);
    config.line_spacing = if config.line_spacing.is_finite() {
        config.line_spacing.clamp(1.0, 3.0)
    } else {
        1.4
    };
    config.sticky_header_offset_px = if config.sticky_header_offset_px.is_finite() {
        config.sticky_header_offset_px.max(0.0)
    } else {
        0.0
    };
    config.window_width = sanitize_dimension(config.window_width);
    config.window_height = sanitize_dimension(config.window_height);
}

fn sanitize_dimension(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_WINDOW_DIMENSION)
    } else {
        MIN_WINDOW_DIMENSION
    }
}
