use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use finlit_core::config::ThemeMode;
use tracing::{info, warn};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::NavigateTo(section) => self.handle_navigate_to(section, &mut effects),
            Message::NextSection => self.handle_next_section(&mut effects),
            Message::PreviousSection => self.handle_previous_section(&mut effects),
            Message::MarkComplete(section) => self.handle_mark_complete(section, &mut effects),
            Message::ToggleBookmark(section) => self.handle_toggle_bookmark(section, &mut effects),
            Message::MarkActiveComplete => {
                let active = self.session.active_id().clone();
                self.handle_mark_complete(active, &mut effects);
            }
            Message::ToggleActiveBookmark => {
                let active = self.session.active_id().clone();
                self.handle_toggle_bookmark(active, &mut effects);
            }
            Message::OpenPage(slug) => self.handle_open_page(slug, &mut effects),
            Message::PageLoaded { slug, page } => self.handle_page_loaded(slug, *page, &mut effects),
            Message::PageLoadFailed { slug, error } => self.handle_page_load_failed(slug, error),
            Message::DismissPageError => self.page_error = None,
            Message::ToggleSidebar => self.handle_toggle_sidebar(&mut effects),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Scrolled {
                scroll_top,
                content_height,
                viewport_height,
            } => self.handle_scrolled(scroll_top, content_height, viewport_height, &mut effects),
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
        }

        effects
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
        info!(theme = %self.config.theme, "Toggled theme");
        effects.push(Effect::SaveConfig);
    }

    fn handle_toggle_sidebar(&mut self, effects: &mut Vec<Effect>) {
        self.config.show_sidebar = !self.config.show_sidebar;
        effects.push(Effect::SaveConfig);
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Ctrl-C received; quitting");
            effects.push(Effect::QuitSafely);
        }
    }

    fn handle_open_page(&mut self, slug: String, effects: &mut Vec<Effect>) {
        if self.page_loading.is_some() || slug == self.session.content().slug {
            return;
        }
        info!(%slug, "Opening lesson page");
        self.page_loading = Some(slug.clone());
        self.page_error = None;
        effects.push(Effect::LoadPage(slug));
    }

    fn handle_page_loaded(
        &mut self,
        slug: String,
        page: finlit_core::catalog::PageContent,
        effects: &mut Vec<Effect>,
    ) {
        if self.page_loading.as_deref() != Some(slug.as_str()) {
            warn!(%slug, "Ignoring page that was not requested");
            return;
        }
        self.mount_page(page);
        effects.push(Effect::ScrollTo(finlit_core::scroll::ScrollRequest::Top));
    }

    fn handle_page_load_failed(&mut self, slug: String, error: String) {
        warn!(%slug, "Failed to open lesson page: {error}");
        self.page_loading = None;
        self.page_error = Some(format!("Could not open `{slug}`: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{LESSON, app};
    use super::*;
    use finlit_core::catalog::parse_page;
    use finlit_core::scroll::ScrollRequest;
    use finlit_core::section::SectionId;
    use iced::keyboard::{Key, Modifiers};

    fn key(ch: &str) -> Message {
        Message::KeyPressed {
            key: Key::Character(ch.into()),
            modifiers: Modifiers::empty(),
        }
    }

    #[test]
    fn navigation_requests_scroll_to_top() {
        let mut app = app();
        let effects = app.reduce(Message::NavigateTo(SectionId::from("factors")));
        assert_eq!(effects, vec![Effect::ScrollTo(ScrollRequest::Top)]);
        assert_eq!(app.session.active_id().as_str(), "factors");
    }

    #[test]
    fn shortcuts_drive_the_session() {
        let mut app = app();
        assert_eq!(app.reduce(key("n")), vec![Effect::ScrollTo(ScrollRequest::Top)]);
        assert_eq!(app.session.active_id().as_str(), "factors");

        assert!(app.reduce(key("c")).is_empty());
        assert!(app.session.is_complete("factors"));

        app.reduce(key("b"));
        assert!(app.session.is_bookmarked("factors"));
        app.reduce(key("b"));
        assert!(!app.session.is_bookmarked("factors"));

        app.reduce(key("p"));
        assert_eq!(app.session.active_id().as_str(), "basics");
        assert_eq!(app.reduce(key("q")), vec![Effect::QuitSafely]);
    }

    #[test]
    fn previous_on_first_section_is_a_no_op() {
        let mut app = app();
        assert!(app.reduce(Message::PreviousSection).is_empty());
        assert_eq!(app.session.active_id().as_str(), "basics");
    }

    #[test]
    fn scroll_messages_update_progress() {
        let mut app = app();
        app.reduce(Message::Scrolled {
            scroll_top: 300.0,
            content_height: 1_000.0,
            viewport_height: 400.0,
        });
        assert!((app.session.progress().percent() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn page_switch_replaces_session_and_listener() {
        let mut app = app();
        app.reduce(Message::MarkActiveComplete);
        assert_eq!(
            app.reduce(Message::OpenPage("public-finance".to_string())),
            vec![Effect::LoadPage("public-finance".to_string())]
        );

        let next = parse_page("public-finance", LESSON).expect("valid lesson");
        let effects = app.reduce(Message::PageLoaded {
            slug: "public-finance".to_string(),
            page: Box::new(next),
        });

        assert_eq!(effects, vec![Effect::ScrollTo(ScrollRequest::Top)]);
        assert_eq!(app.session.content().slug, "public-finance");
        assert_eq!(app.session.completed_count(), 0);
        assert_eq!(app.scroll.listener_count(), 1);
        assert!(app.page_loading.is_none());
    }

    #[test]
    fn failed_page_switch_keeps_current_page() {
        let mut app = app();
        app.reduce(Message::OpenPage("nowhere".to_string()));
        app.reduce(Message::PageLoadFailed {
            slug: "nowhere".to_string(),
            error: "missing file".to_string(),
        });
        assert_eq!(app.session.content().slug, "credit-score");
        assert!(app.page_error.as_deref().is_some_and(|e| e.contains("nowhere")));
        assert!(app.page_loading.is_none());
    }

    #[test]
    fn toggles_request_config_save() {
        let mut app = app();
        assert_eq!(app.reduce(Message::ToggleTheme), vec![Effect::SaveConfig]);
        assert_eq!(app.config.theme, ThemeMode::Night);
        let shown = app.config.show_sidebar;
        app.reduce(Message::ToggleSidebar);
        assert_eq!(app.config.show_sidebar, !shown);
    }
}
