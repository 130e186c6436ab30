use super::super::super::messages::Message;
use super::super::super::state::{App, CONTENT_SCROLL_ID};
use super::super::Effect;
use finlit_core::scroll::ScrollRequest;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use tracing::{debug, info};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_config();
                Task::none()
            }
            Effect::ScrollTo(request) => {
                let y = self.scroll_target_for(&request);
                debug!(?request, y, "Scrolling lesson content");
                // The page top is known before layout. Anchor targets depend on
                // the new section's height, so progress waits for the widget.
                if request == ScrollRequest::Top {
                    self.scroll.scroll_to(0.0);
                }
                scrollable::scroll_to(CONTENT_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::LoadPage(slug) => {
                let catalog = self.catalog.clone();
                Task::perform(
                    async move {
                        match catalog.load(&slug) {
                            Ok(page) => Message::PageLoaded {
                                slug,
                                page: Box::new(page),
                            },
                            Err(err) => Message::PageLoadFailed {
                                slug,
                                error: format!("{err:#}"),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::QuitSafely => {
                info!(
                    page = %self.session.content().slug,
                    completed = self.session.completed_count(),
                    total = self.session.total_sections(),
                    "Quitting lesson viewer"
                );
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, app_with};
    use super::*;
    use finlit_core::config::{AppConfig, ScrollMode};
    use finlit_core::section::SectionId;

    #[test]
    fn anchor_scroll_leaves_progress_to_the_widget() {
        let mut config = AppConfig::default();
        config.scroll_mode = ScrollMode::SectionAnchor;
        let mut app = app_with(config);
        let mut effects = Vec::new();
        // Short first section: the old range ends above the new anchor.
        app.handle_scrolled(0.0, 900.0, 800.0, &mut effects);

        let request = app.session.navigate_to(SectionId::from("factors"));
        let _ = app.run_effect(Effect::ScrollTo(request));
        assert_eq!(app.session.progress().percent(), 0.0);

        app.handle_scrolled(200.0, 1_200.0, 800.0, &mut effects);
        assert!((app.session.progress().percent() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn top_scroll_resets_progress_immediately() {
        let mut app = app();
        let mut effects = Vec::new();
        app.handle_scrolled(400.0, 1_200.0, 800.0, &mut effects);
        assert_eq!(app.session.progress().percent(), 100.0);

        let _ = app.run_effect(Effect::ScrollTo(ScrollRequest::Top));
        assert_eq!(app.session.progress().percent(), 0.0);
    }
}
