use super::super::state::{App, CONTENT_SPACING_PX, PAGE_HEADER_HEIGHT_PX};
use super::Effect;
use finlit_core::progress::ScrollMetrics;
use finlit_core::scroll::ScrollRequest;
use finlit_core::session::SessionCommand;
use tracing::trace;

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        scroll_top: f32,
        content_height: f32,
        viewport_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        let metrics = ScrollMetrics::new(
            Self::sanitize_extent(scroll_top),
            Self::sanitize_extent(content_height),
            Self::sanitize_extent(viewport_height),
        );
        trace!(?metrics, "Content scrolled");
        self.dispatch(SessionCommand::Scrolled { metrics }, effects);
    }

    /// Document offset of the active section's anchor. Only the active
    /// section is laid out, directly below the page hero.
    pub(super) fn anchor_top_for(&self, request: &ScrollRequest) -> Option<f32> {
        let ScrollRequest::Anchor { section, .. } = request else {
            return None;
        };
        let active = self.session.active_section()?;
        (active.id == *section).then(|| {
            f32::from(self.config.margin_vertical) + PAGE_HEADER_HEIGHT_PX + CONTENT_SPACING_PX
        })
    }

    pub(super) fn scroll_target_for(&self, request: &ScrollRequest) -> f32 {
        request.target_y(self.anchor_top_for(request))
    }

    fn sanitize_extent(value: f32) -> f32 {
        if value.is_finite() { value.max(0.0) } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::test_support::app_with;
    use super::*;
    use finlit_core::config::{AppConfig, ScrollMode};
    use finlit_core::section::SectionId;

    fn anchor_app() -> App {
        let mut config = AppConfig::default();
        config.scroll_mode = ScrollMode::SectionAnchor;
        config.margin_vertical = 16;
        app_with(config)
    }

    #[test]
    fn anchor_target_subtracts_header_offset() {
        let mut app = anchor_app();
        let request = app.session.navigate_to(SectionId::from("factors"));
        let expected = 16.0 + PAGE_HEADER_HEIGHT_PX + CONTENT_SPACING_PX - 80.0;
        assert!((app.scroll_target_for(&request) - expected).abs() < 1e-4);
    }

    #[test]
    fn missing_anchor_falls_back_to_top() {
        let mut app = anchor_app();
        let request = app.session.navigate_to(SectionId::from("ghost"));
        assert_eq!(app.anchor_top_for(&request), None);
        assert_eq!(app.scroll_target_for(&request), 0.0);
    }

    #[test]
    fn garbage_geometry_is_ignored() {
        let mut app = anchor_app();
        let mut effects = Vec::new();
        app.handle_scrolled(f32::NAN, -20.0, f32::INFINITY, &mut effects);
        assert!(effects.is_empty());
        assert_eq!(app.session.progress().percent(), 0.0);
    }
}
