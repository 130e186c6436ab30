use super::super::state::App;
use super::Effect;
use finlit_core::section::SectionId;
use finlit_core::session::SessionCommand;
use tracing::{debug, trace};

impl App {
    /// Run one tracking command against the mounted page and queue any scroll
    /// it asks for.
    pub(super) fn dispatch(&mut self, command: SessionCommand, effects: &mut Vec<Effect>) {
        let event = self.session.apply_command(command);
        let snapshot = &event.snapshot;
        if event.action == "page_scrolled" {
            trace!(progress = snapshot.progress_pct.percent(), "Session updated");
        } else {
            debug!(
                action = event.action,
                active = %snapshot.active_section_id,
                completed = snapshot.completed_count,
                total = snapshot.total_sections,
                "Session updated"
            );
        }
        if let Some(request) = event.scroll {
            effects.push(Effect::ScrollTo(request));
        }
    }

    pub(super) fn handle_navigate_to(&mut self, section: SectionId, effects: &mut Vec<Effect>) {
        self.dispatch(SessionCommand::NavigateTo { section }, effects);
    }

    pub(super) fn handle_next_section(&mut self, effects: &mut Vec<Effect>) {
        if self.session.next_section().is_none() {
            debug!(active = %self.session.active_id(), "Already on the last section");
            return;
        }
        self.dispatch(SessionCommand::NavigateNext, effects);
    }

    pub(super) fn handle_previous_section(&mut self, effects: &mut Vec<Effect>) {
        if self.session.previous_section().is_none() {
            debug!(active = %self.session.active_id(), "Already on the first section");
            return;
        }
        self.dispatch(SessionCommand::NavigatePrevious, effects);
    }

    pub(super) fn handle_mark_complete(&mut self, section: SectionId, effects: &mut Vec<Effect>) {
        self.dispatch(SessionCommand::MarkComplete { section }, effects);
    }

    pub(super) fn handle_toggle_bookmark(&mut self, section: SectionId, effects: &mut Vec<Effect>) {
        self.dispatch(SessionCommand::ToggleBookmark { section }, effects);
    }
}
