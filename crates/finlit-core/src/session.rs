use crate::catalog::PageContent;
use crate::config::{AppConfig, ScrollMode};
use crate::progress::{ReadingProgress, ScrollMetrics};
use crate::scroll::{ScrollListenerGuard, ScrollRequest, ScrollSource};
use crate::section::{Difficulty, SectionDescriptor, SectionId};
use crate::tracker::{BookmarkSet, CompletionSet, NavigationState};
use anyhow::{Context, Result};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// How section changes move the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBehavior {
    pub mode: ScrollMode,
    pub header_offset_px: f32,
}

impl Default for ScrollBehavior {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ScrollBehavior {
    fn from(config: &AppConfig) -> Self {
        Self {
            mode: config.scroll_mode,
            header_offset_px: config.sticky_header_offset_px,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub id: SectionId,
    pub title: String,
    pub emoji: String,
    pub duration: String,
    pub difficulty: Difficulty,
    pub active: bool,
    pub completed: bool,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveSectionView {
    pub id: SectionId,
    pub title: String,
    pub emoji: String,
    pub duration: String,
    pub difficulty: Difficulty,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub slug: String,
    pub title: String,
    pub route: String,
    pub active_section_id: SectionId,
    pub active_section: Option<ActiveSectionView>,
    pub completed: Vec<SectionId>,
    pub bookmarked: Vec<SectionId>,
    pub completed_count: usize,
    pub total_sections: usize,
    pub progress_pct: ReadingProgress,
    pub has_next: bool,
    pub has_previous: bool,
    pub sections: Vec<SectionSummary>,
}

impl PageSnapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize page snapshot")
    }
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    GetSnapshot,
    NavigateTo { section: SectionId },
    NavigateNext,
    NavigatePrevious,
    MarkComplete { section: SectionId },
    ToggleBookmark { section: SectionId },
    Scrolled { metrics: ScrollMetrics },
}

impl SessionCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "page_get_snapshot",
            Self::NavigateTo { .. } => "page_navigate_to",
            Self::NavigateNext => "page_navigate_next",
            Self::NavigatePrevious => "page_navigate_previous",
            Self::MarkComplete { .. } => "page_mark_complete",
            Self::ToggleBookmark { .. } => "page_toggle_bookmark",
            Self::Scrolled { .. } => "page_scrolled",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub action: &'static str,
    pub scroll: Option<ScrollRequest>,
    pub snapshot: PageSnapshot,
}

/// Tracking state of one mounted lesson page.
///
/// Each page owns its own session; nothing is shared between pages except the
/// window's [`ScrollSource`]. The scroll listener registered in
/// [`PageSession::mount`] is released when the session is dropped.
#[derive(Debug)]
pub struct PageSession {
    content: PageContent,
    behavior: ScrollBehavior,
    navigation: NavigationState,
    completed: CompletionSet,
    bookmarks: BookmarkSet,
    progress: Rc<Cell<ReadingProgress>>,
    scroll: ScrollSource,
    _scroll_listener: ScrollListenerGuard,
}

impl PageSession {
    pub fn mount(content: PageContent, behavior: ScrollBehavior, scroll: &ScrollSource) -> Self {
        let progress = Rc::new(Cell::new(ReadingProgress::from_metrics(&scroll.metrics())));
        let sink = Rc::clone(&progress);
        let listener = scroll.subscribe(move |metrics| {
            sink.set(ReadingProgress::from_metrics(metrics));
        });
        info!(
            slug = %content.slug,
            route = %content.route(),
            default_section = %content.default_section,
            sections = content.registry.len(),
            scroll_mode = %behavior.mode,
            "Mounted lesson page"
        );
        Self {
            navigation: NavigationState::new(content.default_section.clone()),
            content,
            behavior,
            completed: CompletionSet::default(),
            bookmarks: BookmarkSet::default(),
            progress,
            scroll: scroll.clone(),
            _scroll_listener: listener,
        }
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn active_id(&self) -> &SectionId {
        self.navigation.active()
    }

    /// `None` when the active id names no section of this page.
    pub fn active_section(&self) -> Option<&SectionDescriptor> {
        self.content.registry.get(self.navigation.active().as_str())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.navigation.is_active(id)
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.completed.is_complete(id)
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.is_bookmarked(id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.count_in(&self.content.registry)
    }

    pub fn total_sections(&self) -> usize {
        self.content.registry.len()
    }

    pub fn progress(&self) -> ReadingProgress {
        self.progress.get()
    }

    pub fn next_section(&self) -> Option<&SectionId> {
        self.content
            .registry
            .next_of(self.navigation.active().as_str())
    }

    pub fn previous_section(&self) -> Option<&SectionId> {
        self.content
            .registry
            .previous_of(self.navigation.active().as_str())
    }

    /// Activate `section` (any id is accepted) and say where to scroll.
    pub fn navigate_to(&mut self, section: SectionId) -> ScrollRequest {
        if !self.content.registry.contains(section.as_str()) {
            debug!(
                slug = %self.content.slug,
                %section,
                "No section matches; content area will be empty"
            );
        }
        let request = match self.behavior.mode {
            ScrollMode::PageTop => ScrollRequest::Top,
            ScrollMode::SectionAnchor => ScrollRequest::Anchor {
                section: section.clone(),
                offset_px: self.behavior.header_offset_px,
            },
        };
        self.navigation.navigate_to(section);
        info!(section = %self.navigation.active(), "Navigated to section");
        request
    }

    pub fn navigate_next(&mut self) -> Option<ScrollRequest> {
        let next = self.next_section()?.clone();
        Some(self.navigate_to(next))
    }

    pub fn navigate_previous(&mut self) -> Option<ScrollRequest> {
        let previous = self.previous_section()?.clone();
        Some(self.navigate_to(previous))
    }

    /// Returns `true` when the section was not complete before.
    pub fn mark_complete(&mut self, section: SectionId) -> bool {
        let added = self.completed.mark_complete(section.clone());
        if added {
            info!(
                %section,
                completed = self.completed_count(),
                total = self.total_sections(),
                "Marked section complete"
            );
        }
        added
    }

    /// Returns whether the section is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, section: SectionId) -> bool {
        let bookmarked = self.bookmarks.toggle(section.clone());
        info!(%section, bookmarked, "Toggled bookmark");
        bookmarked
    }

    /// Feed new scroll geometry through the page's scroll source.
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        self.scroll.emit(metrics);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let sections = self
            .content
            .registry
            .iter()
            .map(|section| SectionSummary {
                id: section.id.clone(),
                title: section.title.clone(),
                emoji: section.emoji.clone(),
                duration: section.duration.clone(),
                difficulty: section.difficulty,
                active: self.is_active(section.id.as_str()),
                completed: self.is_complete(section.id.as_str()),
                bookmarked: self.is_bookmarked(section.id.as_str()),
            })
            .collect();
        PageSnapshot {
            slug: self.content.slug.clone(),
            title: self.content.title.clone(),
            route: self.content.route(),
            active_section_id: self.navigation.active().clone(),
            active_section: self.active_section().map(|section| ActiveSectionView {
                id: section.id.clone(),
                title: section.title.clone(),
                emoji: section.emoji.clone(),
                duration: section.duration.clone(),
                difficulty: section.difficulty,
                body: section.body.clone(),
            }),
            completed: self.completed.iter().cloned().collect(),
            bookmarked: self.bookmarks.iter().cloned().collect(),
            completed_count: self.completed_count(),
            total_sections: self.total_sections(),
            progress_pct: self.progress(),
            has_next: self.next_section().is_some(),
            has_previous: self.previous_section().is_some(),
            sections,
        }
    }

    pub fn apply_command(&mut self, command: SessionCommand) -> SessionEvent {
        let action = command.action();
        let scroll = match command {
            SessionCommand::GetSnapshot => None,
            SessionCommand::NavigateTo { section } => Some(self.navigate_to(section)),
            SessionCommand::NavigateNext => self.navigate_next(),
            SessionCommand::NavigatePrevious => self.navigate_previous(),
            SessionCommand::MarkComplete { section } => {
                self.mark_complete(section);
                None
            }
            SessionCommand::ToggleBookmark { section } => {
                self.toggle_bookmark(section);
                None
            }
            SessionCommand::Scrolled { metrics } => {
                self.on_scroll(metrics);
                None
            }
        };
        SessionEvent {
            action,
            scroll,
            snapshot: self.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionRegistry;
    use proptest::prelude::*;

    fn page(ids: &[&str], default_section: &str) -> PageContent {
        let sections = ids
            .iter()
            .map(|id| {
                let mut section = SectionDescriptor::new(*id, format!("{id} title"));
                section.body = format!("{id} body");
                section
            })
            .collect();
        PageContent {
            slug: "test-page".to_string(),
            title: "Test Page".to_string(),
            subtitle: String::new(),
            default_section: SectionId::from(default_section),
            previous_page: None,
            next_page: None,
            registry: SectionRegistry::new(sections).expect("valid registry"),
        }
    }

    fn mount(ids: &[&str], default_section: &str) -> (PageSession, ScrollSource) {
        let source = ScrollSource::new(ScrollMetrics::new(0.0, 2_400.0, 800.0));
        let session = PageSession::mount(
            page(ids, default_section),
            ScrollBehavior::default(),
            &source,
        );
        (session, source)
    }

    fn id(raw: &str) -> SectionId {
        SectionId::from(raw)
    }

    #[test]
    fn basic_walkthrough() {
        let (mut session, _source) = mount(&["intro", "core", "advanced"], "intro");
        assert_eq!(session.active_id().as_str(), "intro");

        session.navigate_to(id("core"));
        assert_eq!(session.active_id().as_str(), "core");

        session.mark_complete(id("intro"));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.completed, vec![id("intro")]);

        assert!(session.toggle_bookmark(id("core")));
        assert_eq!(session.snapshot().bookmarked, vec![id("core")]);

        assert!(!session.toggle_bookmark(id("core")));
        assert!(session.snapshot().bookmarked.is_empty());
    }

    #[test]
    fn default_section_need_not_be_first() {
        let (session, _source) = mount(&["overview", "budget", "taxes"], "budget");
        assert_eq!(session.active_id().as_str(), "budget");
        assert_eq!(session.previous_section().map(SectionId::as_str), Some("overview"));
    }

    #[test]
    fn repeated_completion_counts_once() {
        let (mut session, _source) = mount(&["intro", "core"], "intro");
        assert!(session.mark_complete(id("core")));
        assert!(!session.mark_complete(id("core")));
        assert!(!session.mark_complete(id("core")));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.completed, vec![id("core")]);
        assert_eq!(snapshot.completed_count, 1);
        assert_eq!(snapshot.total_sections, 2);
    }

    #[test]
    fn unknown_section_leaves_content_blank() {
        let (mut session, _source) = mount(&["intro", "core"], "intro");
        session.navigate_to(id("nowhere"));
        assert_eq!(session.active_id().as_str(), "nowhere");
        assert!(session.active_section().is_none());
        assert!(session.navigate_next().is_none());
        assert!(session.snapshot().active_section.is_none());
    }

    #[test]
    fn progress_follows_scroll_source() {
        let (session, source) = mount(&["intro"], "intro");
        assert_eq!(session.progress(), ReadingProgress::default());

        source.emit(ScrollMetrics::new(800.0, 2_400.0, 800.0));
        assert!((session.progress().percent() - 50.0).abs() < 1e-4);

        session.on_scroll(ScrollMetrics::new(1_600.0, 2_400.0, 800.0));
        assert_eq!(session.progress().percent(), 100.0);
    }

    #[test]
    fn content_that_fits_reports_no_progress() {
        let (session, source) = mount(&["intro"], "intro");
        source.emit(ScrollMetrics::new(0.0, 800.0, 800.0));
        assert_eq!(session.progress().percent(), 0.0);
        assert!(!session.progress().percent().is_nan());
    }

    #[test]
    fn page_top_navigation_resets_progress_via_scroll() {
        let (mut session, source) = mount(&["intro", "core"], "intro");
        source.emit(ScrollMetrics::new(1_200.0, 2_400.0, 800.0));
        assert!(session.progress().percent() > 0.0);

        let request = session.navigate_to(id("core"));
        assert_eq!(request, ScrollRequest::Top);
        source.scroll_to(request.target_y(None));
        assert_eq!(session.progress(), ReadingProgress::default());
    }

    #[test]
    fn anchor_mode_targets_section_with_header_offset() {
        let source = ScrollSource::default();
        let behavior = ScrollBehavior {
            mode: ScrollMode::SectionAnchor,
            header_offset_px: 80.0,
        };
        let mut session = PageSession::mount(page(&["intro", "core"], "intro"), behavior, &source);

        let request = session.navigate_to(id("core"));
        assert_eq!(
            request,
            ScrollRequest::Anchor {
                section: id("core"),
                offset_px: 80.0,
            }
        );
        assert_eq!(request.target_y(Some(320.0)), 240.0);
    }

    #[test]
    fn dropping_session_releases_scroll_listener() {
        let (session, source) = mount(&["intro"], "intro");
        assert_eq!(source.listener_count(), 1);
        drop(session);
        assert_eq!(source.listener_count(), 0);
        source.emit(ScrollMetrics::new(100.0, 2_400.0, 800.0));
    }

    #[test]
    fn remounting_keeps_one_listener_per_page() {
        let source = ScrollSource::default();
        let first = PageSession::mount(page(&["a"], "a"), ScrollBehavior::default(), &source);
        let second = PageSession::mount(page(&["b"], "b"), ScrollBehavior::default(), &source);
        assert_eq!(source.listener_count(), 2);
        drop(first);
        assert_eq!(source.listener_count(), 1);

        source.emit(ScrollMetrics::new(500.0, 1_000.0, 500.0));
        assert_eq!(second.progress().percent(), 100.0);
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        let (mut session, _source) = mount(&["intro", "core"], "intro");
        assert!(session.navigate_previous().is_none());
        assert_eq!(session.navigate_next(), Some(ScrollRequest::Top));
        assert_eq!(session.active_id().as_str(), "core");
        assert!(session.navigate_next().is_none());
        assert_eq!(session.active_id().as_str(), "core");
    }

    #[test]
    fn command_dispatch_reports_action_and_snapshot() {
        let (mut session, _source) = mount(&["intro", "core"], "intro");

        let event = session.apply_command(SessionCommand::NavigateNext);
        assert_eq!(event.action, "page_navigate_next");
        assert_eq!(event.scroll, Some(ScrollRequest::Top));
        assert_eq!(event.snapshot.active_section_id.as_str(), "core");
        assert!(event.snapshot.has_previous);
        assert!(!event.snapshot.has_next);

        let event = session.apply_command(SessionCommand::MarkComplete { section: id("core") });
        assert_eq!(event.action, "page_mark_complete");
        assert!(event.scroll.is_none());
        assert!(event.snapshot.sections[1].completed);

        let event = session.apply_command(SessionCommand::Scrolled {
            metrics: ScrollMetrics::new(400.0, 2_400.0, 800.0),
        });
        assert_eq!(event.action, "page_scrolled");
        assert!((event.snapshot.progress_pct.percent() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let (mut session, _source) = mount(&["intro", "core"], "intro");
        session.toggle_bookmark(id("core"));
        let json = session.snapshot().to_json_pretty().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("reparse");
        assert_eq!(value["route"], "/learn/test-page");
        assert_eq!(value["active_section_id"], "intro");
        assert_eq!(value["bookmarked"][0], "core");
        assert_eq!(value["sections"][0]["difficulty"], "all-levels");
        assert_eq!(value["progress_pct"], 0.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Navigate(usize),
        Complete(usize),
        Bookmark(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::Navigate),
            (0usize..4).prop_map(Op::Complete),
            (0usize..4).prop_map(Op::Bookmark),
        ]
    }

    const IDS: [&str; 4] = ["intro", "core", "advanced", "extra"];

    proptest! {
        #[test]
        fn trackers_do_not_interfere(ops in prop::collection::vec(op(), 0..40), target in 0usize..4) {
            let (mut session, _source) = mount(&IDS, "intro");
            for op in ops {
                match op {
                    Op::Navigate(idx) => { session.navigate_to(id(IDS[idx])); }
                    Op::Complete(idx) => { session.mark_complete(id(IDS[idx])); }
                    Op::Bookmark(idx) => { session.toggle_bookmark(id(IDS[idx])); }
                }
            }

            let active = session.active_id().clone();
            let others: Vec<(bool, bool)> = IDS
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != target)
                .map(|(_, raw)| (session.is_complete(raw), session.is_bookmarked(raw)))
                .collect();

            session.toggle_bookmark(id(IDS[target]));
            session.mark_complete(id(IDS[target]));

            prop_assert_eq!(session.active_id(), &active);
            let after: Vec<(bool, bool)> = IDS
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != target)
                .map(|(_, raw)| (session.is_complete(raw), session.is_bookmarked(raw)))
                .collect();
            prop_assert_eq!(after, others);
        }
    }
}
