//! Navigation, completion and bookmark state for one page.

use crate::section::{SectionId, SectionRegistry};
use std::collections::BTreeSet;

/// Which section is on screen. Exactly one id is active at any time; it does
/// not have to exist in the page's registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active: SectionId,
}

impl NavigationState {
    pub fn new(default_section: SectionId) -> Self {
        Self {
            active: default_section,
        }
    }

    pub fn active(&self) -> &SectionId {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_str() == id
    }

    /// Returns `true` when the active id changed.
    pub fn navigate_to(&mut self, id: SectionId) -> bool {
        if self.active == id {
            return false;
        }
        self.active = id;
        true
    }
}

/// Sections the reader marked as done. Grows only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: BTreeSet<SectionId>,
}

impl CompletionSet {
    /// Returns `true` when the id was not complete before.
    pub fn mark_complete(&mut self, id: SectionId) -> bool {
        self.ids.insert(id)
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    /// Completed ids that belong to `registry`; feeds the "N of M" counter.
    pub fn count_in(&self, registry: &SectionRegistry) -> usize {
        registry.ids().filter(|id| self.ids.contains(*id)).count()
    }
}

/// Sections the reader flagged for later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: BTreeSet<SectionId>,
}

impl BookmarkSet {
    /// Flips membership and returns whether the id is now bookmarked.
    pub fn toggle(&mut self, id: SectionId) -> bool {
        if self.ids.remove(id.as_str()) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionDescriptor;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn id(raw: &str) -> SectionId {
        SectionId::from(raw)
    }

    #[test]
    fn navigation_replaces_active_section() {
        let mut nav = NavigationState::new(id("intro"));
        assert!(nav.navigate_to(id("core")));
        assert_eq!(nav.active().as_str(), "core");
        assert!(!nav.navigate_to(id("core")));
        assert!(nav.is_active("core"));
        assert!(!nav.is_active("intro"));
    }

    #[test]
    fn completion_is_idempotent() {
        let mut done = CompletionSet::default();
        assert!(done.mark_complete(id("core")));
        assert!(!done.mark_complete(id("core")));
        assert!(!done.mark_complete(id("core")));
        assert_eq!(done.iter().count(), 1);
        assert!(done.is_complete("core"));
    }

    #[test]
    fn completion_counter_ignores_foreign_ids() {
        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("intro", "Intro"),
            SectionDescriptor::new("core", "Core"),
        ])
        .expect("valid");
        let mut done = CompletionSet::default();
        done.mark_complete(id("intro"));
        done.mark_complete(id("elsewhere"));
        assert_eq!(done.iter().count(), 2);
        assert_eq!(done.count_in(&registry), 1);
    }

    #[test]
    fn bookmark_toggle_flips_membership() {
        let mut marks = BookmarkSet::default();
        assert!(marks.toggle(id("core")));
        assert!(marks.is_bookmarked("core"));
        assert!(!marks.toggle(id("core")));
        assert_eq!(marks.iter().count(), 0);
    }

    fn section_ids() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-e]{1,2}", 0..40)
    }

    proptest! {
        #[test]
        fn last_navigation_wins(ids in prop::collection::vec("[a-z]{1,6}", 1..30)) {
            let mut nav = NavigationState::new(id("start"));
            for raw in &ids {
                nav.navigate_to(id(raw));
            }
            let last = ids.last().expect("non-empty");
            prop_assert_eq!(nav.active().as_str(), last.as_str());
        }

        #[test]
        fn completion_is_union_of_marked_ids(ids in section_ids()) {
            let mut done = CompletionSet::default();
            for raw in &ids {
                done.mark_complete(id(raw));
            }
            let expected: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
            let actual: BTreeSet<&str> = done.iter().map(SectionId::as_str).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn double_toggle_restores_membership(
            seed in section_ids(),
            target in "[a-e]{1,2}",
        ) {
            let mut marks = BookmarkSet::default();
            for raw in &seed {
                marks.toggle(id(raw));
            }
            let before = marks.clone();
            marks.toggle(id(&target));
            marks.toggle(id(&target));
            prop_assert_eq!(marks, before);
        }

        #[test]
        fn toggling_one_id_leaves_others_alone(
            seed in section_ids(),
            target in "[a-e]{1,2}",
        ) {
            let mut marks = BookmarkSet::default();
            for raw in &seed {
                marks.toggle(id(raw));
            }
            let others: Vec<(String, bool)> = seed
                .iter()
                .filter(|raw| **raw != target)
                .map(|raw| (raw.clone(), marks.is_bookmarked(raw)))
                .collect();
            marks.toggle(id(&target));
            for (raw, was) in others {
                prop_assert_eq!(marks.is_bookmarked(&raw), was);
            }
        }
    }
}
