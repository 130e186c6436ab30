//! Section descriptors and the per-page registry that orders them.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// Stable identifier of a section within one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Intended audience of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    AllLevels,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::AllLevels => "All Levels",
        };
        write!(f, "{}", label)
    }
}

/// One block of lesson content. Everything except `id`, `next` and
/// `previous` is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Explicit successor; overrides list order when set.
    #[serde(default)]
    pub next: Option<SectionId>,
    /// Explicit predecessor; overrides list order when set.
    #[serde(default)]
    pub previous: Option<SectionId>,
    #[serde(default)]
    pub body: String,
}

impl SectionDescriptor {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            emoji: String::new(),
            duration: String::new(),
            difficulty: Difficulty::default(),
            next: None,
            previous: None,
            body: String::new(),
        }
    }
}

/// Ordered, id-unique list of a page's sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<SectionDescriptor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if section.id.as_str().trim().is_empty() {
                bail!("section {:?} has an empty id", section.title);
            }
            if !seen.insert(section.id.as_str()) {
                bail!("duplicate section id `{}`", section.id);
            }
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|section| &section.id)
    }

    pub fn get(&self, id: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|section| section.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.id.as_str() == id)
    }

    pub fn next_of(&self, id: &str) -> Option<&SectionId> {
        let idx = self.position(id)?;
        if let Some(next) = self.sections[idx].next.as_ref() {
            return Some(next);
        }
        self.sections.get(idx + 1).map(|section| &section.id)
    }

    pub fn previous_of(&self, id: &str) -> Option<&SectionId> {
        let idx = self.position(id)?;
        if let Some(previous) = self.sections[idx].previous.as_ref() {
            return Some(previous);
        }
        idx.checked_sub(1)
            .and_then(|prev| self.sections.get(prev))
            .map(|section| &section.id)
    }

    /// Explicit `next`/`previous` links that point at ids this page lacks,
    /// as `(from, to)` pairs.
    pub fn dangling_links(&self) -> Vec<(&SectionId, &SectionId)> {
        self.sections
            .iter()
            .flat_map(|section| {
                section
                    .next
                    .iter()
                    .chain(section.previous.iter())
                    .map(move |target| (&section.id, target))
            })
            .filter(|(_, target)| !self.contains(target.as_str()))
            .collect()
    }
}
