//! Lesson page content loaded from TOML files.
//!
//! Each page lives in `<content_dir>/<slug>.toml`. The text is treated as
//! opaque data; only section ids and link fields carry meaning here.

use crate::section::{SectionDescriptor, SectionId, SectionRegistry};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PAGE_EXTENSION: &str = "toml";

#[derive(Debug, Deserialize)]
struct PageFile {
    title: String,
    #[serde(default)]
    subtitle: String,
    default_section: SectionId,
    #[serde(default)]
    previous_page: Option<String>,
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    sections: Vec<SectionDescriptor>,
}

/// A fully validated lesson page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub default_section: SectionId,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
    pub registry: SectionRegistry,
}

impl PageContent {
    /// Router path of the page.
    pub fn route(&self) -> String {
        format!("/learn/{}", self.slug)
    }
}

/// Parse page TOML. `slug` names the page in routes and errors.
pub fn parse_page(slug: &str, contents: &str) -> Result<PageContent> {
    let file: PageFile =
        toml::from_str(contents).with_context(|| format!("page `{slug}` is not valid TOML"))?;
    let registry = SectionRegistry::new(file.sections)
        .with_context(|| format!("page `{slug}` has invalid sections"))?;
    if registry.is_empty() {
        bail!("page `{slug}` has no sections");
    }
    if !registry.contains(file.default_section.as_str()) {
        bail!(
            "page `{slug}` opens on unknown section `{}`",
            file.default_section
        );
    }
    for (from, to) in registry.dangling_links() {
        warn!(page = slug, %from, %to, "Section links to an id the page does not define");
    }

    Ok(PageContent {
        slug: slug.to_string(),
        title: file.title,
        subtitle: file.subtitle,
        default_section: file.default_section,
        previous_page: file.previous_page,
        next_page: file.next_page,
        registry,
    })
}

/// Load one page file; the slug is the file stem.
pub fn load_page(path: &Path) -> Result<PageContent> {
    let slug = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("page path has no usable name: {}", path.display()))?;
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read page file {}", path.display()))?;
    let page = parse_page(slug, &contents)?;
    info!(
        slug = %page.slug,
        sections = page.registry.len(),
        path = %path.display(),
        "Loaded lesson page"
    );
    Ok(page)
}

/// Directory of lesson pages addressed by slug.
#[derive(Debug, Clone)]
pub struct PageCatalog {
    dir: PathBuf,
}

impl PageCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slug: &str) -> Result<PathBuf> {
        if !is_valid_slug(slug) {
            bail!("invalid page slug `{slug}`");
        }
        Ok(self.dir.join(format!("{slug}.{PAGE_EXTENSION}")))
    }

    pub fn load(&self, slug: &str) -> Result<PageContent> {
        let path = self.path_for(slug)?;
        load_page(&path)
    }

    /// Slugs of every page file in the directory, sorted.
    pub fn slugs(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list pages in {}", self.dir.display()))?;
        let mut slugs = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to read entry in {}", self.dir.display()))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(slug) if is_valid_slug(slug) => slugs.push(slug.to_string()),
                _ => debug!(path = %path.display(), "Skipping file with unusable page name"),
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
