use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_margin_horizontal")]
    pub margin_horizontal: u16,
    #[serde(default = "crate::config::defaults::default_margin_vertical")]
    pub margin_vertical: u16,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub scroll_mode: ScrollMode,
    #[serde(default = "crate::config::defaults::default_sticky_header_offset_px")]
    pub sticky_header_offset_px: f32,
    #[serde(default = "crate::config::defaults::default_content_dir")]
    pub content_dir: String,
    #[serde(default = "crate::config::defaults::default_page")]
    pub default_page: String,
    #[serde(default = "crate::config::defaults::default_show_sidebar")]
    pub show_sidebar: bool,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_next_section")]
    pub key_next_section: String,
    #[serde(default = "crate::config::defaults::default_key_prev_section")]
    pub key_prev_section: String,
    #[serde(default = "crate::config::defaults::default_key_mark_complete")]
    pub key_mark_complete: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_bookmark")]
    pub key_toggle_bookmark: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_sidebar")]
    pub key_toggle_sidebar: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            margin_horizontal: crate::config::defaults::default_margin_horizontal(),
            margin_vertical: crate::config::defaults::default_margin_vertical(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            scroll_mode: ScrollMode::default(),
            sticky_header_offset_px: crate::config::defaults::default_sticky_header_offset_px(),
            content_dir: crate::config::defaults::default_content_dir(),
            default_page: crate::config::defaults::default_page(),
            show_sidebar: crate::config::defaults::default_show_sidebar(),
            log_level: crate::config::defaults::default_log_level(),
            key_next_section: crate::config::defaults::default_key_next_section(),
            key_prev_section: crate::config::defaults::default_key_prev_section(),
            key_mark_complete: crate::config::defaults::default_key_mark_complete(),
            key_toggle_bookmark: crate::config::defaults::default_key_toggle_bookmark(),
            key_toggle_sidebar: crate::config::defaults::default_key_toggle_sidebar(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Where the viewport goes after switching sections.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollMode {
    /// Jump to the top of the whole page.
    #[default]
    PageTop,
    /// Jump to the section's anchor, leaving room for the sticky header.
    SectionAnchor,
}

impl std::fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScrollMode::PageTop => "page-top",
            ScrollMode::SectionAnchor => "section-anchor",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
