use super::defaults;
use super::models::{AppConfig, LogLevel, ScrollMode, ThemeMode};
use serde::Deserialize;

pub(super) const TABLE_NAMES: [&str; 5] = ["appearance", "reading", "ui", "logging", "keys"];

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    reading: ReadingConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            margin_horizontal: tables.appearance.margin_horizontal,
            margin_vertical: tables.appearance.margin_vertical,
            scroll_mode: tables.reading.scroll_mode,
            sticky_header_offset_px: tables.reading.sticky_header_offset_px,
            content_dir: tables.reading.content_dir,
            default_page: tables.reading.default_page,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            show_sidebar: tables.ui.show_sidebar,
            log_level: tables.logging.log_level,
            key_next_section: tables.keys.next_section,
            key_prev_section: tables.keys.prev_section,
            key_mark_complete: tables.keys.mark_complete,
            key_toggle_bookmark: tables.keys.toggle_bookmark,
            key_toggle_sidebar: tables.keys.toggle_sidebar,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                margin_horizontal: config.margin_horizontal,
                margin_vertical: config.margin_vertical,
            },
            reading: ReadingConfig {
                scroll_mode: config.scroll_mode,
                sticky_header_offset_px: config.sticky_header_offset_px,
                content_dir: config.content_dir.clone(),
                default_page: config.default_page.clone(),
            },
            ui: UiConfig {
                window_width: config.window_width,
                window_height: config.window_height,
                show_sidebar: config.show_sidebar,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                next_section: config.key_next_section.clone(),
                prev_section: config.key_prev_section.clone(),
                mark_complete: config.key_mark_complete.clone(),
                toggle_bookmark: config.key_toggle_bookmark.clone(),
                toggle_sidebar: config.key_toggle_sidebar.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_horizontal: u16,
    #[serde(default = "defaults::default_margin_vertical")]
    margin_vertical: u16,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            margin_horizontal: defaults::default_margin_horizontal(),
            margin_vertical: defaults::default_margin_vertical(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ReadingConfig {
    #[serde(default)]
    scroll_mode: ScrollMode,
    #[serde(default = "defaults::default_sticky_header_offset_px")]
    sticky_header_offset_px: f32,
    #[serde(default = "defaults::default_content_dir")]
    content_dir: String,
    #[serde(default = "defaults::default_page")]
    default_page: String,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        ReadingConfig {
            scroll_mode: ScrollMode::default(),
            sticky_header_offset_px: defaults::default_sticky_header_offset_px(),
            content_dir: defaults::default_content_dir(),
            default_page: defaults::default_page(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_show_sidebar")]
    show_sidebar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            show_sidebar: defaults::default_show_sidebar(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_section")]
    next_section: String,
    #[serde(default = "defaults::default_key_prev_section")]
    prev_section: String,
    #[serde(default = "defaults::default_key_mark_complete")]
    mark_complete: String,
    #[serde(default = "defaults::default_key_toggle_bookmark")]
    toggle_bookmark: String,
    #[serde(default = "defaults::default_key_toggle_sidebar")]
    toggle_sidebar: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next_section: defaults::default_key_next_section(),
            prev_section: defaults::default_key_prev_section(),
            mark_complete: defaults::default_key_mark_complete(),
            toggle_bookmark: defaults::default_key_toggle_bookmark(),
            toggle_sidebar: defaults::default_key_toggle_sidebar(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
