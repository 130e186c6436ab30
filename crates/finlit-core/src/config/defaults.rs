pub(crate) fn default_font_size() -> u32 {
    17
}

pub(crate) fn default_line_spacing() -> f32 {
    1.4
}

pub(crate) fn default_margin_horizontal() -> u16 {
    48
}

pub(crate) fn default_margin_vertical() -> u16 {
    16
}

pub(crate) fn default_window_width() -> f32 {
    1180.0
}

pub(crate) fn default_window_height() -> f32 {
    820.0
}

pub(crate) fn default_sticky_header_offset_px() -> f32 {
    80.0
}

pub(crate) fn default_content_dir() -> String {
    "content/pages".to_string()
}

pub(crate) fn default_page() -> String {
    "credit-score".to_string()
}

pub(crate) fn default_show_sidebar() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_next_section() -> String {
    "n".to_string()
}

pub(crate) fn default_key_prev_section() -> String {
    "p".to_string()
}

pub(crate) fn default_key_mark_complete() -> String {
    "c".to_string()
}

pub(crate) fn default_key_toggle_bookmark() -> String {
    "b".to_string()
}

pub(crate) fn default_key_toggle_sidebar() -> String {
    "ctrl+s".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
