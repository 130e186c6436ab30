use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

/// A key binding read from config, e.g. `"ctrl+s"` or `"n"`.
#[derive(Debug, Clone, PartialEq)]
struct Shortcut {
    key: String,
    modifiers: Modifiers,
}

impl Shortcut {
    /// `None` when the binding names modifiers but no key. A blank binding
    /// uses `fallback`.
    fn parse(raw: &str, fallback: &str) -> Option<Self> {
        let raw = match raw.trim() {
            "" => fallback,
            trimmed => trimmed,
        };

        let mut modifiers = Modifiers::empty();
        let mut key = None;
        for part in raw.split('+').map(str::trim).filter(|part| !part.is_empty()) {
            let part = part.to_ascii_lowercase();
            match part.as_str() {
                "ctrl" | "control" => modifiers.insert(Modifiers::CTRL),
                "alt" => modifiers.insert(Modifiers::ALT),
                "shift" => modifiers.insert(Modifiers::SHIFT),
                "logo" | "meta" | "super" | "cmd" | "command" => modifiers.insert(Modifiers::LOGO),
                _ => key = Some(canonical_key_name(part)),
            }
        }

        Some(Self {
            key: key?,
            modifiers,
        })
    }

    fn matches(&self, pressed: &str, modifiers: Modifiers) -> bool {
        self.key == pressed && self.modifiers == modifiers
    }
}

fn canonical_key_name(name: String) -> String {
    match name.as_str() {
        "spacebar" => "space".to_string(),
        "arrowright" => "right".to_string(),
        "arrowleft" => "left".to_string(),
        _ => name,
    }
}

fn pressed_key_name(key: &Key) -> Option<String> {
    match key.as_ref() {
        Key::Named(key::Named::Space) => Some("space".to_string()),
        Key::Named(key::Named::ArrowRight) => Some("right".to_string()),
        Key::Named(key::Named::ArrowLeft) => Some("left".to_string()),
        Key::Character(ch) => Some(ch.to_ascii_lowercase()),
        _ => None,
    }
}

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = pressed_key_name(&key)?;
        let keys = &self.config;
        let bindings = [
            (&keys.key_safe_quit, "q", Message::SafeQuit),
            (&keys.key_next_section, "n", Message::NextSection),
            (&keys.key_prev_section, "p", Message::PreviousSection),
            (&keys.key_mark_complete, "c", Message::MarkActiveComplete),
            (&keys.key_toggle_bookmark, "b", Message::ToggleActiveBookmark),
            (&keys.key_toggle_sidebar, "ctrl+s", Message::ToggleSidebar),
        ];

        bindings.into_iter().find_map(|(raw, fallback, message)| {
            Shortcut::parse(raw, fallback)
                .filter(|shortcut| shortcut.matches(&pressed, modifiers))
                .map(|_| message)
        })
    }
}
