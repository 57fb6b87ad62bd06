use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Native key representation for typeahead
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    F(u8),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Insert,
    Null,
}

/// Coarse key category used to decide whether a key release refreshes suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Caret movement keys: arrows, Home/End, paging
    Navigation,
    /// F1..F24
    Function,
    /// Everything else, including Escape, Tab and modifier chords
    Edit,
}

impl Key {
    pub fn class(&self) -> KeyClass {
        match self {
            Key::Up
            | Key::Down
            | Key::Left
            | Key::Right
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown => KeyClass::Navigation,
            Key::F(_) => KeyClass::Function,
            _ => KeyClass::Edit,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Alt(c) => write!(f, "M-{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Backspace => write!(f, "BS"),
            Key::Tab => write!(f, "TAB"),
            Key::Delete => write!(f, "DEL"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PgUp"),
            Key::PageDown => write!(f, "PgDn"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Insert => write!(f, "Ins"),
            Key::Null => write!(f, "NUL"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();

        // Ctrl notation: ^X or C-x
        match chars.as_slice() {
            ['^', c] => return Ok(Key::Ctrl(c.to_ascii_lowercase())),
            ['C', '-', c] => return Ok(Key::Ctrl(c.to_ascii_lowercase())),
            ['M', '-', c] => return Ok(Key::Alt(c.to_ascii_lowercase())),
            [c] => return Ok(Key::Char(*c)),
            _ => {}
        }

        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "BACKSPACE" | "BS" => Ok(Key::Backspace),
            "ESC" => Ok(Key::Esc),
            "DELETE" | "DEL" => Ok(Key::Delete),
            "HOME" => Ok(Key::Home),
            "END" => Ok(Key::End),
            "PAGEUP" | "PGUP" => Ok(Key::PageUp),
            "PAGEDOWN" | "PGDN" => Ok(Key::PageDown),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            "INSERT" | "INS" => Ok(Key::Insert),
            "NUL" | "NULL" => Ok(Key::Null),
            upper => {
                // Function keys F1-F24
                if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=24).contains(&n) {
                        return Ok(Key::F(n));
                    }
                }
                Err(format!("Unknown key: {}", s))
            }
        }
    }
}

/// Native input event representation for typeahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    /// Plain key press without modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
        }
    }
}

/// Mouse button types
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Type of mouse event
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollDown,
    ScrollUp,
}

/// Native mouse event representation for typeahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub column: u16,
    pub row: u16,
    pub kind: MouseEventKind,
    pub click_count: u8, // 1 = single, 2 = double
}

/// Result of looking a key press up in the binding table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Found a command binding
    Command(String),
    /// Key should be inserted as a character
    InsertChar(char),
    /// Neither bound nor printable
    Unbound,
}

/// Single-key binding table (key -> command name)
#[derive(Debug, Default, Clone)]
pub struct KeyBindings {
    bindings: HashMap<Key, String>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key description such as "^S", "F2" or "Tab" to a command.
    /// Unknown key descriptions are reported back to the caller.
    pub fn bind(&mut self, key: &str, command: impl Into<String>) -> Result<(), String> {
        let key = Key::from_str(key)?;
        self.bindings.insert(key, command.into());
        Ok(())
    }

    pub fn lookup(&self, event: &InputEvent) -> LookupResult {
        let normalized = match &event.key {
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            Key::Alt(c) => Key::Alt(c.to_ascii_lowercase()),
            other => other.clone(),
        };
        if let Some(command) = self.bindings.get(&normalized) {
            return LookupResult::Command(command.clone());
        }
        match event.key {
            Key::Char(c) if !event.ctrl && !event.alt => LookupResult::InsertChar(c),
            _ => LookupResult::Unbound,
        }
    }
}
