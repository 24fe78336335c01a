//! Input events consumed by the list controllers.
//!
//! These are platform-neutral: the host converts its native pointer and
//! keyboard events into [`PointerEvent`] and [`KeyEvent`] before handing them
//! to the list. An event that caused a trait change travels with the change
//! notification as an [`InputEvent`].

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Returns true if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// The platform's primary command modifier: Cmd on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.meta
        } else {
            self.control
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Keys the list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    ContextMenu,
    F10,
    /// A key that produces a character, e.g. `Character('a')`.
    Character(char),
    /// Anything else.
    Unknown,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text this key press produces, empty for non-printable keys.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyEvent {
    /// Create a key press without text.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        let text = match key {
            Key::Character(c) => c.to_string(),
            _ => String::new(),
        };
        Self {
            key,
            modifiers,
            text,
            is_repeat: false,
        }
    }

    /// Create an unmodified key press for a printable character.
    pub fn character(c: char) -> Self {
        Self::new(Key::Character(c), KeyboardModifiers::NONE)
    }
}

/// A pointer press, click, or double click on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The row under the pointer, `None` over empty space.
    pub index: Option<usize>,
    /// The button involved.
    pub button: MouseButton,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// A left-button event on `index` with the given modifiers.
    pub fn new(index: Option<usize>, modifiers: KeyboardModifiers) -> Self {
        Self {
            index,
            button: MouseButton::Left,
            modifiers,
        }
    }

    /// An unmodified left click on a row.
    pub fn click(index: usize) -> Self {
        Self::new(Some(index), KeyboardModifiers::NONE)
    }

    /// Replace the button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// The input that caused a focus or selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}
