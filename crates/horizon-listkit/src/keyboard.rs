//! Key bindings of the list.

use crate::events::{Key, KeyEvent};

/// A list action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    /// Enter: the selection becomes the focus.
    SelectFocused,
    /// Up arrow.
    FocusPrevious,
    /// Down arrow.
    FocusNext,
    FocusPreviousPage,
    FocusNextPage,
    /// Ctrl+A (Cmd+A on macOS).
    SelectAll,
    /// Escape with a non-empty selection.
    ClearSelection,
}

/// Maps key presses to [`ListCommand`]s.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardController {
    enabled: bool,
    multiple_selection_support: bool,
}

impl KeyboardController {
    pub fn new(enabled: bool, multiple_selection_support: bool) -> Self {
        Self {
            enabled,
            multiple_selection_support,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_multiple_selection_support(&mut self, enabled: bool) {
        self.multiple_selection_support = enabled;
    }

    /// The command bound to `event`, if any. Escape only binds while something
    /// is selected.
    pub fn command_for(&self, event: &KeyEvent, has_selection: bool) -> Option<ListCommand> {
        if !self.enabled {
            return None;
        }

        match event.key {
            Key::Enter => Some(ListCommand::SelectFocused),
            Key::ArrowUp => Some(ListCommand::FocusPrevious),
            Key::ArrowDown => Some(ListCommand::FocusNext),
            Key::PageUp => Some(ListCommand::FocusPreviousPage),
            Key::PageDown => Some(ListCommand::FocusNextPage),
            Key::Character('a' | 'A')
                if self.multiple_selection_support && event.modifiers.command() =>
            {
                Some(ListCommand::SelectAll)
            }
            Key::Escape if has_selection => {
                Some(ListCommand::ClearSelection)
            }
            _ => None,
        }
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeyboardModifiers;

    fn press(key: Key) -> KeyEvent {
        KeyEvent::new(key, KeyboardModifiers::NONE)
    }

    fn command_a() -> KeyEvent {
        let modifiers = if cfg!(target_os = "macos") {
            KeyboardModifiers::META
        } else {
            KeyboardModifiers::CTRL
        };
        KeyEvent::new(Key::Character('a'), modifiers)
    }

    #[test]
    fn test_navigation_keys() {
        let keyboard = KeyboardController::default();
        assert_eq!(
            keyboard.command_for(&press(Key::Enter), false),
            Some(ListCommand::SelectFocused)
        );
        assert_eq!(
            keyboard.command_for(&press(Key::ArrowUp), false),
            Some(ListCommand::FocusPrevious)
        );
        assert_eq!(
            keyboard.command_for(&press(Key::ArrowDown), false),
            Some(ListCommand::FocusNext)
        );
        assert_eq!(
            keyboard.command_for(&press(Key::PageUp), false),
            Some(ListCommand::FocusPreviousPage)
        );
        assert_eq!(
            keyboard.command_for(&press(Key::PageDown), false),
            Some(ListCommand::FocusNextPage)
        );
        assert_eq!(keyboard.command_for(&KeyEvent::character('a'), false), None);
    }

    #[test]
    fn test_select_all_and_escape() {
        let keyboard = KeyboardController::default();
        assert_eq!(keyboard.command_for(&command_a(), false), Some(ListCommand::SelectAll));
        assert_eq!(keyboard.command_for(&press(Key::Escape), false), None);
        assert_eq!(
            keyboard.command_for(&press(Key::Escape), true),
            Some(ListCommand::ClearSelection)
        );
    }

    #[test]
    fn test_single_selection_drops_select_all() {
        let keyboard = KeyboardController::new(true, false);
        assert_eq!(keyboard.command_for(&command_a(), false), None);
        assert_eq!(
            keyboard.command_for(&press(Key::Escape), true),
            Some(ListCommand::ClearSelection)
        );
        assert_eq!(keyboard.command_for(&press(Key::Escape), false), None);
        assert_eq!(
            keyboard.command_for(&press(Key::Enter), false),
            Some(ListCommand::SelectFocused)
        );
    }

    #[test]
    fn test_disabled() {
        let mut keyboard = KeyboardController::default();
        keyboard.set_enabled(false);
        assert_eq!(keyboard.command_for(&press(Key::ArrowDown), false), None);
    }
}
