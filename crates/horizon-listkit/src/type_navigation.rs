//! Type-ahead navigation.
//!
//! Printable keystrokes accumulate into a search word. The first keystroke
//! after a pause searches from the row after the focus; later keystrokes
//! re-scan from the focused row itself so the match can stay put while the
//! word grows. After the debounce interval without input the word is
//! dropped.

use std::time::Duration;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use horizon_listkit_core::logging::targets;
use horizon_listkit_core::{TimerId, TimerManager};

use crate::events::{Key, KeyEvent};

/// Default pause after which the search word is dropped.
pub const DEFAULT_TYPE_NAVIGATION_DEBOUNCE: Duration = Duration::from_millis(800);

/// Whether keystrokes are currently extending a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeNavigationState {
    #[default]
    Idle,
    Typing,
}

/// When keystrokes feed type navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeNavigationMode {
    /// Every printable keystroke.
    #[default]
    Automatic,
    /// Only after [`TypeNavigationController::trigger`].
    Trigger,
}

/// Decides which key events can produce a printable character.
pub trait KeyboardNavigationDelegate: Send + Sync {
    fn might_produce_printable_character(&self, event: &KeyEvent) -> bool;
}

/// Letters, digits and punctuation without Ctrl, Alt or Meta.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyboardNavigationDelegate;

impl KeyboardNavigationDelegate for DefaultKeyboardNavigationDelegate {
    fn might_produce_printable_character(&self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers;
        if modifiers.control || modifiers.meta || modifiers.alt {
            return false;
        }
        matches!(event.key, Key::Character(c) if c.is_alphanumeric() || c.is_ascii_punctuation())
    }
}

/// Type-ahead search state machine.
#[derive(Debug)]
pub struct TypeNavigationController {
    enabled: bool,
    mode: TypeNavigationMode,
    fuzzy: bool,
    debounce: Duration,
    state: TypeNavigationState,
    triggered: bool,
    word: String,
    previously_focused: Option<usize>,
    clear_timer: Option<TimerId>,
}

impl TypeNavigationController {
    pub fn new(enabled: bool, mode: TypeNavigationMode, fuzzy: bool, debounce: Duration) -> Self {
        Self {
            enabled,
            mode,
            fuzzy,
            debounce,
            state: TypeNavigationState::Idle,
            triggered: false,
            word: String::new(),
            previously_focused: None,
            clear_timer: None,
        }
    }

    pub fn state(&self) -> TypeNavigationState {
        self.state
    }

    /// The word typed so far.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn mode(&self) -> TypeNavigationMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn set_mode(&mut self, mode: TypeNavigationMode) {
        self.mode = mode;
    }

    pub fn set_fuzzy(&mut self, fuzzy: bool) {
        self.fuzzy = fuzzy;
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Enable or disable. Disabling drops any word in progress.
    pub fn set_enabled(&mut self, enabled: bool, timers: &mut TimerManager) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            if let Some(id) = self.clear_timer.take() {
                let _ = timers.stop(id);
            }
            self.reset();
            self.previously_focused = None;
        }
    }

    /// Toggle listening in [`TypeNavigationMode::Trigger`].
    pub fn trigger(&mut self) {
        self.triggered = !self.triggered;
    }

    /// Whether keystrokes are currently fed to the search.
    pub fn is_listening(&self) -> bool {
        self.enabled && (self.mode == TypeNavigationMode::Automatic || self.triggered)
    }

    /// Append `text` to the word and restart the debounce timer.
    pub(crate) fn push_text(&mut self, text: &str, timers: &mut TimerManager) -> &str {
        if let Some(id) = self.clear_timer.take() {
            let _ = timers.stop(id);
        }
        self.clear_timer = Some(timers.start_one_shot(self.debounce));
        self.word.push_str(text);
        &self.word
    }

    pub(crate) fn is_clear_timer(&self, id: TimerId) -> bool {
        self.clear_timer == Some(id)
    }

    /// Drop the word after the debounce expired. Returns the row that was
    /// focused when the last match was made.
    pub(crate) fn clear(&mut self) -> Option<usize> {
        self.clear_timer = None;
        self.reset();
        self.previously_focused.take()
    }

    fn reset(&mut self) {
        self.word.clear();
        self.state = TypeNavigationState::Idle;
        self.triggered = false;
    }

    /// Find the row `word` navigates to.
    ///
    /// `label(i)` is the navigation label of row `i`. A case-insensitive
    /// prefix match wins immediately. With fuzzy matching, a row whose label
    /// contains the word as one contiguous span of more than one character is
    /// accepted too. Without fuzzy matching, rows without a label are
    /// accepted along with prefix matches.
    pub fn find(
        &mut self,
        word: &str,
        focus: Option<usize>,
        len: usize,
        label: impl Fn(usize) -> Option<String>,
    ) -> Option<usize> {
        let start = focus.unwrap_or(0);
        let delta = match self.state {
            TypeNavigationState::Idle => 1,
            TypeNavigationState::Typing => 0,
        };
        self.state = TypeNavigationState::Typing;

        let needle = word.to_lowercase();
        let mut fuzzy = self.fuzzy.then(|| FuzzySpan::new(word));

        for i in 0..len {
            let index = (start + i + delta) % len;
            let label = label(index);

            let accepted = match (&label, fuzzy.as_mut()) {
                (Some(label), Some(fuzzy)) => {
                    label.to_lowercase().starts_with(&needle) || fuzzy.is_single_long_span(label)
                }
                (None, Some(_)) => false,
                (Some(label), None) => label.to_lowercase().starts_with(&needle),
                (None, None) => true,
            };

            if accepted {
                tracing::debug!(
                    target: targets::TYPE_NAVIGATION,
                    word,
                    index,
                    ?label,
                    "type navigation match"
                );
                self.previously_focused = Some(start);
                return Some(index);
            }
        }

        tracing::trace!(target: targets::TYPE_NAVIGATION, word, "type navigation found nothing");
        None
    }
}

impl Default for TypeNavigationController {
    fn default() -> Self {
        Self::new(
            true,
            TypeNavigationMode::Automatic,
            true,
            DEFAULT_TYPE_NAVIGATION_DEBOUNCE,
        )
    }
}

/// Fuzzy matcher reused across one scan.
struct FuzzySpan {
    matcher: Matcher,
    pattern: Pattern,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl FuzzySpan {
    fn new(word: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::new(
                word,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            buf: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Whether the fuzzy match of the word in `label` is exactly one run of
    /// adjacent characters longer than one.
    fn is_single_long_span(&mut self, label: &str) -> bool {
        self.indices.clear();
        let haystack = Utf32Str::new(label, &mut self.buf);
        if self
            .pattern
            .indices(haystack, &mut self.matcher, &mut self.indices)
            .is_none()
        {
            return false;
        }

        self.indices.sort_unstable();
        self.indices.dedup();
        let Some((&first, rest)) = self.indices.split_first() else {
            return false;
        };

        let mut previous = first;
        for &index in rest {
            if index != previous + 1 {
                return false;
            }
            previous = index;
        }
        previous > first
    }
}
