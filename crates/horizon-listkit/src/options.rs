//! Construction and runtime options of a [`List`](crate::List).

use std::sync::Arc;
use std::time::Duration;

use horizon_listkit_core::{Clock, SystemClock};

use crate::events::KeyEvent;
use crate::index_trait::MarkerRenderer;
use crate::reconcile::IdentityProvider;
use crate::selection::{DefaultMultipleSelectionController, MultipleSelectionController};
use crate::type_navigation::{
    DEFAULT_TYPE_NAVIGATION_DEBOUNCE, DefaultKeyboardNavigationDelegate,
    KeyboardNavigationDelegate, TypeNavigationMode,
};

/// Label type-ahead navigation matches against.
pub trait KeyboardNavigationLabelProvider<T>: Send + Sync {
    fn keyboard_navigation_label(&self, element: &T) -> Option<String>;
}

impl<T, F> KeyboardNavigationLabelProvider<T> for F
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn keyboard_navigation_label(&self, element: &T) -> Option<String> {
        self(element)
    }
}

/// Accessible name of a row, announced when type navigation settles.
pub trait AccessibilityProvider<T>: Send + Sync {
    fn aria_label(&self, element: &T) -> Option<String>;
}

impl<T, F> AccessibilityProvider<T> for F
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn aria_label(&self, element: &T) -> Option<String> {
        self(element)
    }
}

/// Predicate deciding whether a key event may reach type navigation.
pub type KeyEventFilter = Arc<dyn Fn(&KeyEvent) -> bool + Send + Sync>;

/// Options fixed at construction.
///
/// ```
/// use horizon_listkit::ListOptions;
///
/// let options = ListOptions::<String>::new()
///     .with_multiple_selection_support(false)
///     .with_keyboard_navigation_label_provider(|s: &String| Some(s.clone()));
/// assert!(!options.multiple_selection_support);
/// ```
pub struct ListOptions<T> {
    pub keyboard_support: bool,
    pub mouse_support: bool,
    pub multiple_selection_support: bool,
    /// Type navigation listens for keystrokes. Needs a label provider.
    pub type_navigation_enabled: bool,
    pub type_navigation_mode: TypeNavigationMode,
    /// Accept fuzzy matches in addition to prefix matches.
    pub fuzzy_type_navigation: bool,
    pub type_navigation_debounce: Duration,
    pub identity_provider: Option<Arc<dyn IdentityProvider<T>>>,
    pub keyboard_navigation_label_provider: Option<Arc<dyn KeyboardNavigationLabelProvider<T>>>,
    pub keyboard_navigation_delegate: Arc<dyn KeyboardNavigationDelegate>,
    pub keyboard_navigation_event_filter: Option<KeyEventFilter>,
    pub accessibility_provider: Option<Arc<dyn AccessibilityProvider<T>>>,
    pub multiple_selection_controller: Arc<dyn MultipleSelectionController>,
    pub marker_renderer: Option<Arc<dyn MarkerRenderer>>,
    pub clock: Arc<dyn Clock>,
}

impl<T> ListOptions<T> {
    pub fn new() -> Self {
        Self {
            keyboard_support: true,
            mouse_support: true,
            multiple_selection_support: true,
            type_navigation_enabled: true,
            type_navigation_mode: TypeNavigationMode::Automatic,
            fuzzy_type_navigation: true,
            type_navigation_debounce: DEFAULT_TYPE_NAVIGATION_DEBOUNCE,
            identity_provider: None,
            keyboard_navigation_label_provider: None,
            keyboard_navigation_delegate: Arc::new(DefaultKeyboardNavigationDelegate),
            keyboard_navigation_event_filter: None,
            accessibility_provider: None,
            multiple_selection_controller: Arc::new(DefaultMultipleSelectionController),
            marker_renderer: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_keyboard_support(mut self, enabled: bool) -> Self {
        self.keyboard_support = enabled;
        self
    }

    pub fn with_mouse_support(mut self, enabled: bool) -> Self {
        self.mouse_support = enabled;
        self
    }

    pub fn with_multiple_selection_support(mut self, enabled: bool) -> Self {
        self.multiple_selection_support = enabled;
        self
    }

    pub fn with_type_navigation_enabled(mut self, enabled: bool) -> Self {
        self.type_navigation_enabled = enabled;
        self
    }

    pub fn with_type_navigation_mode(mut self, mode: TypeNavigationMode) -> Self {
        self.type_navigation_mode = mode;
        self
    }

    pub fn with_fuzzy_type_navigation(mut self, enabled: bool) -> Self {
        self.fuzzy_type_navigation = enabled;
        self
    }

    pub fn with_type_navigation_debounce(mut self, debounce: Duration) -> Self {
        self.type_navigation_debounce = debounce;
        self
    }

    pub fn with_identity_provider(mut self, provider: impl IdentityProvider<T> + 'static) -> Self {
        self.identity_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_keyboard_navigation_label_provider(
        mut self,
        provider: impl KeyboardNavigationLabelProvider<T> + 'static,
    ) -> Self {
        self.keyboard_navigation_label_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_keyboard_navigation_delegate(
        mut self,
        delegate: impl KeyboardNavigationDelegate + 'static,
    ) -> Self {
        self.keyboard_navigation_delegate = Arc::new(delegate);
        self
    }

    pub fn with_keyboard_navigation_event_filter(
        mut self,
        filter: impl Fn(&KeyEvent) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.keyboard_navigation_event_filter = Some(Arc::new(filter));
        self
    }

    pub fn with_accessibility_provider(
        mut self,
        provider: impl AccessibilityProvider<T> + 'static,
    ) -> Self {
        self.accessibility_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_multiple_selection_controller(
        mut self,
        controller: impl MultipleSelectionController + 'static,
    ) -> Self {
        self.multiple_selection_controller = Arc::new(controller);
        self
    }

    pub fn with_marker_renderer(mut self, renderer: impl MarkerRenderer + 'static) -> Self {
        self.marker_renderer = Some(Arc::new(renderer));
        self
    }

    /// Time source for the type navigation debounce and page settling.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl<T> Default for ListOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ListOptions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListOptions")
            .field("keyboard_support", &self.keyboard_support)
            .field("mouse_support", &self.mouse_support)
            .field("multiple_selection_support", &self.multiple_selection_support)
            .field("type_navigation_enabled", &self.type_navigation_enabled)
            .field("type_navigation_mode", &self.type_navigation_mode)
            .field("fuzzy_type_navigation", &self.fuzzy_type_navigation)
            .field("type_navigation_debounce", &self.type_navigation_debounce)
            .field("identity_provider", &self.identity_provider.is_some())
            .finish_non_exhaustive()
    }
}

/// Options that can change after construction. `None` leaves a value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptionsUpdate {
    pub keyboard_support: Option<bool>,
    pub mouse_support: Option<bool>,
    pub multiple_selection_support: Option<bool>,
    pub type_navigation_enabled: Option<bool>,
    pub type_navigation_mode: Option<TypeNavigationMode>,
    pub fuzzy_type_navigation: Option<bool>,
    pub type_navigation_debounce: Option<Duration>,
}
