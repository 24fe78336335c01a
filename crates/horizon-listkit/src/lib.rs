//! Horizon Listkit - headless state engine for virtualized list widgets.
//!
//! A [`List`] tracks three index sets over an externally owned
//! [`RowSource`]: the focused rows, the selected rows and the range-selection
//! anchor. It keeps them valid while items are spliced in and out, and turns
//! pointer and keyboard input into new sets: range and toggle selection,
//! arrow and page navigation, and type-ahead search.
//!
//! Rendering stays with the host. It binds row handles with
//! [`List::render_row`] and receives marker updates through a
//! [`MarkerRenderer`].
//!
//! # Example
//!
//! ```
//! use horizon_listkit::{KeyboardModifiers, List, ListOptions, MemoryRowSource, PointerEvent};
//!
//! let rows = MemoryRowSource::new(20.0, 200.0).with_items((0..50).collect::<Vec<u32>>());
//! let mut list = List::new("outline", rows, ListOptions::new());
//!
//! list.on_pointer(&PointerEvent::click(3)).unwrap();
//! list.on_pointer(&PointerEvent::new(Some(6), KeyboardModifiers::SHIFT)).unwrap();
//! assert_eq!(list.get_selection(), &[3, 4, 5, 6]);
//! ```

pub use horizon_listkit_core::*;

mod error;
mod events;
mod index_set;
mod index_trait;
mod keyboard;
mod list;
mod navigation;
mod options;
mod reconcile;
mod row_source;
mod selection;
mod type_navigation;

pub use error::{ListError, Result};
pub use events::{InputEvent, Key, KeyEvent, KeyboardModifiers, MouseButton, PointerEvent};
pub use index_set::{
    SortedIndexSet, contiguous_run_containing, splice_sorted, symmetric_difference, union,
};
pub use index_trait::{IndexTrait, MarkerRenderer, MarkerUpdate, RowHandle, TraitChangeEvent};
pub use keyboard::{KeyboardController, ListCommand};
pub use list::{ElementFilter, List};
pub use navigation::{PageDirection, PageNavigation, find_next_index, find_previous_index};
pub use options::{
    AccessibilityProvider, KeyEventFilter, KeyboardNavigationLabelProvider, ListOptions,
    ListOptionsUpdate,
};
pub use reconcile::{IdentityProvider, TraitReconciler};
pub use row_source::{MemoryRowSource, RowSource};
pub use selection::{
    DefaultMultipleSelectionController, MultipleSelectionController, SelectionController,
    SelectionOp, SelectionPlan, SelectionState,
};
pub use type_navigation::{
    DEFAULT_TYPE_NAVIGATION_DEBOUNCE, DefaultKeyboardNavigationDelegate,
    KeyboardNavigationDelegate, TypeNavigationController, TypeNavigationMode, TypeNavigationState,
};
