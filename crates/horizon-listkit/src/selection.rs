//! Pointer-driven focus, selection and anchor changes.
//!
//! [`SelectionController`] does not own any trait. It reads a snapshot of the
//! current state and returns the ordered list of trait writes a pointer event
//! produces; the [`List`](crate::List) applies them.
//!
//! | input | effect |
//! |---|---|
//! | click | focus, anchor and selection move to the row |
//! | right click | focus and anchor move; selection is kept |
//! | range click (Shift) | the selected run touching the anchor is replaced by `anchor..=row` |
//! | toggle click (Ctrl, Cmd on macOS) | the row's selection membership flips |
//! | click on empty space | everything is cleared |
//! | double click | selection becomes focus |
//! | context menu | focus moves to the row |

use std::sync::Arc;

use horizon_listkit_core::logging::targets;

use crate::events::{MouseButton, PointerEvent};
use crate::index_set::{contiguous_run_containing, symmetric_difference, union};

/// Decides which pointer events extend or toggle the selection.
pub trait MultipleSelectionController: Send + Sync {
    /// Whether the event toggles a single row.
    fn is_selection_single_change_event(&self, event: &PointerEvent) -> bool;

    /// Whether the event selects a range from the anchor.
    fn is_selection_range_change_event(&self, event: &PointerEvent) -> bool;
}

/// Shift selects a range; the platform command key toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMultipleSelectionController;

impl MultipleSelectionController for DefaultMultipleSelectionController {
    fn is_selection_single_change_event(&self, event: &PointerEvent) -> bool {
        event.modifiers.command()
    }

    fn is_selection_range_change_event(&self, event: &PointerEvent) -> bool {
        event.modifiers.shift
    }
}

/// One write to a list trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOp {
    Focus(Vec<usize>),
    Anchor(Option<usize>),
    Selection(Vec<usize>),
}

/// The trait writes for one pointer event, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPlan {
    pub ops: Vec<SelectionOp>,
    /// Whether the event counts as a handled plain pointer press.
    pub pointer_handled: bool,
}

impl SelectionPlan {
    fn new(ops: Vec<SelectionOp>) -> Self {
        Self {
            ops,
            pointer_handled: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Read-only view of the list state a plan is computed from.
#[derive(Debug, Clone, Copy)]
pub struct SelectionState<'a> {
    /// Focused indices.
    pub focus: &'a [usize],
    /// Selected indices in insertion order.
    pub selection: &'a [usize],
    /// Selected indices, ascending.
    pub sorted_selection: &'a [usize],
    pub anchor: Option<usize>,
}

/// Turns pointer events into trait writes.
pub struct SelectionController {
    mouse_support: bool,
    multiple_selection_support: bool,
    multiple_selection_controller: Arc<dyn MultipleSelectionController>,
}

impl SelectionController {
    pub fn new(
        mouse_support: bool,
        multiple_selection_support: bool,
        multiple_selection_controller: Arc<dyn MultipleSelectionController>,
    ) -> Self {
        Self {
            mouse_support,
            multiple_selection_support,
            multiple_selection_controller,
        }
    }

    pub fn set_mouse_support(&mut self, enabled: bool) {
        self.mouse_support = enabled;
    }

    pub fn set_multiple_selection_support(&mut self, enabled: bool) {
        self.multiple_selection_support = enabled;
    }

    fn is_selection_change_event(&self, event: &PointerEvent) -> bool {
        self.multiple_selection_support
            && (self
                .multiple_selection_controller
                .is_selection_single_change_event(event)
                || self
                    .multiple_selection_controller
                    .is_selection_range_change_event(event))
    }

    /// Plan a pointer press.
    pub fn on_pointer(&self, event: &PointerEvent, state: SelectionState<'_>) -> SelectionPlan {
        if !self.mouse_support {
            return SelectionPlan::default();
        }

        let Some(index) = event.index else {
            tracing::debug!(target: targets::SELECTION, "pointer on empty space, clearing");
            return SelectionPlan::new(vec![
                SelectionOp::Focus(Vec::new()),
                SelectionOp::Selection(Vec::new()),
                SelectionOp::Anchor(None),
            ]);
        };

        if self.is_selection_change_event(event) {
            return self.change_selection(event, index, state);
        }

        let mut ops = vec![SelectionOp::Focus(vec![index]), SelectionOp::Anchor(Some(index))];
        if event.button != MouseButton::Right {
            ops.push(SelectionOp::Selection(vec![index]));
        }
        SelectionPlan {
            ops,
            pointer_handled: true,
        }
    }

    /// Plan a double click: the selection becomes the focus.
    pub fn on_double_click(
        &self,
        event: &PointerEvent,
        state: SelectionState<'_>,
    ) -> SelectionPlan {
        if !self.mouse_support || self.is_selection_change_event(event) {
            return SelectionPlan::default();
        }
        SelectionPlan::new(vec![SelectionOp::Selection(state.focus.to_vec())])
    }

    /// Plan a context menu request: focus moves to the row under the pointer.
    pub fn on_context_menu(&self, event: &PointerEvent) -> SelectionPlan {
        if !self.mouse_support {
            return SelectionPlan::default();
        }
        let focus = event.index.into_iter().collect();
        SelectionPlan::new(vec![SelectionOp::Focus(focus)])
    }

    fn change_selection(
        &self,
        event: &PointerEvent,
        index: usize,
        state: SelectionState<'_>,
    ) -> SelectionPlan {
        let controller = &self.multiple_selection_controller;

        if controller.is_selection_range_change_event(event) {
            let mut ops = Vec::with_capacity(3);
            let anchor = match state.anchor {
                Some(anchor) => anchor,
                None => {
                    let anchor = state.focus.first().copied().unwrap_or(index);
                    ops.push(SelectionOp::Anchor(Some(anchor)));
                    anchor
                }
            };

            let lo = anchor.min(index);
            let hi = anchor.max(index);
            let run = contiguous_run_containing(&union(state.sorted_selection, &[anchor]), anchor);
            if run.is_empty() {
                // The anchor is always part of the union above; this only
                // guards a selection that was rewritten underneath us.
                tracing::debug!(
                    target: targets::SELECTION,
                    anchor,
                    "anchor outside any run, ignoring range click"
                );
                return SelectionPlan::new(ops);
            }

            let range: Vec<usize> = (lo..=hi).collect();
            let selection = union(&range, &symmetric_difference(state.sorted_selection, &run));
            tracing::debug!(
                target: targets::SELECTION,
                anchor,
                index,
                ?selection,
                "range selection"
            );

            ops.push(SelectionOp::Selection(selection));
            ops.push(SelectionOp::Focus(vec![index]));
            return SelectionPlan::new(ops);
        }

        // Toggle: a pure membership flip that keeps insertion order.
        let mut selection: Vec<usize> = state
            .selection
            .iter()
            .copied()
            .filter(|&i| i != index)
            .collect();
        if selection.len() == state.selection.len() {
            selection.push(index);
        }
        tracing::debug!(target: targets::SELECTION, index, ?selection, "toggle selection");

        SelectionPlan::new(vec![
            SelectionOp::Focus(vec![index]),
            SelectionOp::Anchor(Some(index)),
            SelectionOp::Selection(selection),
        ])
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(true, true, Arc::new(DefaultMultipleSelectionController))
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("mouse_support", &self.mouse_support)
            .field("multiple_selection_support", &self.multiple_selection_support)
            .finish_non_exhaustive()
    }
}
