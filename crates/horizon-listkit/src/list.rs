//! The list facade.
//!
//! [`List`] owns the focus, selection and anchor traits of one list and keeps
//! them consistent with its [`RowSource`]. Input arrives through
//! [`List::on_pointer`], [`List::on_key_down`] and friends; time-driven work
//! (type navigation debounce, page navigation settling) runs when the host
//! calls [`List::process_timers`].
//!
//! # Example
//!
//! ```
//! use horizon_listkit::{List, ListOptions, MemoryRowSource, PointerEvent};
//!
//! let rows = MemoryRowSource::new(22.0, 220.0).with_items(vec!["a", "b", "c"]);
//! let mut list = List::new("explorer", rows, ListOptions::new());
//!
//! list.on_did_change_selection().connect(|event| {
//!     println!("selection: {:?}", event.indices);
//! });
//!
//! list.on_pointer(&PointerEvent::click(1)).unwrap();
//! assert_eq!(list.get_selection(), &[1]);
//!
//! list.splice(0, 1, Vec::new()).unwrap();
//! assert_eq!(list.get_selection(), &[0]);
//! ```

use std::sync::Arc;
use std::time::Duration;

use horizon_listkit_core::logging::targets;
use horizon_listkit_core::{PerfSpan, Signal, TimerManager, buffer_events};

use crate::error::{ListError, Result, validate_indices};
use crate::events::{InputEvent, KeyEvent, PointerEvent};
use crate::index_trait::{IndexTrait, RowHandle, TraitChangeEvent};
use crate::keyboard::{KeyboardController, ListCommand};
use crate::navigation::{
    PageDirection, PageNavigation, PendingPage, find_next_index, find_previous_index,
    first_page_index, last_page_index,
};
use crate::options::{
    AccessibilityProvider, KeyEventFilter, KeyboardNavigationLabelProvider, ListOptions,
    ListOptionsUpdate,
};
use crate::reconcile::{IdentityProvider, TraitReconciler};
use crate::row_source::RowSource;
use crate::selection::{SelectionController, SelectionOp, SelectionPlan, SelectionState};
use crate::type_navigation::{
    KeyboardNavigationDelegate, TypeNavigationController, TypeNavigationState,
};

/// Predicate restricting which rows navigation may land on.
pub type ElementFilter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Focus, selection and anchor state of a virtualized list.
pub struct List<T> {
    user: String,
    source: Box<dyn RowSource<T>>,

    // Traits
    focus: IndexTrait,
    selection: IndexTrait,
    anchor: IndexTrait,

    // Providers
    identity_provider: Option<Arc<dyn IdentityProvider<T>>>,
    label_provider: Option<Arc<dyn KeyboardNavigationLabelProvider<T>>>,
    accessibility_provider: Option<Arc<dyn AccessibilityProvider<T>>>,
    keyboard_delegate: Arc<dyn KeyboardNavigationDelegate>,
    key_event_filter: Option<KeyEventFilter>,

    // Controllers
    selection_controller: SelectionController,
    keyboard: KeyboardController,
    type_navigation: Option<TypeNavigationController>,

    // Deferred work
    timers: TimerManager,
    pending_page: Option<PendingPage>,
    page_filter: Option<ElementFilter<T>>,

    // Signals
    content_height_changed: Signal<f32>,
    announce: Signal<String>,
    pointer_handled: Signal<PointerEvent>,
}

impl<T> List<T> {
    /// Create a list over `source`. `user` names the list in errors.
    pub fn new(
        user: impl Into<String>,
        source: impl RowSource<T> + 'static,
        options: ListOptions<T>,
    ) -> Self {
        let user = user.into();

        let mut focus = IndexTrait::new("focused", user.clone());
        let mut selection = IndexTrait::new("selected", user.clone()).with_aria_selected();
        let mut anchor = IndexTrait::new("anchor", user.clone());
        if let Some(marker) = &options.marker_renderer {
            focus = focus.with_marker_renderer(marker.clone());
            selection = selection.with_marker_renderer(marker.clone());
            anchor = anchor.with_marker_renderer(marker.clone());
        }

        let type_navigation = options.keyboard_navigation_label_provider.as_ref().map(|_| {
            TypeNavigationController::new(
                options.type_navigation_enabled,
                options.type_navigation_mode,
                options.fuzzy_type_navigation,
                options.type_navigation_debounce,
            )
        });

        tracing::debug!(target: targets::LIST, user = %user, len = source.len(), "list created");

        Self {
            user,
            source: Box::new(source),
            focus,
            selection,
            anchor,
            identity_provider: options.identity_provider,
            label_provider: options.keyboard_navigation_label_provider,
            accessibility_provider: options.accessibility_provider,
            keyboard_delegate: options.keyboard_navigation_delegate,
            key_event_filter: options.keyboard_navigation_event_filter,
            selection_controller: SelectionController::new(
                options.mouse_support,
                options.multiple_selection_support,
                options.multiple_selection_controller,
            ),
            keyboard: KeyboardController::new(
                options.keyboard_support,
                options.multiple_selection_support,
            ),
            type_navigation,
            timers: TimerManager::new(options.clock),
            pending_page: None,
            page_filter: None,
            content_height_changed: Signal::new(),
            announce: Signal::new(),
            pointer_handled: Signal::new(),
        }
    }

    /// The label used in errors raised by this list.
    pub fn user(&self) -> &str {
        &self.user
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Number of items.
    pub fn length(&self) -> usize {
        self.source.len()
    }

    pub fn element(&self, index: usize) -> Option<&T> {
        self.source.element(index)
    }

    /// The row covering the content offset `position`.
    pub fn index_at(&self, position: f32) -> usize {
        self.source.index_at(position)
    }

    pub fn source(&self) -> &dyn RowSource<T> {
        &*self.source
    }

    /// Replace `delete_count` items at `start` with `items`.
    ///
    /// Focus, selection and anchor are remapped across the splice before it
    /// returns. Their change notifications are held back until all three are
    /// consistent again. Returns the removed items.
    pub fn splice(&mut self, start: usize, delete_count: usize, items: Vec<T>) -> Result<Vec<T>> {
        let length = self.source.len();
        if start > length || delete_count > length - start {
            return Err(ListError::invalid_range(
                self.user.as_str(),
                start,
                delete_count,
                length,
            ));
        }
        if delete_count == 0 && items.is_empty() {
            return Ok(Vec::new());
        }

        let _span = PerfSpan::new("list_splice");
        let previous_height = self.source.content_height();
        let signals = [
            self.focus.on_change().clone(),
            self.selection.on_change().clone(),
            self.anchor.on_change().clone(),
        ];

        let inserted = items.len();
        let removed = buffer_events(&[&*signals[0], &*signals[1], &*signals[2]], || {
            let reconciler = TraitReconciler::new(self.identity_provider.as_deref());
            for target in [&mut self.focus, &mut self.selection, &mut self.anchor] {
                reconciler.splice(target, &*self.source, start, delete_count, &items);
            }
            self.source.splice(start, delete_count, items)
        });

        tracing::debug!(
            target: targets::SPLICE,
            start,
            delete_count,
            inserted,
            length = self.source.len(),
            "splice applied"
        );

        let height = self.source.content_height();
        if height != previous_height {
            self.content_height_changed.emit(height);
        }
        Ok(removed)
    }

    // =========================================================================
    // Focus, selection and anchor
    // =========================================================================

    /// Replace the focused indices. Fails without changes if any index is
    /// out of range.
    pub fn set_focus(&mut self, indices: Vec<usize>, origin: Option<InputEvent>) -> Result<()> {
        self.focus.set(indices, origin, self.source.len())?;
        Ok(())
    }

    /// Focused indices.
    pub fn get_focus(&self) -> &[usize] {
        self.focus.get()
    }

    /// Replace the selected indices. Fails without changes if any index is
    /// out of range.
    pub fn set_selection(&mut self, indices: Vec<usize>, origin: Option<InputEvent>) -> Result<()> {
        self.selection.set(indices, origin, self.source.len())?;
        Ok(())
    }

    /// Selected indices, most recently added last.
    pub fn get_selection(&self) -> &[usize] {
        self.selection.get()
    }

    /// Set or clear the range-selection anchor.
    pub fn set_anchor(&mut self, index: Option<usize>) -> Result<()> {
        self.anchor
            .set(index.into_iter().collect(), None, self.source.len())?;
        Ok(())
    }

    pub fn get_anchor(&self) -> Option<usize> {
        self.anchor.get().first().copied()
    }

    /// Focused items.
    pub fn focused_elements(&self) -> Vec<&T> {
        self.elements(self.focus.get())
    }

    /// Selected items.
    pub fn selected_elements(&self) -> Vec<&T> {
        self.elements(self.selection.get())
    }

    pub fn anchor_element(&self) -> Option<&T> {
        self.get_anchor().and_then(|index| self.source.element(index))
    }

    fn elements(&self, indices: &[usize]) -> Vec<&T> {
        indices
            .iter()
            .filter_map(|&index| self.source.element(index))
            .collect()
    }

    /// Fires after every focus change.
    pub fn on_did_change_focus(&self) -> &Signal<TraitChangeEvent> {
        self.focus.on_change()
    }

    /// Fires after every selection change.
    pub fn on_did_change_selection(&self) -> &Signal<TraitChangeEvent> {
        self.selection.on_change()
    }

    pub fn on_did_change_anchor(&self) -> &Signal<TraitChangeEvent> {
        self.anchor.on_change()
    }

    /// Fires with the new content height when a splice changes it.
    pub fn on_did_change_content_height(&self) -> &Signal<f32> {
        &self.content_height_changed
    }

    /// Fires with text for assistive technology to read out.
    pub fn on_announce(&self) -> &Signal<String> {
        &self.announce
    }

    /// Fires after a plain pointer press moved focus and selection.
    pub fn on_pointer_handled(&self) -> &Signal<PointerEvent> {
        &self.pointer_handled
    }

    // =========================================================================
    // Row binding
    // =========================================================================

    /// The host bound `row` to `index`; render all trait markers for it.
    pub fn render_row(&mut self, row: RowHandle, index: usize) {
        self.focus.render_row(row, index);
        self.selection.render_row(row, index);
        self.anchor.render_row(row, index);
    }

    /// The host released `row`.
    pub fn dispose_row(&mut self, row: RowHandle) {
        self.focus.dispose_row(row);
        self.selection.dispose_row(row);
        self.anchor.dispose_row(row);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn accepts(&self, filter: Option<&ElementFilter<T>>, index: usize) -> bool {
        match filter {
            None => true,
            Some(filter) => self.source.element(index).is_some_and(|element| filter(element)),
        }
    }

    fn focus_index(&mut self, index: usize, origin: Option<InputEvent>) -> usize {
        tracing::trace!(target: targets::NAVIGATION, index, "focus moved");
        self.focus.set_unchecked(vec![index], origin);
        index
    }

    /// Move focus `n` rows down, skipping rows rejected by `filter`.
    ///
    /// Without focus the search starts at the first row. Returns the newly
    /// focused index, or `None` if focus did not move.
    pub fn focus_next(
        &mut self,
        n: usize,
        wrap: bool,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> Option<usize> {
        let len = self.source.len();
        if len == 0 {
            return None;
        }
        let from = match self.focus.get().first() {
            None => 0,
            Some(&focused) if wrap => (focused % len + n % len) % len,
            Some(&focused) => focused.checked_add(n).filter(|&from| from < len)?,
        };
        let index = find_next_index(len, from, wrap, |i| self.accepts(filter.as_ref(), i))?;
        Some(self.focus_index(index, origin))
    }

    /// Move focus `n` rows up, skipping rows rejected by `filter`.
    pub fn focus_previous(
        &mut self,
        n: usize,
        wrap: bool,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> Option<usize> {
        let len = self.source.len();
        if len == 0 {
            return None;
        }
        let from = match self.focus.get().first() {
            None => 0,
            Some(&focused) => match focused.checked_sub(n) {
                Some(from) => from,
                None if wrap => (focused % len + len - n % len) % len,
                None => return None,
            },
        };
        let from = isize::try_from(from).ok()?;
        let index = find_previous_index(len, from, wrap, |i| self.accepts(filter.as_ref(), i))?;
        Some(self.focus_index(index, origin))
    }

    /// Focus the first row accepted by `filter` at or after `n`.
    pub fn focus_nth(
        &mut self,
        n: usize,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> Option<usize> {
        let len = self.source.len();
        if len == 0 {
            return None;
        }
        let index = find_next_index(len, n, false, |i| self.accepts(filter.as_ref(), i))?;
        Some(self.focus_index(index, origin))
    }

    pub fn focus_first(
        &mut self,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> Option<usize> {
        self.focus_nth(0, origin, filter)
    }

    pub fn focus_last(
        &mut self,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> Option<usize> {
        let len = self.source.len();
        if len == 0 {
            return None;
        }
        let last = len as isize - 1;
        let index = find_previous_index(len, last, false, |i| self.accepts(filter.as_ref(), i))?;
        Some(self.focus_index(index, origin))
    }

    /// Focus the last fully visible row, or scroll one page down if it is
    /// already focused.
    ///
    /// When the viewport moves, focus is cleared and the step finishes on the
    /// next scroll-settled tick ([`on_scroll_settled`](Self::on_scroll_settled)
    /// or [`process_timers`](Self::process_timers)).
    pub fn focus_next_page(
        &mut self,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
    ) -> PageNavigation {
        self.start_page(PageDirection::Next, 0.0, origin, filter, false)
    }

    /// Focus the first fully visible row below `padding_top`, or scroll one
    /// page up if it is already focused.
    pub fn focus_previous_page(
        &mut self,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
        padding_top: f32,
    ) -> PageNavigation {
        self.start_page(PageDirection::Previous, padding_top, origin, filter, false)
    }

    /// Whether a page step is waiting for the viewport to settle.
    pub fn has_pending_page(&self) -> bool {
        self.pending_page.is_some()
    }

    /// Resume a pending page step after the viewport scrolled.
    pub fn on_scroll_settled(&mut self) -> Option<PageNavigation> {
        let pending = self.pending_page.take()?;
        let _ = self.timers.stop(pending.settle_timer);
        let filter = self.page_filter.take();
        tracing::trace!(
            target: targets::NAVIGATION,
            direction = ?pending.direction,
            "resuming page step"
        );
        Some(self.page_step(
            pending.direction,
            pending.padding_top,
            pending.origin,
            filter,
            pending.anchor_on_finish,
        ))
    }

    fn start_page(
        &mut self,
        direction: PageDirection,
        padding_top: f32,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
        anchor_on_finish: bool,
    ) -> PageNavigation {
        if let Some(previous) = self.pending_page.take() {
            let _ = self.timers.stop(previous.settle_timer);
            self.page_filter = None;
        }
        self.page_step(direction, padding_top, origin, filter, anchor_on_finish)
    }

    fn page_step(
        &mut self,
        direction: PageDirection,
        padding_top: f32,
        origin: Option<InputEvent>,
        filter: Option<ElementFilter<T>>,
        anchor_on_finish: bool,
    ) -> PageNavigation {
        let len = self.source.len();
        if len == 0 {
            return PageNavigation::Done;
        }
        let focused = self.focus.get().first().copied();

        let (edge, focus_edge) = match direction {
            PageDirection::Next => {
                let edge = last_page_index(&*self.source);
                (edge, focused.is_none_or(|f| f < edge))
            }
            PageDirection::Previous => {
                let edge = first_page_index(&*self.source, padding_top).min(len - 1);
                (edge, focused.is_none_or(|f| f > edge))
            }
        };

        if focus_edge {
            let accept = |i| self.accepts(filter.as_ref(), i);
            let good = match direction {
                PageDirection::Next => find_previous_index(len, edge as isize, false, accept),
                PageDirection::Previous => find_next_index(len, edge, false, accept),
            };
            let target = match good {
                Some(index) if Some(index) != focused => index,
                _ => edge,
            };
            self.focus_index(target, origin);
            return self.finish_page(anchor_on_finish);
        }

        let previous = self.source.scroll_top();
        let render_height = self.source.render_height();
        match direction {
            PageDirection::Next => self.source.set_scroll_top(previous + render_height),
            PageDirection::Previous => self.source.set_scroll_top(previous - render_height),
        }

        if self.source.scroll_top() != previous {
            self.focus.set_unchecked(Vec::new(), None);
            let settle_timer = self.timers.start_one_shot(Duration::ZERO);
            tracing::debug!(
                target: targets::NAVIGATION,
                ?direction,
                from = previous,
                to = self.source.scroll_top(),
                "page step awaiting scroll"
            );
            self.pending_page = Some(PendingPage {
                direction,
                padding_top,
                origin,
                anchor_on_finish,
                settle_timer,
            });
            self.page_filter = filter;
            return PageNavigation::AwaitingScroll;
        }

        // The viewport is at its limit.
        if focused != Some(edge) {
            self.focus_index(edge, origin);
        }
        self.finish_page(anchor_on_finish)
    }

    fn finish_page(&mut self, anchor_on_finish: bool) -> PageNavigation {
        if anchor_on_finish {
            self.anchor_to_focus();
        }
        PageNavigation::Done
    }

    fn anchor_to_focus(&mut self) {
        let focused = self.focus.get().first().copied();
        self.anchor.set_unchecked(focused.into_iter().collect(), None);
        if let Some(index) = focused {
            self.reveal_unchecked(index, None, 0.0);
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_top(&self) -> f32 {
        self.source.scroll_top()
    }

    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.source.set_scroll_top(scroll_top);
    }

    pub fn render_height(&self) -> f32 {
        self.source.render_height()
    }

    pub fn content_height(&self) -> f32 {
        self.source.content_height()
    }

    /// Scroll `index` into view.
    ///
    /// With `relative_top`, the row is placed at that fraction (clamped to
    /// `0..=1`) of the viewport. Otherwise the viewport moves as little as
    /// possible.
    pub fn reveal(&mut self, index: usize, relative_top: Option<f32>) -> Result<()> {
        self.reveal_with_padding(index, relative_top, 0.0)
    }

    /// [`reveal`](Self::reveal) with `padding_top` pixels at the top of the
    /// viewport treated as covered.
    pub fn reveal_with_padding(
        &mut self,
        index: usize,
        relative_top: Option<f32>,
        padding_top: f32,
    ) -> Result<()> {
        validate_indices(&self.user, &[index], self.source.len())?;
        self.reveal_unchecked(index, relative_top, padding_top);
        Ok(())
    }

    fn reveal_unchecked(&mut self, index: usize, relative_top: Option<f32>, padding_top: f32) {
        let scroll_top = self.source.scroll_top();
        let render_height = self.source.render_height();
        let element_top = self.source.element_top(index);
        let element_height = self.source.element_height(index);

        if let Some(relative_top) = relative_top {
            let m = element_height - render_height + padding_top;
            self.source
                .set_scroll_top(m * relative_top.clamp(0.0, 1.0) + element_top - padding_top);
            return;
        }

        let element_bottom = element_top + element_height;
        let scroll_bottom = scroll_top + render_height;
        let above = element_top < scroll_top + padding_top;

        if above && element_bottom >= scroll_bottom {
            // The row already covers the whole viewport.
        } else if above || (element_bottom >= scroll_bottom && element_height >= render_height) {
            self.source.set_scroll_top(element_top - padding_top);
        } else if element_bottom >= scroll_bottom {
            self.source.set_scroll_top(element_bottom - render_height);
        }
    }

    /// Where `index` sits in the viewport, as a fraction from `0.0` (top) to
    /// `1.0` (bottom). `None` if the row is not fully visible.
    pub fn get_relative_top(&self, index: usize, padding_top: f32) -> Result<Option<f32>> {
        validate_indices(&self.user, &[index], self.source.len())?;

        let scroll_top = self.source.scroll_top();
        let render_height = self.source.render_height();
        let element_top = self.source.element_top(index);
        let element_height = self.source.element_height(index);

        if element_top < scroll_top + padding_top
            || element_top + element_height > scroll_top + render_height
        {
            return Ok(None);
        }

        let m = element_height - render_height + padding_top;
        if m == 0.0 {
            return Ok(Some(0.0));
        }
        Ok(Some(((scroll_top + padding_top - element_top) / m).abs()))
    }

    // =========================================================================
    // Input
    // =========================================================================

    fn selection_state(&self) -> SelectionState<'_> {
        SelectionState {
            focus: self.focus.get(),
            selection: self.selection.get(),
            sorted_selection: self.selection.sorted(),
            anchor: self.get_anchor(),
        }
    }

    /// Handle a pointer press on a row (or on empty space).
    pub fn on_pointer(&mut self, event: &PointerEvent) -> Result<()> {
        let plan = self.selection_controller.on_pointer(event, self.selection_state());
        self.apply_plan(plan, event)
    }

    /// Handle a double click.
    pub fn on_double_click(&mut self, event: &PointerEvent) -> Result<()> {
        let plan = self
            .selection_controller
            .on_double_click(event, self.selection_state());
        self.apply_plan(plan, event)
    }

    /// Handle a context menu request.
    pub fn on_context_menu(&mut self, event: &PointerEvent) -> Result<()> {
        let plan = self.selection_controller.on_context_menu(event);
        self.apply_plan(plan, event)
    }

    fn apply_plan(&mut self, plan: SelectionPlan, event: &PointerEvent) -> Result<()> {
        let length = self.source.len();
        for op in &plan.ops {
            match op {
                SelectionOp::Focus(indices) | SelectionOp::Selection(indices) => {
                    validate_indices(&self.user, indices, length)?;
                }
                SelectionOp::Anchor(Some(index)) => {
                    validate_indices(&self.user, &[*index], length)?;
                }
                SelectionOp::Anchor(None) => {}
            }
        }

        for op in plan.ops {
            match op {
                SelectionOp::Focus(indices) => {
                    self.focus.set_unchecked(indices, Some((*event).into()));
                }
                SelectionOp::Selection(indices) => {
                    self.selection.set_unchecked(indices, Some((*event).into()));
                }
                SelectionOp::Anchor(index) => {
                    self.anchor.set_unchecked(index.into_iter().collect(), None);
                }
            }
        }

        if plan.pointer_handled {
            self.pointer_handled.emit(*event);
        }
        Ok(())
    }

    /// Handle a key press. Returns whether the list consumed it.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        let has_selection = !self.selection.is_empty();
        if let Some(command) = self.keyboard.command_for(event, has_selection) {
            self.run_command(command, event);
            return true;
        }
        self.type_navigate(event)
    }

    fn run_command(&mut self, command: ListCommand, event: &KeyEvent) {
        let origin = Some(InputEvent::from(event.clone()));
        tracing::trace!(target: targets::NAVIGATION, ?command, "keyboard command");

        match command {
            ListCommand::SelectFocused => {
                let focus = self.focus.get().to_vec();
                self.selection.set_unchecked(focus, origin);
            }
            ListCommand::FocusPrevious => {
                self.focus_previous(1, false, origin, None);
                self.anchor_to_focus();
            }
            ListCommand::FocusNext => {
                self.focus_next(1, false, origin, None);
                self.anchor_to_focus();
            }
            ListCommand::FocusPreviousPage => {
                self.start_page(PageDirection::Previous, 0.0, origin, None, true);
            }
            ListCommand::FocusNextPage => {
                self.start_page(PageDirection::Next, 0.0, origin, None, true);
            }
            ListCommand::SelectAll => {
                let all = (0..self.source.len()).collect();
                self.selection.set_unchecked(all, origin);
                self.anchor.set_unchecked(Vec::new(), None);
            }
            ListCommand::ClearSelection => {
                self.selection.set_unchecked(Vec::new(), origin);
                self.anchor.set_unchecked(Vec::new(), None);
            }
        }
    }

    fn type_navigate(&mut self, event: &KeyEvent) -> bool {
        let (Some(navigation), Some(label_provider)) =
            (self.type_navigation.as_mut(), self.label_provider.as_ref())
        else {
            return false;
        };
        if !navigation.is_listening()
            || event.text.is_empty()
            || !self.keyboard_delegate.might_produce_printable_character(event)
        {
            return false;
        }
        // Only the keystroke that starts a word is filtered.
        if navigation.state() == TypeNavigationState::Idle
            && let Some(filter) = &self.key_event_filter
            && !filter(event)
        {
            return false;
        }

        let word = navigation.push_text(&event.text, &mut self.timers).to_owned();
        let focused = self.focus.get().first().copied();
        let source = &*self.source;
        let found = navigation.find(&word, focused, source.len(), |index| {
            source
                .element(index)
                .and_then(|element| label_provider.keyboard_navigation_label(element))
        });

        if let Some(index) = found {
            self.focus_index(index, Some(event.clone().into()));
            self.reveal_unchecked(index, None, 0.0);
        }
        true
    }

    /// Toggle type navigation listening in trigger mode.
    pub fn trigger_type_navigation(&mut self) {
        if let Some(navigation) = self.type_navigation.as_mut() {
            navigation.trigger();
        }
    }

    /// The type navigation word typed so far.
    pub fn type_navigation_word(&self) -> Option<&str> {
        self.type_navigation.as_ref().map(|navigation| navigation.word())
    }

    // =========================================================================
    // Timers and options
    // =========================================================================

    /// Run expired timers: type navigation debounce and page settling.
    pub fn process_timers(&mut self) {
        for id in self.timers.process_expired() {
            let is_settle = self
                .pending_page
                .as_ref()
                .is_some_and(|pending| pending.settle_timer == id);
            if is_settle {
                self.on_scroll_settled();
                continue;
            }

            let is_clear = self
                .type_navigation
                .as_ref()
                .is_some_and(|navigation| navigation.is_clear_timer(id));
            if is_clear {
                self.clear_type_navigation();
            }
        }
    }

    /// Time until the next timer is due, for hosts that sleep between ticks.
    pub fn time_until_next_timer(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    fn clear_type_navigation(&mut self) {
        let Some(navigation) = self.type_navigation.as_mut() else {
            return;
        };
        let previously_focused = navigation.clear();
        let focused = self.focus.get().first().copied();
        tracing::trace!(
            target: targets::TYPE_NAVIGATION,
            ?focused,
            ?previously_focused,
            "type navigation cleared"
        );

        let Some(index) = focused.filter(|&f| Some(f) == previously_focused) else {
            return;
        };
        let label = match (&self.accessibility_provider, self.source.element(index)) {
            (Some(provider), Some(element)) => provider.aria_label(element),
            _ => None,
        };
        if let Some(label) = label {
            self.announce.emit(label);
        }
    }

    /// Apply runtime option changes.
    pub fn update_options(&mut self, update: ListOptionsUpdate) {
        if let Some(enabled) = update.keyboard_support {
            self.keyboard.set_enabled(enabled);
        }
        if let Some(enabled) = update.mouse_support {
            self.selection_controller.set_mouse_support(enabled);
        }
        if let Some(enabled) = update.multiple_selection_support {
            self.selection_controller.set_multiple_selection_support(enabled);
            self.keyboard.set_multiple_selection_support(enabled);
        }
        if let Some(navigation) = self.type_navigation.as_mut() {
            if let Some(enabled) = update.type_navigation_enabled {
                navigation.set_enabled(enabled, &mut self.timers);
            }
            if let Some(mode) = update.type_navigation_mode {
                navigation.set_mode(mode);
            }
            if let Some(fuzzy) = update.fuzzy_type_navigation {
                navigation.set_fuzzy(fuzzy);
            }
            if let Some(debounce) = update.type_navigation_debounce {
                navigation.set_debounce(debounce);
            }
        }
        tracing::debug!(target: targets::LIST, user = %self.user, ?update, "list options updated");
    }
}

impl<T: PartialEq> List<T> {
    /// Index of the first item equal to `element`.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        (0..self.source.len()).find(|&index| self.source.element(index) == Some(element))
    }
}

impl<T> std::fmt::Debug for List<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List")
            .field("user", &self.user)
            .field("length", &self.source.len())
            .field("focus", &self.focus.get())
            .field("selection", &self.selection.get())
            .field("anchor", &self.anchor.get())
            .field("pending_page", &self.pending_page.is_some())
            .finish_non_exhaustive()
    }
}
