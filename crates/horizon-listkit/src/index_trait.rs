//! Named index sets (focus, selection, anchor) with change notification.
//!
//! An [`IndexTrait`] owns one [`SortedIndexSet`] and keeps the visual marker
//! of every bound row in step with it. The host binds row handles to indices
//! as it recycles rows; only bound rows are ever re-rendered.

use std::sync::Arc;

use horizon_listkit_core::Signal;
use horizon_listkit_core::logging::targets;

use crate::error::{Result, validate_indices};
use crate::events::InputEvent;
use crate::index_set::{SortedIndexSet, splice_sorted, union};

/// Opaque handle of a rendered row, assigned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(pub u64);

/// Payload of every trait change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitChangeEvent {
    /// The new members, in insertion order.
    pub indices: Vec<usize>,
    /// The input that caused the change, if any.
    pub origin: Option<InputEvent>,
}

/// One marker update for one bound row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerUpdate {
    /// Name of the trait the marker belongs to, e.g. `"selected"`.
    pub trait_name: &'static str,
    /// The row being updated.
    pub row: RowHandle,
    /// The index the row is bound to.
    pub index: usize,
    /// Whether the index is a member of the trait.
    pub active: bool,
    /// The `aria-selected` state, for traits that expose one.
    pub aria_selected: Option<bool>,
}

/// Applies or removes a trait's visual marker on a rendered row.
pub trait MarkerRenderer: Send + Sync {
    fn render_marker(&self, update: MarkerUpdate);
}

impl<F> MarkerRenderer for F
where
    F: Fn(MarkerUpdate) + Send + Sync,
{
    fn render_marker(&self, update: MarkerUpdate) {
        self(update)
    }
}

#[derive(Debug, Clone, Copy)]
struct RowBinding {
    row: RowHandle,
    index: usize,
}

/// Tracks which rows are bound to which indices.
#[derive(Default)]
struct TraitRenderer {
    bindings: Vec<RowBinding>,
    marker: Option<Arc<dyn MarkerRenderer>>,
}

impl TraitRenderer {
    fn bind(&mut self, row: RowHandle, index: usize) -> Option<usize> {
        match self.bindings.iter_mut().find(|b| b.row == row) {
            Some(binding) => {
                let previous = binding.index;
                binding.index = index;
                Some(previous)
            }
            None => {
                self.bindings.push(RowBinding { row, index });
                None
            }
        }
    }

    fn unbind(&mut self, row: RowHandle) -> Option<usize> {
        let position = self.bindings.iter().position(|b| b.row == row)?;
        Some(self.bindings.swap_remove(position).index)
    }

    fn splice(&mut self, start: usize, delete_count: usize, insert_count: usize) {
        let end = start + delete_count;
        self.bindings.retain_mut(|binding| {
            if binding.index < start {
                true
            } else if binding.index >= end {
                binding.index = binding.index - delete_count + insert_count;
                true
            } else {
                false
            }
        });
    }
}

/// A named set of indices representing one role of the list.
pub struct IndexTrait {
    name: &'static str,
    user: String,
    set: SortedIndexSet,
    aria_selected: bool,
    renderer: TraitRenderer,
    on_change: Arc<Signal<TraitChangeEvent>>,
}

impl IndexTrait {
    /// Create an empty trait. `user` labels errors raised by this trait.
    pub fn new(name: &'static str, user: impl Into<String>) -> Self {
        Self {
            name,
            user: user.into(),
            set: SortedIndexSet::new(),
            aria_selected: false,
            renderer: TraitRenderer::default(),
            on_change: Arc::new(Signal::new()),
        }
    }

    /// Route marker updates to `marker`.
    pub fn with_marker_renderer(mut self, marker: Arc<dyn MarkerRenderer>) -> Self {
        self.renderer.marker = Some(marker);
        self
    }

    /// Report `aria-selected` alongside the marker.
    pub fn with_aria_selected(mut self) -> Self {
        self.aria_selected = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signal fired after every mutation.
    pub fn on_change(&self) -> &Arc<Signal<TraitChangeEvent>> {
        &self.on_change
    }

    /// Members in insertion order.
    pub fn get(&self) -> &[usize] {
        self.set.indices()
    }

    /// Members in ascending order.
    pub fn sorted(&self) -> &[usize] {
        self.set.sorted()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.set.contains(index)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Replace the members.
    ///
    /// Every index is checked against `length` first; on failure the trait is
    /// left untouched. Returns the previous members in insertion order.
    pub fn set(
        &mut self,
        indices: Vec<usize>,
        origin: Option<InputEvent>,
        length: usize,
    ) -> Result<Vec<usize>> {
        validate_indices(&self.user, &indices, length)?;
        Ok(self.set_unchecked(indices, origin))
    }

    /// [`set`](Self::set) for indices the caller has already validated.
    pub(crate) fn set_unchecked(
        &mut self,
        indices: Vec<usize>,
        origin: Option<InputEvent>,
    ) -> Vec<usize> {
        self.replace(SortedIndexSet::from_indices(indices), origin)
    }

    /// Remap the members across a splice of the underlying sequence.
    ///
    /// `inserted_flags[j]` says whether the `j`th inserted item carries the
    /// trait.
    pub fn splice(&mut self, start: usize, delete_count: usize, inserted_flags: &[bool]) {
        let sorted = splice_sorted(self.set.sorted(), start, delete_count, inserted_flags);
        tracing::trace!(
            target: targets::SPLICE,
            name = self.name,
            start,
            delete_count,
            inserted = inserted_flags.len(),
            members = sorted.len(),
            "trait spliced"
        );
        self.renderer.splice(start, delete_count, inserted_flags.len());
        self.replace(SortedIndexSet::from_sorted(sorted), None);
    }

    /// Bind `row` to `index` and render its marker. A row that was bound to
    /// another index has its old marker cleared first.
    pub fn render_row(&mut self, row: RowHandle, index: usize) {
        if let Some(previous) = self.renderer.bind(row, index) {
            self.render_marker(row, previous, false);
        }
        self.render_marker(row, index, self.set.contains(index));
    }

    /// Forget a row the host no longer displays.
    pub fn dispose_row(&mut self, row: RowHandle) {
        self.renderer.unbind(row);
    }

    /// Number of bound rows.
    pub fn bound_rows(&self) -> usize {
        self.renderer.bindings.len()
    }

    fn replace(&mut self, set: SortedIndexSet, origin: Option<InputEvent>) -> Vec<usize> {
        let to_render = union(self.set.sorted(), set.sorted());
        let previous = std::mem::replace(&mut self.set, set);

        if self.renderer.marker.is_some() {
            let bound: Vec<RowBinding> = self
                .renderer
                .bindings
                .iter()
                .filter(|b| to_render.binary_search(&b.index).is_ok())
                .copied()
                .collect();
            for binding in bound {
                self.render_marker(binding.row, binding.index, self.set.contains(binding.index));
            }
        }

        tracing::debug!(
            target: targets::TRAIT,
            name = self.name,
            indices = ?self.set.indices(),
            "trait changed"
        );
        self.on_change.emit(TraitChangeEvent {
            indices: self.set.indices().to_vec(),
            origin,
        });

        previous.indices().to_vec()
    }

    fn render_marker(&self, row: RowHandle, index: usize, active: bool) {
        if let Some(marker) = &self.renderer.marker {
            marker.render_marker(MarkerUpdate {
                trait_name: self.name,
                row,
                index,
                active,
                aria_selected: self.aria_selected.then_some(active),
            });
        }
    }
}

impl std::fmt::Debug for IndexTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTrait")
            .field("name", &self.name)
            .field("indices", &self.set.indices())
            .field("bound_rows", &self.renderer.bindings.len())
            .finish_non_exhaustive()
    }
}
