//! The virtualized row source a [`List`](crate::List) operates on.
//!
//! The list never owns item storage or geometry itself. It reads both from a
//! [`RowSource`], which in a real widget is the row recycler/view. A simple
//! in-memory implementation, [`MemoryRowSource`], backs tests and headless
//! hosts.

/// Items plus vertical geometry of a scrollable list viewport.
///
/// Positions are pixel offsets from the top of the content.
pub trait RowSource<T> {
    /// Number of items.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`.
    fn element(&self, index: usize) -> Option<&T>;

    /// Height of the row at `index`.
    fn element_height(&self, index: usize) -> f32;

    /// Offset of the top edge of the row at `index`.
    fn element_top(&self, index: usize) -> f32;

    /// Index of the row covering `position`, or `len()` past the end.
    fn index_at(&self, position: f32) -> usize;

    /// Index of the row after the one covering `position`, capped at `len()`.
    fn index_after(&self, position: f32) -> usize {
        (self.index_at(position) + 1).min(self.len())
    }

    fn scroll_top(&self) -> f32;

    /// Scroll the viewport. Implementations clamp to the valid range, so the
    /// value read back may differ from the one written.
    fn set_scroll_top(&mut self, scroll_top: f32);

    /// Height of the visible viewport.
    fn render_height(&self) -> f32;

    /// Total height of all rows.
    fn content_height(&self) -> f32;

    /// Replace `delete_count` items at `start` with `items`, returning the
    /// removed items. Callers validate the range beforehand.
    fn splice(&mut self, start: usize, delete_count: usize, items: Vec<T>) -> Vec<T>;
}

type HeightFn<T> = Box<dyn Fn(&T) -> f32 + Send + Sync>;

/// A [`RowSource`] holding its items in a `Vec`.
///
/// Row heights come from a height function (uniform by default). Scrolling
/// is clamped to `[0, content_height - render_height]`.
pub struct MemoryRowSource<T> {
    items: Vec<T>,
    /// `tops[i]` is the top of row `i`; `tops[len]` is the content height.
    tops: Vec<f32>,
    row_height: f32,
    height: Option<HeightFn<T>>,
    render_height: f32,
    scroll_top: f32,
}

impl<T> MemoryRowSource<T> {
    /// Create an empty source with uniform rows of `row_height` pixels.
    pub fn new(row_height: f32, render_height: f32) -> Self {
        Self {
            items: Vec::new(),
            tops: vec![0.0],
            row_height,
            height: None,
            render_height,
            scroll_top: 0.0,
        }
    }

    /// Use per-item row heights.
    pub fn with_height_fn(mut self, height: impl Fn(&T) -> f32 + Send + Sync + 'static) -> Self {
        self.height = Some(Box::new(height));
        self.recompute_tops(0);
        self
    }

    /// Start with `items`.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self.recompute_tops(0);
        self
    }

    /// Resize the viewport, re-clamping the scroll position.
    pub fn set_render_height(&mut self, render_height: f32) {
        self.render_height = render_height;
        self.set_scroll_top(self.scroll_top);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    fn max_scroll_top(&self) -> f32 {
        (self.content_height() - self.render_height).max(0.0)
    }

    fn recompute_tops(&mut self, from: usize) {
        self.tops.truncate(from + 1);
        let mut top = self.tops[from];
        for item in &self.items[from..] {
            top += match &self.height {
                Some(height) => height(item),
                None => self.row_height,
            };
            self.tops.push(top);
        }
    }
}

impl<T> RowSource<T> for MemoryRowSource<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn element(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn element_height(&self, index: usize) -> f32 {
        match (self.tops.get(index), self.tops.get(index + 1)) {
            (Some(top), Some(bottom)) => bottom - top,
            _ => 0.0,
        }
    }

    fn element_top(&self, index: usize) -> f32 {
        let last = self.tops.len() - 1;
        self.tops[index.min(last)]
    }

    fn index_at(&self, position: f32) -> usize {
        self.tops
            .partition_point(|&top| top <= position)
            .saturating_sub(1)
            .min(self.items.len())
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll_top());
    }

    fn render_height(&self) -> f32 {
        self.render_height
    }

    fn content_height(&self) -> f32 {
        self.tops[self.tops.len() - 1]
    }

    fn splice(&mut self, start: usize, delete_count: usize, items: Vec<T>) -> Vec<T> {
        let removed: Vec<T> = self
            .items
            .splice(start..start + delete_count, items)
            .collect();
        self.recompute_tops(start);
        self.set_scroll_top(self.scroll_top);
        removed
    }
}

impl<T> std::fmt::Debug for MemoryRowSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRowSource")
            .field("len", &self.items.len())
            .field("content_height", &self.content_height())
            .field("render_height", &self.render_height)
            .field("scroll_top", &self.scroll_top)
            .finish()
    }
}
