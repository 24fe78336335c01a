//! Index search and page navigation helpers.
//!
//! The scans here are bounded by the sequence length, so they terminate even
//! when wrapping and no row passes the predicate.

use horizon_listkit_core::TimerId;

use crate::events::InputEvent;
use crate::row_source::RowSource;

/// First index at or after `from` accepted by `accept`.
///
/// Past the end, the scan stops unless `wrap` is set, in which case it
/// continues from 0. Every index is tried at most once.
pub fn find_next_index(
    len: usize,
    from: usize,
    wrap: bool,
    accept: impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut index = from;
    for _ in 0..len {
        if index >= len && !wrap {
            return None;
        }
        index %= len;
        if accept(index) {
            return Some(index);
        }
        index += 1;
    }
    None
}

/// Last index at or before `from` accepted by `accept`.
///
/// Below zero, the scan stops unless `wrap` is set, in which case it
/// continues from the end. Every index is tried at most once.
pub fn find_previous_index(
    len: usize,
    from: isize,
    wrap: bool,
    accept: impl Fn(usize) -> bool,
) -> Option<usize> {
    let Ok(signed_len) = isize::try_from(len) else {
        return None;
    };
    let mut index = from;
    for _ in 0..len {
        if index < 0 && !wrap {
            return None;
        }
        index = index.rem_euclid(signed_len);
        // rem_euclid keeps the value in [0, len).
        let candidate = index as usize;
        if accept(candidate) {
            return Some(candidate);
        }
        index -= 1;
    }
    None
}

/// Direction of a page step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Previous,
}

/// Outcome of a page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNavigation {
    /// Focus was placed; nothing is pending.
    Done,
    /// The viewport was scrolled and focus cleared. The step resumes on the
    /// next scroll-settled tick.
    AwaitingScroll,
}

/// A page step waiting for the viewport to settle.
#[derive(Debug, Clone)]
pub(crate) struct PendingPage {
    pub direction: PageDirection,
    pub padding_top: f32,
    pub origin: Option<InputEvent>,
    /// Set the anchor to the final focus and reveal it when the step ends.
    pub anchor_on_finish: bool,
    /// Zero-delay timer standing in for the host's scroll event.
    pub settle_timer: TimerId,
}

/// Last row fully inside the viewport (the row under the bottom edge, minus
/// one, unless that is the first row).
pub(crate) fn last_page_index<T, R: RowSource<T> + ?Sized>(source: &R) -> usize {
    source
        .index_at(source.scroll_top() + source.render_height())
        .saturating_sub(1)
}

/// First row fully inside the viewport below `padding_top`.
pub(crate) fn first_page_index<T, R: RowSource<T> + ?Sized>(source: &R, padding_top: f32) -> usize {
    let scroll_top = source.scroll_top() + padding_top;
    if scroll_top == 0.0 {
        source.index_at(scroll_top)
    } else {
        source.index_after(scroll_top - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_source::MemoryRowSource;

    #[test]
    fn test_find_next_without_wrap() {
        assert_eq!(find_next_index(5, 2, false, |_| true), Some(2));
        assert_eq!(find_next_index(5, 2, false, |i| i == 4), Some(4));
        assert_eq!(find_next_index(5, 2, false, |i| i == 1), None);
        assert_eq!(find_next_index(5, 5, false, |_| true), None);
        assert_eq!(find_next_index(0, 0, true, |_| true), None);
    }

    #[test]
    fn test_find_next_wraps() {
        assert_eq!(find_next_index(5, 5, true, |_| true), Some(0));
        assert_eq!(find_next_index(5, 3, true, |i| i == 1), Some(1));
        assert_eq!(find_next_index(5, 3, true, |_| false), None);
    }

    #[test]
    fn test_find_previous() {
        assert_eq!(find_previous_index(5, 3, false, |_| true), Some(3));
        assert_eq!(find_previous_index(5, 3, false, |i| i == 0), Some(0));
        assert_eq!(find_previous_index(5, -1, false, |_| true), None);
        assert_eq!(find_previous_index(5, -1, true, |_| true), Some(4));
        assert_eq!(find_previous_index(5, 1, true, |i| i == 3), Some(3));
        assert_eq!(find_previous_index(5, 1, true, |_| false), None);
    }

    #[test]
    fn test_page_edges() {
        let mut rows =
            MemoryRowSource::new(20.0, 100.0).with_items((0..20).collect::<Vec<usize>>());
        assert_eq!(last_page_index(&rows), 4);
        assert_eq!(first_page_index(&rows, 0.0), 0);

        rows.set_scroll_top(110.0);
        // Rows 5..=10 are at least partly visible; 6..=9 fully.
        assert_eq!(last_page_index(&rows), 9);
        assert_eq!(first_page_index(&rows, 0.0), 6);

        let short = MemoryRowSource::new(20.0, 100.0).with_items(vec![0usize, 1]);
        assert_eq!(last_page_index(&short), 1);
    }
}
