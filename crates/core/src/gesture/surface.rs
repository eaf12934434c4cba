/// Something with a horizontal scroll offset, such as a DOM element or a
/// native scroll view.
pub trait ScrollSurface {
    /// Current offset in px.
    fn scroll_offset(&self) -> f64;

    /// Move to `offset`. Implementations may clamp to their scroll range.
    fn set_scroll_offset(&mut self, offset: f64);
}

/// In-memory scroller that clamps to `[0, content_width - viewport_width]`,
/// the way a browser clamps `scrollLeft`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualRail {
    offset: f64,
    content_width: f64,
    viewport_width: f64,
}

impl VirtualRail {
    #[must_use]
    pub const fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            offset: 0.0,
            content_width,
            viewport_width,
        }
    }

    /// Rail holding `items` cards of `footprint` px each.
    #[must_use]
    pub fn for_items(items: usize, footprint: f64, viewport_width: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let content = items as f64 * footprint;
        Self::new(content, viewport_width)
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }
}

impl ScrollSurface for VirtualRail {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_offset())
        };
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_clamped() {
        let mut rail = VirtualRail::for_items(8, 224.0, 400.0);
        assert_eq!(rail.max_offset(), 8.0 * 224.0 - 400.0);

        rail.set_scroll_offset(-15.0);
        assert_eq!(rail.scroll_offset(), 0.0);

        rail.set_scroll_offset(10_000.0);
        assert_eq!(rail.scroll_offset(), rail.max_offset());

        rail.set_scroll_offset(f64::NAN);
        assert_eq!(rail.scroll_offset(), 0.0);
    }

    #[test]
    fn test_short_rail_cannot_scroll() {
        let mut rail = VirtualRail::for_items(1, 224.0, 400.0);
        rail.set_scroll_offset(50.0);
        assert_eq!(rail.scroll_offset(), 0.0);
    }
}
