//! Screen geometry and caret anchoring
//!
//! Converts a caret offset into the top-left anchor of the suggestion popup.
//! Glyph metrics are fixed, so the result approximates where the caret is
//! drawn rather than measuring rendered glyphs. The terminal front end uses
//! one cell per glyph, which makes the approximation exact for narrow text.

/// A point in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// True when `other` lies entirely inside `self`
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// True when the point lies inside the rectangle (max edges exclusive)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Fixed per-glyph metrics used for caret mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Width of a single glyph
    pub char_width: f32,
    /// Height of a text line
    pub line_height: f32,
}

impl GlyphMetrics {
    /// One terminal cell per glyph
    pub const fn terminal() -> Self {
        Self {
            char_width: 1.0,
            line_height: 1.0,
        }
    }
}

/// First visible line and column of the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scroll {
    pub line: usize,
    pub column: usize,
}

/// Maps caret offsets to popup anchors inside a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretScreenMapper {
    pub metrics: GlyphMetrics,
    /// Distance from the container's top-left to the first glyph, also kept
    /// free on the right when the popup is shifted left
    pub margin: f32,
}

impl CaretScreenMapper {
    pub const fn new(metrics: GlyphMetrics, margin: f32) -> Self {
        Self { metrics, margin }
    }

    /// Zero-based (line, column) of `caret`, counted in characters.
    pub fn line_col(text: &str, caret: usize) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for c in text.chars().take(caret) {
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Compute the popup's top-left corner for a caret.
    ///
    /// The popup opens one line below the caret. It shifts left when it
    /// would overflow the right edge and flips above the caret line when it
    /// would overflow the bottom. Returns `None` when the container is not
    /// known or is too small to hold the popup; otherwise the popup
    /// rectangle at the returned point lies inside `container`.
    pub fn map(
        &self,
        text: &str,
        caret: usize,
        scroll: Scroll,
        container: Option<Rect>,
        popup: Size,
    ) -> Option<Point> {
        let container = container?;
        if !container.is_finite() || !popup.width.is_finite() || !popup.height.is_finite() {
            return None;
        }
        if popup.width <= 0.0
            || popup.height <= 0.0
            || popup.width > container.width
            || popup.width + self.margin > container.width
            || popup.height > container.height
        {
            return None;
        }

        let (line, column) = Self::line_col(text, caret);
        let rel_line = line as f32 - scroll.line as f32;
        let rel_column = column as f32 - scroll.column as f32;

        let caret_x = container.x + self.margin + rel_column * self.metrics.char_width;
        let line_top = container.y + self.margin + rel_line * self.metrics.line_height;

        let mut x = caret_x;
        if x + popup.width > container.max_x() {
            x = container.max_x() - popup.width - self.margin;
        }

        let below = line_top + self.metrics.line_height;
        let mut y = below;
        if below + popup.height > container.max_y() {
            y = line_top - popup.height;
        }

        // Caret scrolled out of view or popup taller than the space on
        // either side: pin inside the container.
        let x = x.clamp(container.x, container.max_x() - popup.width);
        let y = y.clamp(container.y, container.max_y() - popup.height);

        Some(Point::new(x, y))
    }
}
