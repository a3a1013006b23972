//! Page layout configuration for PDF output.

use crate::error::{Error, Result};

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.2756;
/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.8898;
/// Line height as a multiple of font size.
pub const LINE_SPACING: f32 = 1.4;

/// Fixed page geometry and typography for the PDF renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Margin on all four sides in points
    pub margin: f32,

    /// Font size in points
    pub font_size: f32,

    /// Vertical advance per line in points
    pub line_height: f32,

    /// Characters drawn per line at most; longer lines are cut
    pub max_line_chars: usize,

    /// Wrapped lines per paragraph at most; longer paragraphs are skipped
    pub max_paragraph_lines: usize,

    /// Flate-compress page content streams
    pub compress: bool,
}

impl PageLayout {
    /// A4 page with the default typography.
    pub fn a4() -> Self {
        Self::default()
    }

    /// US Letter page with the default typography.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            ..Self::default()
        }
    }

    /// Set page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set font size; line height follows at [`LINE_SPACING`].
    ///
    /// Call [`with_line_height`](Self::with_line_height) afterwards to
    /// override the spacing.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self.line_height = size * LINE_SPACING;
        self
    }

    /// Set line height.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Set the per-line character cap.
    pub fn with_max_line_chars(mut self, chars: usize) -> Self {
        self.max_line_chars = chars;
        self
    }

    /// Set the per-paragraph line cap.
    pub fn with_max_paragraph_lines(mut self, lines: usize) -> Self {
        self.max_paragraph_lines = lines;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Width available to a line of text.
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Cursor position at the top of a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    /// Lowest cursor position a line may be drawn at.
    pub fn bottom(&self) -> f32 {
        self.margin + self.line_height
    }

    /// Reject geometry that leaves no room for one line of text.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("width", self.width),
            ("height", self.height),
            ("font size", self.font_size),
            ("line height", self.line_height),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidLayout(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidLayout(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if self.text_width() <= 0.0 {
            return Err(Error::InvalidLayout(
                "margins leave no horizontal space".to_string(),
            ));
        }
        if self.bottom() > self.top() {
            return Err(Error::InvalidLayout(
                "margins leave no room for a single line".to_string(),
            ));
        }
        if self.max_line_chars == 0 || self.max_paragraph_lines == 0 {
            return Err(Error::InvalidLayout(
                "line and paragraph caps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin: 50.0,
            font_size: 10.0,
            line_height: 14.0,
            max_line_chars: 200,
            max_paragraph_lines: 5000,
            compress: true,
        }
    }
}
