//! The drawing operations a badge sheet needs from its output.
//!
//! [BadgeSheetBuilder](crate::BadgeSheetBuilder) never touches PDF objects
//! directly; it talks to a [Surface]. [PdfSurface](crate::PdfSurface) is the real
//! implementation, and tests substitute one that just records the calls.

use crate::colour::Rgb;
use crate::layout::{HAlign, Padding, VAlign};
use crate::markers::Segment;
use crate::rect::Rect;
use crate::style::FontSpec;
use crate::BadgeError;

/// A handle to an image registered with a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub usize);

/// A run of text in a single style
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
}

impl TextRun {
    pub fn new<S: ToString>(text: S, font: FontSpec) -> TextRun {
        TextRun {
            text: text.to_string(),
            font,
        }
    }
}

/// Text and the box it is wrapped and aligned in
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell {
    pub runs: Vec<TextRun>,
    pub rect: Rect,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub padding: Padding,
}

impl TextCell {
    /// The runs joined together, as they would read on the page
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Something badge sheets can be drawn on, one page at a time
pub trait Surface {
    /// What closing the surface hands back, e.g. the path of the written file
    type Output;

    /// Finish the current page and start drawing on a fresh one
    fn new_page(&mut self) -> Result<(), BadgeError>;

    fn draw_line(&mut self, line: Segment, stroke_width: f32) -> Result<(), BadgeError>;

    fn fill_rect(&mut self, rect: Rect, colour: Rgb) -> Result<(), BadgeError>;

    fn place_text(&mut self, cell: &TextCell) -> Result<(), BadgeError>;

    fn place_image(&mut self, image: ImageRef, rect: Rect) -> Result<(), BadgeError>;

    /// Finish the document. Consumes the surface so nothing can be drawn after.
    fn close(self) -> Result<Self::Output, BadgeError>;
}
