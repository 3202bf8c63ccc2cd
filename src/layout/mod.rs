//! Positioning text inside a box on a page.
//!
//! Badge cards are built from fixed-height cells (name, organisation, banner,
//! sessions). Each cell holds text made of one or more coloured runs, wrapped at
//! whitespace, shrunk if it still doesn't fit, and aligned horizontally and
//! vertically inside the cell after padding.
//!
//! # Example
//!
//! ```
//! use badge_sheet::layout::{align_line, HAlign, Padding, VAlign};
//! use badge_sheet::{Pt, Rect};
//!
//! let cell = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(200.0), Pt(50.0));
//! // a 100pt wide line whose font rises 20pt above and drops 5pt below the baseline
//! let (x, baseline) = align_line(
//!     cell,
//!     &Padding::empty(),
//!     HAlign::Centre,
//!     VAlign::Middle,
//!     Pt(100.0),
//!     Pt(20.0),
//!     Pt(-5.0),
//! );
//! assert_eq!(x, Pt(50.0));
//! assert_eq!(baseline, Pt(17.5));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
