//! Print runs of conference badges: cards are laid out on a fixed grid, page
//! after page, with full-bleed cut guides on every sheet.
//!
//! [BadgeSheetBuilder] drives the layout and talks to a [Surface];
//! [PdfSurface] renders to a PDF file through the small document model in this
//! crate ([Document], [Page], [Font], [Image]).

mod badge;
pub use badge::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod grid;
pub use grid::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod markers;
pub use markers::*;

mod page;
pub use page::*;

/// Named paper sizes
pub mod pagesize;

mod pdf_surface;
pub use pdf_surface::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sheet;
pub use sheet::*;

mod standard_font;
pub use standard_font::*;

mod style;
pub use style::*;

mod surface;
pub use surface::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
