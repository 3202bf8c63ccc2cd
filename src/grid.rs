//! Placement of cards on the page grid.
//!
//! [GridLayout] hands out one [CardPlacement] per badge, in input order, filling
//! each page left to right and then upwards from the bottom margin. After the
//! last cell of a page has been handed out the layout reports a page boundary;
//! the next placement lands on the following page.
//!
//! Positions are a pure function of the record's index, see
//! [GridLayout::placement_at], so a batch can also be laid out out of order or
//! resumed part way through.

use crate::geometry::PageGeometry;
use crate::rect::Rect;
use crate::units::Pt;

/// Where one card goes: which page, which grid cell, and the card's lower-left
/// corner in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPlacement {
    pub page: usize,
    pub column: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
}

impl CardPlacement {
    /// The card's full rectangle on its page
    pub fn rect(&self, geometry: &PageGeometry) -> Rect {
        Rect::from_origin(
            Pt::from(self.x),
            Pt::from(self.y),
            Pt::from(geometry.card_width),
            Pt::from(geometry.card_height),
        )
    }
}

/// The cursor of a layout in progress: the cell the next card goes into
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    pub column: u32,
    pub row: u32,
    pub page: usize,
}

/// Hands out card positions in reading order, page after page
#[derive(Debug, Clone)]
pub struct GridLayout {
    geometry: PageGeometry,
    state: LayoutState,
    page_boundary: bool,
}

impl GridLayout {
    pub fn new(geometry: PageGeometry) -> GridLayout {
        GridLayout {
            geometry,
            state: LayoutState::default(),
            page_boundary: false,
        }
    }

    /// Resume a layout from the cursor of a previous run
    pub fn resume(geometry: PageGeometry, state: LayoutState) -> GridLayout {
        GridLayout {
            geometry,
            state: LayoutState {
                column: state.column % geometry.columns,
                row: state.row % geometry.rows,
                page: state.page,
            },
            page_boundary: false,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Place the next card and advance the cursor.
    ///
    /// The card is positioned from the cursor as it was before advancing, so the
    /// last card of a page is placed on that page and only then does
    /// [GridLayout::is_page_boundary] turn true.
    pub fn next_placement(&mut self) -> CardPlacement {
        let placement = self.placement_for(self.state);

        let mut next = self.state;
        next.column += 1;
        if next.column == self.geometry.columns {
            next.column = 0;
            next.row += 1;
        }
        self.page_boundary = next.row == self.geometry.rows;
        if self.page_boundary {
            next.row = 0;
            next.page += 1;
        }
        self.state = next;

        log::debug!(
            "placed card on page {} at column {}, row {} ({}, {})",
            placement.page,
            placement.column,
            placement.row,
            placement.x,
            placement.y
        );
        placement
    }

    /// Whether the most recent placement filled its page
    pub fn is_page_boundary(&self) -> bool {
        self.page_boundary
    }

    /// The placement of the card at `index` in the input sequence, without
    /// touching the cursor
    pub fn placement_at(&self, index: usize) -> CardPlacement {
        let columns = self.geometry.columns as usize;
        let per_page = self.geometry.cards_per_page() as usize;
        self.placement_for(LayoutState {
            column: (index % columns) as u32,
            row: ((index / columns) % self.geometry.rows as usize) as u32,
            page: index / per_page,
        })
    }

    fn placement_for(&self, state: LayoutState) -> CardPlacement {
        let g = &self.geometry;
        CardPlacement {
            page: state.page,
            column: state.column,
            row: state.row,
            x: g.x_margin + state.column * g.card_width,
            y: g.y_margin + state.row * g.card_height,
        }
    }
}

impl Iterator for GridLayout {
    type Item = CardPlacement;

    fn next(&mut self) -> Option<CardPlacement> {
        Some(self.next_placement())
    }
}
