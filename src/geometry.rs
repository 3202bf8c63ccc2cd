use crate::pagesize::PageSize;
use crate::units::Pt;
use crate::BadgeError;

/// The fixed shape of a badge sheet: page and card sizes, how many cards fit
/// across and down, and the margins that centre the grid on the page.
///
/// All values are whole PostScript points so that card edges and cut guides land
/// on exactly the same coordinates. Geometry never changes between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub page_width: u32,
    pub page_height: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub x_margin: u32,
    pub y_margin: u32,
}

impl PageGeometry {
    /// Fit as many whole cards onto the page as possible and centre the grid.
    ///
    /// Fails if any dimension is zero or a card is larger than the page, since no
    /// layout can proceed from there.
    pub fn new(
        page_width: u32,
        page_height: u32,
        card_width: u32,
        card_height: u32,
    ) -> Result<PageGeometry, BadgeError> {
        if card_width == 0 || card_height == 0 {
            return Err(BadgeError::Geometry(format!(
                "card dimensions must be non-zero, got {card_width}x{card_height}"
            )));
        }
        Self::with_grid(
            page_width,
            page_height,
            card_width,
            card_height,
            page_width / card_width,
            page_height / card_height,
        )
    }

    /// Use an explicit grid instead of the largest one that fits. The grid must
    /// still fit on the page.
    pub fn with_grid(
        page_width: u32,
        page_height: u32,
        card_width: u32,
        card_height: u32,
        columns: u32,
        rows: u32,
    ) -> Result<PageGeometry, BadgeError> {
        if page_width == 0 || page_height == 0 {
            return Err(BadgeError::Geometry(format!(
                "page dimensions must be non-zero, got {page_width}x{page_height}"
            )));
        }
        if card_width == 0 || card_height == 0 {
            return Err(BadgeError::Geometry(format!(
                "card dimensions must be non-zero, got {card_width}x{card_height}"
            )));
        }
        if columns == 0 || rows == 0 {
            return Err(BadgeError::Geometry(format!(
                "a {card_width}x{card_height} card does not fit on a {page_width}x{page_height} page"
            )));
        }

        if columns.checked_mul(rows).is_none() {
            return Err(BadgeError::Geometry(format!(
                "{columns}x{rows} cards are too many for one page"
            )));
        }

        let grid_width = columns.checked_mul(card_width);
        let grid_height = rows.checked_mul(card_height);
        let (grid_width, grid_height) = match (grid_width, grid_height) {
            (Some(w), Some(h)) if w <= page_width && h <= page_height => (w, h),
            _ => {
                return Err(BadgeError::Geometry(format!(
                    "{columns}x{rows} cards of {card_width}x{card_height} do not fit on a {page_width}x{page_height} page"
                )))
            }
        };

        Ok(PageGeometry {
            page_width,
            page_height,
            card_width,
            card_height,
            columns,
            rows,
            x_margin: (page_width - grid_width) / 2,
            y_margin: (page_height - grid_height) / 2,
        })
    }

    /// Number of cards on one full page. Construction guarantees this fits.
    pub fn cards_per_page(&self) -> u32 {
        self.columns * self.rows
    }

    /// Pages needed for `count` cards. An empty batch still produces one
    /// (marker-only) page.
    pub fn page_count(&self, count: usize) -> usize {
        let per_page = self.cards_per_page() as usize;
        count.div_ceil(per_page).max(1)
    }

    /// The page size in points, as handed to the rendering surface
    pub fn page_size(&self) -> PageSize {
        (Pt::from(self.page_width), Pt::from(self.page_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_sheet_of_conference_cards() {
        let geometry = PageGeometry::new(595, 842, 255, 153).unwrap();
        assert_eq!(geometry.columns, 2);
        assert_eq!(geometry.rows, 5);
        assert_eq!(geometry.x_margin, 42);
        assert_eq!(geometry.y_margin, 38);
        assert_eq!(geometry.cards_per_page(), 10);
    }

    #[test]
    fn grid_and_margins_never_exceed_the_page() {
        for (pw, ph, cw, ch) in [(595, 842, 255, 153), (612, 792, 200, 100), (100, 100, 33, 7)] {
            let g = PageGeometry::new(pw, ph, cw, ch).unwrap();
            assert!(g.columns * g.card_width + 2 * g.x_margin <= g.page_width);
            assert!(g.rows * g.card_height + 2 * g.y_margin <= g.page_height);
        }
    }

    #[test]
    fn odd_remainders_floor_the_margin() {
        let geometry = PageGeometry::new(101, 100, 50, 100).unwrap();
        assert_eq!(geometry.x_margin, 0);
        assert_eq!(geometry.y_margin, 0);
        let geometry = PageGeometry::new(103, 100, 50, 100).unwrap();
        assert_eq!(geometry.x_margin, 1);
    }

    #[test]
    fn explicit_grid_is_centred() {
        let geometry = PageGeometry::with_grid(595, 842, 255, 153, 2, 3).unwrap();
        assert_eq!(geometry.rows, 3);
        assert_eq!(geometry.y_margin, (842 - 3 * 153) / 2);
    }

    #[test]
    fn unusable_geometry_fails_fast() {
        assert!(matches!(
            PageGeometry::new(595, 842, 0, 153),
            Err(BadgeError::Geometry(_))
        ));
        assert!(matches!(
            PageGeometry::new(200, 842, 255, 153),
            Err(BadgeError::Geometry(_))
        ));
        assert!(matches!(
            PageGeometry::new(0, 842, 255, 153),
            Err(BadgeError::Geometry(_))
        ));
        assert!(matches!(
            PageGeometry::with_grid(595, 842, 255, 153, 3, 5),
            Err(BadgeError::Geometry(_))
        ));
        assert!(matches!(
            PageGeometry::with_grid(595, 842, 255, 153, 2, 0),
            Err(BadgeError::Geometry(_))
        ));
    }

    #[test]
    fn page_count_rounds_up() {
        let geometry = PageGeometry::with_grid(595, 842, 255, 153, 2, 3).unwrap();
        assert_eq!(geometry.page_count(0), 1);
        assert_eq!(geometry.page_count(5), 1);
        assert_eq!(geometry.page_count(6), 1);
        assert_eq!(geometry.page_count(7), 2);
        assert_eq!(geometry.page_count(250), 42);
    }

    #[test]
    fn too_many_cards_for_one_page() {
        // 70000 x 70000 one-point cards is more than a u32 can count
        assert!(matches!(
            PageGeometry::new(70_000, 70_000, 1, 1),
            Err(BadgeError::Geometry(_))
        ));
        let big = PageGeometry::new(60_000, 60_000, 1, 1).unwrap();
        assert_eq!(big.cards_per_page(), 3_600_000_000);
    }
}
