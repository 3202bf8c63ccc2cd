//! Cut guides. Every page gets one full-bleed line along each card edge, so the
//! guides run off the page in both directions and a guillotine can follow them
//! straight across the sheet.

use crate::geometry::PageGeometry;
use crate::units::Pt;
use serde::Deserialize;

/// A straight line segment in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

/// When the cut guides of a page are drawn relative to the page break
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerTiming {
    /// Draw the guides on the page being closed, just before moving on
    #[default]
    BeforeBreak,
    /// Draw the guides on each page as soon as it is started
    AfterBreak,
}

/// The cut guides for one page of a given geometry
#[derive(Debug, Clone, Copy)]
pub struct PageMarkers {
    geometry: PageGeometry,
}

impl PageMarkers {
    pub fn new(geometry: PageGeometry) -> PageMarkers {
        PageMarkers { geometry }
    }

    /// `columns + 1` vertical guides, left to right, each spanning the full page
    /// height
    pub fn column_lines(&self) -> Vec<Segment> {
        let g = &self.geometry;
        (0..=g.columns)
            .map(|i| {
                let x = Pt::from(g.x_margin + i * g.card_width);
                Segment {
                    x1: x,
                    y1: Pt(0.0),
                    x2: x,
                    y2: Pt::from(g.page_height),
                }
            })
            .collect()
    }

    /// `rows + 1` horizontal guides, bottom to top, each spanning the full page
    /// width
    pub fn row_lines(&self) -> Vec<Segment> {
        let g = &self.geometry;
        (0..=g.rows)
            .map(|i| {
                let y = Pt::from(g.y_margin + i * g.card_height);
                Segment {
                    x1: Pt(0.0),
                    y1: y,
                    x2: Pt::from(g.page_width),
                    y2: y,
                }
            })
            .collect()
    }

    /// All guides for one page, verticals first
    pub fn lines(&self) -> impl Iterator<Item = Segment> {
        self.column_lines().into_iter().chain(self.row_lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLayout;

    #[test]
    fn guides_sit_on_card_edges() {
        let geometry = PageGeometry::new(595, 842, 255, 153).unwrap();
        let markers = PageMarkers::new(geometry);

        let xs: Vec<f32> = markers.column_lines().iter().map(|s| s.x1.0).collect();
        assert_eq!(xs, vec![42.0, 297.0, 552.0]);
        let ys: Vec<f32> = markers.row_lines().iter().map(|s| s.y1.0).collect();
        assert_eq!(ys, vec![38.0, 191.0, 344.0, 497.0, 650.0, 803.0]);
    }

    #[test]
    fn guides_are_full_bleed() {
        let geometry = PageGeometry::with_grid(595, 842, 255, 153, 2, 3).unwrap();
        let markers = PageMarkers::new(geometry);
        assert_eq!(markers.column_lines().len(), 3);
        assert_eq!(markers.row_lines().len(), 4);
        for line in markers.column_lines() {
            assert_eq!((line.y1, line.y2), (Pt(0.0), Pt(842.0)));
            assert_eq!(line.x1, line.x2);
        }
        for line in markers.row_lines() {
            assert_eq!((line.x1, line.x2), (Pt(0.0), Pt(595.0)));
            assert_eq!(line.y1, line.y2);
        }
        assert_eq!(markers.lines().count(), 7);
    }

    #[test]
    fn every_card_corner_lies_on_a_guide() {
        let geometry = PageGeometry::new(612, 792, 180, 110).unwrap();
        let markers = PageMarkers::new(geometry);
        let xs: Vec<Pt> = markers.column_lines().iter().map(|s| s.x1).collect();
        let ys: Vec<Pt> = markers.row_lines().iter().map(|s| s.y1).collect();
        for placement in GridLayout::new(geometry).take(geometry.cards_per_page() as usize) {
            let rect = placement.rect(&geometry);
            assert!(xs.contains(&rect.x1) && xs.contains(&rect.x2));
            assert!(ys.contains(&rect.y1) && ys.contains(&rect.y2));
        }
    }
}
