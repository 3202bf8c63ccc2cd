use crate::rect::Rect;
use crate::units::Pt;

/// Space kept clear around the edges of a page or cell. Nothing stops content
/// from overflowing the margins; layout functions use them as guidelines.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

/// Margins inside a text cell
pub type Padding = Margins;

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Only a bottom margin, the common case for badge cells that sit their text
    /// above a decoration
    pub fn bottom(value: Pt) -> Margins {
        Margins {
            bottom: value,
            ..Margins::empty()
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }

    /// Shrink a rectangle by these margins
    pub fn inset(&self, rect: Rect) -> Rect {
        Rect {
            x1: rect.x1 + self.left,
            y1: rect.y1 + self.bottom,
            x2: rect.x2 - self.right,
            y2: rect.y2 - self.top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_each_side() {
        let rect = Rect::from_origin(Pt(10.0), Pt(20.0), Pt(100.0), Pt(50.0));
        let inner = Margins::trbl(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0)).inset(rect);
        assert_eq!(inner, Rect {
            x1: Pt(14.0),
            y1: Pt(23.0),
            x2: Pt(108.0),
            y2: Pt(69.0),
        });
        assert_eq!(Margins::bottom(Pt(15.0)).inset(rect).y1, Pt(35.0));
    }
}
