use crate::colour::Colour;
use crate::font::Font;
use crate::layout::Padding;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Arena;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    #[default]
    Centre,
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Where a single line of text starts so that it sits aligned inside `cell`.
///
/// `width` is the advance of the whole line, `ascent` and `descent` the extent
/// of its tallest font above and below the baseline (descent is negative).
/// Returns the x of the first glyph and the y of the baseline.
pub fn align_line(
    cell: Rect,
    padding: &Padding,
    h_align: HAlign,
    v_align: VAlign,
    width: Pt,
    ascent: Pt,
    descent: Pt,
) -> (Pt, Pt) {
    let inner = padding.inset(cell);

    let x = match h_align {
        HAlign::Left => inner.x1,
        HAlign::Centre => inner.x1 + (inner.width() - width) * 0.5,
        HAlign::Right => inner.x2 - width,
    };

    let y = match v_align {
        VAlign::Top => inner.y2 - ascent,
        VAlign::Middle => inner.y1 + (inner.height() - (ascent - descent)) * 0.5 - descent,
        VAlign::Bottom => inner.y1 - descent,
    };

    (x, y)
}

/// Smallest fraction of their configured size runs are shrunk to when text
/// doesn't fit its cell
pub const MIN_TEXT_SCALE: f32 = 0.5;

const SCALE_STEP: f32 = 0.05;

/// One wrapped line: pieces of text tagged with the run they came from
#[derive(Debug, Default)]
struct Line {
    pieces: Vec<(usize, String)>,
    width: Pt,
}

impl Line {
    fn push(&mut self, run: usize, text: &str, width: Pt) {
        match self.pieces.last_mut() {
            Some((last_run, piece)) if *last_run == run => piece.push_str(text),
            _ => self.pieces.push((run, text.to_string())),
        }
        self.width += width;
    }
}

fn run_size(font: &SpanFont, scale: f32) -> Pt {
    font.size * scale
}

/// Greedily break runs into lines no wider than `max_width`, at whitespace.
/// A single word wider than `max_width` gets a line to itself.
fn break_lines(
    fonts: &Arena<Font>,
    runs: &[(String, Colour, SpanFont)],
    scale: f32,
    max_width: Pt,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();

    for (index, (text, _, font)) in runs.iter().enumerate() {
        let face = &fonts[font.id];
        let size = run_size(font, scale);
        for word in text.split_inclusive(char::is_whitespace) {
            let visible = face.width_of(word.trim_end(), size);
            if !current.pieces.is_empty() && current.width + visible > max_width {
                lines.push(std::mem::take(&mut current));
            }
            let word = if current.pieces.is_empty() {
                word.trim_start()
            } else {
                word
            };
            if !word.is_empty() {
                current.push(index, word, face.width_of(word, size));
            }
        }
    }
    lines.push(current);

    // whitespace at the end of a line takes no room
    for line in lines.iter_mut() {
        if let Some((_, piece)) = line.pieces.last_mut() {
            let trimmed = piece.trim_end().len();
            piece.truncate(trimmed);
        }
        line.pieces.retain(|(_, piece)| !piece.is_empty());
        line.width = line
            .pieces
            .iter()
            .map(|(run, piece)| {
                let font = &runs[*run].2;
                fonts[font.id].width_of(piece, run_size(font, scale))
            })
            .sum();
    }
    lines
}

/// Lay out coloured runs inside a cell, adding the spans to `page`.
///
/// Runs are placed back to back and wrapped onto further lines at whitespace.
/// When the wrapped block is still wider or taller than the cell (after
/// padding), every run is shrunk in small steps until it fits, but never below
/// [MIN_TEXT_SCALE] of its size; text that doesn't fit even then overflows
/// evenly around the alignment point. Line pitch is the tallest run's line gap
/// plus ascent less descent.
///
/// Returns the point where the last line ended.
pub fn layout_cell(
    fonts: &Arena<Font>,
    page: &mut Page,
    runs: &[(String, Colour, SpanFont)],
    cell: Rect,
    padding: &Padding,
    h_align: HAlign,
    v_align: VAlign,
) -> (Pt, Pt) {
    let inner = padding.inset(cell);

    let mut scale = 1.0;
    let (lines, ascent, descent, pitch) = loop {
        let lines = break_lines(fonts, runs, scale, inner.width());
        let (ascent, descent, gap) = runs.iter().fold(
            (Pt(0.0), Pt(0.0), Pt(0.0)),
            |(ascent, descent, gap), (_, _, font)| {
                let face = &fonts[font.id];
                let size = run_size(font, scale);
                (
                    ascent.max(face.ascent(size)),
                    descent.min(face.descent(size)),
                    gap.max(face.line_gap(size)),
                )
            },
        );
        let pitch = gap + ascent - descent;
        let height = pitch * (lines.len() - 1) as f32 + ascent - descent;
        let widest = lines.iter().fold(Pt(0.0), |w, line| w.max(line.width));

        let fits = widest <= inner.width() && height <= inner.height();
        if fits || scale <= MIN_TEXT_SCALE {
            break (lines, ascent, descent, pitch);
        }
        scale = (scale - SCALE_STEP).max(MIN_TEXT_SCALE);
    };

    if scale < 1.0 {
        log::debug!("shrunk text to {:.0}% to fit its cell", scale * 100.0);
    }

    // the block's first baseline, treating the extra lines as extra descent
    let block_descent = descent - pitch * (lines.len() - 1) as f32;
    let (_, first_baseline) = align_line(
        cell,
        padding,
        h_align,
        v_align,
        Pt(0.0),
        ascent,
        block_descent,
    );

    let mut end = (inner.x1, first_baseline);
    for (row, line) in lines.iter().enumerate() {
        let y = first_baseline - pitch * row as f32;
        let (mut x, _) = align_line(cell, padding, h_align, v_align, line.width, ascent, descent);

        let mut spans = Vec::with_capacity(line.pieces.len());
        for (run, piece) in line.pieces.iter() {
            let (_, colour, font) = &runs[*run];
            let font = SpanFont {
                id: font.id,
                size: run_size(font, scale),
            };
            spans.push(SpanLayout {
                text: piece.clone(),
                font,
                colour: *colour,
                coords: (x, y),
            });
            x += fonts[font.id].width_of(piece, font.size);
        }
        page.add_spans(spans);
        end = (x, y);
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;

    fn cell() -> Rect {
        Rect::from_origin(Pt(42.0), Pt(140.0), Pt(255.0), Pt(51.0))
    }

    #[test]
    fn horizontal_alignment() {
        let pad = Margins::all(Pt(5.0));
        let line = |h| align_line(cell(), &pad, h, VAlign::Top, Pt(45.0), Pt(10.0), Pt(-2.0)).0;
        assert_eq!(line(HAlign::Left), Pt(47.0));
        assert_eq!(line(HAlign::Centre), Pt(47.0 + (245.0 - 45.0) / 2.0));
        assert_eq!(line(HAlign::Right), Pt(297.0 - 5.0 - 45.0));
    }

    #[test]
    fn vertical_alignment() {
        let pad = Margins::bottom(Pt(10.0));
        let line = |v| align_line(cell(), &pad, HAlign::Left, v, Pt(0.0), Pt(12.0), Pt(-4.0)).1;
        assert_eq!(line(VAlign::Top), Pt(191.0 - 12.0));
        assert_eq!(line(VAlign::Bottom), Pt(150.0 + 4.0));
        // 41pt inner height, 16pt of text: 12.5pt clear above and below
        assert_eq!(line(VAlign::Middle), Pt(150.0 + 12.5 + 4.0));
    }

    use crate::badge::sample_records;
    use crate::page::PageContents;
    use crate::pagesize;
    use crate::standard_font::StandardFont;
    use crate::style::{Role, StyleSheet, ORANGE, PURPLE};

    const SLACK: Pt = Pt(0.01);

    fn bold_arena() -> (Arena<Font>, id_arena::Id<Font>) {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::standard(StandardFont::HelveticaBold));
        (fonts, id)
    }

    fn lines_of(page: &Page) -> Vec<&Vec<SpanLayout>> {
        page.contents
            .iter()
            .filter_map(|content| match content {
                PageContents::Text(spans) => Some(spans),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sample_names_stay_inside_the_name_cell() {
        let (fonts, id) = bold_arena();
        let size = StyleSheet::default().select_font(Role::Plain).size;
        let cell = cell();

        for record in sample_records(250, "RDW-ICT") {
            let mut page = Page::new(pagesize::A4, None);
            let runs = [(
                record.name().to_string(),
                Colour::from(PURPLE),
                SpanFont { id, size },
            )];
            layout_cell(
                &fonts,
                &mut page,
                &runs,
                cell,
                &Padding::empty(),
                HAlign::Centre,
                VAlign::Middle,
            );

            for span in lines_of(&page).into_iter().flatten() {
                let face = &fonts[span.font.id];
                let (x, y) = span.coords;
                let right = x + face.width_of(&span.text, span.font.size);
                assert!(x >= cell.x1 - SLACK, "{:?} starts left of the card", record.name());
                assert!(right <= cell.x2 + SLACK, "{:?} runs off the card", record.name());
                assert!(y + face.ascent(span.font.size) <= cell.y2 + SLACK);
                assert!(y + face.descent(span.font.size) >= cell.y1 - SLACK);
            }
        }
    }

    #[test]
    fn long_names_wrap_at_spaces() {
        let (fonts, id) = bold_arena();
        let mut page = Page::new(pagesize::A4, None);
        let runs = [(
            "Lorem ipsum dolor sit amet".to_string(),
            Colour::from(PURPLE),
            SpanFont { id, size: Pt(24.0) },
        )];
        layout_cell(
            &fonts,
            &mut page,
            &runs,
            cell(),
            &Padding::empty(),
            HAlign::Centre,
            VAlign::Middle,
        );

        let lines = lines_of(&page);
        assert_eq!(lines.len(), 2);
        let text: Vec<&str> = lines.iter().map(|line| line[0].text.as_str()).collect();
        assert_eq!(text, vec!["Lorem ipsum dolor sit", "amet"]);
        // still the configured size, one pitch apart
        assert_eq!(lines[0][0].font.size, Pt(24.0));
        assert!(lines[0][0].coords.1 > lines[1][0].coords.1);
    }

    #[test]
    fn text_that_cannot_fit_is_shrunk() {
        let (fonts, id) = bold_arena();
        let mut page = Page::new(pagesize::A4, None);
        let small = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(20.0));
        let runs = [(
            "Ada Lovelace".to_string(),
            Colour::from(PURPLE),
            SpanFont { id, size: Pt(24.0) },
        )];
        layout_cell(
            &fonts,
            &mut page,
            &runs,
            small,
            &Padding::empty(),
            HAlign::Centre,
            VAlign::Middle,
        );

        let lines = lines_of(&page);
        assert_eq!(lines.len(), 1);
        let span = &lines[0][0];
        assert!(span.font.size < Pt(24.0));
        assert!(span.font.size >= Pt(24.0 * MIN_TEXT_SCALE));
        assert!(span.coords.0 + fonts[id].width_of(&span.text, span.font.size) <= small.x2 + SLACK);
    }

    #[test]
    fn banner_runs_share_one_line() {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::standard(StandardFont::Helvetica));
        let mut page = Page::new(pagesize::A4, None);
        let font = SpanFont { id, size: Pt(35.0) };
        let runs = [
            ("RDW".to_string(), Colour::from(ORANGE), font),
            (" Techday".to_string(), Colour::from(PURPLE), font),
        ];
        let (end, _) = layout_cell(
            &fonts,
            &mut page,
            &runs,
            cell(),
            &Margins::bottom(Pt(15.0)),
            HAlign::Centre,
            VAlign::Middle,
        );

        let lines = lines_of(&page);
        assert_eq!(lines.len(), 1);
        let texts: Vec<&str> = lines[0].iter().map(|span| span.text.as_str()).collect();
        assert_eq!(texts, vec!["RDW", " Techday"]);
        assert_eq!(lines[0][1].coords.0, lines[0][0].coords.0 + fonts[id].width_of("RDW", Pt(35.0)));
        assert!(end <= cell().x2);
    }

    #[test]
    fn empty_text_adds_nothing() {
        let (fonts, id) = bold_arena();
        let mut page = Page::new(pagesize::A4, None);
        let runs = [(String::new(), Colour::from(PURPLE), SpanFont { id, size: Pt(14.0) })];
        layout_cell(
            &fonts,
            &mut page,
            &runs,
            cell(),
            &Padding::empty(),
            HAlign::Centre,
            VAlign::Top,
        );
        assert!(page.is_empty());
    }
}
