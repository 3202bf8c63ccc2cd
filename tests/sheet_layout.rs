use badge_sheet::{
    BadgeError, BadgeRecord, BadgeSheetBuilder, CardPlacement, GridLayout, ImageRef,
    MarkerTiming, PageGeometry, Rect, Rgb, Role, Segment, SheetOptions, Surface, TextCell,
};

/// Counts what the builder draws on each page
#[derive(Debug, Default)]
struct PageLog {
    lines: Vec<Segment>,
    texts: Vec<String>,
}

#[derive(Debug)]
struct RecordingSurface {
    pages: Vec<PageLog>,
}

impl RecordingSurface {
    fn new() -> RecordingSurface {
        RecordingSurface {
            pages: vec![PageLog::default()],
        }
    }

    fn current(&mut self) -> &mut PageLog {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Surface for RecordingSurface {
    type Output = Vec<PageLog>;

    fn new_page(&mut self) -> Result<(), BadgeError> {
        self.pages.push(PageLog::default());
        Ok(())
    }

    fn draw_line(&mut self, line: Segment, _stroke_width: f32) -> Result<(), BadgeError> {
        self.current().lines.push(line);
        Ok(())
    }

    fn fill_rect(&mut self, _rect: Rect, _colour: Rgb) -> Result<(), BadgeError> {
        Ok(())
    }

    fn place_text(&mut self, cell: &TextCell) -> Result<(), BadgeError> {
        self.current().texts.push(cell.text());
        Ok(())
    }

    fn place_image(&mut self, _image: ImageRef, _rect: Rect) -> Result<(), BadgeError> {
        Ok(())
    }

    fn close(self) -> Result<Vec<PageLog>, BadgeError> {
        Ok(self.pages)
    }
}

fn two_by_three() -> PageGeometry {
    PageGeometry::with_grid(595, 842, 255, 153, 2, 3).unwrap()
}

fn records(count: usize) -> Vec<BadgeRecord> {
    (0..count)
        .map(|i| BadgeRecord::new(format!("Badge {i}"), "Org", Role::Plain))
        .collect()
}

fn run(
    geometry: PageGeometry,
    timing: MarkerTiming,
    records: &[BadgeRecord],
) -> (Vec<CardPlacement>, Vec<PageLog>) {
    let options = SheetOptions {
        marker_timing: timing,
        ..SheetOptions::default()
    };
    let mut builder = BadgeSheetBuilder::new(RecordingSurface::new(), geometry, options).unwrap();
    let placements = records
        .iter()
        .map(|record| builder.add_badge(record).unwrap())
        .collect();
    (placements, builder.finish().unwrap())
}

#[test]
fn five_badges_fit_on_one_page() {
    let geometry = two_by_three();
    let (placements, pages) = run(geometry, MarkerTiming::BeforeBreak, &records(5));

    assert_eq!(pages.len(), 1);
    let layout = GridLayout::new(geometry);
    for (i, placement) in placements.iter().enumerate() {
        assert_eq!(*placement, layout.placement_at(i));
        assert_eq!(placement.page, 0);
    }
}

#[test]
fn seventh_badge_starts_the_second_page() {
    let (placements, pages) = run(two_by_three(), MarkerTiming::BeforeBreak, &records(7));

    assert_eq!(pages.len(), 2);
    let last = placements[6];
    assert_eq!((last.page, last.column, last.row), (1, 0, 0));
    assert!(pages[1].texts.contains(&"Badge 6".to_string()));
    assert!(!pages[0].texts.contains(&"Badge 6".to_string()));
}

#[test]
fn every_page_gets_one_set_of_guides() {
    let geometry = two_by_three();
    // 3 vertical + 4 horizontal
    let per_page = (geometry.columns + 1 + geometry.rows + 1) as usize;

    for timing in [MarkerTiming::BeforeBreak, MarkerTiming::AfterBreak] {
        for count in [0, 1, 6, 7, 12, 13] {
            let (_, pages) = run(geometry, timing, &records(count));
            assert_eq!(pages.len(), geometry.page_count(count), "{timing:?} {count}");
            for page in &pages {
                assert_eq!(page.lines.len(), per_page, "{timing:?} {count}");
            }
        }
    }
}

#[test]
fn no_cards_overlap_on_a_page() {
    let geometry = PageGeometry::new(595, 842, 255, 153).unwrap();
    let (placements, _) = run(geometry, MarkerTiming::BeforeBreak, &records(25));

    for (i, a) in placements.iter().enumerate() {
        for b in placements.iter().skip(i + 1) {
            if a.page == b.page {
                assert!(!a.rect(&geometry).intersects(&b.rect(&geometry)));
            }
        }
    }
}

#[test]
fn speaker_names_use_the_speaker_style() {
    let options = SheetOptions::default();
    let speaker = options.styles.select_font(Role::Speaker);
    let keynote = BadgeRecord::new("Someone", "", Role::parse("keynote"));
    assert_eq!(keynote.role(), Role::Plain);
    assert_ne!(options.styles.select_font(keynote.role()), speaker);
}
