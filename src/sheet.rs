//! Drives a [Surface] through a whole batch of badges.

use crate::badge::{BadgeRecord, SESSION_SLOTS};
use crate::colour::Rgb;
use crate::geometry::PageGeometry;
use crate::grid::{CardPlacement, GridLayout};
use crate::layout::{HAlign, Padding, VAlign};
use crate::markers::{MarkerTiming, PageMarkers};
use crate::rect::Rect;
use crate::style::StyleSheet;
use crate::surface::{ImageRef, Surface, TextCell, TextRun};
use crate::units::Pt;
use crate::BadgeError;

/// The make-up of a single card, top to bottom: name, organisation, banner, and
/// a row of session cells along the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTemplate {
    pub name_height: Pt,
    pub organisation_height: Pt,
    pub organisation_padding: Pt,
    pub banner_height: Pt,
    pub banner_padding: Pt,
    pub session_height: Pt,
    /// Number of session cells; at most [SESSION_SLOTS]
    pub session_cells: usize,
    pub session_fill: Rgb,
    pub banner_lead: String,
    pub banner_tail: String,
    /// Drawn behind the banner text
    pub banner_image: Option<ImageRef>,
    /// Height of the banner image's bottom edge above the card's bottom edge
    pub image_offset: Pt,
}

impl Default for CardTemplate {
    fn default() -> Self {
        CardTemplate {
            name_height: Pt(51.0),
            organisation_height: Pt(26.0),
            organisation_padding: Pt(10.0),
            banner_height: Pt(51.0),
            banner_padding: Pt(15.0),
            session_height: Pt(25.0),
            session_cells: SESSION_SLOTS,
            session_fill: Rgb::new(230, 230, 230),
            banner_lead: "RDW".to_string(),
            banner_tail: "Techday".to_string(),
            banner_image: None,
            image_offset: Pt(25.0),
        }
    }
}

/// How cards look and when cut guides are drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOptions {
    pub template: CardTemplate,
    pub styles: StyleSheet,
    pub marker_stroke: f32,
    pub marker_timing: MarkerTiming,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            template: CardTemplate::default(),
            styles: StyleSheet::default(),
            marker_stroke: 0.2,
            marker_timing: MarkerTiming::default(),
        }
    }
}

/// Lays badges out on the grid and draws them, page by page.
///
/// Every page of the output gets exactly one set of cut guides. With
/// [MarkerTiming::BeforeBreak] they are drawn when a page fills up (or when the
/// batch ends); with [MarkerTiming::AfterBreak] as soon as a page is started. A
/// new page is only started once there is a badge to put on it, so a batch that
/// exactly fills its last page doesn't end in a blank sheet.
pub struct BadgeSheetBuilder<S: Surface> {
    surface: S,
    layout: GridLayout,
    markers: PageMarkers,
    options: SheetOptions,
    page_pending: bool,
    page_marked: bool,
    badges: usize,
    pages: usize,
}

impl<S: Surface> BadgeSheetBuilder<S> {
    /// Start building on `surface`, which must be showing a fresh first page
    pub fn new(
        surface: S,
        geometry: PageGeometry,
        options: SheetOptions,
    ) -> Result<BadgeSheetBuilder<S>, BadgeError> {
        if options.template.session_cells > SESSION_SLOTS {
            return Err(BadgeError::Geometry(format!(
                "a card has room for at most {SESSION_SLOTS} session cells, {} requested",
                options.template.session_cells
            )));
        }

        let mut builder = BadgeSheetBuilder {
            surface,
            layout: GridLayout::new(geometry),
            markers: PageMarkers::new(geometry),
            options,
            page_pending: false,
            page_marked: false,
            badges: 0,
            pages: 1,
        };
        if builder.options.marker_timing == MarkerTiming::AfterBreak {
            builder.draw_markers()?;
        }
        Ok(builder)
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.layout.geometry()
    }

    /// Badges placed so far
    pub fn badge_count(&self) -> usize {
        self.badges
    }

    /// Pages started so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Place and draw the next badge
    pub fn add_badge(&mut self, record: &BadgeRecord) -> Result<CardPlacement, BadgeError> {
        if self.page_pending {
            self.start_page()?;
        }

        let placement = self.layout.next_placement();
        self.draw_card(&placement, record)?;
        self.badges += 1;

        if self.layout.is_page_boundary() {
            log::info!("sheet {} is full", placement.page + 1);
            if self.options.marker_timing == MarkerTiming::BeforeBreak {
                self.draw_markers()?;
            }
            self.page_pending = true;
        }

        Ok(placement)
    }

    pub fn add_all<'a, I>(&mut self, records: I) -> Result<(), BadgeError>
    where
        I: IntoIterator<Item = &'a BadgeRecord>,
    {
        for record in records {
            self.add_badge(record)?;
        }
        Ok(())
    }

    /// Draw the last page's guides if it still needs them and close the surface
    pub fn finish(mut self) -> Result<S::Output, BadgeError> {
        if !self.page_marked {
            self.draw_markers()?;
        }
        log::info!(
            "laid out {} badges on {} sheets",
            self.badges,
            self.pages
        );
        self.surface.close()
    }

    fn start_page(&mut self) -> Result<(), BadgeError> {
        self.surface.new_page()?;
        self.pages += 1;
        self.page_pending = false;
        self.page_marked = false;
        if self.options.marker_timing == MarkerTiming::AfterBreak {
            self.draw_markers()?;
        }
        Ok(())
    }

    fn draw_markers(&mut self) -> Result<(), BadgeError> {
        for line in self.markers.lines() {
            self.surface.draw_line(line, self.options.marker_stroke)?;
        }
        self.page_marked = true;
        Ok(())
    }

    fn draw_card(
        &mut self,
        placement: &CardPlacement,
        record: &BadgeRecord,
    ) -> Result<(), BadgeError> {
        let card = placement.rect(self.layout.geometry());
        let template = &self.options.template;
        let styles = &self.options.styles;

        // rows hang down from the top edge
        let name_row = Rect {
            x1: card.x1,
            y1: card.y2 - template.name_height,
            x2: card.x2,
            y2: card.y2,
        };
        let organisation_row = Rect {
            y1: name_row.y1 - template.organisation_height,
            y2: name_row.y1,
            ..name_row
        };
        let banner_row = Rect {
            y1: organisation_row.y1 - template.banner_height,
            y2: organisation_row.y1,
            ..name_row
        };

        if let Some(image) = template.banner_image {
            let image_rect =
                Rect::from_origin(card.x1, card.y1 + template.image_offset, card.width(), template.banner_height);
            self.surface.place_image(image, image_rect)?;
        }

        let mut cells = vec![
            TextCell {
                runs: vec![TextRun::new(record.name(), styles.select_font(record.role()))],
                rect: name_row,
                h_align: HAlign::Centre,
                v_align: VAlign::Middle,
                padding: Padding::empty(),
            },
            TextCell {
                runs: vec![TextRun::new(record.organisation(), styles.organisation)],
                rect: organisation_row,
                h_align: HAlign::Centre,
                v_align: VAlign::Top,
                padding: Padding::bottom(template.organisation_padding),
            },
        ];
        if !template.banner_lead.is_empty() || !template.banner_tail.is_empty() {
            cells.push(TextCell {
                runs: vec![
                    TextRun::new(&template.banner_lead, styles.banner_lead),
                    TextRun::new(format!(" {}", template.banner_tail), styles.banner_tail),
                ],
                rect: banner_row,
                h_align: HAlign::Centre,
                v_align: VAlign::Middle,
                padding: Padding::bottom(template.banner_padding),
            });
        }

        if template.session_cells > 0 {
            let cell_width = card.width() / template.session_cells as f32;
            let side = cell_width.min(template.session_height) * 0.8;
            for slot in 0..template.session_cells {
                let cell_x = card.x1 + cell_width * slot as f32;
                let square = Rect::from_origin(
                    cell_x + (cell_width - side) * 0.5,
                    card.y1 + (template.session_height - side) * 0.5,
                    side,
                    side,
                );
                self.surface.fill_rect(square, template.session_fill)?;
                if let Some(code) = record.session(slot) {
                    cells.push(TextCell {
                        runs: vec![TextRun::new(code, styles.session)],
                        rect: square,
                        h_align: HAlign::Centre,
                        v_align: VAlign::Middle,
                        padding: Padding::empty(),
                    });
                }
            }
        }

        for cell in cells.iter() {
            self.surface.place_text(cell)?;
        }
        Ok(())
    }
}
