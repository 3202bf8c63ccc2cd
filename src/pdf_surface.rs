use crate::colour::{Colour, Rgb};
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::layout_cell;
use crate::markers::Segment;
use crate::page::{ImageLayout, Page, SpanFont};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::style::FontWeight;
use crate::surface::{ImageRef, Surface, TextCell};
use crate::standard_font::StandardFont;
use crate::BadgeError;
use id_arena::Id;
use pdf_writer::Content;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The faces of the font family badges are set in. Bold and italic fall back to
/// the regular face when not given.
pub struct FontSet {
    pub regular: Font,
    pub bold: Option<Font>,
    pub italic: Option<Font>,
}

impl FontSet {
    /// Helvetica, Helvetica-Bold and Helvetica-Oblique, which need no font files
    pub fn standard() -> FontSet {
        FontSet {
            regular: Font::standard(StandardFont::Helvetica),
            bold: Some(Font::standard(StandardFont::HelveticaBold)),
            italic: Some(Font::standard(StandardFont::HelveticaOblique)),
        }
    }
}

impl Default for FontSet {
    fn default() -> Self {
        FontSet::standard()
    }
}

struct FaceIds {
    regular: Id<Font>,
    bold: Id<Font>,
    italic: Id<Font>,
}

impl FaceIds {
    fn get(&self, weight: FontWeight) -> Id<Font> {
        match weight {
            FontWeight::Regular => self.regular,
            FontWeight::Bold => self.bold,
            FontWeight::Italic => self.italic,
        }
    }
}

/// A [Surface] that draws into a PDF file.
///
/// A temporary file is created next to the destination as soon as the surface
/// is, so an unwritable directory is reported before any badge is laid out. The
/// PDF itself is assembled in memory and written on [Surface::close], then the
/// temporary file is renamed over the destination. If the surface is dropped
/// without closing (or closing fails) the temporary file is removed and whatever
/// was at the destination before is left alone.
pub struct PdfSurface {
    document: Document,
    faces: FaceIds,
    images: Vec<Id<Image>>,
    page_size: PageSize,
    current: Id<Page>,
    path: PathBuf,
    file: Option<NamedTempFile>,
}

impl PdfSurface {
    pub fn create<P: AsRef<Path>>(
        path: P,
        page_size: PageSize,
        fonts: FontSet,
    ) -> Result<PdfSurface, BadgeError> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file = tempfile::Builder::new()
            .prefix(".badge-sheet-")
            .suffix(".pdf.partial")
            .tempfile_in(dir)?;

        let mut document = Document::default();
        let regular = document.add_font(fonts.regular);
        let bold = fonts.bold.map(|f| document.add_font(f)).unwrap_or(regular);
        let italic = fonts.italic.map(|f| document.add_font(f)).unwrap_or(regular);
        let current = document.add_page(Page::new(page_size, None));

        log::info!("writing badge sheets to {}", path.display());
        Ok(PdfSurface {
            document,
            faces: FaceIds {
                regular,
                bold,
                italic,
            },
            images: Vec::new(),
            page_size,
            current,
            path,
            file: Some(file),
        })
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Register an image so it can be placed on any page
    pub fn add_image(&mut self, image: Image) -> ImageRef {
        let id = self.document.add_image(image);
        self.images.push(id);
        ImageRef(self.images.len() - 1)
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    fn page(&mut self) -> &mut Page {
        &mut self.document.pages[self.current]
    }
}

impl Surface for PdfSurface {
    type Output = PathBuf;

    fn new_page(&mut self) -> Result<(), BadgeError> {
        self.current = self.document.add_page(Page::new(self.page_size, None));
        log::info!("started sheet {}", self.document.page_count());
        Ok(())
    }

    fn draw_line(&mut self, line: Segment, stroke_width: f32) -> Result<(), BadgeError> {
        let mut content = Content::new();
        content.set_line_width(stroke_width);
        content.move_to(line.x1.into(), line.y1.into());
        content.line_to(line.x2.into(), line.y2.into());
        content.stroke();
        self.page().add_content(content);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, colour: Rgb) -> Result<(), BadgeError> {
        let mut content = Content::new();
        if let Colour::RGB { r, g, b } = Colour::from(colour) {
            content.set_fill_rgb(r, g, b);
        }
        content.rect(
            rect.x1.into(),
            rect.y1.into(),
            rect.width().into(),
            rect.height().into(),
        );
        content.fill_nonzero();
        self.page().add_content(content);
        Ok(())
    }

    fn place_text(&mut self, cell: &TextCell) -> Result<(), BadgeError> {
        let runs: Vec<(String, Colour, SpanFont)> = cell
            .runs
            .iter()
            .map(|run| {
                (
                    run.text.clone(),
                    Colour::from(run.font.colour),
                    SpanFont {
                        id: self.faces.get(run.font.weight),
                        size: run.font.size,
                    },
                )
            })
            .collect();

        let page = &mut self.document.pages[self.current];
        layout_cell(
            &self.document.fonts,
            page,
            &runs,
            cell.rect,
            &cell.padding,
            cell.h_align,
            cell.v_align,
        );
        Ok(())
    }

    fn place_image(&mut self, image: ImageRef, rect: Rect) -> Result<(), BadgeError> {
        let image_id = *self.images.get(image.0).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("image {} was never registered", image.0),
            )
        })?;
        self.page().add_image(ImageLayout {
            image_id,
            position: rect,
        });
        Ok(())
    }

    fn close(mut self) -> Result<PathBuf, BadgeError> {
        let document = std::mem::take(&mut self.document);
        let pages = document.page_count();
        let mut file = self
            .file
            .take()
            .ok_or_else(|| std::io::Error::other("badge sheet already closed"))?;
        document.write(BufWriter::new(file.as_file_mut()))?;
        file.as_file_mut().sync_all()?;

        // a failed persist hands the temporary file back, and dropping it removes it
        file.persist(&self.path).map_err(|err| err.error)?;
        log::info!("wrote {} sheets to {}", pages, self.path.display());
        Ok(self.path.clone())
    }
}

impl Drop for PdfSurface {
    fn drop(&mut self) {
        // dropping the temporary file deletes it
        if self.file.take().is_some() {
            log::warn!("discarding unfinished {}", self.path.display());
        }
    }
}
