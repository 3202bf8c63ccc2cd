use crate::{
    refs::{ObjectReferences, RefType},
    standard_font::StandardFont,
    BadgeError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;
use std::path::Path;

enum Source {
    /// Embedded whole; text is encoded as glyph ids (Identity-H)
    Embedded(OwnedFace),
    /// Referenced by name only; text is encoded as WinAnsi bytes
    Standard(StandardFont),
}

/// A font that text can be set in: either a TrueType / OpenType file, which is
/// embedded in the PDF (so a large font makes for a large sheet), or one of the
/// standard Helvetica faces every viewer provides.
pub struct Font {
    source: Source,
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, BadgeError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            source: Source::Embedded(face),
        })
    }

    /// Read and parse a font file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font, BadgeError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {}", path.as_ref().display());
        Font::load(bytes)
    }

    pub fn standard(font: StandardFont) -> Font {
        Font {
            source: Source::Standard(font),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.source, Source::Embedded(_))
    }

    fn face(&self) -> Option<&Face<'_>> {
        match &self.source {
            Source::Embedded(face) => Some(face.as_face_ref()),
            Source::Standard(_) => None,
        }
    }

    fn lookup_name(&self, name_id: u16) -> Option<String> {
        self.face()?
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it carries one
    pub fn name(&self) -> String {
        match &self.source {
            Source::Standard(font) => font.base_font().to_string(),
            Source::Embedded(_) => self
                .lookup_name(owned_ttf_parser::name_id::FULL_NAME)
                .unwrap_or_else(|| "BadgeFont".to_string()),
        }
    }

    pub fn family(&self) -> String {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn units_per_em(&self) -> u16 {
        match &self.source {
            Source::Embedded(face) => face.as_face_ref().units_per_em(),
            Source::Standard(_) => StandardFont::UNITS_PER_EM,
        }
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at `size`
    pub fn ascent(&self, size: Pt) -> Pt {
        let units = match self.face() {
            Some(face) => face.ascender(),
            None => StandardFont::ASCENT,
        };
        self.scaling(size) * units as f32
    }

    /// Distance from the baseline to the bottom of the font at `size`; negative
    pub fn descent(&self, size: Pt) -> Pt {
        let units = match self.face() {
            Some(face) => face.descender(),
            None => StandardFont::DESCENT,
        };
        self.scaling(size) * units as f32
    }

    /// Extra space between one line's descent and the next line's ascent
    pub fn line_gap(&self, size: Pt) -> Pt {
        let units = match self.face() {
            Some(face) => face.line_gap(),
            None => StandardFont::LINE_GAP,
        };
        self.scaling(size) * units as f32
    }

    /// Width of a string set at `size`. With an embedded font, characters it has
    /// no glyph for take no room.
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        match &self.source {
            Source::Embedded(face) => {
                let face = face.as_face_ref();
                text.chars()
                    .filter_map(|ch| face.glyph_index(ch))
                    .map(|gid| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
                    .sum()
            }
            Source::Standard(font) => text
                .chars()
                .map(|ch| scaling * font.advance(ch) as f32)
                .sum(),
        }
    }

    /// The glyph to print for `ch` from an embedded face: its own glyph, else the
    /// replacement character, else `?`, else `.notdef`
    fn glyph_or_fallback(face: &Face<'_>, ch: char) -> u16 {
        [ch, '\u{FFFD}', '?']
            .into_iter()
            .find_map(|c| face.glyph_index(c))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// The bytes of a PDF string that prints `text` in this font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.source {
            Source::Embedded(face) => {
                let face = face.as_face_ref();
                text.chars()
                    .flat_map(|ch| Self::glyph_or_fallback(face, ch).to_be_bytes())
                    .collect()
            }
            Source::Standard(_) => text
                .chars()
                .map(|ch| StandardFont::encode(ch).unwrap_or(b'?'))
                .collect(),
        }
    }

    fn glyph_ids(face: &Face<'_>) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let Some(cmap) = face.tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// glyph id => (advance, height) in font units
    fn glyph_metrics(face: &Face<'_>, ids: &HashMap<u16, char>) -> HashMap<u16, (u16, i16)> {
        ids.keys()
            .filter_map(|&id| {
                let gid = GlyphId(id);
                let advance = face.glyph_hor_advance(gid)?;
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((id, (advance, height)))
            })
            .collect()
    }

    fn write_cid(
        &self,
        face: &Face<'_>,
        data: &[u8],
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &HashMap<u16, (u16, i16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(face, data, refs, font_index, metrics, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut id_widths: Vec<(u16, f32)> = metrics
            .iter()
            .map(|(&cid, &(advance, _))| (cid, advance as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        // group consecutive glyph ids into runs
        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (cid, width) in id_widths {
            match run.as_mut() {
                Some((start, run_widths)) if *start as usize + run_widths.len() == cid as usize => {
                    run_widths.push(width);
                }
                _ => {
                    if let Some((start, run_widths)) = run.take() {
                        widths.consecutive(start, run_widths);
                    }
                    run = Some((cid, vec![width]));
                }
            }
        }
        if let Some((start, run_widths)) = run {
            widths.consecutive(start, run_widths);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        face: &Face<'_>,
        data: &[u8],
        refs: &mut ObjectReferences,
        font_index: usize,
        metrics: &HashMap<u16, (u16, i16)>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(font_data_id, data)
            .pair(Name(b"Length1"), data.len() as i32);

        let scaling = 1000.0 / face.units_per_em() as f32;
        let max_width = metrics.values().map(|&(w, _)| w).max().unwrap_or_default() as f32;
        let max_height = metrics.values().map(|&(_, h)| h).max().unwrap_or_default() as f32;
        let avg_width = if metrics.is_empty() {
            0.0
        } else {
            metrics.values().map(|&(w, _)| w as f32).sum::<f32>() / metrics.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.name().as_bytes()));
        descriptor.family(Str(self.family().as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: face.descender() as f32 * scaling,
            x2: max_width * scaling,
            y2: max_height * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(700.0),
        );
        // not recorded in TrueType files; a typical regular-weight value
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width * scaling);
        descriptor.font_file2(font_data_id);

        id
    }

    fn write_to_unicode(
        refs: &mut ObjectReferences,
        font_index: usize,
        ids: &HashMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = ids.iter().map(|(&id, &ch)| (id, ch)).collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries
        for block in ids.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(id, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{id:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(id, compressed.as_slice()).filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        let (face, data) = match &self.source {
            Source::Embedded(owned) => (owned.as_face_ref(), owned.as_slice()),
            Source::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                return;
            }
        };

        let ids = Self::glyph_ids(face);
        let metrics = Self::glyph_metrics(face, &ids);
        let cid_font_id = self.write_cid(face, data, refs, font_index, &metrics, writer);
        let to_unicode_id = Self::write_to_unicode(refs, font_index, &ids, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fonts_measure_with_afm_widths() {
        let font = Font::standard(StandardFont::HelveticaBold);
        assert!(!font.is_embedded());
        assert_eq!(font.name(), "Helvetica-Bold");
        assert_eq!(font.family(), "Helvetica-Bold");
        // at 1000pt one font unit is one point: S 667 + i 278 + t 333
        assert_eq!(font.width_of("Sit", Pt(1000.0)), Pt(1278.0));
        assert_eq!(font.ascent(Pt(1000.0)), Pt(718.0));
        assert_eq!(font.descent(Pt(1000.0)), Pt(-207.0));
    }

    #[test]
    fn standard_fonts_encode_win_ansi() {
        let font = Font::standard(StandardFont::Helvetica);
        assert_eq!(font.encode("Zoë €5"), vec![b'Z', b'o', 0xEB, b' ', 0x80, b'5']);
        assert_eq!(font.encode("日本"), b"??".to_vec());
    }

    #[test]
    fn standard_fonts_are_referenced_not_embedded() {
        let mut arena: id_arena::Arena<Font> = id_arena::Arena::new();
        let id = arena.alloc(Font::standard(StandardFont::HelveticaOblique));
        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        arena[id].write(&mut refs, id, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica-Oblique"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(!text.contains("/FontFile2"));
    }
}
