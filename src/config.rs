//! Sheet configuration, read from a TOML file.
//!
//! Every table and key is optional; an empty file describes the stock A4 sheet
//! of ten 255 x 153 pt cards. Relative paths are resolved against the directory
//! the configuration file lives in.

use crate::colour::{parse_hex_colour, Rgb};
use crate::font::Font;
use crate::geometry::PageGeometry;
use crate::markers::MarkerTiming;
use crate::pagesize;
use crate::pdf_surface::FontSet;
use crate::sheet::{CardTemplate, SheetOptions};
use crate::style::{FontSpec, FontWeight, Role, StyleSheet};
use crate::surface::ImageRef;
use crate::units::Pt;
use crate::BadgeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub page: PageConfig,
    pub markers: MarkerConfig,
    pub fonts: FontConfig,
    pub card: CardConfig,
    pub banner: BannerConfig,
    pub styles: StylesConfig,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub size: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub card_width: u32,
    pub card_height: u32,
    pub columns: Option<u32>,
    pub rows: Option<u32>,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            size: None,
            width: None,
            height: None,
            card_width: 255,
            card_height: 153,
            columns: None,
            rows: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    pub stroke_width: f32,
    pub timing: MarkerTiming,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            stroke_width: 0.2,
            timing: MarkerTiming::default(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    pub name_height: f32,
    pub organisation_height: f32,
    pub banner_height: f32,
    pub session_height: f32,
    pub session_cells: usize,
    pub session_fill: Option<String>,
    pub banner_image: Option<PathBuf>,
    /// Defaults to `session_height`, which puts the image directly above the
    /// session row
    pub image_offset: Option<f32>,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            name_height: 51.0,
            organisation_height: 26.0,
            banner_height: 51.0,
            session_height: 25.0,
            session_cells: crate::badge::SESSION_SLOTS,
            session_fill: None,
            banner_image: None,
            image_offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub lead: String,
    pub tail: String,
    pub lead_colour: Option<String>,
    pub tail_colour: Option<String>,
    pub size: Option<f32>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        BannerConfig {
            lead: "RDW".to_string(),
            tail: "Techday".to_string(),
            lead_colour: None,
            tail_colour: None,
            size: None,
        }
    }
}

/// Overrides for one text style; anything left out keeps the built-in value
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub colour: Option<String>,
    pub size: Option<f32>,
    pub weight: Option<FontWeight>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesConfig {
    pub plain: StyleConfig,
    #[serde(alias = "organiser")]
    pub organizer: StyleConfig,
    pub speaker: StyleConfig,
    #[serde(alias = "organization")]
    pub organisation: StyleConfig,
    pub session: StyleConfig,
}

/// A configured colour, or `fallback` with a warning when it can't be used
fn colour_or(text: Option<&str>, fallback: Rgb, what: &str) -> Rgb {
    match parse_hex_colour(text) {
        Ok(Some(colour)) => colour,
        Ok(None) => {
            if let Some(text) = text {
                log::warn!("{what} colour {text:?} is not #RGB or #RRGGBB, using the default");
            }
            fallback
        }
        Err(err) => {
            log::warn!("{what}: {err}, using the default");
            fallback
        }
    }
}

impl StyleConfig {
    fn apply(&self, base: FontSpec, what: &str) -> FontSpec {
        FontSpec {
            weight: self.weight.unwrap_or(base.weight),
            size: self.size.map(Pt).unwrap_or(base.size),
            colour: colour_or(self.colour.as_deref(), base.colour, what),
        }
    }
}

impl SheetConfig {
    /// Read a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SheetConfig, BadgeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&text)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        log::info!("loaded sheet configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text. Relative paths stay relative to the working
    /// directory.
    pub fn parse(text: &str) -> Result<SheetConfig, BadgeError> {
        Ok(toml::from_str(text)?)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The page size in whole points: explicit `width`/`height` win over a named
    /// `size`, which defaults to A4
    pub fn page_dimensions(&self) -> Result<(u32, u32), BadgeError> {
        let name = self.page.size.as_deref().unwrap_or("A4");
        let named = match (self.page.width, self.page.height) {
            (Some(w), Some(h)) => return Ok((w, h)),
            _ => pagesize::by_name(name)
                .ok_or_else(|| BadgeError::Setting(format!("unknown page size {name:?}")))?,
        };
        Ok((
            self.page.width.unwrap_or(named.0.round_to_points()),
            self.page.height.unwrap_or(named.1.round_to_points()),
        ))
    }

    pub fn geometry(&self) -> Result<PageGeometry, BadgeError> {
        let (width, height) = self.page_dimensions()?;
        let page = &self.page;
        match (page.columns, page.rows) {
            (None, None) => PageGeometry::new(width, height, page.card_width, page.card_height),
            (columns, rows) => {
                if page.card_width == 0 || page.card_height == 0 {
                    // let the geometry report it
                    return PageGeometry::new(width, height, page.card_width, page.card_height);
                }
                PageGeometry::with_grid(
                    width,
                    height,
                    page.card_width,
                    page.card_height,
                    columns.unwrap_or(width / page.card_width),
                    rows.unwrap_or(height / page.card_height),
                )
            }
        }
    }

    pub fn styles(&self) -> StyleSheet {
        let mut styles = StyleSheet::default();
        let by_role = [
            (Role::Plain, &self.styles.plain, "plain name"),
            (Role::Organizer, &self.styles.organizer, "organizer name"),
            (Role::Speaker, &self.styles.speaker, "speaker name"),
        ];
        for (role, config, what) in by_role {
            let spec = config.apply(styles.select_font(role), what);
            styles.set_name_font(role, spec);
        }
        styles.organisation = self.styles.organisation.apply(styles.organisation, "organisation");
        styles.session = self.styles.session.apply(styles.session, "session");

        let banner = &self.banner;
        styles.banner_lead.colour =
            colour_or(banner.lead_colour.as_deref(), styles.banner_lead.colour, "banner lead");
        styles.banner_tail.colour =
            colour_or(banner.tail_colour.as_deref(), styles.banner_tail.colour, "banner tail");
        if let Some(size) = banner.size {
            styles.banner_lead.size = Pt(size);
            styles.banner_tail.size = Pt(size);
        }
        styles
    }

    /// The card layout, with `banner_image` already registered with the surface
    pub fn template(&self, banner_image: Option<ImageRef>) -> CardTemplate {
        let card = &self.card;
        let defaults = CardTemplate::default();
        CardTemplate {
            name_height: Pt(card.name_height),
            organisation_height: Pt(card.organisation_height),
            banner_height: Pt(card.banner_height),
            session_height: Pt(card.session_height),
            session_cells: card.session_cells,
            session_fill: colour_or(card.session_fill.as_deref(), defaults.session_fill, "session cell"),
            banner_lead: self.banner.lead.clone(),
            banner_tail: self.banner.tail.clone(),
            banner_image,
            image_offset: Pt(card.image_offset.unwrap_or(card.session_height)),
            ..defaults
        }
    }

    pub fn options(&self, banner_image: Option<ImageRef>) -> SheetOptions {
        SheetOptions {
            template: self.template(banner_image),
            styles: self.styles(),
            marker_stroke: self.markers.stroke_width,
            marker_timing: self.markers.timing,
        }
    }

    /// Where the banner image is, if the cards have one
    pub fn banner_image_path(&self) -> Option<PathBuf> {
        self.card.banner_image.as_deref().map(|p| self.resolve(p))
    }

    /// Load the configured font faces. Without a regular face the cards are set
    /// in the standard Helvetica family; a configured bold or italic face still
    /// replaces its Helvetica counterpart.
    pub fn load_fonts(&self) -> Result<FontSet, BadgeError> {
        let load = |path: &Option<PathBuf>| -> Result<Option<Font>, BadgeError> {
            path.as_deref()
                .map(|p| Font::from_file(self.resolve(p)))
                .transpose()
        };
        let bold = load(&self.fonts.bold)?;
        let italic = load(&self.fonts.italic)?;

        match load(&self.fonts.regular)? {
            Some(regular) => Ok(FontSet {
                regular,
                bold,
                italic,
            }),
            None => {
                log::info!("no regular font configured, using Helvetica");
                let standard = FontSet::standard();
                Ok(FontSet {
                    regular: standard.regular,
                    bold: bold.or(standard.bold),
                    italic: italic.or(standard.italic),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BLUE, ORANGE};
    use std::io::Write;

    #[test]
    fn empty_config_is_the_stock_a4_sheet() {
        let config = SheetConfig::parse("").unwrap();
        let geometry = config.geometry().unwrap();
        assert_eq!((geometry.page_width, geometry.page_height), (595, 842));
        assert_eq!((geometry.columns, geometry.rows), (2, 5));
        assert_eq!((geometry.x_margin, geometry.y_margin), (42, 38));
        assert_eq!(config.styles(), StyleSheet::default());
        assert_eq!(config.template(None), CardTemplate::default());
        assert_eq!(config.options(None), SheetOptions::default());
    }

    #[test]
    fn explicit_dimensions_and_grid() {
        let config = SheetConfig::parse(
            r#"
            [page]
            size = "letter"
            height = 800
            card_width = 200
            card_height = 100
            columns = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.page_dimensions().unwrap(), (612, 800));
        let geometry = config.geometry().unwrap();
        assert_eq!((geometry.columns, geometry.rows), (2, 8));
        assert_eq!(geometry.x_margin, 106);
    }

    #[test]
    fn bad_geometry_is_an_error() {
        let unknown = SheetConfig::parse("[page]\nsize = \"B7\"").unwrap();
        assert!(matches!(unknown.geometry(), Err(BadgeError::Setting(_))));

        let too_big = SheetConfig::parse("[page]\ncard_width = 600").unwrap();
        assert!(matches!(too_big.geometry(), Err(BadgeError::Geometry(_))));

        let no_fit = SheetConfig::parse("[page]\ncolumns = 3").unwrap();
        assert!(matches!(no_fit.geometry(), Err(BadgeError::Geometry(_))));

        let zero = SheetConfig::parse("[page]\ncard_height = 0\nrows = 2").unwrap();
        assert!(matches!(zero.geometry(), Err(BadgeError::Geometry(_))));
    }

    #[test]
    fn styles_and_banner_overrides() {
        let config = SheetConfig::parse(
            r##"
            [banner]
            lead = "ACME"
            tail = "Summit"
            lead_colour = "#00f"
            size = 30

            [styles.plain]
            colour = "#0070C0"
            size = 20

            [styles.organiser]
            weight = "italic"

            [markers]
            timing = "after-break"
            stroke_width = 0.5
            "##,
        )
        .unwrap();
        let styles = config.styles();
        let plain = styles.select_font(Role::Plain);
        assert_eq!(plain.colour, BLUE);
        assert_eq!(plain.size, Pt(20.0));
        assert_eq!(plain.weight, FontWeight::Bold);
        let organizer = styles.select_font(Role::Organizer);
        assert_eq!(organizer.weight, FontWeight::Italic);
        assert_eq!(organizer.colour, ORANGE);
        assert_eq!(styles.banner_lead.colour, Rgb::new(0, 0, 255));
        assert_eq!(styles.banner_tail.size, Pt(30.0));

        let options = config.options(Some(ImageRef(0)));
        assert_eq!(options.marker_timing, MarkerTiming::AfterBreak);
        assert_eq!(options.marker_stroke, 0.5);
        assert_eq!(options.template.banner_lead, "ACME");
        assert_eq!(options.template.banner_image, Some(ImageRef(0)));
    }

    #[test]
    fn malformed_colours_fall_back() {
        let config = SheetConfig::parse(
            r##"
            [styles.speaker]
            colour = "blue"
            [styles.plain]
            colour = "#GGG"
            [card]
            session_fill = "#12"
            "##,
        )
        .unwrap();
        let styles = config.styles();
        let defaults = StyleSheet::default();
        assert_eq!(styles, defaults);
        assert_eq!(config.template(None).session_fill, CardTemplate::default().session_fill);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            SheetConfig::parse("[page]\ncard_widht = 200"),
            Err(BadgeError::Config(_))
        ));
    }

    #[test]
    fn paths_resolve_against_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[card]\nbanner_image = \"art/banner.jpg\"").unwrap();
        writeln!(file, "[fonts]\nregular = \"missing.ttf\"").unwrap();
        drop(file);

        let config = SheetConfig::load(&path).unwrap();
        assert_eq!(
            config.banner_image_path(),
            Some(dir.path().join("art/banner.jpg"))
        );
        assert!(matches!(config.load_fonts(), Err(BadgeError::Io(_))));
    }

    #[test]
    fn fonts_default_to_helvetica() {
        let fonts = SheetConfig::default().load_fonts().unwrap();
        assert_eq!(fonts.regular.name(), "Helvetica");
        assert_eq!(fonts.bold.map(|f| f.name()).as_deref(), Some("Helvetica-Bold"));
        assert_eq!(
            fonts.italic.map(|f| f.name()).as_deref(),
            Some("Helvetica-Oblique")
        );
    }
}
