use crate::colour::Rgb;
use crate::units::Pt;
use serde::Deserialize;

/// What a badge holder is at the event. Role names are matched loosely: anything
/// that isn't `organizer` or `speaker` is a plain attendee.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    #[default]
    Plain,
    Organizer,
    Speaker,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Plain, Role::Organizer, Role::Speaker];

    pub fn parse(text: &str) -> Role {
        match text.trim().to_ascii_lowercase().as_str() {
            "organizer" | "organiser" => Role::Organizer,
            "speaker" => Role::Speaker,
            _ => Role::Plain,
        }
    }
}

impl From<String> for Role {
    fn from(text: String) -> Self {
        Role::parse(&text)
    }
}

impl From<&str> for Role {
    fn from(text: &str) -> Self {
        Role::parse(text)
    }
}

/// Which face of the configured font family to set text in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// Everything needed to set a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size: Pt,
    pub colour: Rgb,
}

impl FontSpec {
    pub const fn new(weight: FontWeight, size: f32, colour: Rgb) -> FontSpec {
        FontSpec {
            weight,
            size: Pt(size),
            colour,
        }
    }
}

pub const PURPLE: Rgb = Rgb::new(112, 48, 160);
pub const ORANGE: Rgb = Rgb::new(220, 66, 0);
pub const BLUE: Rgb = Rgb::new(0, 112, 192);
pub const GREY: Rgb = Rgb::new(200, 200, 200);
pub const INK: Rgb = Rgb::new(0, 0, 0);

/// The name style for each role, plus the styles shared by every card
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    names: [FontSpec; 3],
    pub organisation: FontSpec,
    pub banner_lead: FontSpec,
    pub banner_tail: FontSpec,
    pub session: FontSpec,
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet {
            names: [
                FontSpec::new(FontWeight::Bold, 24.0, PURPLE),
                FontSpec::new(FontWeight::Bold, 24.0, ORANGE),
                FontSpec::new(FontWeight::Bold, 24.0, BLUE),
            ],
            organisation: FontSpec::new(FontWeight::Italic, 14.0, INK),
            banner_lead: FontSpec::new(FontWeight::Regular, 35.0, ORANGE),
            banner_tail: FontSpec::new(FontWeight::Regular, 35.0, GREY),
            session: FontSpec::new(FontWeight::Regular, 8.0, INK),
        }
    }
}

impl StyleSheet {
    fn slot(role: Role) -> usize {
        match role {
            Role::Plain => 0,
            Role::Organizer => 1,
            Role::Speaker => 2,
        }
    }

    /// The font a badge holder's name is set in
    pub fn select_font(&self, role: Role) -> FontSpec {
        self.names[Self::slot(role)]
    }

    pub fn set_name_font(&mut self, role: Role, spec: FontSpec) {
        self.names[Self::slot(role)] = spec;
    }
}
