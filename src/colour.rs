use crate::BadgeError;

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

/// An 8-bit-per-channel RGB triple, the form badge colours are configured in
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for Colour {
    fn from(c: Rgb) -> Self {
        Colour::new_rgb_bytes(c.r, c.g, c.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(c: (u8, u8, u8)) -> Self {
        Rgb::new(c.0, c.1, c.2)
    }
}

/// Parse a `#RGB` or `#RRGGBB` colour string.
///
/// Anything that isn't shaped like one of those two forms (wrong length, no
/// leading `#`, or no string at all) is not an error: it just means "no colour"
/// and yields `Ok(None)`. A correctly shaped string with non-hex digits in it
/// yields [BadgeError::InvalidColourFormat].
///
/// Shorthand digits are duplicated rather than shifted, so `#70A` is
/// `(0x77, 0x00, 0xAA)`.
///
/// ```
/// use badge_sheet::{parse_hex_colour, Rgb};
///
/// assert_eq!(parse_hex_colour(Some("#70A")).unwrap(), Some(Rgb::new(119, 0, 170)));
/// assert_eq!(parse_hex_colour(Some("bad")).unwrap(), None);
/// ```
pub fn parse_hex_colour(text: Option<&str>) -> Result<Option<Rgb>, BadgeError> {
    let Some(text) = text else {
        return Ok(None);
    };
    let Some(digits) = text.strip_prefix('#') else {
        return Ok(None);
    };
    let width = match digits.chars().count() {
        3 => 1,
        6 => 2,
        _ => return Ok(None),
    };
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BadgeError::InvalidColourFormat(text.to_string()));
    }

    let mut raw = [0u8; 3];
    for (i, channel) in raw.iter_mut().enumerate() {
        let value = u8::from_str_radix(&digits[width * i..width * (i + 1)], 16)
            .map_err(|_| BadgeError::InvalidColourFormat(text.to_string()))?;
        *channel = if width == 1 { value * 16 + value } else { value };
    }

    Ok(Some(Rgb::new(raw[0], raw[1], raw[2])))
}
