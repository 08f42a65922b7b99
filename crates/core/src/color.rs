//! Color strings to RGB triples.
//!
//! Parsing arbitrary color syntax is a collaborator of the lighting core:
//! validation only depends on the [`ColorParser`] trait. The bundled
//! [`StandardColorParser`] accepts `RRGGBB`, `#RRGGBB`, the short `RGB` form
//! and a table of CSS color names.

use std::fmt;

/// A 24-bit color. Never carries alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in wire order.
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Turns a user-supplied string into a color.
pub trait ColorParser {
    /// Returns `None` if the string does not name a color.
    fn parse(&self, input: &str) -> Option<Rgb>;
}

/// Hex notation plus CSS named colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardColorParser;

impl ColorParser for StandardColorParser {
    fn parse(&self, input: &str) -> Option<Rgb> {
        let input = input.trim();
        parse_hex(input).or_else(|| named_color(input))
    }
}

fn parse_hex(input: &str) -> Option<Rgb> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    match digits.len() {
        6 => {
            let mut buf = [0u8; 3];
            hex::decode_to_slice(digits, &mut buf).ok()?;
            Some(Rgb::from(buf))
        }
        3 => {
            // #abc is shorthand for #aabbcc
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            let mut buf = [0u8; 3];
            hex::decode_to_slice(doubled, &mut buf).ok()?;
            Some(Rgb::from(buf))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgb> {
    let wanted: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == wanted)
        .map(|&(_, rgb)| Rgb::from(rgb))
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("red", [0xff, 0x00, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("teal", [0x00, 0x80, 0x80]),
    ("navy", [0x00, 0x00, 0x80]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("orangered", [0xff, 0x45, 0x00]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("hotpink", [0xff, 0x69, 0xb4]),
    ("deeppink", [0xff, 0x14, 0x93]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("tomato", [0xff, 0x63, 0x47]),
    ("salmon", [0xfa, 0x80, 0x72]),
    ("violet", [0xee, 0x82, 0xee]),
    ("indigo", [0x4b, 0x00, 0x82]),
    ("turquoise", [0x40, 0xe0, 0xd0]),
    ("skyblue", [0x87, 0xce, 0xeb]),
    ("deepskyblue", [0x00, 0xbf, 0xff]),
    ("dodgerblue", [0x1e, 0x90, 0xff]),
    ("royalblue", [0x41, 0x69, 0xe1]),
    ("springgreen", [0x00, 0xff, 0x7f]),
    ("chartreuse", [0x7f, 0xff, 0x00]),
    ("limegreen", [0x32, 0xcd, 0x32]),
    ("forestgreen", [0x22, 0x8b, 0x22]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("chocolate", [0xd2, 0x69, 0x1e]),
    ("beige", [0xf5, 0xf5, 0xdc]),
    ("lavender", [0xe6, 0xe6, 0xfa]),
    ("mintcream", [0xf5, 0xff, 0xfa]),
];
