//! Parameter validation: turns raw user strings into codec-ready values
//! before anything touches the device.
//!
//! ## Rate
//! - **Range**: 100 – 65,535 ms per effect period
//! - **Default**: 10,000 ms
//! - **Encoding**: 2 bytes, big-endian
//!
//! ## Brightness
//! - **Range**: 1 – 100 percent
//! - **Default**: 100
//! - **Encoding**: 1 byte
//!
//! Out-of-range integers are clamped, not rejected. Only input that is not
//! an integer at all is an error.

use crate::color::{ColorParser, Rgb};
use crate::error::{Error, Result};

pub const RATE_MIN: u16 = 100;
pub const RATE_MAX: u16 = u16::MAX;
pub const RATE_DEFAULT: u16 = 10_000;

pub const BRIGHTNESS_MIN: u8 = 1;
pub const BRIGHTNESS_MAX: u8 = 100;
pub const BRIGHTNESS_DEFAULT: u8 = 100;

/// Validated values for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub color: Rgb,
    pub rate: u16,
    pub brightness: u8,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            color: Rgb::default(),
            rate: RATE_DEFAULT,
            brightness: BRIGHTNESS_DEFAULT,
        }
    }
}

/// Treats `None` and blank strings alike.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an integer of any width so that huge and negative inputs clamp
/// instead of failing.
fn parse_integer(field: &'static str, raw: &str) -> Result<i128> {
    raw.parse::<i128>()
        .map_err(|e| Error::invalid(field, raw, e.to_string()))
}

/// Validate an effect rate in milliseconds.
pub fn validate_rate(raw: Option<&str>) -> Result<u16> {
    let Some(raw) = present(raw) else {
        return Ok(RATE_DEFAULT);
    };
    let value = parse_integer("rate", raw)?;
    Ok(value.clamp(RATE_MIN as i128, RATE_MAX as i128) as u16)
}

/// Validate a brightness percentage.
pub fn validate_brightness(raw: Option<&str>) -> Result<u8> {
    let Some(raw) = present(raw) else {
        return Ok(BRIGHTNESS_DEFAULT);
    };
    let value = parse_integer("brightness", raw)?;
    Ok(value.clamp(BRIGHTNESS_MIN as i128, BRIGHTNESS_MAX as i128) as u8)
}

/// Validate a color string through the given parser.
pub fn validate_color(raw: Option<&str>, parser: &dyn ColorParser) -> Result<Rgb> {
    let raw = present(raw).ok_or(Error::MissingParameter("color"))?;
    parser
        .parse(raw)
        .ok_or_else(|| Error::invalid("color", raw, "expected RRGGBB hex or a color name"))
}

/// Parse the startup-effect switch: `on`/`1` or `off`/`0`.
pub fn parse_toggle(raw: Option<&str>) -> Result<bool> {
    let raw = present(raw).ok_or(Error::MissingParameter("intro toggle"))?;
    match raw.to_ascii_lowercase().as_str() {
        "on" | "1" => Ok(true),
        "off" | "0" => Ok(false),
        _ => Err(Error::invalid("intro toggle", raw, "expected on, off, 1 or 0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::StandardColorParser;

    #[test]
    fn parameters_default_to_black_at_full_rate_and_brightness() {
        let p = Parameters::default();
        assert_eq!(p.color, Rgb::new(0, 0, 0));
        assert_eq!(p.rate, RATE_DEFAULT);
        assert_eq!(p.brightness, BRIGHTNESS_DEFAULT);
    }

    #[test]
    fn rate_defaults_when_absent() {
        assert_eq!(validate_rate(None).unwrap(), 10_000);
        assert_eq!(validate_rate(Some("")).unwrap(), 10_000);
    }

    #[test]
    fn rate_in_range_passes_through() {
        assert_eq!(validate_rate(Some("100")).unwrap(), 100);
        assert_eq!(validate_rate(Some("4000")).unwrap(), 4000);
        assert_eq!(validate_rate(Some("65535")).unwrap(), 65535);
    }

    #[test]
    fn rate_clamps_out_of_range() {
        assert_eq!(validate_rate(Some("5")).unwrap(), 100);
        assert_eq!(validate_rate(Some("-40")).unwrap(), 100);
        assert_eq!(validate_rate(Some("70000")).unwrap(), 65535);
        assert_eq!(
            validate_rate(Some("99999999999999999999")).unwrap(),
            65535
        );
    }

    #[test]
    fn rate_rejects_non_integer() {
        assert!(matches!(
            validate_rate(Some("fast")),
            Err(Error::InvalidParameter { field: "rate", .. })
        ));
        assert!(validate_rate(Some("10.5")).is_err());
    }

    #[test]
    fn brightness_defaults_and_clamps() {
        assert_eq!(validate_brightness(None).unwrap(), 100);
        assert_eq!(validate_brightness(Some("0")).unwrap(), 1);
        assert_eq!(validate_brightness(Some("50")).unwrap(), 50);
        assert_eq!(validate_brightness(Some("250")).unwrap(), 100);
    }

    #[test]
    fn brightness_rejects_non_integer() {
        assert!(matches!(
            validate_brightness(Some("bright")),
            Err(Error::InvalidParameter {
                field: "brightness",
                ..
            })
        ));
    }

    #[test]
    fn color_missing_is_distinct_from_invalid() {
        let parser = StandardColorParser;
        assert!(matches!(
            validate_color(None, &parser),
            Err(Error::MissingParameter("color"))
        ));
        assert!(matches!(
            validate_color(Some("  "), &parser),
            Err(Error::MissingParameter("color"))
        ));
        assert!(matches!(
            validate_color(Some("nope"), &parser),
            Err(Error::InvalidParameter { field: "color", .. })
        ));
    }

    #[test]
    fn color_keeps_channel_order() {
        let rgb = validate_color(Some("123456"), &StandardColorParser).unwrap();
        assert_eq!(rgb.to_bytes(), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn toggle_accepts_known_words() {
        assert!(parse_toggle(Some("on")).unwrap());
        assert!(parse_toggle(Some("1")).unwrap());
        assert!(parse_toggle(Some("ON")).unwrap());
        assert!(!parse_toggle(Some("off")).unwrap());
        assert!(!parse_toggle(Some("0")).unwrap());
    }

    #[test]
    fn toggle_rejects_other_values() {
        assert!(matches!(
            parse_toggle(Some("maybe")),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            parse_toggle(Some("2")),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(parse_toggle(None), Err(Error::MissingParameter(_))));
    }
}
