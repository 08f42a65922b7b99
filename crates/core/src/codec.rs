//! Lighting report encoding.
//!
//! Every report is 20 bytes:
//!
//! ```text
//! effect: header(5) mode(1) data(8) suffix(6)
//! intro:  intro_prefix(6) toggle(1) zero(13)
//! ```
//!
//! The header is either the device's 5-byte prefix or, on multi-channel
//! devices, a 4-byte prefix followed by the channel selector.

use crate::color::Rgb;
use crate::params::Parameters;
use crate::profile::{DeviceProfile, LedMode};
use std::fmt;

/// Length of every lighting report.
pub const PAYLOAD_LEN: usize = 20;

const HEADER_LEN: usize = 5;
const MODE_OFFSET: usize = HEADER_LEN;
const DATA_OFFSET: usize = MODE_OFFSET + 1;
const DATA_LEN: usize = 8;
const SUFFIX_LEN: usize = 6;

const INTRO_TOGGLE_OFFSET: usize = 6;
pub const INTRO_ON: u8 = 0x01;
pub const INTRO_OFF: u8 = 0x02;

// header + mode + data + suffix must fill the report exactly
const _: () = assert!(HEADER_LEN + 1 + DATA_LEN + SUFFIX_LEN == PAYLOAD_LEN);

/// A complete report ready for a control transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightingCommand {
    bytes: [u8; PAYLOAD_LEN],
}

impl LightingCommand {
    fn effect(header: [u8; HEADER_LEN], mode_code: u8, data: [u8; DATA_LEN]) -> Self {
        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes[..HEADER_LEN].copy_from_slice(&header);
        bytes[MODE_OFFSET] = mode_code;
        bytes[DATA_OFFSET..DATA_OFFSET + DATA_LEN].copy_from_slice(&data);
        // suffix stays zero
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.bytes
    }

    /// Header bytes (prefix, plus selector on multi-channel devices).
    pub fn header(&self) -> &[u8] {
        &self.bytes[..HEADER_LEN]
    }

    pub fn mode_code(&self) -> u8 {
        self.bytes[MODE_OFFSET]
    }

    /// The 8 mode-specific data bytes.
    pub fn data(&self) -> &[u8] {
        &self.bytes[DATA_OFFSET..DATA_OFFSET + DATA_LEN]
    }

    pub fn suffix(&self) -> &[u8] {
        &self.bytes[PAYLOAD_LEN - SUFFIX_LEN..]
    }

    /// Lowercase hex rendering of the whole report.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for LightingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn for_each_channel(
    profile: &DeviceProfile,
    mode: LedMode,
    data: [u8; DATA_LEN],
) -> Vec<LightingCommand> {
    let code = profile.mode_code(mode);
    profile
        .topology
        .headers()
        .into_iter()
        .map(|header| LightingCommand::effect(header, code, data))
        .collect()
}

/// Static color on every channel.
pub fn encode_solid(profile: &DeviceProfile, color: Rgb) -> Vec<LightingCommand> {
    let [r, g, b] = color.to_bytes();
    for_each_channel(profile, LedMode::Solid, [r, g, b, 0, 0, 0, 0, 0])
}

/// Single color fading in and out with period `rate` ms.
pub fn encode_breathe(
    profile: &DeviceProfile,
    color: Rgb,
    rate: u16,
    brightness: u8,
) -> Vec<LightingCommand> {
    let [r, g, b] = color.to_bytes();
    let [rate_hi, rate_lo] = rate.to_be_bytes();
    for_each_channel(
        profile,
        LedMode::Breathe,
        [r, g, b, rate_hi, rate_lo, 0, brightness, 0],
    )
}

/// Hue rotation with period `rate` ms.
pub fn encode_cycle(profile: &DeviceProfile, rate: u16, brightness: u8) -> Vec<LightingCommand> {
    let [rate_hi, rate_lo] = rate.to_be_bytes();
    for_each_channel(
        profile,
        LedMode::Cycle,
        [0, 0, 0, 0, 0, rate_hi, rate_lo, brightness],
    )
}

/// Encode a lighting effect from a validated parameter set. Solid ignores
/// rate and brightness; cycle ignores color.
pub fn encode(
    profile: &DeviceProfile,
    mode: LedMode,
    params: &Parameters,
) -> Vec<LightingCommand> {
    let &Parameters {
        color,
        rate,
        brightness,
    } = params;
    match mode {
        LedMode::Solid => encode_solid(profile, color),
        LedMode::Cycle => encode_cycle(profile, rate, brightness),
        LedMode::Breathe => encode_breathe(profile, color, rate, brightness),
    }
}

/// Startup effect switch. Always a single report, regardless of topology.
pub fn encode_intro(profile: &DeviceProfile, enabled: bool) -> LightingCommand {
    let mut bytes = [0u8; PAYLOAD_LEN];
    bytes[..INTRO_TOGGLE_OFFSET].copy_from_slice(&profile.intro_prefix);
    bytes[INTRO_TOGGLE_OFFSET] = if enabled { INTRO_ON } else { INTRO_OFF };
    LightingCommand { bytes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{validate_brightness, validate_rate};
    use crate::profile::{SpeakerChannel, G203, G560};

    #[test]
    fn solid_single_channel_layout() {
        let cmds = encode_solid(&G203, Rgb::new(0xAA, 0xBB, 0xCC));
        assert_eq!(cmds.len(), 1);
        assert_eq!(hex::encode(cmds[0].data()), "aabbcc0000000000");
        assert_eq!(
            cmds[0].to_hex(),
            "11ff0e3b0001aabbcc0000000000000000000000"
        );
    }

    #[test]
    fn cycle_with_defaults() {
        let rate = validate_rate(None).unwrap();
        let brightness = validate_brightness(None).unwrap();
        let cmds = encode_cycle(&G203, rate, brightness);
        assert_eq!(hex::encode(cmds[0].data()), "0000000000271064");
        assert_eq!(cmds[0].mode_code(), 0x02);
    }

    #[test]
    fn breathe_layout_and_model_opcode() {
        let color = Rgb::new(0x12, 0x34, 0x56);
        let mouse = encode_breathe(&G203, color, 0x0FA0, 0x32);
        assert_eq!(hex::encode(mouse[0].data()), "1234560fa0003200");
        assert_eq!(mouse[0].mode_code(), 0x03);

        let speaker = encode_breathe(&G560, color, 0x0FA0, 0x32);
        assert!(speaker.iter().all(|c| c.mode_code() == 0x04));
        assert!(speaker.iter().all(|c| c.data() == mouse[0].data()));
    }

    #[test]
    fn speaker_solid_emits_one_report_per_channel() {
        let cmds = encode_solid(&G560, Rgb::new(0xff, 0x00, 0x00));
        assert_eq!(cmds.len(), 4);
        for (cmd, channel) in cmds.iter().zip(SpeakerChannel::ALL) {
            assert_eq!(cmd.header()[4], channel.selector());
            // only the selector byte differs
            let mut normalized = *cmd.as_bytes();
            normalized[4] = 0;
            let mut first = *cmds[0].as_bytes();
            first[4] = 0;
            assert_eq!(normalized, first);
        }
        assert_eq!(
            cmds[2].to_hex(),
            "11ff043a0201ff00000000000000000000000000"
        );
    }

    #[test]
    fn every_report_is_fixed_length_with_zero_suffix() {
        let color = Rgb::new(1, 2, 3);
        let all = [
            encode_solid(&G203, color),
            encode_solid(&G560, color),
            encode_cycle(&G560, 100, 1),
            encode_breathe(&G203, color, 65535, 100),
        ];
        for cmd in all.iter().flatten() {
            assert_eq!(cmd.as_bytes().len(), PAYLOAD_LEN);
            assert_eq!(cmd.suffix(), &[0u8; 6]);
        }
    }

    #[test]
    fn encode_dispatches_on_mode() {
        let params = Parameters {
            color: Rgb::new(0x10, 0x20, 0x30),
            rate: 0x1388,
            brightness: 0x50,
        };
        assert_eq!(
            encode(&G203, LedMode::Solid, &params),
            encode_solid(&G203, params.color)
        );
        assert_eq!(
            encode(&G560, LedMode::Cycle, &params),
            encode_cycle(&G560, 0x1388, 0x50)
        );
        let breathe = encode(&G560, LedMode::Breathe, &params);
        assert_eq!(breathe.len(), 4);
        assert_eq!(hex::encode(breathe[3].data()), "1020301388005000");
    }

    #[test]
    fn intro_toggle_reports() {
        assert_eq!(
            encode_intro(&G203, true).to_hex(),
            "11ff0e5b00010100000000000000000000000000"
        );
        assert_eq!(
            encode_intro(&G203, false).to_hex(),
            "11ff0e5b00010200000000000000000000000000"
        );
        assert_eq!(
            encode_intro(&G560, true).to_hex(),
            "11ff043a00010100000000000000000000000000"
        );
    }
}
