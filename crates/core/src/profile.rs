//! Per-model device profiles.
//!
//! Everything that differs between supported products lives here as data:
//! which product ids to look for, which interface carries the lighting
//! reports, how many lighting channels the device has and which opcode it
//! uses for breathing.

use crate::{pids, LOGITECH_VID};
use serde::Serialize;
use std::fmt;

/// Lighting effect selector byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedMode {
    Solid,
    Cycle,
    Breathe,
}

pub const MODE_SOLID: u8 = 0x01;
pub const MODE_CYCLE: u8 = 0x02;
pub const MODE_BREATHE: u8 = 0x03;
pub const MODE_SPEAKER_BREATHE: u8 = 0x04;

/// Lighting zones of the G560, in the order the firmware expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpeakerChannel {
    LeftSecondary = 0x00,
    RightSecondary = 0x01,
    LeftPrimary = 0x02,
    RightPrimary = 0x03,
}

impl SpeakerChannel {
    pub const ALL: [SpeakerChannel; 4] = [
        SpeakerChannel::LeftSecondary,
        SpeakerChannel::RightSecondary,
        SpeakerChannel::LeftPrimary,
        SpeakerChannel::RightPrimary,
    ];

    pub fn selector(self) -> u8 {
        self as u8
    }
}

/// How lighting reports address the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// One zone; the report header is a fixed 5-byte prefix.
    Single { prefix: [u8; 5] },
    /// Several zones; a 4-byte prefix followed by one selector byte, and
    /// one report per selector.
    Multi {
        prefix: [u8; 4],
        channels: &'static [u8],
    },
}

impl Topology {
    /// Report headers, one per channel, in send order.
    pub fn headers(&self) -> Vec<[u8; 5]> {
        match *self {
            Topology::Single { prefix } => vec![prefix],
            Topology::Multi { prefix, channels } => channels
                .iter()
                .map(|&selector| {
                    let [a, b, c, d] = prefix;
                    [a, b, c, d, selector]
                })
                .collect(),
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Topology::Single { .. } => 1,
            Topology::Multi { channels, .. } => channels.len(),
        }
    }
}

/// Immutable description of one supported product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub vendor_id: u16,
    /// Searched in order; the first one present wins.
    pub compatible_products: &'static [(u16, &'static str)],
    pub default_interface: u8,
    pub topology: Topology,
    pub breathe_code: u8,
    pub intro_prefix: [u8; 6],
}

impl DeviceProfile {
    pub fn product_ids(&self) -> Vec<u16> {
        self.compatible_products.iter().map(|&(pid, _)| pid).collect()
    }

    /// Opcode for a lighting mode on this device.
    pub fn mode_code(&self, mode: LedMode) -> u8 {
        match mode {
            LedMode::Solid => MODE_SOLID,
            LedMode::Cycle => MODE_CYCLE,
            LedMode::Breathe => self.breathe_code,
        }
    }
}

const SPEAKER_CHANNELS: [u8; 4] = [
    SpeakerChannel::LeftSecondary as u8,
    SpeakerChannel::RightSecondary as u8,
    SpeakerChannel::LeftPrimary as u8,
    SpeakerChannel::RightPrimary as u8,
];

pub static G203: DeviceProfile = DeviceProfile {
    name: "Logitech G203",
    vendor_id: LOGITECH_VID,
    compatible_products: &[(pids::G203_HERO, "G203 HERO Gaming Mouse")],
    default_interface: 0x01,
    topology: Topology::Single {
        prefix: [0x11, 0xff, 0x0e, 0x3b, 0x00],
    },
    breathe_code: MODE_BREATHE,
    intro_prefix: [0x11, 0xff, 0x0e, 0x5b, 0x00, 0x01],
};

pub static G560: DeviceProfile = DeviceProfile {
    name: "Logitech G560",
    vendor_id: LOGITECH_VID,
    compatible_products: &[(pids::G560, "G560 Gaming Speaker")],
    default_interface: 0x02,
    topology: Topology::Multi {
        prefix: [0x11, 0xff, 0x04, 0x3a],
        channels: &SPEAKER_CHANNELS,
    },
    breathe_code: MODE_SPEAKER_BREATHE,
    intro_prefix: [0x11, 0xff, 0x04, 0x3a, 0x00, 0x01],
};

/// Supported Logitech lighting devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceModel {
    G203,
    G560,
}

impl DeviceModel {
    pub const ALL: &'static [DeviceModel] = &[DeviceModel::G203, DeviceModel::G560];

    pub fn profile(&self) -> &'static DeviceProfile {
        match self {
            Self::G203 => &G203,
            Self::G560 => &G560,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Short command-line name.
    pub fn id(&self) -> &'static str {
        match self {
            Self::G203 => "g203",
            Self::G560 => "g560",
        }
    }

    pub fn summary(&self) -> ModelSummary {
        let profile = self.profile();
        ModelSummary {
            model: *self,
            name: profile.name,
            vendor_id: format!("{:04x}", profile.vendor_id),
            products: profile
                .compatible_products
                .iter()
                .map(|&(pid, label)| (format!("{pid:04x}"), label))
                .collect(),
            interface: profile.default_interface,
            channels: profile.topology.channel_count(),
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Serializable view of a profile for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub model: DeviceModel,
    pub name: &'static str,
    pub vendor_id: String,
    pub products: Vec<(String, &'static str)>,
    pub interface: u8,
    pub channels: usize,
}
