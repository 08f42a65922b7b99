//! g560led-core: lighting profiles, report encoding, and USB device binding.
//!
//! This crate drives the RGB lighting of Logitech G560 speakers and G203
//! mice by writing fixed-length HID reports over USB control transfers,
//! temporarily taking the HID interface away from the kernel driver.

pub mod binding;
pub mod codec;
pub mod color;
pub mod control;
pub mod error;
pub mod params;
pub mod profile;
pub mod sender;
pub mod transport;
pub mod usb;

pub use control::{LedController, Mode};
pub use error::{Error, Result};
pub use profile::DeviceModel;

/// Logitech USB Vendor ID.
pub const LOGITECH_VID: u16 = 0x046D;

/// Known Logitech lighting product IDs.
pub mod pids {
    /// G203 HERO gaming mouse.
    pub const G203_HERO: u16 = 0xC084;
    /// G560 gaming speaker set.
    pub const G560: u16 = 0x0A78;
}
