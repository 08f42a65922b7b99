//! USB transport abstraction for device communication.
//!
//! Provides a trait-based layer so that real libusb devices and mock
//! devices share the same interface. Binding and sending only ever talk to
//! these traits.

use crate::error::Result;

/// The raw USB operations lighting control needs from one opened device.
pub trait UsbDevice {
    /// Whether a kernel driver currently owns `interface`.
    fn kernel_driver_active(&self, interface: u8) -> Result<bool>;

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<()>;

    fn attach_kernel_driver(&mut self, interface: u8) -> Result<()>;

    fn claim_interface(&mut self, interface: u8) -> Result<()>;

    fn release_interface(&mut self, interface: u8) -> Result<()>;

    /// Issue an OUT control transfer and return the number of bytes written.
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize>;
}

/// Something that can find and open devices by vendor/product id.
pub trait UsbBus {
    type Device: UsbDevice;

    /// Open the first attached device with this id pair, if any.
    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Option<Self::Device>>;
}
