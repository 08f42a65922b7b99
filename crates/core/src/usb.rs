//! libusb-backed [`UsbBus`] and [`UsbDevice`] via `rusb`.

use crate::error::{Error, Result};
use crate::transport::{UsbBus, UsbDevice};
use rusb::{Context, DeviceHandle, UsbContext};
use std::time::Duration;
use tracing::debug;

/// libusb treats a zero timeout as "wait forever".
const NO_TIMEOUT: Duration = Duration::ZERO;

/// The system USB bus.
pub struct RusbBus<T: UsbContext = Context> {
    context: T,
}

impl RusbBus<Context> {
    /// Create a bus backed by a fresh libusb context.
    pub fn new() -> Result<Self> {
        let context = Context::new().map_err(|e| Error::usb("libusb init", e))?;
        Ok(Self { context })
    }
}

impl<T: UsbContext> UsbBus for RusbBus<T> {
    type Device = RusbDevice<T>;

    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Option<RusbDevice<T>>> {
        let devices = self
            .context
            .devices()
            .map_err(|e| Error::usb("device enumeration", e))?;

        for device in devices.iter() {
            let desc = match device.device_descriptor() {
                Ok(d) => d,
                Err(e) => {
                    debug!(
                        bus = device.bus_number(),
                        address = device.address(),
                        error = %e,
                        "Skipping device without readable descriptor"
                    );
                    continue;
                }
            };

            if desc.vendor_id() != vendor_id || desc.product_id() != product_id {
                continue;
            }

            debug!(
                vid = format_args!("0x{:04X}", vendor_id),
                pid = format_args!("0x{:04X}", product_id),
                bus = device.bus_number(),
                address = device.address(),
                "Opening USB device"
            );
            let handle = device.open().map_err(|e| {
                Error::usb(format!("open {vendor_id:04x}:{product_id:04x}"), e)
            })?;
            return Ok(Some(RusbDevice { handle }));
        }

        Ok(None)
    }
}

/// An opened libusb device.
pub struct RusbDevice<T: UsbContext = Context> {
    handle: DeviceHandle<T>,
}

impl<T: UsbContext> UsbDevice for RusbDevice<T> {
    fn kernel_driver_active(&self, interface: u8) -> Result<bool> {
        match self.handle.kernel_driver_active(interface) {
            Ok(active) => Ok(active),
            // Platforms without kernel driver control never need a detach.
            Err(rusb::Error::NotSupported) => Ok(false),
            Err(e) => Err(Error::usb(
                format!("query kernel driver on interface {interface}"),
                e,
            )),
        }
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<()> {
        self.handle
            .detach_kernel_driver(interface)
            .map_err(|e| Error::usb(format!("detach kernel driver from interface {interface}"), e))
    }

    fn attach_kernel_driver(&mut self, interface: u8) -> Result<()> {
        self.handle
            .attach_kernel_driver(interface)
            .map_err(|e| Error::usb(format!("reattach kernel driver to interface {interface}"), e))
    }

    fn claim_interface(&mut self, interface: u8) -> Result<()> {
        self.handle
            .claim_interface(interface)
            .map_err(|e| Error::usb(format!("claim interface {interface}"), e))
    }

    fn release_interface(&mut self, interface: u8) -> Result<()> {
        self.handle
            .release_interface(interface)
            .map_err(|e| Error::usb(format!("release interface {interface}"), e))
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        self.handle
            .write_control(request_type, request, value, index, data, NO_TIMEOUT)
            .map_err(|e| Error::usb("control transfer", e))
    }
}
