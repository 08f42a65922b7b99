//! Device binding: find a compatible device and take its lighting interface
//! away from the kernel for the duration of one command sequence.
//!
//! ```text
//! Unbound -> Searching -> Bound -> Releasing -> Unbound
//!                                           \-> Failed
//! ```
//!
//! A [`DeviceHandle`] gives the interface back when released or dropped, so
//! every exit path (including a failed claim right after a detach) reattaches
//! the kernel driver. [`with_device`] wraps the whole cycle around a closure.

use crate::error::{Error, Result};
use crate::profile::DeviceProfile;
use crate::transport::{UsbBus, UsbDevice};
use tracing::{debug, info, warn};

/// Lifecycle of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Searching,
    Bound,
    Releasing,
    Failed,
}

/// Exclusive ownership of one device interface.
pub struct DeviceHandle<D: UsbDevice> {
    device: D,
    product_id: u16,
    interface: u8,
    kernel_detached: bool,
    claimed: bool,
    state: BindingState,
}

impl<D: UsbDevice> DeviceHandle<D> {
    fn new(device: D, product_id: u16, interface: u8) -> Self {
        Self {
            device,
            product_id,
            interface,
            kernel_detached: false,
            claimed: false,
            state: BindingState::Searching,
        }
    }

    /// Detach the kernel driver if it owns the interface, then claim it.
    fn acquire(&mut self) -> Result<()> {
        let interface = self.interface;
        if self.device.kernel_driver_active(interface)? {
            debug!(interface, "Detaching kernel driver");
            self.device.detach_kernel_driver(interface)?;
            self.kernel_detached = true;
        }
        self.device.claim_interface(interface)?;
        self.claimed = true;
        self.state = BindingState::Bound;
        debug!(interface, state = ?self.state, "Interface claimed");
        Ok(())
    }

    /// Release the interface and hand it back to the kernel.
    ///
    /// Both steps are attempted even if the first fails; the first failure
    /// is returned. Calling this again is a no-op.
    pub fn release(&mut self) -> Result<()> {
        if !self.claimed && !self.kernel_detached {
            if self.state != BindingState::Failed {
                self.state = BindingState::Unbound;
            }
            return Ok(());
        }

        self.state = BindingState::Releasing;
        let interface = self.interface;
        let mut first_error: Option<Error> = None;

        if self.claimed {
            self.claimed = false;
            if let Err(e) = self.device.release_interface(interface) {
                first_error = Some(e);
            }
        }

        if self.kernel_detached {
            self.kernel_detached = false;
            debug!(interface, "Reattaching kernel driver");
            if let Err(e) = self.device.attach_kernel_driver(interface) {
                match first_error {
                    Some(_) => warn!(interface, error = %e, "Kernel driver reattach also failed"),
                    None => first_error = Some(e),
                }
            }
        }

        match first_error {
            None => {
                self.state = BindingState::Unbound;
                debug!(interface, state = ?self.state, "Interface released");
                Ok(())
            }
            Some(e) => {
                self.state = BindingState::Failed;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Claimed interface number, used as wIndex for transfers.
    pub fn interface(&self) -> u8 {
        self.interface
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    pub(crate) fn device(&self) -> &D {
        &self.device
    }
}

impl<D: UsbDevice> Drop for DeviceHandle<D> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(interface = self.interface, error = %e, "Release on drop failed");
        }
    }
}

/// Find the first attached device from the profile's product table and
/// claim its lighting interface.
pub fn bind<B: UsbBus>(bus: &B, profile: &DeviceProfile) -> Result<DeviceHandle<B::Device>> {
    debug!(
        state = ?BindingState::Searching,
        vid = format_args!("0x{:04X}", profile.vendor_id),
        "Searching for compatible device"
    );

    for &(pid, label) in profile.compatible_products {
        let Some(device) = bus.open(profile.vendor_id, pid)? else {
            debug!(pid = format_args!("0x{:04X}", pid), "Not present");
            continue;
        };

        info!(
            product = label,
            vid = format_args!("0x{:04X}", profile.vendor_id),
            pid = format_args!("0x{:04X}", pid),
            "Found Logitech device"
        );

        // On failure the handle is dropped, which undoes a detach.
        let mut handle = DeviceHandle::new(device, pid, profile.default_interface);
        handle.acquire()?;
        return Ok(handle);
    }

    Err(Error::NoCompatibleDevice {
        vendor_id: profile.vendor_id,
        product_ids: profile.product_ids(),
    })
}

/// Bind, run `f` with the handle, and always release.
///
/// An error from `f` takes precedence over a release error, which is then
/// only logged.
pub fn with_device<B, T, F>(bus: &B, profile: &DeviceProfile, f: F) -> Result<T>
where
    B: UsbBus,
    F: FnOnce(&DeviceHandle<B::Device>) -> Result<T>,
{
    let mut handle = bind(bus, profile)?;
    let outcome = f(&handle);
    let released = handle.release();

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_error)) => {
            warn!(error = %release_error, "Release failed after an earlier error");
            Err(e)
        }
    }
}
