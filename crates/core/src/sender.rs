//! Ordered delivery of lighting reports as HID SET_REPORT control transfers.

use crate::binding::DeviceHandle;
use crate::codec::LightingCommand;
use crate::error::{Error, Result};
use crate::transport::UsbDevice;
use tracing::{debug, trace};

/// Host-to-device, class request, interface recipient.
pub const REQUEST_TYPE: u8 = 0x21;
/// HID SET_REPORT.
pub const REQUEST: u8 = 0x09;
/// Output report, report id 0x11.
pub const VALUE: u16 = 0x0211;

/// Send every command in order. The first failure aborts the rest.
pub fn send_all<D: UsbDevice>(
    handle: &DeviceHandle<D>,
    commands: &[LightingCommand],
) -> Result<()> {
    let index = u16::from(handle.interface());

    for (n, command) in commands.iter().enumerate() {
        trace!(
            seq = n,
            w_index = index,
            report_hex = %command.to_hex(),
            "Control TX"
        );

        let data = command.as_bytes();
        let written = handle
            .device()
            .write_control(REQUEST_TYPE, REQUEST, VALUE, index, data)
            .map_err(|e| match e {
                Error::DeviceCommunication { source, .. } => Error::usb(
                    format!("control transfer {} of {}", n + 1, commands.len()),
                    source,
                ),
                other => other,
            })?;

        if written != data.len() {
            return Err(Error::usb(
                format!(
                    "control transfer {} of {} (wrote {written} of {} bytes)",
                    n + 1,
                    commands.len(),
                    data.len()
                ),
                rusb::Error::Io,
            ));
        }
    }

    debug!(count = commands.len(), "All reports sent");
    Ok(())
}
