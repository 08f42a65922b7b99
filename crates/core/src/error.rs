//! Error types for g560led-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was not supplied.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// An argument was supplied but could not be parsed or is outside its domain.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// None of the profile's product ids is attached to the system.
    #[error(
        "no compatible devices found for {:04x}: ({})",
        .vendor_id,
        format_product_ids(.product_ids)
    )]
    NoCompatibleDevice { vendor_id: u16, product_ids: Vec<u16> },

    /// USB open, claim, release or control transfer failure.
    #[error("USB error during {operation}: {source}")]
    DeviceCommunication {
        operation: String,
        #[source]
        source: rusb::Error,
    },

    /// Mode name not recognized.
    #[error("unknown lighting mode: {0:?}")]
    UnknownMode(String),
}

impl Error {
    pub(crate) fn usb(operation: impl Into<String>, source: rusb::Error) -> Self {
        Self::DeviceCommunication {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn invalid(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

fn format_product_ids(ids: &[u16]) -> String {
    ids.iter()
        .map(|id| format!("{id:04x}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
