// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `HomeLink` library.
//!
//! Failures fall into three categories: client-side validation (rejected
//! before any request is issued), transport failures (network unreachable,
//! timeout), and server failures (non-2xx responses). Transport and server
//! failures never discard the last known-good device snapshot.

use thiserror::Error;

use crate::types::RelayPort;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected client-side before reaching the network.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request could not be delivered or did not settle.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx response.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Errors raised by draft validation and port-allocation checks.
///
/// These never produce a network request; they are reported synchronously
/// to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The device name is empty or whitespace-only.
    #[error("device name must not be empty")]
    MissingName,

    /// No device type was selected.
    #[error("a device type must be selected")]
    MissingKind,

    /// An unrecognized device type string was provided.
    #[error("unknown device type: {0}")]
    UnknownKind(String),

    /// The relay port field does not parse as an integer.
    #[error("relay port {0:?} is not a number")]
    PortNotNumeric(String),

    /// The relay port is outside the fixed port range.
    #[error("relay port {actual} is out of range [{min}, {max}]")]
    PortOutOfRange {
        /// Lowest valid port.
        min: u8,
        /// Highest valid port.
        max: u8,
        /// The port that was provided.
        actual: i64,
    },

    /// Another device already occupies the requested relay port.
    #[error("relay port {0} is already in use")]
    PortInUse(RelayPort),

    /// Every relay port is occupied; nothing can be created.
    #[error("all relay ports are in use")]
    NoFreePorts,
}

/// Errors raised while delivering a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, timeout, malformed body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base address is not usable.
    #[error("invalid base address: {0}")]
    InvalidAddress(String),
}

/// A non-2xx response from the server.
///
/// Carries the status code and the server-supplied message when the
/// response body contained one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no further detail"))]
pub struct ServerError {
    /// The HTTP status code.
    pub status: u16,
    /// Message extracted from the response body, if any.
    pub message: Option<String>,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
