// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-type device status vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reported status of a device.
///
/// Lights, fans and similar devices report `"on"`/`"off"`; door locks
/// report `"open"`/`"closed"`. Any other vocabulary the server may use is
/// preserved verbatim as [`Unknown`](Self::Unknown) rather than being
/// coerced to a default.
///
/// # Examples
///
/// ```
/// use homelink_lib::types::DeviceStatus;
///
/// assert_eq!(DeviceStatus::from("on").is_active(), Some(true));
/// assert_eq!(DeviceStatus::from("closed").is_active(), Some(false));
/// assert_eq!(DeviceStatus::from("dimmed").is_active(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceStatus {
    /// Device is on.
    On,
    /// Device is off.
    Off,
    /// Lock is open.
    Open,
    /// Lock is closed.
    Closed,
    /// A vocabulary this client does not recognize, kept verbatim.
    Unknown(String),
}

impl DeviceStatus {
    /// Collapses the per-type vocabulary into an active/inactive flag.
    ///
    /// Returns `None` for unrecognized vocabularies so the caller can
    /// render an explicit "unknown" state instead of guessing.
    #[must_use]
    pub fn is_active(&self) -> Option<bool> {
        match self {
            Self::On | Self::Open => Some(true),
            Self::Off | Self::Closed => Some(false),
            Self::Unknown(_) => None,
        }
    }

    /// Returns the wire string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for DeviceStatus {
    fn from(s: &str) -> Self {
        match s {
            "on" => Self::On,
            "off" => Self::Off,
            "open" => Self::Open,
            "closed" => Self::Closed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<DeviceStatus> for String {
    fn from(status: DeviceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vocabulary_parses() {
        assert_eq!(DeviceStatus::from("on"), DeviceStatus::On);
        assert_eq!(DeviceStatus::from("off"), DeviceStatus::Off);
        assert_eq!(DeviceStatus::from("open"), DeviceStatus::Open);
        assert_eq!(DeviceStatus::from("closed"), DeviceStatus::Closed);
    }

    #[test]
    fn unknown_vocabulary_is_preserved_verbatim() {
        let status = DeviceStatus::from("Dimmed");
        assert_eq!(status, DeviceStatus::Unknown("Dimmed".to_string()));
        assert_eq!(status.as_str(), "Dimmed");
        assert_eq!(status.is_active(), None);
    }

    #[test]
    fn vocabulary_is_case_sensitive() {
        // "ON" is not in the server's vocabulary; do not guess.
        assert_eq!(
            DeviceStatus::from("ON"),
            DeviceStatus::Unknown("ON".to_string())
        );
    }

    #[test]
    fn active_projection() {
        assert_eq!(DeviceStatus::On.is_active(), Some(true));
        assert_eq!(DeviceStatus::Open.is_active(), Some(true));
        assert_eq!(DeviceStatus::Off.is_active(), Some(false));
        assert_eq!(DeviceStatus::Closed.is_active(), Some(false));
    }

    #[test]
    fn serde_roundtrip_through_wire_string() {
        let status: DeviceStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(status, DeviceStatus::Open);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"open\"");

        let unknown: DeviceStatus = serde_json::from_str("\"ajar\"").unwrap();
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"ajar\"");
    }
}
