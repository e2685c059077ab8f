// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records and creation drafts.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{DeviceId, DeviceKind, DeviceStatus, RelayPort};

/// A device record as reported by the server.
///
/// Records are never mutated in place; any change comes back through a
/// full directory refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Server-assigned identifier.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Device type.
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// The relay port this device occupies.
    pub relay_port: RelayPort,
    /// Reported status in the device type's vocabulary.
    pub status: DeviceStatus,
}

impl Device {
    /// Collapses the status vocabulary into an active/inactive flag;
    /// `None` for unrecognized vocabularies.
    #[must_use]
    pub fn is_active(&self) -> Option<bool> {
        self.status.is_active()
    }
}

/// User input for creating a device, as collected by the creation dialog.
///
/// The relay port is kept as the raw string the form holds; validation
/// parses and range-checks it. A draft is never partially submitted:
/// [`validate`](Self::validate) either produces a complete [`NewDevice`]
/// payload or a [`ValidationError`], before any network traffic.
///
/// # Examples
///
/// ```
/// use homelink_lib::{DeviceDraft, types::DeviceKind};
///
/// let draft = DeviceDraft::new("Bedroom Fan", DeviceKind::Fan, "2");
/// let payload = draft.validate().unwrap();
/// assert_eq!(payload.relay_port.value(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDraft {
    /// Device name field.
    pub name: String,
    /// Selected device type, if one has been chosen yet.
    pub kind: Option<DeviceKind>,
    /// Relay port field, as typed.
    pub relay_port: String,
}

impl DeviceDraft {
    /// Creates a fully-populated draft.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeviceKind, relay_port: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            relay_port: relay_port.into(),
        }
    }

    /// Validates the draft and produces the creation payload.
    ///
    /// Checks that the name is non-empty, a type has been selected, and
    /// the relay port parses to an integer within the fixed range. Port
    /// occupancy is the allocator's concern and is checked separately by
    /// the synchronizer.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`ValidationError`].
    pub fn validate(&self) -> Result<NewDevice, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let kind = self.kind.ok_or(ValidationError::MissingKind)?;
        let relay_port: RelayPort = self.relay_port.parse()?;

        Ok(NewDevice {
            name: name.to_string(),
            kind,
            relay_port,
        })
    }
}

/// Fully-validated payload for `POST /devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDevice {
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Device type.
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// The relay port to occupy.
    pub relay_port: RelayPort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_deserializes_from_server_record() {
        let json = r#"{
            "id": 1,
            "name": "Lamp",
            "type": "Light",
            "relay_port": 1,
            "status": "off"
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, DeviceId::new(1));
        assert_eq!(device.name, "Lamp");
        assert_eq!(device.kind, DeviceKind::Light);
        assert_eq!(device.relay_port.value(), 1);
        assert_eq!(device.status, DeviceStatus::Off);
        assert_eq!(device.is_active(), Some(false));
    }

    #[test]
    fn door_lock_record_uses_open_closed_vocabulary() {
        let json = r#"{
            "id": 4,
            "name": "Front Door",
            "type": "Door Lock",
            "relay_port": 4,
            "status": "open"
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.kind, DeviceKind::DoorLock);
        assert_eq!(device.is_active(), Some(true));
    }

    #[test]
    fn unknown_status_does_not_fail_deserialization() {
        let json = r#"{
            "id": 9,
            "name": "Vent",
            "type": "Fan",
            "relay_port": 3,
            "status": "spinning"
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.is_active(), None);
    }

    #[test]
    fn valid_draft_produces_payload() {
        let draft = DeviceDraft::new("Fan1", DeviceKind::Fan, "2");
        let payload = draft.validate().unwrap();
        assert_eq!(payload.name, "Fan1");
        assert_eq!(payload.kind, DeviceKind::Fan);
        assert_eq!(payload.relay_port.value(), 2);
    }

    #[test]
    fn draft_name_is_trimmed() {
        let draft = DeviceDraft::new("  Lamp  ", DeviceKind::Light, "1");
        assert_eq!(draft.validate().unwrap().name, "Lamp");
    }

    #[test]
    fn empty_name_is_rejected() {
        let draft = DeviceDraft::new("   ", DeviceKind::Light, "1");
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));
    }

    #[test]
    fn missing_kind_is_rejected() {
        let draft = DeviceDraft {
            name: "Lamp".to_string(),
            kind: None,
            relay_port: "1".to_string(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingKind));
    }

    #[test]
    fn bad_port_is_rejected() {
        let draft = DeviceDraft::new("Lamp", DeviceKind::Light, "first");
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::PortNotNumeric(_))
        ));

        let draft = DeviceDraft::new("Lamp", DeviceKind::Light, "8");
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::PortOutOfRange { actual: 8, .. })
        ));
    }

    #[test]
    fn new_device_serializes_with_wire_field_names() {
        let payload = NewDevice {
            name: "Fan1".to_string(),
            kind: DeviceKind::Fan,
            relay_port: RelayPort::new(2).unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Fan1", "type": "Fan", "relay_port": 2})
        );
    }
}
