// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed set of device types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The type of a home-automation device.
///
/// The wire representation uses the server's exact spelling, including
/// the space in `"Door Lock"`.
///
/// # Examples
///
/// ```
/// use homelink_lib::types::DeviceKind;
///
/// assert_eq!(DeviceKind::DoorLock.as_str(), "Door Lock");
/// assert_eq!("AC".parse::<DeviceKind>().unwrap(), DeviceKind::Ac);
/// assert!("Toaster".parse::<DeviceKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// A light fixture.
    Light,
    /// A fan.
    Fan,
    /// An air conditioner.
    #[serde(rename = "AC")]
    Ac,
    /// A door lock (status vocabulary "open"/"closed").
    #[serde(rename = "Door Lock")]
    DoorLock,
    /// A television.
    #[serde(rename = "TV")]
    Tv,
    /// A speaker.
    Speaker,
}

impl DeviceKind {
    /// Every supported device type, in display order.
    pub const ALL: [Self; 6] = [
        Self::Light,
        Self::Fan,
        Self::Ac,
        Self::DoorLock,
        Self::Tv,
        Self::Speaker,
    ];

    /// Returns the wire/display string for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Fan => "Fan",
            Self::Ac => "AC",
            Self::DoorLock => "Door Lock",
            Self::Tv => "TV",
            Self::Speaker => "Speaker",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}
