// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay port slots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the fixed relay port slots a device occupies.
///
/// Ports are numbered 1 through 6 and at most one device may occupy a
/// slot at any time. Construction validates the range, so a `RelayPort`
/// value is always in bounds.
///
/// # Examples
///
/// ```
/// use homelink_lib::types::RelayPort;
///
/// let port = RelayPort::new(3).unwrap();
/// assert_eq!(port.value(), 3);
///
/// assert!(RelayPort::new(0).is_err());
/// assert!(RelayPort::new(7).is_err());
///
/// // Parses from the create form's string field.
/// let port: RelayPort = "5".parse().unwrap();
/// assert_eq!(port.value(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RelayPort(u8);

impl RelayPort {
    /// Lowest valid port number.
    pub const MIN: u8 = 1;
    /// Highest valid port number.
    pub const MAX: u8 = 6;
    /// Number of relay ports in the fixed range.
    pub const COUNT: usize = (Self::MAX - Self::MIN + 1) as usize;

    /// Creates a relay port, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PortOutOfRange`] if `value` is outside
    /// `1..=6`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::PortOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: i64::from(value),
            })
        }
    }

    /// Returns the port number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterates over every port in the fixed range, in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for RelayPort {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RelayPort> for u8 {
    fn from(port: RelayPort) -> Self {
        port.0
    }
}

impl FromStr for RelayPort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::PortNotNumeric(s.to_string()))?;
        let value = u8::try_from(value).map_err(|_| ValidationError::PortOutOfRange {
            min: Self::MIN,
            max: Self::MAX,
            actual: value,
        })?;
        Self::new(value)
    }
}

impl fmt::Display for RelayPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for value in RelayPort::MIN..=RelayPort::MAX {
            assert!(RelayPort::new(value).is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            RelayPort::new(0),
            Err(ValidationError::PortOutOfRange { actual: 0, .. })
        ));
        assert!(matches!(
            RelayPort::new(7),
            Err(ValidationError::PortOutOfRange { actual: 7, .. })
        ));
    }

    #[test]
    fn parses_from_string() {
        assert_eq!("1".parse::<RelayPort>().unwrap().value(), 1);
        assert_eq!(" 6 ".parse::<RelayPort>().unwrap().value(), 6);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(matches!(
            "abc".parse::<RelayPort>(),
            Err(ValidationError::PortNotNumeric(_))
        ));
        assert!(matches!(
            "".parse::<RelayPort>(),
            Err(ValidationError::PortNotNumeric(_))
        ));
    }

    #[test]
    fn parse_rejects_out_of_range_numbers() {
        assert!(matches!(
            "9".parse::<RelayPort>(),
            Err(ValidationError::PortOutOfRange { actual: 9, .. })
        ));
        // Values that do not fit in u8 still report range, not parse failure.
        assert!(matches!(
            "-1".parse::<RelayPort>(),
            Err(ValidationError::PortOutOfRange { actual: -1, .. })
        ));
        assert!(matches!(
            "1000".parse::<RelayPort>(),
            Err(ValidationError::PortOutOfRange { actual: 1000, .. })
        ));
    }

    #[test]
    fn all_yields_every_port_once() {
        let ports: Vec<u8> = RelayPort::all().map(RelayPort::value).collect();
        assert_eq!(ports, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ports.len(), RelayPort::COUNT);
    }

    #[test]
    fn serde_rejects_invalid_wire_value() {
        assert!(serde_json::from_str::<RelayPort>("3").is_ok());
        assert!(serde_json::from_str::<RelayPort>("0").is_err());
        assert!(serde_json::from_str::<RelayPort>("7").is_err());
    }
}
