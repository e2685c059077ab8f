// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types for `HomeLink` devices.
//!
//! These are the constrained building blocks of the data model: the
//! server-assigned device identifier, the fixed device-type enumeration,
//! the validated relay port slot, and the per-type status vocabulary.

mod device_id;
mod device_kind;
mod device_status;
mod relay_port;

pub use device_id::DeviceId;
pub use device_kind::DeviceKind;
pub use device_status::DeviceStatus;
pub use relay_port::RelayPort;
