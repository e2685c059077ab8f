// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Port allocation: pure projections over a directory snapshot.
//!
//! These are stateless functions recomputed on demand, so there is no
//! cache to invalidate. The port-occupancy invariant (at most one device
//! per relay port) is enforced by checking these before any create.

use std::collections::BTreeSet;

use crate::device::Device;
use crate::types::RelayPort;

/// Returns the set of relay ports currently occupied by a device.
#[must_use]
pub fn used_ports(devices: &[Device]) -> BTreeSet<RelayPort> {
    devices.iter().map(|d| d.relay_port).collect()
}

/// Returns `true` iff every port in the fixed range is occupied.
#[must_use]
pub fn is_full(devices: &[Device]) -> bool {
    used_ports(devices).len() == RelayPort::COUNT
}

/// Returns `true` if no device occupies the given port.
#[must_use]
pub fn is_available(devices: &[Device], port: RelayPort) -> bool {
    devices.iter().all(|d| d.relay_port != port)
}

/// Returns the ports still free, in ascending order.
#[must_use]
pub fn free_ports(devices: &[Device]) -> Vec<RelayPort> {
    let used = used_ports(devices);
    RelayPort::all().filter(|p| !used.contains(p)).collect()
}
