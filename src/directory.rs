// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device directory: the authoritative local cache of device records.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::ApiClient;
use crate::device::Device;
use crate::error::Result;
use crate::types::DeviceId;

/// Local cache of the server's device set.
///
/// The directory has no write operation of its own; all mutations happen
/// server-side and are only reflected here through the next successful
/// [`refresh`](Self::refresh). The cached set is replaced wholesale and
/// atomically — readers observe either the entire previous set or the
/// entire new one, never a mix.
#[derive(Debug)]
pub struct Directory {
    client: ApiClient,
    devices: RwLock<Arc<Vec<Device>>>,
}

impl Directory {
    /// Creates an empty directory backed by the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            devices: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Fetches the complete device set and replaces the cache.
    ///
    /// On any failure the previous known-good set is retained unchanged
    /// and the error is returned; the directory never throws away data
    /// on a failed refresh. The lock is only taken after the fetch has
    /// fully settled, so it is never held across a suspension point.
    ///
    /// # Errors
    ///
    /// Returns the transport or server error from the fetch.
    pub async fn refresh(&self) -> Result<()> {
        let devices = self.client.list_devices().await?;
        tracing::debug!(count = devices.len(), "Directory refreshed");
        *self.devices.write() = Arc::new(devices);
        Ok(())
    }

    /// Returns the current device set for read-only consumption.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Device>> {
        Arc::clone(&self.devices.read())
    }

    /// Looks up a device by id in the current snapshot.
    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<Device> {
        self.devices.read().iter().find(|d| d.id == id).cloned()
    }

    /// Number of devices in the current snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns `true` if the current snapshot holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_directory_is_empty() {
        let client = ApiClient::new("127.0.0.1:1").unwrap();
        let directory = Directory::new(client);

        assert!(directory.is_empty());
        assert_eq!(directory.len(), 0);
        assert!(directory.snapshot().is_empty());
        assert!(directory.device(DeviceId::new(1)).is_none());
    }

    #[tokio::test]
    async fn failed_refresh_retains_empty_snapshot() {
        // Nothing listens on this address; the fetch fails.
        let client = ApiClient::new("127.0.0.1:1").unwrap();
        let directory = Directory::new(client);

        let before = directory.snapshot();
        assert!(directory.refresh().await.is_err());
        assert_eq!(directory.snapshot(), before);
    }

    #[test]
    fn snapshot_is_stable_across_clones() {
        let client = ApiClient::new("127.0.0.1:1").unwrap();
        let directory = Directory::new(client);

        let a = directory.snapshot();
        let b = directory.snapshot();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
