// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device control state synchronizer.
//!
//! Orchestrates create/toggle/delete mutations against the remote API and
//! reconciles the local [`Directory`] afterward. No operation mutates a
//! cached record in place: every mutation round-trips through the server
//! and comes back via a full refresh, so the local view can never diverge
//! from server-authoritative state.

use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::debounce::Debouncer;
use crate::device::{Device, DeviceDraft};
use crate::directory::Directory;
use crate::error::{Result, ValidationError};
use crate::ports;
use crate::types::{DeviceId, RelayPort};

/// Coordinates mutations and keeps the local device view consistent.
///
/// Cheaply cloneable; clones share the directory, the debouncer and the
/// underlying HTTP connection pool. The presentation layer reads the
/// snapshot accessors ([`devices`](Self::devices), [`used_ports`](Self::used_ports),
/// [`is_full`](Self::is_full), [`in_flight`](Self::in_flight)) and feeds
/// user intents into [`create_device`](Self::create_device),
/// [`on_toggle_intent`](Self::on_toggle_intent) and
/// [`delete_device`](Self::delete_device); it never writes shared state
/// directly.
///
/// # Examples
///
/// ```no_run
/// use homelink_lib::{ApiClient, DeviceDraft, Synchronizer};
/// use homelink_lib::types::DeviceKind;
///
/// #[tokio::main]
/// async fn main() -> homelink_lib::Result<()> {
///     let api = ApiClient::new("192.168.1.10:3000")?;
///     let sync = Synchronizer::new(api);
///
///     sync.refresh().await?;
///     for device in sync.devices().iter() {
///         println!("{} on port {}", device.name, device.relay_port);
///     }
///
///     let draft = DeviceDraft::new("Bedroom Fan", DeviceKind::Fan, "2");
///     sync.create_device(&draft).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Synchronizer {
    inner: Arc<SynchronizerInner>,
}

#[derive(Debug)]
struct SynchronizerInner {
    api: ApiClient,
    directory: Directory,
    debouncer: Debouncer,
}

impl Synchronizer {
    /// Creates a synchronizer with the default debounce window.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self::with_debounce_window(api, Debouncer::DEFAULT_WINDOW)
    }

    /// Creates a synchronizer with a custom toggle debounce window.
    #[must_use]
    pub fn with_debounce_window(api: ApiClient, window: Duration) -> Self {
        let directory = Directory::new(api.clone());
        Self {
            inner: Arc::new(SynchronizerInner {
                api,
                directory,
                debouncer: Debouncer::with_window(window),
            }),
        }
    }

    // =========================================================================
    // Read accessors (for the presentation collaborator)
    // =========================================================================

    /// Returns the current device snapshot.
    #[must_use]
    pub fn devices(&self) -> Arc<Vec<Device>> {
        self.inner.directory.snapshot()
    }

    /// Returns the relay ports currently occupied.
    #[must_use]
    pub fn used_ports(&self) -> std::collections::BTreeSet<RelayPort> {
        ports::used_ports(&self.devices())
    }

    /// Returns `true` iff every relay port is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        ports::is_full(&self.devices())
    }

    /// Returns `true` if no device occupies the given port.
    #[must_use]
    pub fn is_available(&self, port: RelayPort) -> bool {
        ports::is_available(&self.devices(), port)
    }

    /// Returns `true` while a toggle intent for the device is pending in
    /// its debounce window or executing.
    #[must_use]
    pub fn in_flight(&self, id: DeviceId) -> bool {
        self.inner.debouncer.in_flight(id)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Refetches the complete device set from the server.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot is retained.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.directory.refresh().await
    }

    /// Validates a creation draft and, if it passes, creates the device.
    ///
    /// Validation covers the draft fields (non-empty name, selected type,
    /// parseable in-range port) and the port-allocation invariant against
    /// the current snapshot. A validation failure is reported without any
    /// network call. On server acknowledgment the directory is refreshed;
    /// on server failure the directory is untouched.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] before the network, transport or server errors
    /// after. A refresh failure after a successful create is also
    /// returned; the created device then appears on the next successful
    /// refresh.
    pub async fn create_device(&self, draft: &DeviceDraft) -> Result<Device> {
        let payload = draft.validate()?;

        let snapshot = self.devices();
        if ports::is_full(&snapshot) {
            return Err(ValidationError::NoFreePorts.into());
        }
        if !ports::is_available(&snapshot, payload.relay_port) {
            return Err(ValidationError::PortInUse(payload.relay_port).into());
        }

        let device = self.inner.api.create_device(&payload).await?;
        tracing::debug!(id = %device.id, port = %device.relay_port, "Device created, refreshing");
        self.inner.directory.refresh().await?;
        Ok(device)
    }

    /// Issues a toggle for the device, then refetches the device set.
    ///
    /// The refresh runs unconditionally after the request settles —
    /// whether it succeeded or failed — because the server's toggle
    /// result is authoritative and the new status is never guessed
    /// locally. Prefer [`on_toggle_intent`](Self::on_toggle_intent) for
    /// user input; this method is the undebounced operation it schedules.
    ///
    /// # Errors
    ///
    /// Returns the toggle error if the toggle failed, otherwise any
    /// refresh error.
    pub async fn toggle_device(&self, id: DeviceId) -> Result<()> {
        let result = self.inner.api.toggle_device(id).await;

        if let Err(refresh_err) = self.inner.directory.refresh().await {
            match result {
                // The toggle settled fine; the stale snapshot is the problem.
                Ok(()) => return Err(refresh_err),
                Err(_) => {
                    tracing::warn!(%id, error = %refresh_err, "Refresh after failed toggle also failed");
                }
            }
        }

        result
    }

    /// Deletes the device, then refetches the device set.
    ///
    /// Precondition: the presentation layer has already obtained explicit
    /// user confirmation. On failure the error is reported and the
    /// directory is untouched.
    ///
    /// # Errors
    ///
    /// Returns the delete error, or the refresh error after a successful
    /// delete.
    pub async fn delete_device(&self, id: DeviceId) -> Result<()> {
        self.inner.api.delete_device(id).await?;
        tracing::debug!(%id, "Device deleted, refreshing");
        self.inner.directory.refresh().await
    }

    // =========================================================================
    // Intent entry points
    // =========================================================================

    /// Registers a toggle intent for the device.
    ///
    /// Rapid repeated intents for the same device within the debounce
    /// window collapse into one [`toggle_device`](Self::toggle_device)
    /// call; intents for different devices are independent. The device
    /// reports [`in_flight`](Self::in_flight) from this call until the
    /// eventual toggle settles. Failures of the debounced toggle are
    /// logged, as there is no caller left to receive them.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_toggle_intent(&self, id: DeviceId) {
        let sync = self.clone();
        self.inner.debouncer.dispatch(id, move || async move {
            if let Err(error) = sync.toggle_device(id).await {
                tracing::warn!(%id, %error, "Debounced toggle failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceKind;

    fn synchronizer() -> Synchronizer {
        // Nothing listens on this address; only validation paths run.
        let api = ApiClient::new("127.0.0.1:1").unwrap();
        Synchronizer::new(api)
    }

    #[test]
    fn starts_with_empty_snapshot() {
        let sync = synchronizer();

        assert!(sync.devices().is_empty());
        assert!(sync.used_ports().is_empty());
        assert!(!sync.is_full());
        for port in RelayPort::all() {
            assert!(sync.is_available(port));
        }
        assert!(!sync.in_flight(DeviceId::new(1)));
    }

    #[tokio::test]
    async fn invalid_draft_fails_before_any_network_call() {
        let sync = synchronizer();

        // The API target is unreachable; a network attempt would error
        // with a transport failure, not a validation failure.
        let draft = DeviceDraft::new("", DeviceKind::Light, "1");
        let err = sync.create_device(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Validation(ValidationError::MissingName)
        ));

        let draft = DeviceDraft::new("Lamp", DeviceKind::Light, "9");
        let err = sync.create_device(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Validation(ValidationError::PortOutOfRange { .. })
        ));
    }

    #[test]
    fn clones_share_state() {
        let sync = synchronizer();
        let clone = sync.clone();

        assert!(Arc::ptr_eq(&sync.inner, &clone.inner));
    }
}
