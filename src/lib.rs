// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `HomeLink` Lib - A Rust client for relay-bound smart home devices.
//!
//! This library keeps a local view of a small fleet of home-automation
//! devices (lights, locks, fans, ...) consistent with a remote JSON HTTP
//! API while issuing create/toggle/delete commands. Each device occupies
//! one of six fixed relay ports, and at most one device may hold a port
//! at a time.
//!
//! # Design
//!
//! - **No optimistic mutation**: every mutation round-trips through the
//!   server and the full device set is refetched afterward, so the local
//!   cache can never diverge from server state.
//! - **Debounced toggles**: rapid repeated toggle intents for one device
//!   collapse into a single request (trailing-edge, 1 s quiet window),
//!   while the device reports as in flight for the whole span.
//! - **Port allocation checked first**: creating a device on an occupied
//!   port is rejected client-side before any request is issued.
//!
//! # Quick Start
//!
//! ```no_run
//! use homelink_lib::{ApiClient, DeviceDraft, Synchronizer};
//! use homelink_lib::types::{DeviceId, DeviceKind};
//!
//! #[tokio::main]
//! async fn main() -> homelink_lib::Result<()> {
//!     let api = ApiClient::new("192.168.1.10:3000")?;
//!     let sync = Synchronizer::new(api);
//!
//!     // Load the device directory.
//!     sync.refresh().await?;
//!
//!     // Render from snapshots.
//!     for device in sync.devices().iter() {
//!         println!(
//!             "{} ({}) port {} active={:?}",
//!             device.name,
//!             device.kind,
//!             device.relay_port,
//!             device.is_active(),
//!         );
//!     }
//!
//!     // Toggle on user input; taps within the debounce window coalesce.
//!     sync.on_toggle_intent(DeviceId::new(1));
//!
//!     // Create a device once the draft validates and the port is free.
//!     if !sync.is_full() {
//!         let draft = DeviceDraft::new("Bedroom Fan", DeviceKind::Fan, "2");
//!         sync.create_device(&draft).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod debounce;
mod device;
mod directory;
pub mod error;
pub mod ports;
mod sync;
pub mod types;

pub use api::{ApiClient, ApiConfig};
pub use debounce::Debouncer;
pub use device::{Device, DeviceDraft, NewDevice};
pub use directory::Directory;
pub use error::{Error, Result, ServerError, TransportError, ValidationError};
pub use sync::Synchronizer;
pub use types::{DeviceId, DeviceKind, DeviceStatus, RelayPort};
