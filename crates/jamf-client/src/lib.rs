//! The `jamf-client` library crate provides a set of APIs for interacting
//! with a Jamf Pro device-management server.
//!
//! Core functionalities of this crate include:
//!
//! - Retrieving an authentication token
//! - Listing the mobile devices which belong to a group
//! - Sending a restart command to a mobile device, either returning the
//!   response status code or transmitting a report over a channel
//!
//! Every request is authenticated through `HTTP` basic authentication and
//! consists of a single independent round trip: there are no retries,
//! no caches, and no background tasks.
//!
//! Requests are sent asynchronously with `tokio`. Restart reports are
//! transmitted over a `tokio` multi-producer, single-consumer channel owned by
//! the caller, which is free to spawn one restart task per device and
//! collect all their reports from the same receiver.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// A client for a Jamf Pro server.
pub mod client;
/// Mobile devices and mobile device groups.
pub mod device;
/// Error management.
pub mod error;
/// Restart reports.
pub mod report;
/// Authentication token.
pub mod token;

pub use client::{Client, Credentials};
pub use device::{MobileDevice, MobileDeviceGroup, MobileDevices};
pub use error::{Error, ErrorKind, Result, TRANSPORT_FAILURE_STATUS};
pub use report::{RestartOutcome, RestartReport};
pub use token::TokenResponse;
