//! Service layer for business logic
//!
//! This module provides the external collaborators (geo-IP lookup, email
//! dispatch) and the session-deduplicated location tracker shared between
//! HTTP handlers.

pub mod geoip;
pub mod mailer;
mod track;

pub use geoip::{GeoInfo, GeoIpLookup, GeoIpProvider};
pub use mailer::{build_mailer, Mailer, NoopMailer, ResendMailer};
pub use track::{LocationTracker, TrackedLocation};
