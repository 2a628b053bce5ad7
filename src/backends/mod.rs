// SPDX-License-Identifier: MPL-2.0

//! Display backend implementations
//!
//! A backend opens a windowing-system connection and hands the display a
//! native handle to run discovery on:
//!
//! ```text
//! ┌─────────────────────┐
//! │       Display       │
//! └──────────┬──────────┘
//!            │ DisplayBackend
//!            ▼
//! ┌─────────────────────┐
//! │  Fixture (JSON)     │  ← Scripted driver answers
//! └─────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`fixture`]: Driver fixtures loaded from JSON, used by tests and `vaapi-probe`

pub mod fixture;

pub use fixture::{DriverFixture, FixtureBackend, FixtureDisplay};
