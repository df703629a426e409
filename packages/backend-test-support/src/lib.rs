//! Backend test support utilities
//!
//! Shared logging bootstrap for the backend's unit and integration tests.

pub mod logging;
