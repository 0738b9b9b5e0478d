//! Central module for the application's shared API plumbing.
//!
//! Response envelopes and error-to-HTTP mapping live here; the core
//! authentication routes themselves are handled in the `auth` module.

pub mod common;
