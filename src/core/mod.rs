//! Core runtime services.

pub mod logging;
