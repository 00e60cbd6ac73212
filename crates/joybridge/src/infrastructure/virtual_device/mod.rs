//! Virtual device sinks.
//!
//! The uinput implementation is compiled on Linux only; the recording sink is
//! available everywhere.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod uinput;
