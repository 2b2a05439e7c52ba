//! # blockidle-host
//!
//! Reference host for the BlockIdle plugin boundary. Wires configuration,
//! logging, the bundled plugins and a single-threaded event loop together.

pub mod bootstrap;
pub mod event_loop;
