//! Core type definitions used across the BlockIdle workspace.

pub mod id;

pub use id::*;
