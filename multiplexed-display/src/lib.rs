#![cfg_attr(not(test), no_std)]

pub mod common;
pub mod glyph;
pub mod lines;
pub mod mcp23008;
pub mod refresh;
pub mod segment_display;
pub mod shared;

#[cfg(test)]
pub(crate) mod mocks;
