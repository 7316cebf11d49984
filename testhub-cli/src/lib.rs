//! Shared pieces of the `testhub` binary: logging, platform paths and
//! terminal rendering.

pub mod logging;
pub mod paths;
pub mod render;
