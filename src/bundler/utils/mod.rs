//! Shared helpers for file handling and external process execution.

pub mod fs;
pub mod process;
