//! CLI command implementations.

pub mod download;
pub mod init;
pub mod serve;
pub mod status;
