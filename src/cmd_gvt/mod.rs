//! Subcommand modules for the `gvt` binary.
pub mod layout;
pub mod stat;
