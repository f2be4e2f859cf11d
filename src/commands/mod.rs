//! # Command Implementations
//!
//! One module per `vendor-fetch` subcommand. Each exposes an `Args` struct
//! for `clap` and an `execute` function that runs against a configured
//! [`vendor_fetch::vendor::Vendorer`].

pub mod delete;
pub mod fetch;
pub mod list;
pub mod resolve;
