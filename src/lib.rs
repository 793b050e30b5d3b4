//! AGI helper that resolves a dialled number to a routable destination
//! via the Serval DNA resolver.
//!
//! The engine hands us three positional arguments (resolver binary path,
//! instance directory, number), we fork `servald dna lookup <number>`,
//! parse the first line of its output into a scheme-qualified address and
//! answer over the AGI dialogue with `SDNAAGI_STATUS` and, when resolved,
//! `SDNAAGI_DEST`.

pub mod address;
pub mod args;
pub mod dialogue;
pub mod error;
pub mod exec;
pub mod resolver;

pub use dialogue::run;
pub use error::{AgiError, Result};
