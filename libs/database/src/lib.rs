//! Database connectivity for the user API.
//!
//! Currently a single backend: MongoDB. The module exposes connection
//! management, environment-driven configuration and health probes.

pub mod mongodb;
