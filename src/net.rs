//! src/net.rs
//!
//! Network-facing pieces: the remote control server.

pub mod remote;

pub use remote::remote_server;
