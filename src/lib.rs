//! Local HTTPS static file server for testing secure-context browser
//! features (camera, microphone) from other devices on the LAN.

pub mod config;
pub mod listing;
pub mod net;
pub mod routes;
pub mod server;
