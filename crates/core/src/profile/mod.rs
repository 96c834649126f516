//! Profile, link and image data gateway

pub mod gateway;
pub mod ports;

pub use gateway::ProfileGateway;
pub use ports::{ImageRepository, LinkRepository, ProfileRepository};
