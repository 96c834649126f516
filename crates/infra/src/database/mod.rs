//! Database implementations

pub mod image_repository;
pub mod link_repository;
pub mod manager;
pub mod profile_repository;
mod statements;

pub use image_repository::SqliteImageRepository;
pub use link_repository::SqliteLinkRepository;
pub use manager::DbManager;
pub use profile_repository::SqliteProfileRepository;
