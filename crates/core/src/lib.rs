//! # Linkpage Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the record store and blob storage
//! - The profile/link data gateway
//! - Reorder coordination, upload pipeline and dashboard editor state
//! - Explicit session context and mutation sequencing
//!
//! ## Architecture Principles
//! - Only depends on `linkpage-common` and `linkpage-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod editor;
pub mod profile;
pub mod reorder;
pub mod session;
pub mod upload;
pub mod validation;

pub use editor::{DashboardEditor, Notification, Notifier};
pub use profile::{ImageRepository, LinkRepository, ProfileGateway, ProfileRepository};
pub use reorder::{move_item, ReorderCoordinator, ReorderOutcome};
pub use session::{MutationSequencer, MutationTicket, Session, SessionManager};
pub use upload::{
    BlobStorage, CropArea, ImageTransform, UploadFile, UploadKind, UploadOutcome, UploadPipeline,
};
pub use validation::LinkDraft;
