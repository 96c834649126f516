//! Image upload pipeline

pub mod pipeline;
pub mod ports;

pub use pipeline::{storage_path, UploadFile, UploadKind, UploadOutcome, UploadPipeline};
pub use ports::{BlobStorage, CropArea, ImageTransform};
