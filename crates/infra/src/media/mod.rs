//! Image processing adapters

pub mod crop;

pub use crop::SquareCropTransform;
