//! Route handlers - HTTP to gateway bridge

mod catalog;
mod health;
mod images;
mod links;
mod profile;
mod uploads;

pub use catalog::*;
pub use health::*;
pub use images::*;
pub use links::*;
pub use profile::*;
pub use uploads::*;
