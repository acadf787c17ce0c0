pub mod draft;
pub mod model;
pub mod version;

pub use draft::{AppSnapshot, Draft};
pub use model::Model;
pub use version::GeneratedVersion;
