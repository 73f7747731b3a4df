pub mod metrics;
pub mod models;
pub mod videos;

pub use models::{Account, Channel, UserInfo};
pub use videos::{UploadParams, UploadSource};
