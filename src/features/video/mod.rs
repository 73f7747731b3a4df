pub mod advertising;
pub mod metrics;
pub mod models;

pub use advertising::AdvertisingOptions;
pub use models::{Video, VideoRef, VideoSnippet};
