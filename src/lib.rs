/// 统一错误处理模块
pub mod error;

/// 配置模块
pub mod config;

/// 功能聚合模块
pub mod features;

/// 会话模块
pub mod session;

/// HTTP Client 复用工具
pub mod http;

// 导出常用类型供外部使用
pub use config::AppConfig;
pub use error::{ClientError, ReportError};
pub use features::account::{Account, Channel, UploadParams, UploadSource, UserInfo};
pub use features::reports::{
    AgeGroup, DeviceType, Gender, Grouping, LocationFilter, LocationInput, Metric, MetricKind,
    MetricSeries, MetricValue, PlaybackLocation, ReportOptions, ReportingPeriod, TrafficSource,
};
pub use features::video::{AdvertisingOptions, Video, VideoRef};
pub use session::Session;
