pub mod client;
pub mod grouping;
pub mod location;
pub mod metric;
pub mod models;
pub mod period;
pub mod query;
pub mod shaper;

// Re-exports for external use (lib.rs, facades)
pub use grouping::{AgeGroup, DeviceType, Gender, Grouping, PlaybackLocation, TrafficSource};
pub use location::{LocationFilter, LocationInput};
pub use metric::{Metric, MetricKind};
pub use models::{ColumnHeader, MetricSeries, MetricValue, ReportTable};
pub use period::ReportingPeriod;
pub use query::{ReportOptions, ReportQuery, ReportTarget};
