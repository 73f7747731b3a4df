use chrono::NaiveDate;

use crate::error::ReportError;

use super::grouping::Grouping;
use super::location::{LocationFilter, LocationInput};
use super::metric::Metric;
use super::period::ReportingPeriod;

/// 报表查询的统一可选项。
///
/// since/until 与 from/to 互为别名；by 缺省时使用指标的默认分组；
/// location 对应 `in:` 地域筛选。
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub by: Option<Grouping>,
    pub location: Option<LocationInput>,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn by(mut self, grouping: Grouping) -> Self {
        self.by = Some(grouping);
        self
    }

    pub fn in_location(mut self, location: impl Into<LocationInput>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// 报表查询的作用对象。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// 单个视频
    Video(String),
    /// 整个频道（或内容所有者名下全部内容）
    Channel,
}

/// 规范化后的报表查询描述符。
///
/// 构造即校验：非法组合在这里被拒绝，之后不再发起任何网络请求。
/// 构造成功后不可变，直接渲染为上游查询参数。
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub metric: Metric,
    pub period: ReportingPeriod,
    pub filter: LocationFilter,
    pub grouping: Grouping,
    pub target: ReportTarget,
}

impl ReportQuery {
    /// 组装并校验查询；floor 为起点缺省时的历史下限日期。
    pub fn build(
        metric: Metric,
        opts: &ReportOptions,
        target: ReportTarget,
        floor: NaiveDate,
    ) -> Result<Self, ReportError> {
        let grouping = opts.by.unwrap_or_else(|| metric.default_grouping());
        if !metric.supported_groupings().contains(&grouping) {
            return Err(ReportError::UnsupportedQuery(format!(
                "指标 {} 不支持按 {grouping:?} 分组",
                metric.name()
            )));
        }

        let filter = LocationFilter::resolve(opts.location.as_ref())?;
        if grouping.occupies_filter_slot() && filter != LocationFilter::None {
            return Err(ReportError::UnsupportedQuery(format!(
                "按 {grouping:?} 分组时不支持叠加地域筛选"
            )));
        }

        let period = ReportingPeriod::resolve(opts, floor)?;

        Ok(Self {
            metric,
            period,
            filter,
            grouping,
            target,
        })
    }

    /// 渲染为上游查询参数；ids 为会话身份（频道或内容所有者）。
    pub(crate) fn to_params(&self, ids: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("ids", ids.to_string()),
            ("start-date", self.period.start.to_string()),
            ("end-date", self.period.end.to_string()),
            ("metrics", self.metric.wire_name().to_string()),
        ];

        if let Some(dims) = self.grouping.wire_dimensions() {
            params.push(("dimensions", dims.to_string()));
        }

        let mut filters: Vec<String> = Vec::new();
        if let ReportTarget::Video(id) = &self.target {
            filters.push(format!("video=={id}"));
        }
        filters.extend(self.filter.wire_pairs());
        if let Some(implied) = self.grouping.implied_filter() {
            filters.push(implied.to_string());
        }
        if !filters.is_empty() {
            params.push(("filters", filters.join(";")));
        }

        params
    }
}
