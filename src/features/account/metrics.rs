use chrono::NaiveDate;

use crate::error::ClientError;
use crate::features::reports::query::{ReportQuery, ReportTarget};
use crate::features::reports::{client, shaper, Grouping, Metric, MetricSeries, ReportOptions};

use super::models::Account;

/// 频道维度的指标门面（作用于账号名下的全部内容）。
///
/// 选项语义与视频维度完全一致，仅查询对象不同。
impl Account {
    async fn report(&self, metric: Metric, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        let query = ReportQuery::build(
            metric,
            &opts,
            ReportTarget::Channel,
            self.session().config().reports.floor_date,
        )?;
        let table = client::run_report(self.session(), &query).await?;
        Ok(shaper::shape(&query, table)?)
    }

    async fn count_on(&self, metric: Metric, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        let opts = ReportOptions::new().since(date).until(date).by(Grouping::Day);
        match self.report(metric, opts).await? {
            MetricSeries::ByDay(mut map) => Ok(map.remove(&date).and_then(|v| v.as_count())),
            _ => Err(ClientError::InvalidResponse(
                "按日查询返回了意外的结果形态".to_string(),
            )),
        }
    }

    async fn rate_on(&self, metric: Metric, date: NaiveDate) -> Result<Option<f64>, ClientError> {
        let opts = ReportOptions::new().since(date).until(date).by(Grouping::Day);
        match self.report(metric, opts).await? {
            MetricSeries::ByDay(mut map) => Ok(map.remove(&date).and_then(|v| v.as_rate())),
            _ => Err(ClientError::InvalidResponse(
                "按日查询返回了意外的结果形态".to_string(),
            )),
        }
    }

    /// 观看次数
    pub async fn views(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Views, opts).await
    }

    pub async fn views_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Views, date).await
    }

    /// 评论数
    pub async fn comments(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Comments, opts).await
    }

    pub async fn comments_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Comments, date).await
    }

    /// 点赞数
    pub async fn likes(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Likes, opts).await
    }

    pub async fn likes_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Likes, date).await
    }

    /// 点踩数
    pub async fn dislikes(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Dislikes, opts).await
    }

    pub async fn dislikes_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Dislikes, date).await
    }

    /// 分享数
    pub async fn shares(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Shares, opts).await
    }

    pub async fn shares_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Shares, date).await
    }

    /// 预估收益（需要内容所有者身份）
    pub async fn earnings(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Earnings, opts).await
    }

    pub async fn earnings_on(&self, date: NaiveDate) -> Result<Option<f64>, ClientError> {
        self.rate_on(Metric::Earnings, date).await
    }

    /// 广告展示次数
    pub async fn impressions(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Impressions, opts).await
    }

    pub async fn impressions_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Impressions, date).await
    }

    /// 预估观看时长（分钟）
    pub async fn estimated_minutes_watched(
        &self,
        opts: ReportOptions,
    ) -> Result<MetricSeries, ClientError> {
        self.report(Metric::EstimatedMinutesWatched, opts).await
    }

    pub async fn estimated_minutes_watched_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<f64>, ClientError> {
        self.rate_on(Metric::EstimatedMinutesWatched, date).await
    }

    /// 平均观看时长（秒）
    pub async fn average_view_duration(
        &self,
        opts: ReportOptions,
    ) -> Result<MetricSeries, ClientError> {
        self.report(Metric::AverageViewDuration, opts).await
    }

    pub async fn average_view_duration_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<f64>, ClientError> {
        self.rate_on(Metric::AverageViewDuration, date).await
    }

    /// 平均观看完成度（百分比）
    pub async fn average_view_percentage(
        &self,
        opts: ReportOptions,
    ) -> Result<MetricSeries, ClientError> {
        self.report(Metric::AverageViewPercentage, opts).await
    }

    pub async fn average_view_percentage_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<f64>, ClientError> {
        self.rate_on(Metric::AverageViewPercentage, date).await
    }

    /// 受众构成（默认按性别 × 年龄段嵌套分组）
    pub async fn viewer_percentage(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::ViewerPercentage, opts).await
    }
}
