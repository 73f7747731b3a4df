use chrono::NaiveDate;

use crate::error::ClientError;
use crate::features::reports::query::{ReportQuery, ReportTarget};
use crate::features::reports::{client, shaper, Grouping, Metric, MetricSeries, ReportOptions};

use super::models::Video;

/// 视频维度的指标门面。
///
/// 每个方法对应一个指标，统一接受 ReportOptions（since/until/from/to/by/in）；
/// `<metric>_on` 为单日便捷形式，无数据时返回 None（区别于 0 与错误）。
/// 每次调用恰好发起一次上游报表查询。
impl Video {
    async fn report(&self, metric: Metric, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        let query = ReportQuery::build(
            metric,
            &opts,
            ReportTarget::Video(self.id().to_string()),
            self.session().config().reports.floor_date,
        )?;
        let table = client::run_report(self.session(), &query).await?;
        Ok(shaper::shape(&query, table)?)
    }

    /// 计数类指标的单日取值。
    async fn count_on(&self, metric: Metric, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        let opts = ReportOptions::new().since(date).until(date).by(Grouping::Day);
        match self.report(metric, opts).await? {
            MetricSeries::ByDay(mut map) => Ok(map.remove(&date).and_then(|v| v.as_count())),
            _ => Err(ClientError::InvalidResponse(
                "按日查询返回了意外的结果形态".to_string(),
            )),
        }
    }

    /// 比率/时长/金额类指标的单日取值。
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

    /// 指定单日的观看次数
    pub async fn views_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::Views, date).await
    }

    /// 独立观看人数（仅支持按日分组）
    pub async fn uniques(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Uniques, opts).await
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

    /// 新增订阅数
    pub async fn subscribers_gained(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::SubscribersGained, opts).await
    }

    pub async fn subscribers_gained_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::SubscribersGained, date).await
    }

    /// 流失订阅数
    pub async fn subscribers_lost(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::SubscribersLost, opts).await
    }

    pub async fn subscribers_lost_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::SubscribersLost, date).await
    }

    /// 新增收藏数
    pub async fn favorites_added(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::FavoritesAdded, opts).await
    }

    pub async fn favorites_added_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::FavoritesAdded, date).await
    }

    /// 移除收藏数
    pub async fn favorites_removed(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::FavoritesRemoved, opts).await
    }

    pub async fn favorites_removed_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::FavoritesRemoved, date).await
    }

    /// 预估收益（需要内容所有者身份）
    pub async fn earnings(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::Earnings, opts).await
    }

    /// 指定单日的预估收益；未合作期/未来日期无数据，返回 None
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

    /// 货币化播放次数
    pub async fn monetized_playbacks(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::MonetizedPlaybacks, opts).await
    }

    pub async fn monetized_playbacks_on(&self, date: NaiveDate) -> Result<Option<i64>, ClientError> {
        self.count_on(Metric::MonetizedPlaybacks, date).await
    }

    /// 注释点击数
    pub async fn annotation_clicks(&self, opts: ReportOptions) -> Result<MetricSeries, ClientError> {
        self.report(Metric::AnnotationClicks, opts).await
    }

    /// 注释点击率
    pub async fn annotation_click_through_rate(
        &self,
        opts: ReportOptions,
    ) -> Result<MetricSeries, ClientError> {
        self.report(Metric::AnnotationClickThroughRate, opts).await
    }

    /// 注释关闭率
    pub async fn annotation_close_rate(
        &self,
        opts: ReportOptions,
    ) -> Result<MetricSeries, ClientError> {
        self.report(Metric::AnnotationCloseRate, opts).await
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
