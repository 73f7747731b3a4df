use super::grouping::Grouping;

/// 指标数值类型：计数类为整数，比率/时长/金额类为浮点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Count,
    Rate,
}

/// 报表指标（测试语料覆盖的完整集合；不支持语料之外的指标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Views,
    Uniques,
    Comments,
    Likes,
    Dislikes,
    Shares,
    SubscribersGained,
    SubscribersLost,
    FavoritesAdded,
    FavoritesRemoved,
    Earnings,
    Impressions,
    MonetizedPlaybacks,
    AnnotationClicks,
    AnnotationClickThroughRate,
    AnnotationCloseRate,
    EstimatedMinutesWatched,
    AverageViewDuration,
    AverageViewPercentage,
    ViewerPercentage,
}

/// 观看类指标支持的全部分组（含 detail 类维度）。
const VIEW_GROUPINGS: &[Grouping] = &[
    Grouping::Day,
    Grouping::Range,
    Grouping::Country,
    Grouping::State,
    Grouping::TrafficSource,
    Grouping::PlaybackLocation,
    Grouping::EmbeddedPlayerLocation,
    Grouping::RelatedVideo,
    Grouping::SearchTerm,
    Grouping::DeviceType,
];

/// 互动类指标支持的分组（国家粒度为止）。
const ENGAGEMENT_GROUPINGS: &[Grouping] = &[Grouping::Day, Grouping::Range, Grouping::Country];

/// 注释/观看时长类指标支持的分组（含美国州粒度）。
const STATE_GROUPINGS: &[Grouping] = &[
    Grouping::Day,
    Grouping::Range,
    Grouping::Country,
    Grouping::State,
];

/// 受众构成指标支持的分组。
const DEMOGRAPHIC_GROUPINGS: &[Grouping] = &[
    Grouping::Gender,
    Grouping::AgeGroup,
    Grouping::GenderAgeGroup,
];

impl Metric {
    /// 上游查询的 metrics 参数取值。
    pub(crate) fn wire_name(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Uniques => "uniques",
            Metric::Comments => "comments",
            Metric::Likes => "likes",
            Metric::Dislikes => "dislikes",
            Metric::Shares => "shares",
            Metric::SubscribersGained => "subscribersGained",
            Metric::SubscribersLost => "subscribersLost",
            Metric::FavoritesAdded => "favoritesAdded",
            Metric::FavoritesRemoved => "favoritesRemoved",
            Metric::Earnings => "earnings",
            Metric::Impressions => "adImpressions",
            Metric::MonetizedPlaybacks => "monetizedPlaybacks",
            Metric::AnnotationClicks => "annotationClicks",
            Metric::AnnotationClickThroughRate => "annotationClickThroughRate",
            Metric::AnnotationCloseRate => "annotationCloseRate",
            Metric::EstimatedMinutesWatched => "estimatedMinutesWatched",
            Metric::AverageViewDuration => "averageViewDuration",
            Metric::AverageViewPercentage => "averageViewPercentage",
            Metric::ViewerPercentage => "viewerPercentage",
        }
    }

    /// 调用方视角的指标名（错误信息中使用）。
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Uniques => "uniques",
            Metric::Comments => "comments",
            Metric::Likes => "likes",
            Metric::Dislikes => "dislikes",
            Metric::Shares => "shares",
            Metric::SubscribersGained => "subscribers_gained",
            Metric::SubscribersLost => "subscribers_lost",
            Metric::FavoritesAdded => "favorites_added",
            Metric::FavoritesRemoved => "favorites_removed",
            Metric::Earnings => "earnings",
            Metric::Impressions => "impressions",
            Metric::MonetizedPlaybacks => "monetized_playbacks",
            Metric::AnnotationClicks => "annotation_clicks",
            Metric::AnnotationClickThroughRate => "annotation_click_through_rate",
            Metric::AnnotationCloseRate => "annotation_close_rate",
            Metric::EstimatedMinutesWatched => "estimated_minutes_watched",
            Metric::AverageViewDuration => "average_view_duration",
            Metric::AverageViewPercentage => "average_view_percentage",
            Metric::ViewerPercentage => "viewer_percentage",
        }
    }

    /// 数值类型固定于指标本身：计数类整数，比率/时长/金额类浮点。
    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Views
            | Metric::Uniques
            | Metric::Comments
            | Metric::Likes
            | Metric::Dislikes
            | Metric::Shares
            | Metric::SubscribersGained
            | Metric::SubscribersLost
            | Metric::FavoritesAdded
            | Metric::FavoritesRemoved
            | Metric::Impressions
            | Metric::MonetizedPlaybacks
            | Metric::AnnotationClicks => MetricKind::Count,
            Metric::Earnings
            | Metric::AnnotationClickThroughRate
            | Metric::AnnotationCloseRate
            | Metric::EstimatedMinutesWatched
            | Metric::AverageViewDuration
            | Metric::AverageViewPercentage
            | Metric::ViewerPercentage => MetricKind::Rate,
        }
    }

    /// `by:` 缺省时的默认分组。
    pub(crate) fn default_grouping(&self) -> Grouping {
        match self {
            Metric::ViewerPercentage => Grouping::GenderAgeGroup,
            _ => Grouping::Day,
        }
    }

    /// 该指标允许的分组集合（上游维度模型决定）。
    pub(crate) fn supported_groupings(&self) -> &'static [Grouping] {
        match self {
            Metric::Views | Metric::EstimatedMinutesWatched => VIEW_GROUPINGS,
            Metric::Uniques => &[Grouping::Day],
            Metric::AnnotationClicks
            | Metric::AnnotationClickThroughRate
            | Metric::AnnotationCloseRate
            | Metric::AverageViewDuration
            | Metric::AverageViewPercentage => STATE_GROUPINGS,
            Metric::ViewerPercentage => DEMOGRAPHIC_GROUPINGS,
            _ => ENGAGEMENT_GROUPINGS,
        }
    }
}
