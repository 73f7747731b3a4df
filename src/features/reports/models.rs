use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::features::video::VideoRef;

use super::grouping::{AgeGroup, DeviceType, Gender, PlaybackLocation, TrafficSource};

/// 上游报表响应的列头。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub name: String,
    #[serde(default)]
    pub column_type: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
}

/// 上游报表响应的表格本体。
///
/// rows 缺失或为空表示“无数据”，不等于零；维度列在前，指标值列在最后；
/// 行序不做任何保证。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTable {
    #[serde(default)]
    pub column_headers: Vec<ColumnHeader>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<serde_json::Value>>>,
}

/// 指标值：计数类指标为整数，比率/时长/金额类为浮点。
///
/// 零值与“无数据”严格区分：无数据的日期/维度取值在结果映射中不出现。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(i64),
    Rate(f64),
}

impl MetricValue {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Rate(_) => None,
        }
    }

    pub fn as_rate(&self) -> Option<f64> {
        match self {
            Self::Rate(v) => Some(*v),
            Self::Count(_) => None,
        }
    }
}

/// 整形后的报表结果：每种分组方式对应一种键形态。
#[derive(Debug, Clone, PartialEq)]
pub enum MetricSeries {
    /// by=range：整个区间聚合为单一 total（上游无数据时为空）
    Total(Option<MetricValue>),
    ByDay(BTreeMap<NaiveDate, MetricValue>),
    ByCountry(BTreeMap<String, MetricValue>),
    ByState(BTreeMap<String, MetricValue>),
    ByTrafficSource(BTreeMap<TrafficSource, MetricValue>),
    ByPlaybackLocation(BTreeMap<PlaybackLocation, MetricValue>),
    ByDeviceType(BTreeMap<DeviceType, MetricValue>),
    /// 嵌入播放器所在页面（自由文本）
    ByReferrer(BTreeMap<String, MetricValue>),
    BySearchTerm(BTreeMap<String, MetricValue>),
    /// 相关视频：键是惰性引用，整形阶段不取回完整对象
    ByRelatedVideo(Vec<(VideoRef, MetricValue)>),
    ByGender(BTreeMap<Gender, f64>),
    ByAgeGroup(BTreeMap<AgeGroup, f64>),
    ByGenderAgeGroup(BTreeMap<Gender, BTreeMap<AgeGroup, f64>>),
}

impl MetricSeries {
    /// by=range 的聚合值。
    pub fn total(&self) -> Option<MetricValue> {
        match self {
            Self::Total(v) => *v,
            _ => None,
        }
    }

    pub fn by_day(&self) -> Option<&BTreeMap<NaiveDate, MetricValue>> {
        match self {
            Self::ByDay(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_country(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            Self::ByCountry(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_state(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            Self::ByState(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_traffic_source(&self) -> Option<&BTreeMap<TrafficSource, MetricValue>> {
        match self {
            Self::ByTrafficSource(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_playback_location(&self) -> Option<&BTreeMap<PlaybackLocation, MetricValue>> {
        match self {
            Self::ByPlaybackLocation(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_device_type(&self) -> Option<&BTreeMap<DeviceType, MetricValue>> {
        match self {
            Self::ByDeviceType(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_referrer(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            Self::ByReferrer(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_search_term(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            Self::BySearchTerm(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_related_video(&self) -> Option<&[(VideoRef, MetricValue)]> {
        match self {
            Self::ByRelatedVideo(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn by_gender(&self) -> Option<&BTreeMap<Gender, f64>> {
        match self {
            Self::ByGender(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_age_group(&self) -> Option<&BTreeMap<AgeGroup, f64>> {
        match self {
            Self::ByAgeGroup(map) => Some(map),
            _ => None,
        }
    }

    pub fn by_gender_age_group(&self) -> Option<&BTreeMap<Gender, BTreeMap<AgeGroup, f64>>> {
        match self {
            Self::ByGenderAgeGroup(map) => Some(map),
            _ => None,
        }
    }

    /// 结果条目数。Total 形态恒为 1（单一 total 槽位）。
    pub fn len(&self) -> usize {
        match self {
            Self::Total(_) => 1,
            Self::ByDay(map) => map.len(),
            Self::ByCountry(map) | Self::ByState(map) | Self::ByReferrer(map)
            | Self::BySearchTerm(map) => map.len(),
            Self::ByTrafficSource(map) => map.len(),
            Self::ByPlaybackLocation(map) => map.len(),
            Self::ByDeviceType(map) => map.len(),
            Self::ByRelatedVideo(entries) => entries.len(),
            Self::ByGender(map) => map.len(),
            Self::ByAgeGroup(map) => map.len(),
            Self::ByGenderAgeGroup(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Total(v) => v.is_none(),
            _ => self.len() == 0,
        }
    }
}
