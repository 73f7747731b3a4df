use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ReportError;
use crate::features::video::VideoRef;

use super::grouping::{AgeGroup, DeviceType, Gender, Grouping, PlaybackLocation, TrafficSource};
use super::metric::MetricKind;
use super::models::{MetricSeries, MetricValue, ReportTable};
use super::query::ReportQuery;

/// 将上游表格整形为查询分组对应的带键结果。
///
/// - 不假定行序（上游行序对分组无意义）；
/// - rows 缺失视为无数据，而非零；上游明确给出的零值原样保留；
/// - 封闭词表中出现未知代码按无效响应处理。
pub fn shape(query: &ReportQuery, table: ReportTable) -> Result<MetricSeries, ReportError> {
    let expected_cols = query.grouping.dimension_columns() + 1;
    if !table.column_headers.is_empty() && table.column_headers.len() != expected_cols {
        return Err(ReportError::InvalidResponse(format!(
            "响应列数 {} 与 {:?} 分组不符（期望 {expected_cols} 列）",
            table.column_headers.len(),
            query.grouping
        )));
    }

    let rows = table.rows.unwrap_or_default();
    for row in &rows {
        if row.len() != expected_cols {
            return Err(ReportError::InvalidResponse(format!(
                "行宽 {} 与 {:?} 分组不符（期望 {expected_cols} 列）",
                row.len(),
                query.grouping
            )));
        }
    }

    let kind = query.metric.kind();
    match query.grouping {
        Grouping::Range => shape_total(&rows, kind),
        Grouping::Day => shape_by_day(&rows, kind),
        Grouping::Country => Ok(MetricSeries::ByCountry(shape_by_code(&rows, kind, false)?)),
        Grouping::State => Ok(MetricSeries::ByState(shape_by_code(&rows, kind, true)?)),
        Grouping::TrafficSource => shape_by_traffic_source(&rows, kind),
        Grouping::PlaybackLocation => shape_by_playback_location(&rows, kind),
        Grouping::DeviceType => shape_by_device_type(&rows, kind),
        Grouping::EmbeddedPlayerLocation => {
            Ok(MetricSeries::ByReferrer(shape_by_text(&rows, kind)?))
        }
        Grouping::SearchTerm => Ok(MetricSeries::BySearchTerm(shape_by_text(&rows, kind)?)),
        Grouping::RelatedVideo => shape_by_related_video(&rows, kind),
        Grouping::Gender => shape_by_gender(&rows),
        Grouping::AgeGroup => shape_by_age_group(&rows),
        Grouping::GenderAgeGroup => shape_by_gender_age_group(&rows),
    }
}

fn shape_total(rows: &[Vec<Value>], kind: MetricKind) -> Result<MetricSeries, ReportError> {
    match rows {
        [] => Ok(MetricSeries::Total(None)),
        [row] => Ok(MetricSeries::Total(Some(metric_value(&row[0], kind)?))),
        _ => Err(ReportError::InvalidResponse(format!(
            "聚合查询返回了 {} 行",
            rows.len()
        ))),
    }
}

fn shape_by_day(rows: &[Vec<Value>], kind: MetricKind) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let date: NaiveDate = dim_str(&row[0])?.parse().map_err(|_| {
            ReportError::InvalidResponse(format!("无法解析日期维度值: {}", row[0]))
        })?;
        map.insert(date, metric_value(&row[1], kind)?);
    }
    Ok(MetricSeries::ByDay(map))
}

/// 国家/州两类代码键；州代码需剥离上游的 US- 前缀。
fn shape_by_code(
    rows: &[Vec<Value>],
    kind: MetricKind,
    strip_us_prefix: bool,
) -> Result<BTreeMap<String, MetricValue>, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let code = dim_str(&row[0])?;
        let key = if strip_us_prefix {
            code.strip_prefix("US-").unwrap_or(code)
        } else {
            code
        };
        map.insert(key.to_string(), metric_value(&row[1], kind)?);
    }
    Ok(map)
}

fn shape_by_text(
    rows: &[Vec<Value>],
    kind: MetricKind,
) -> Result<BTreeMap<String, MetricValue>, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        map.insert(dim_str(&row[0])?.to_string(), metric_value(&row[1], kind)?);
    }
    Ok(map)
}

fn shape_by_traffic_source(
    rows: &[Vec<Value>],
    kind: MetricKind,
) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let code = dim_str(&row[0])?;
        let source = TrafficSource::from_code(code).ok_or_else(|| {
            ReportError::InvalidResponse(format!("未知的流量来源代码: {code}"))
        })?;
        map.insert(source, metric_value(&row[1], kind)?);
    }
    Ok(MetricSeries::ByTrafficSource(map))
}

fn shape_by_playback_location(
    rows: &[Vec<Value>],
    kind: MetricKind,
) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let code = dim_str(&row[0])?;
        let location = PlaybackLocation::from_code(code).ok_or_else(|| {
            ReportError::InvalidResponse(format!("未知的播放位置代码: {code}"))
        })?;
        map.insert(location, metric_value(&row[1], kind)?);
    }
    Ok(MetricSeries::ByPlaybackLocation(map))
}

fn shape_by_device_type(
    rows: &[Vec<Value>],
    kind: MetricKind,
) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        let code = dim_str(&row[0])?;
        let device = DeviceType::from_code(code).ok_or_else(|| {
            ReportError::InvalidResponse(format!("未知的设备类型代码: {code}"))
        })?;
        map.insert(device, metric_value(&row[1], kind)?);
    }
    Ok(MetricSeries::ByDeviceType(map))
}

fn shape_by_related_video(
    rows: &[Vec<Value>],
    kind: MetricKind,
) -> Result<MetricSeries, ReportError> {
    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let id = dim_str(&row[0])?;
        entries.push((VideoRef::new(id), metric_value(&row[1], kind)?));
    }
    Ok(MetricSeries::ByRelatedVideo(entries))
}

fn shape_by_gender(rows: &[Vec<Value>]) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        map.insert(gender_at(&row[0])?, rate_value(&row[1])?);
    }
    Ok(MetricSeries::ByGender(map))
}

fn shape_by_age_group(rows: &[Vec<Value>]) -> Result<MetricSeries, ReportError> {
    let mut map = BTreeMap::new();
    for row in rows {
        map.insert(age_group_at(&row[0])?, rate_value(&row[1])?);
    }
    Ok(MetricSeries::ByAgeGroup(map))
}

fn shape_by_gender_age_group(rows: &[Vec<Value>]) -> Result<MetricSeries, ReportError> {
    let mut map: BTreeMap<Gender, BTreeMap<AgeGroup, f64>> = BTreeMap::new();
    for row in rows {
        let gender = gender_at(&row[0])?;
        let bracket = age_group_at(&row[1])?;
        map.entry(gender)
            .or_default()
            .insert(bracket, rate_value(&row[2])?);
    }
    Ok(MetricSeries::ByGenderAgeGroup(map))
}

// =============== 单元格取值辅助 ===============

fn dim_str(cell: &Value) -> Result<&str, ReportError> {
    cell.as_str()
        .ok_or_else(|| ReportError::InvalidResponse(format!("期望字符串维度值, 得到 {cell}")))
}

fn gender_at(cell: &Value) -> Result<Gender, ReportError> {
    let code = dim_str(cell)?;
    Gender::from_code(code)
        .ok_or_else(|| ReportError::InvalidResponse(format!("未知的性别取值: {code}")))
}

fn age_group_at(cell: &Value) -> Result<AgeGroup, ReportError> {
    let code = dim_str(cell)?;
    AgeGroup::from_code(code)
        .ok_or_else(|| ReportError::InvalidResponse(format!("未知的年龄段取值: {code}")))
}

fn metric_value(cell: &Value, kind: MetricKind) -> Result<MetricValue, ReportError> {
    match kind {
        MetricKind::Count => count_value(cell).map(MetricValue::Count),
        MetricKind::Rate => rate_value(cell).map(MetricValue::Rate),
    }
}

fn count_value(cell: &Value) -> Result<i64, ReportError> {
    if let Some(n) = cell.as_i64() {
        return Ok(n);
    }
    // 上游偶尔把整数指标编码为 10.0 这样的浮点字面量。
    if let Some(f) = cell.as_f64() {
        if f.fract() == 0.0 {
            return Ok(f as i64);
        }
    }
    Err(ReportError::InvalidResponse(format!(
        "期望整数指标值, 得到 {cell}"
    )))
}

fn rate_value(cell: &Value) -> Result<f64, ReportError> {
    cell.as_f64()
        .ok_or_else(|| ReportError::InvalidResponse(format!("期望数值指标值, 得到 {cell}")))
}
