use chrono::{Days, NaiveDate, Utc};

use crate::error::ReportError;

use super::query::ReportOptions;

/// 归一化后的报表统计区间（两端均含）。
///
/// 由调用方给出的 {since|from, until|to} 别名组解析而来：
/// - 起点缺省：使用配置的历史下限日期（floor_date，平台上线日）；
/// - 终点缺省：取请求时刻（UTC）的前一天——当日数据尚未定稿；
/// - 同一端同时给出两个别名且取值不同：参数校验错误（取值相同则接受）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    /// 从查询可选项解析区间；floor 为起点缺省时的历史下限。
    pub fn resolve(opts: &ReportOptions, floor: NaiveDate) -> Result<Self, ReportError> {
        let start = merge_alias("since", opts.since, "from", opts.from)?;
        let end = merge_alias("until", opts.until, "to", opts.to)?;

        let start = start.unwrap_or(floor);
        let end = end.unwrap_or_else(yesterday_utc);

        if start > end {
            return Err(ReportError::InvalidRange(format!(
                "起始日期 {start} 晚于结束日期 {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// 区间覆盖的日历天数。
    pub fn num_days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// 区间内的日历天序列（含两端）。
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.num_days() as usize)
    }
}

/// 同一端的两个别名合并为一个取值；冲突即报错。
fn merge_alias(
    name_a: &str,
    a: Option<NaiveDate>,
    name_b: &str,
    b: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, ReportError> {
    match (a, b) {
        (Some(x), Some(y)) if x != y => Err(ReportError::Validation(format!(
            "{name_a}={x} 与 {name_b}={y} 互相冲突"
        ))),
        (Some(x), _) => Ok(Some(x)),
        (None, y) => Ok(y),
    }
}

fn yesterday_utc() -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .expect("当前日期减一天不会越界")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::ReportOptions;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    const FLOOR: &str = "2005-02-14";

    #[test]
    fn since_and_until_are_inclusive() {
        let opts = ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-03"));
        let period = ReportingPeriod::resolve(&opts, d(FLOOR)).unwrap();
        assert_eq!(period.start, d("2021-01-01"));
        assert_eq!(period.end, d("2021-01-03"));
        assert_eq!(period.num_days(), 3);
        let days: Vec<_> = period.days().collect();
        assert_eq!(days, vec![d("2021-01-01"), d("2021-01-02"), d("2021-01-03")]);
    }

    #[test]
    fn from_and_to_are_aliases() {
        let a = ReportOptions::new().since(d("2021-01-01")).until(d("2021-01-03"));
        let b = ReportOptions::new().from(d("2021-01-01")).to(d("2021-01-03"));
        let floor = d(FLOOR);
        assert_eq!(
            ReportingPeriod::resolve(&a, floor).unwrap(),
            ReportingPeriod::resolve(&b, floor).unwrap()
        );
    }

    #[test]
    fn missing_start_falls_back_to_floor() {
        let opts = ReportOptions::new().until(d("2021-01-03"));
        let period = ReportingPeriod::resolve(&opts, d(FLOOR)).unwrap();
        assert_eq!(period.start, d(FLOOR));
    }

    #[test]
    fn missing_end_falls_back_to_yesterday() {
        let opts = ReportOptions::new().since(d("2021-01-01"));
        let period = ReportingPeriod::resolve(&opts, d(FLOOR)).unwrap();
        assert_eq!(period.end, yesterday_utc());
    }

    #[test]
    fn conflicting_aliases_are_rejected() {
        let opts = ReportOptions::new().since(d("2021-01-01")).from(d("2021-01-02"));
        let err = ReportingPeriod::resolve(&opts, d(FLOOR)).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[test]
    fn identical_aliases_are_accepted() {
        let opts = ReportOptions::new()
            .since(d("2021-01-01"))
            .from(d("2021-01-01"))
            .until(d("2021-01-02"));
        assert!(ReportingPeriod::resolve(&opts, d(FLOOR)).is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let opts = ReportOptions::new().since(d("2021-01-03")).until(d("2021-01-01"));
        let err = ReportingPeriod::resolve(&opts, d(FLOOR)).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRange(_)));
    }
}
