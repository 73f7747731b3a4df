use std::fmt;

/// 报表分组方式（`by:` 选项）。
///
/// 封闭枚举：每个成员对应一种上游查询维度与一种结果整形策略，
/// 不存在未列出的分组取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// 整个区间聚合为单一 total
    Range,
    /// 按日
    Day,
    /// 按国家（两位代码）
    Country,
    /// 按美国州（两位代码）
    State,
    /// 按流量来源
    TrafficSource,
    /// 按播放位置
    PlaybackLocation,
    /// 按嵌入播放器所在页面（自由文本）
    EmbeddedPlayerLocation,
    /// 按相关视频（惰性视频引用）
    RelatedVideo,
    /// 按搜索关键词（自由文本）
    SearchTerm,
    /// 按设备类型
    DeviceType,
    /// 按性别
    Gender,
    /// 按年龄段
    AgeGroup,
    /// 按性别 × 年龄段（嵌套映射）
    GenderAgeGroup,
}

impl Grouping {
    /// 上游查询的 dimensions 参数；Range 为聚合查询，无维度。
    pub(crate) fn wire_dimensions(&self) -> Option<&'static str> {
        match self {
            Grouping::Range => None,
            Grouping::Day => Some("day"),
            Grouping::Country => Some("country"),
            Grouping::State => Some("province"),
            Grouping::TrafficSource => Some("insightTrafficSourceType"),
            Grouping::PlaybackLocation => Some("insightPlaybackLocationType"),
            Grouping::EmbeddedPlayerLocation => Some("insightPlaybackLocationDetail"),
            Grouping::RelatedVideo => Some("insightTrafficSourceDetail"),
            Grouping::SearchTerm => Some("insightTrafficSourceDetail"),
            Grouping::DeviceType => Some("deviceType"),
            Grouping::Gender => Some("gender"),
            Grouping::AgeGroup => Some("ageGroup"),
            Grouping::GenderAgeGroup => Some("gender,ageGroup"),
        }
    }

    /// detail 类维度需要锁定其父维度取值的附加 filters。
    pub(crate) fn implied_filter(&self) -> Option<&'static str> {
        match self {
            Grouping::EmbeddedPlayerLocation => Some("insightPlaybackLocationType==EMBEDDED"),
            Grouping::RelatedVideo => Some("insightTrafficSourceType==RELATED_VIDEO"),
            Grouping::SearchTerm => Some("insightTrafficSourceType==YT_SEARCH"),
            _ => None,
        }
    }

    /// detail 类维度已占用 filters 槽位，不能再叠加地域筛选。
    pub(crate) fn occupies_filter_slot(&self) -> bool {
        self.implied_filter().is_some()
    }

    /// 维度列数（结果行中位于指标值之前的列数）。
    pub(crate) fn dimension_columns(&self) -> usize {
        match self {
            Grouping::Range => 0,
            Grouping::GenderAgeGroup => 2,
            _ => 1,
        }
    }
}

/// 流量来源（固定枚举集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrafficSource {
    Advertising,
    Annotation,
    ExternalApp,
    ExternalUrl,
    Embedded,
    Other,
    Playlist,
    Promoted,
    RelatedVideo,
    Subscriber,
    Channel,
    OtherPage,
    Search,
}

impl TrafficSource {
    /// 上游维度取值 → 枚举成员
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "ADVERTISING" => Self::Advertising,
            "ANNOTATION" => Self::Annotation,
            "EXT_APP" => Self::ExternalApp,
            "EXT_URL" => Self::ExternalUrl,
            "NO_LINK_EMBEDDED" => Self::Embedded,
            "NO_LINK_OTHER" => Self::Other,
            "PLAYLIST" => Self::Playlist,
            "PROMOTED" => Self::Promoted,
            "RELATED_VIDEO" => Self::RelatedVideo,
            "SUBSCRIBER" => Self::Subscriber,
            "YT_CHANNEL" => Self::Channel,
            "YT_OTHER_PAGE" => Self::OtherPage,
            "YT_SEARCH" => Self::Search,
            _ => return None,
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Advertising => "ADVERTISING",
            Self::Annotation => "ANNOTATION",
            Self::ExternalApp => "EXT_APP",
            Self::ExternalUrl => "EXT_URL",
            Self::Embedded => "NO_LINK_EMBEDDED",
            Self::Other => "NO_LINK_OTHER",
            Self::Playlist => "PLAYLIST",
            Self::Promoted => "PROMOTED",
            Self::RelatedVideo => "RELATED_VIDEO",
            Self::Subscriber => "SUBSCRIBER",
            Self::Channel => "YT_CHANNEL",
            Self::OtherPage => "YT_OTHER_PAGE",
            Self::Search => "YT_SEARCH",
        }
    }
}

/// 播放位置（固定枚举集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlaybackLocation {
    Channel,
    Watch,
    Embedded,
    ExternalApp,
    Mobile,
    Other,
}

impl PlaybackLocation {
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "CHANNEL" => Self::Channel,
            "WATCH" => Self::Watch,
            "EMBEDDED" => Self::Embedded,
            "EXTERNAL_APP" => Self::ExternalApp,
            "MOBILE" => Self::Mobile,
            "YT_OTHER" => Self::Other,
            _ => return None,
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Channel => "CHANNEL",
            Self::Watch => "WATCH",
            Self::Embedded => "EMBEDDED",
            Self::ExternalApp => "EXTERNAL_APP",
            Self::Mobile => "MOBILE",
            Self::Other => "YT_OTHER",
        }
    }
}

/// 设备类型（固定枚举集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceType {
    Desktop,
    GameConsole,
    Mobile,
    Tablet,
    Tv,
    Unknown,
}

impl DeviceType {
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "DESKTOP" => Self::Desktop,
            "GAME_CONSOLE" => Self::GameConsole,
            "MOBILE" => Self::Mobile,
            "TABLET" => Self::Tablet,
            "TV" => Self::Tv,
            "UNKNOWN_PLATFORM" => Self::Unknown,
            _ => return None,
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Desktop => "DESKTOP",
            Self::GameConsole => "GAME_CONSOLE",
            Self::Mobile => "MOBILE",
            Self::Tablet => "TABLET",
            Self::Tv => "TV",
            Self::Unknown => "UNKNOWN_PLATFORM",
        }
    }
}

/// 性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "female" => Self::Female,
            "male" => Self::Male,
            _ => return None,
        })
    }
}

/// 年龄段（七个固定区间；上游取值带 age 前缀，如 age13-17）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeGroup {
    Age13To17,
    Age18To24,
    Age25To34,
    Age35To44,
    Age45To54,
    Age55To64,
    Age65Plus,
}

impl AgeGroup {
    /// 全部年龄段，按区间升序。
    pub const ALL: [AgeGroup; 7] = [
        AgeGroup::Age13To17,
        AgeGroup::Age18To24,
        AgeGroup::Age25To34,
        AgeGroup::Age35To44,
        AgeGroup::Age45To54,
        AgeGroup::Age55To64,
        AgeGroup::Age65Plus,
    ];

    /// 上游维度取值（容忍带或不带 age 前缀）→ 枚举成员
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        let bracket = code.strip_prefix("age").unwrap_or(code);
        Some(match bracket {
            "13-17" => Self::Age13To17,
            "18-24" => Self::Age18To24,
            "25-34" => Self::Age25To34,
            "35-44" => Self::Age35To44,
            "45-54" => Self::Age45To54,
            "55-64" => Self::Age55To64,
            "65-" => Self::Age65Plus,
            _ => return None,
        })
    }

    /// 对外展示的区间文本（不带 age 前缀）。
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age13To17 => "13-17",
            Self::Age18To24 => "18-24",
            Self::Age25To34 => "25-34",
            Self::Age35To44 => "35-44",
            Self::Age45To54 => "45-54",
            Self::Age55To64 => "55-64",
            Self::Age65Plus => "65-",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
