use crate::error::ReportError;

/// `in:` 选项的原始输入形态：裸国家代码，或 {country, state} 映射。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationInput {
    /// 裸国家代码（两位字母）
    Code(String),
    /// country / state 组合
    Spec {
        country: Option<String>,
        state: Option<String>,
    },
}

impl LocationInput {
    pub fn country(code: impl Into<String>) -> Self {
        Self::Spec {
            country: Some(code.into()),
            state: None,
        }
    }

    pub fn state(code: impl Into<String>) -> Self {
        Self::Spec {
            country: None,
            state: Some(code.into()),
        }
    }

    pub fn country_state(country: impl Into<String>, state: impl Into<String>) -> Self {
        Self::Spec {
            country: Some(country.into()),
            state: Some(state.into()),
        }
    }
}

impl From<&str> for LocationInput {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

impl From<String> for LocationInput {
    fn from(code: String) -> Self {
        Self::Code(code)
    }
}

/// 归一化后的地域筛选。
///
/// state 仅上游美国维度模型支持：{state: s} 在上游按 country==US 加
/// province 过滤执行，但对调用方可见的分组键只保留州代码本身。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationFilter {
    #[default]
    None,
    /// 按国家过滤（两位代码）
    Country(String),
    /// 按美国州过滤（两位代码，不带 US- 前缀）
    State(String),
}

impl LocationFilter {
    /// 归一化 `in:` 输入。
    ///
    /// - 裸字符串 / {country: c} → Country(c)
    /// - {state: s} / {country: "US", state: s} → State(s)
    /// - {country: 非 US, state: s} → 校验错误
    pub fn resolve(input: Option<&LocationInput>) -> Result<Self, ReportError> {
        let Some(input) = input else {
            return Ok(Self::None);
        };
        match input {
            LocationInput::Code(code) => Ok(Self::Country(code.clone())),
            LocationInput::Spec { country, state } => match (country, state) {
                (country, Some(state)) => {
                    if let Some(c) = country {
                        if c != "US" {
                            return Err(ReportError::Validation(format!(
                                "state 筛选仅支持美国（country==US），而非 {c}"
                            )));
                        }
                    }
                    Ok(Self::State(state.clone()))
                }
                (Some(country), None) => Ok(Self::Country(country.clone())),
                (None, None) => Ok(Self::None),
            },
        }
    }

    /// 渲染为上游 filters 参数中的键值对（`k==v` 形式）。
    pub(crate) fn wire_pairs(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Country(code) => vec![format!("country=={code}")],
            Self::State(code) => vec!["country==US".to_string(), format!("province==US-{code}")],
        }
    }
}
