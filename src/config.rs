use chrono::NaiveDate;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 全局配置单例
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// 报表 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// 报表服务 Base URL
    #[serde(default = "ReportsConfig::default_base_url")]
    pub base_url: String,
    /// 省略 since/from 时使用的历史下限日期（平台上线日）
    #[serde(default = "ReportsConfig::default_floor_date")]
    pub floor_date: NaiveDate,
}

impl ReportsConfig {
    fn default_base_url() -> String {
        "https://www.googleapis.com/youtube/analytics".to_string()
    }

    fn default_floor_date() -> NaiveDate {
        // 2005-02-14：平台上线日，早于任何可统计数据。
        NaiveDate::from_ymd_opt(2005, 2, 14).expect("固定日期合法")
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            floor_date: Self::default_floor_date(),
        }
    }
}

/// 数据 API 配置（视频/频道/搜索等资源端点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataApiConfig {
    /// 数据服务 Base URL
    #[serde(default = "DataApiConfig::default_base_url")]
    pub base_url: String,
    /// 账号基础信息端点
    #[serde(default = "DataApiConfig::default_user_info_endpoint")]
    pub user_info_endpoint: String,
}

impl DataApiConfig {
    fn default_base_url() -> String {
        "https://www.googleapis.com/youtube".to_string()
    }

    fn default_user_info_endpoint() -> String {
        "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
    }
}

impl Default for DataApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            user_info_endpoint: Self::default_user_info_endpoint(),
        }
    }
}

/// 合作伙伴（内容所有者）API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerConfig {
    /// 合作伙伴服务 Base URL
    #[serde(default = "PartnerConfig::default_base_url")]
    pub base_url: String,
}

impl PartnerConfig {
    fn default_base_url() -> String {
        "https://www.googleapis.com/youtube/partner".to_string()
    }
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}

/// 上传 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 上传服务 Base URL
    #[serde(default = "UploadConfig::default_base_url")]
    pub base_url: String,
}

impl UploadConfig {
    fn default_base_url() -> String {
        "https://www.googleapis.com/upload/youtube".to_string()
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 报表 API 配置
    #[serde(default)]
    pub reports: ReportsConfig,
    /// 数据 API 配置
    #[serde(default)]
    pub data: DataApiConfig,
    /// 合作伙伴 API 配置
    #[serde(default)]
    pub partner: PartnerConfig,
    /// 上传 API 配置
    #[serde(default)]
    pub upload: UploadConfig,
}

impl AppConfig {
    /// 从配置文件加载配置，支持环境变量覆盖
    ///
    /// 配置文件可以不存在：库的全部端点都有内置默认值，文件/环境变量
    /// 仅用于覆盖（例如把 base_url 指向测试桩服务）。
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path();

        let builder = ConfigBuilder::builder()
            // 加载配置文件（允许缺失）
            .add_source(File::with_name(config_path.to_str().unwrap()).required(false))
            // 支持环境变量覆盖，例如：TUBE__REPORTS__BASE_URL
            .add_source(
                Environment::with_prefix("TUBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }

    /// 获取全局配置单例（首次访问时加载；加载失败则回退内置默认值）
    pub fn global() -> &'static AppConfig {
        CONFIG.get_or_init(|| match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("配置加载失败，使用内置默认值: {}", e);
                AppConfig::default()
            }
        })
    }

    /// 初始化全局配置（显式加载，加载失败时返回错误）
    pub fn init_global() -> Result<(), ConfigError> {
        let config = Self::load()?;
        CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("配置已经被初始化".to_string()))?;
        Ok(())
    }

    /// 获取配置文件路径
    fn get_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_are_absolute() {
        let config = AppConfig::default();
        assert!(config.reports.base_url.starts_with("https://"));
        assert!(config.data.base_url.starts_with("https://"));
        assert!(config.partner.base_url.starts_with("https://"));
        assert!(config.upload.base_url.starts_with("https://"));
    }

    #[test]
    fn default_floor_date_is_platform_launch() {
        let config = ReportsConfig::default();
        assert_eq!(
            config.floor_date,
            NaiveDate::from_ymd_opt(2005, 2, 14).unwrap()
        );
    }
}
