use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 地址查询服务根路径（不含 CEP 部分）
    pub viacep_base_url: String,
    /// 最终跳转的支付页面
    pub payment_url: String,
    /// CEP 校验时固定的"处理中"等待时长（毫秒）
    pub verification_delay_ms: u64,
    /// 固定运费
    pub shipping_fee: Decimal,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viacep_base_url: "https://viacep.com.br/ws".to_string(),
            payment_url: "https://pay.example.com/checkout".to_string(),
            verification_delay_ms: 1500,
            shipping_fee: Decimal::new(1990, 2),
            verbose_logging: false,
        }
    }
}

/// `funnel.toml` 中允许出现的字段，全部可选
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    viacep_base_url: Option<String>,
    payment_url: Option<String>,
    verification_delay_ms: Option<u64>,
    shipping_fee: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 只从环境变量读取，缺失或无法解析的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取 TOML 配置文件（若存在），再用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let base = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
                path: path.display().to_string(),
                source: e,
            })?;
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 解析 TOML 文本，未出现的字段沿用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        let default = Self::default();
        let shipping_fee = match file.shipping_fee {
            Some(raw) => parse_fee("shipping_fee", &raw)?,
            None => default.shipping_fee,
        };

        Ok(Self {
            viacep_base_url: file.viacep_base_url.unwrap_or(default.viacep_base_url),
            payment_url: file.payment_url.unwrap_or(default.payment_url),
            verification_delay_ms: file
                .verification_delay_ms
                .unwrap_or(default.verification_delay_ms),
            shipping_fee,
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            viacep_base_url: std::env::var("VIACEP_BASE_URL").unwrap_or(self.viacep_base_url),
            payment_url: std::env::var("PAYMENT_URL").unwrap_or(self.payment_url),
            verification_delay_ms: std::env::var("VERIFICATION_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verification_delay_ms),
            shipping_fee: std::env::var("SHIPPING_FEE")
                .ok()
                .and_then(|v| Decimal::from_str(v.trim()).ok())
                .unwrap_or(self.shipping_fee),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification_delay_ms)
    }
}

fn parse_fee(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        expected_type: "decimal".to_string(),
    })
}
