//! 错误类型
//!
//! 校验类错误（`IntroError` / `FunnelError`）的 Display 文本就是展示给访客的提示，
//! 查询类错误（`LookupError`）只进日志，不会直接展示给访客。

use serde::Serialize;
use thiserror::Error;

/// 开场表单校验错误，姓名优先于邮箱检查
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroError {
    /// 姓名为空（去除空白后）
    #[error("Por favor, informe seu nome completo.")]
    NameRequired,
    /// 邮箱格式不合法
    #[error("Por favor, informe um e-mail válido.")]
    InvalidEmail,
}

/// 状态机拒绝某个操作时返回的错误，状态保持不变
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunnelError {
    #[error("{0}")]
    Intro(#[from] IntroError),
    /// 未选择选项就点击继续
    #[error("Por favor, selecione uma opção para continuar.")]
    NoOptionSelected,
    /// 选项不属于当前问题
    #[error("Opção inválida: {label}")]
    UnknownOption { label: String },
    /// CEP 不足 8 位数字
    #[error("Por favor, digite um CEP válido.")]
    IncompletePostalCode,
    /// 当前界面不接受该操作
    #[error("ação '{intent}' não é aceita na tela '{screen}'")]
    UnexpectedIntent {
        intent: &'static str,
        screen: &'static str,
    },
    /// 没有正在进行的 CEP 校验
    #[error("nenhuma verificação de CEP em andamento")]
    NotVerifying,
}

/// 地址查询失败的原因，流程层统一当作"未找到"处理
#[derive(Debug, Error)]
pub enum LookupError {
    /// 网络请求失败
    #[error("请求地址服务失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非 2xx 状态
    #[error("地址服务返回状态 {status} ({endpoint})")]
    Status { endpoint: String, status: u16 },
    /// 响应体无法解析
    #[error("地址服务响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),
    /// 服务明确表示 CEP 不存在
    #[error("CEP {postal_code} 不存在")]
    NotFound { postal_code: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值无法转换为期望类型
    #[error("配置项 {key} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    InvalidValue {
        key: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 语法错误
    #[error("配置文件解析失败: {0}")]
    Toml(#[from] toml::de::Error),
}

/// 状态机操作结果类型
pub type FunnelResult<T> = Result<T, FunnelError>;
