//! # Promo Funnel
//!
//! 单页推广漏斗：开场表单 → 六道问卷 → 优惠页（CEP 校验）→ 跳转支付
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 访客、题目、答案、CEP、地址、运费报价
//!
//! ### ② 外部接口（Clients）
//! - `clients/` - `AddressLookup` 能力与 ViaCEP 实现
//!
//! ### ③ 业务能力层（Services）
//! - `quiz_service` - 固定题库与按题号取题
//! - `validation` - 姓名 / 邮箱校验
//! - `postal_code` - CEP 格式化
//! - `shipping` - 运费报价模拟（固定运费、随机库存、+3 天送达）
//!
//! ### ④ 流程层（Workflow）
//! - `FunnelSession` - 界面状态机，唯一可以修改会话状态的地方
//! - `AddressFlow` - 查询地址后固定等待，再交回状态机
//!
//! ### ⑤ 展示层（View）
//! - `view/` - 纯渲染，把输入翻译成 `Intent`
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{AddressLookup, ViaCepClient};
pub use config::Config;
pub use error::{ConfigError, FunnelError, FunnelResult, IntroError, LookupError};
pub use workflow::{AddressFlow, AddressPhase, Effect, FunnelSession, Intent, LookupOutcome, Screen};
