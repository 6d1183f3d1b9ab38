//! CEP 校验流程 - 流程层
//!
//! 两个依次执行的挂起点：
//! 1. 等待地址服务返回
//! 2. 固定等待 `verification_delay`（默认 1500ms），即使查询瞬间完成也必须等满
//!
//! 查询失败（网络错误 / 状态码 / 解析失败 / 明确未找到）对访客一律显示为"未找到"，
//! 具体原因只写日志。没有取消，也没有独立的超时。

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::clients::AddressLookup;
use crate::config::Config;
use crate::error::{FunnelResult, LookupError};
use crate::models::{AddressLookupResult, PostalCode};
use crate::workflow::funnel::FunnelSession;

/// 对访客可见的查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(AddressLookupResult),
    NotFound,
}

/// CEP 校验流程
///
/// - 持有地址查询能力
/// - 只负责"查询 + 等待"，状态迁移交给 `FunnelSession`
pub struct AddressFlow<L> {
    lookup: L,
    delay: Duration,
}

impl<L: AddressLookup> AddressFlow<L> {
    /// 创建新的校验流程
    pub fn new(lookup: L, config: &Config) -> Self {
        Self::with_delay(lookup, config.verification_delay())
    }

    pub fn with_delay(lookup: L, delay: Duration) -> Self {
        Self { lookup, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 查询地址，然后固定等待
    pub async fn run(&self, postal_code: &PostalCode) -> LookupOutcome {
        let outcome = match self.lookup.lookup(postal_code).await {
            Ok(address) => LookupOutcome::Found(address),
            Err(e) => {
                log_lookup_failure(postal_code, &e);
                LookupOutcome::NotFound
            }
        };

        sleep(self.delay).await;
        outcome
    }

    /// 执行查询并结束会话中的 Verifying 阶段
    ///
    /// 送达日期按本地时间的"今天"计算，库存使用线程随机数
    pub async fn resolve(
        &self,
        session: &mut FunnelSession,
        postal_code: &PostalCode,
    ) -> FunnelResult<()> {
        let outcome = self.run(postal_code).await;
        let today = chrono::Local::now().date_naive();
        session.complete_verification(outcome, today, &mut rand::rng())
    }

    /// 与 `resolve` 相同，但由调用方指定日期和随机数源
    pub async fn resolve_with<R: Rng>(
        &self,
        session: &mut FunnelSession,
        postal_code: &PostalCode,
        today: NaiveDate,
        rng: &mut R,
    ) -> FunnelResult<()> {
        let outcome = self.run(postal_code).await;
        session.complete_verification(outcome, today, rng)
    }
}

/// 按原因记录查询失败，访客看到的始终是同一条提示
fn log_lookup_failure(postal_code: &PostalCode, error: &LookupError) {
    match error {
        LookupError::NotFound { .. } => {
            info!("CEP {} 不存在 (服务返回 erro)", postal_code);
        }
        LookupError::Request { .. } => {
            warn!("⚠️ CEP {} 查询时网络失败: {}", postal_code, error);
        }
        LookupError::Status { .. } | LookupError::Decode(_) => {
            warn!("⚠️ CEP {} 查询返回异常: {}", postal_code, error);
        }
    }
}
