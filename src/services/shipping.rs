//! 运费报价模拟
//!
//! 运费固定、库存随机、送达日期为当天加 3 天，全部是展示用的模拟值

use crate::models::ShippingQuote;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use std::ops::RangeInclusive;

/// 库存随机范围
pub const STOCK_RANGE: RangeInclusive<u8> = 2..=5;

/// 送达日期相对今天的天数
pub const DELIVERY_DAYS: u64 = 3;

/// 生成一份报价
///
/// # 参数
/// - `fee`: 固定运费
/// - `today`: 校验完成当天的日期
/// - `rng`: 随机数源
pub fn draw_quote<R: Rng>(fee: Decimal, today: NaiveDate, rng: &mut R) -> ShippingQuote {
    let stock_count = rng.random_range(STOCK_RANGE);
    let estimated_delivery = today
        .checked_add_days(Days::new(DELIVERY_DAYS))
        .unwrap_or(today);

    ShippingQuote {
        fee,
        stock_count,
        estimated_delivery,
    }
}
