use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;

/// 完整的 8 位 CEP（只保存数字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// 从纯数字构造，数字个数必须正好是 8
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    /// 8 位数字，用于请求地址服务
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (head, tail) = self.0.split_at(5);
        write!(f, "{}-{}", head, tail)
    }
}

/// 地址服务返回的地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressLookupResult {
    pub postal_code: String,
    pub street: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    /// 州缩写（UF）
    pub region: String,
}

impl AddressLookupResult {
    /// 单行地址：`街道, 街区 - 城市/UF`，空字段省略
    pub fn display_line(&self) -> String {
        let street_part = [self.street.as_str(), self.neighborhood.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let locality = format!("{}/{}", self.city, self.region);

        if street_part.is_empty() {
            locality
        } else {
            format!("{} - {}", street_part, locality)
        }
    }
}

/// 运费报价（模拟值）
///
/// 在校验完成那一刻生成一次，之后冻结在状态里，重复渲染不会变化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingQuote {
    pub fee: Decimal,
    /// 随机库存，取值 2..=5
    pub stock_count: u8,
    pub estimated_delivery: NaiveDate,
}

impl ShippingQuote {
    /// `DD/MM/YYYY`
    pub fn delivery_date_display(&self) -> String {
        self.estimated_delivery.format("%d/%m/%Y").to_string()
    }

    /// 两位小数的运费文本
    pub fn fee_display(&self) -> String {
        format!("{:.2}", self.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_requires_eight_digits() {
        assert!(PostalCode::from_digits("01310100").is_some());
        assert!(PostalCode::from_digits("0131010").is_none());
        assert!(PostalCode::from_digits("01310-100").is_none());
    }

    #[test]
    fn test_postal_code_display() {
        let cep = PostalCode::from_digits("01310100").unwrap();
        assert_eq!(cep.to_string(), "01310-100");
        assert_eq!(cep.digits(), "01310100");
    }

    #[test]
    fn test_display_line() {
        let address = AddressLookupResult {
            postal_code: "01310-100".to_string(),
            street: "Avenida Paulista".to_string(),
            complement: String::new(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
        };
        assert_eq!(
            address.display_line(),
            "Avenida Paulista, Bela Vista - São Paulo/SP"
        );

        let no_street = AddressLookupResult {
            street: String::new(),
            neighborhood: String::new(),
            ..address
        };
        assert_eq!(no_street.display_line(), "São Paulo/SP");
    }

    #[test]
    fn test_quote_display() {
        let quote = ShippingQuote {
            fee: Decimal::new(1990, 2),
            stock_count: 3,
            estimated_delivery: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        };
        assert_eq!(quote.delivery_date_display(), "04/03/2026");
        assert_eq!(quote.fee_display(), "19.90");
    }
}
