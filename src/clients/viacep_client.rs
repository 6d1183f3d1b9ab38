/// 地址查询客户端
///
/// 封装 ViaCEP 接口：`GET {base}/{8位数字}/json/`
use crate::config::Config;
use crate::error::LookupError;
use crate::models::{AddressLookupResult, PostalCode};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// 按 CEP 查询地址的能力
///
/// 流程层只依赖这个 trait，测试时可替换为内存实现
pub trait AddressLookup {
    fn lookup(
        &self,
        postal_code: &PostalCode,
    ) -> impl Future<Output = Result<AddressLookupResult, LookupError>> + Send;
}

/// ViaCEP 响应体中用到的字段
///
/// 其余字段（ibge、gia、ddd、siafi）不参与流程，反序列化时忽略
#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    localidade: String,
    uf: String,
}

/// ViaCEP 客户端
#[derive(Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// 创建新的地址查询客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.viacep_base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 拼接查询地址
    pub fn endpoint(&self, postal_code: &PostalCode) -> String {
        format!(
            "{}/{}/json/",
            self.base_url.trim_end_matches('/'),
            postal_code.digits()
        )
    }
}

impl AddressLookup for ViaCepClient {
    async fn lookup(&self, postal_code: &PostalCode) -> Result<AddressLookupResult, LookupError> {
        let endpoint = self.endpoint(postal_code);
        debug!("查询地址: {}", endpoint);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| LookupError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        // 读取失败属于传输错误；读到的内容无法解析才是 Decode
        let body = response
            .text()
            .await
            .map_err(|source| LookupError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        debug!("地址服务响应: {}", body);

        parse_body(postal_code, &body)
    }
}

/// 解析原始响应文本，非 JSON 内容返回 `LookupError::Decode`
pub fn parse_body(
    postal_code: &PostalCode,
    body: &str,
) -> Result<AddressLookupResult, LookupError> {
    let value: Value = serde_json::from_str(body)?;
    parse_response(postal_code, value)
}

/// 解析 ViaCEP 响应体
///
/// `erro` 可能是布尔 `true` 也可能是字符串 `"true"`，两者都表示 CEP 不存在
pub fn parse_response(
    postal_code: &PostalCode,
    body: Value,
) -> Result<AddressLookupResult, LookupError> {
    if is_not_found(&body) {
        return Err(LookupError::NotFound {
            postal_code: postal_code.to_string(),
        });
    }

    let data: CepResponse = serde_json::from_value(body)?;
    let postal_code = if data.cep.is_empty() {
        postal_code.to_string()
    } else {
        data.cep
    };

    Ok(AddressLookupResult {
        postal_code,
        street: data.logradouro,
        complement: data.complemento,
        neighborhood: data.bairro,
        city: data.localidade,
        region: data.uf,
    })
}

fn is_not_found(body: &Value) -> bool {
    match body.get("erro") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
