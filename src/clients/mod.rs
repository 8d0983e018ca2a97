//! 远端服务客户端
//!
//! 每个远端系统一个客户端结构（OCR 服务 / 评估服务），
//! 统一的响应信封约定：仅当 `status_code == 200` 且携带 `data`
//! 时视为成功，其他任何形态一律按 `InvalidResponseFormat` 处理，
//! 与 HTTP 层是否成功无关。

pub mod eval_client;
pub mod ocr_client;

pub use eval_client::EvalClient;
pub use ocr_client::OcrClient;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{SessionError, SessionResult};

/// 所有服务共用的响应信封
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub data: Option<T>,
}

/// 从错误信封中提取可读信息
///
/// 优先级：`data.detail` → `message`，两者都没有时返回 None。
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("data")
        .and_then(|d| d.get("detail"))
        .and_then(|v| v.as_str())
        .or_else(|| value.get("message").and_then(|v| v.as_str()))
        .map(|s| s.to_string())
}

/// 解析响应体并校验信封约定
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    endpoint: &str,
    http_success: bool,
    body: &str,
) -> SessionResult<T> {
    if !http_success {
        let message = extract_error_message(body)
            .unwrap_or_else(|| "服务不可达，请确认评估后端已启动".to_string());
        return Err(SessionError::transport_failure(endpoint, message));
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|_| SessionError::invalid_response(endpoint))?;

    match envelope {
        ApiEnvelope {
            status_code: Some(200),
            data: Some(data),
        } => Ok(data),
        _ => Err(SessionError::invalid_response(endpoint)),
    }
}

/// 发起请求并把网络层错误折叠为 TransportFailure
pub(crate) async fn dispatch<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> SessionResult<T> {
    let response = request.send().await.map_err(|e| {
        SessionError::transport_failure(endpoint, format!("服务不可达: {}", e))
    })?;

    let http_success = response.status().is_success();
    let body = response.text().await.map_err(|e| {
        SessionError::transport_failure(endpoint, format!("读取响应失败: {}", e))
    })?;

    unwrap_envelope(endpoint, http_success, &body)
}
