/// OCR 服务客户端
///
/// 封装按角色划分的批量图片识别与文本分类调用
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::debug;

use crate::clients::dispatch;
use crate::config::Config;
use crate::error::{SessionError, SessionResult};
use crate::models::{Artifact, ClassifiedText, OcrOutcome, Role};

const OCR_QUESTION_ENDPOINT: &str = "/ocr/ocr-question";
const OCR_ANSWER_ENDPOINT: &str = "/ocr/ocr-answer";
const CLASSIFY_TEXT_ENDPOINT: &str = "/classify-text";

/// OCR 服务客户端
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl OcrClient {
    /// 创建新的 OCR 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }

    /// 识别一个角色的全部图片
    ///
    /// 题目与答案走各自的端点（上限 2 / 5），响应形态相同。
    /// 文件按批次内顺序上传，单文件结果按位置对齐。
    pub async fn recognize(
        &self,
        role: Role,
        artifacts: &[Artifact],
    ) -> SessionResult<OcrOutcome> {
        let endpoint = match role {
            Role::Question => OCR_QUESTION_ENDPOINT,
            Role::Answer => OCR_ANSWER_ENDPOINT,
        };
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("OCR 请求 ({}): {} 个文件", endpoint, artifacts.len());

        let mut form = Form::new();
        for artifact in artifacts {
            let part = Part::bytes(artifact.content.clone())
                .file_name(artifact.display_name.clone())
                .mime_str(&artifact.content_type)
                .map_err(|e| {
                    SessionError::transport_failure(
                        endpoint,
                        format!("无效的 MIME 类型 {}: {}", artifact.content_type, e),
                    )
                })?;
            form = form.part("files", part);
        }

        let request = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form);

        let outcome: OcrOutcome = dispatch(request, endpoint).await?;

        debug!(
            "OCR 完成 ({}): {} 个文件, 平均置信度 {:?}",
            endpoint, outcome.total_files, outcome.average_confidence
        );

        Ok(outcome)
    }

    /// 把一段合并转写拆分为题目与答案
    pub async fn classify_text(&self, text: &str) -> SessionResult<ClassifiedText> {
        let url = format!("{}{}", self.base_url, CLASSIFY_TEXT_ENDPOINT);

        debug!("文本分类请求，文本长度: {} 字符", text.chars().count());

        let request = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "text": text }));

        dispatch(request, CLASSIFY_TEXT_ENDPOINT).await
    }
}
