/// 评估服务客户端
///
/// 封装标准评估、实验性评估与评分方案生成三类调用
use serde_json::json;
use tracing::debug;

use crate::clients::dispatch;
use crate::config::Config;
use crate::error::SessionResult;
use crate::models::{EvaluationReport, GeneratedScheme, MarkingScheme};

const EVALUATE_ENDPOINT: &str = "/evaluate/evaluate";
const EVALUATE_EXPERIMENTAL_ENDPOINT: &str = "/evaluate/evaluate-experimental";
const GENERATE_SCHEME_ENDPOINT: &str = "/evaluate/generate-scheme";

/// 评估服务客户端
pub struct EvalClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl EvalClient {
    /// 创建新的评估客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }

    /// 标准评估
    pub async fn evaluate_standard(
        &self,
        question: &str,
        answer: &str,
    ) -> SessionResult<EvaluationReport> {
        let url = format!("{}{}", self.base_url, EVALUATE_ENDPOINT);

        debug!(
            "标准评估请求，题目 {} 字符 / 答案 {} 字符",
            question.chars().count(),
            answer.chars().count()
        );

        let request = self.http.post(&url).bearer_auth(&self.token).json(&json!({
            "question": question,
            "answer": answer,
        }));

        dispatch(request, EVALUATE_ENDPOINT).await
    }

    /// 实验性评估，随请求发送已校验的评分方案
    pub async fn evaluate_experimental(
        &self,
        question: &str,
        answer: &str,
        scheme: &MarkingScheme,
    ) -> SessionResult<EvaluationReport> {
        let url = format!("{}{}", self.base_url, EVALUATE_EXPERIMENTAL_ENDPOINT);

        debug!(
            "实验性评估请求，方案共 {} 个要点 / 总分 {}",
            scheme.scheme.len(),
            scheme.total_marks
        );

        let request = self.http.post(&url).bearer_auth(&self.token).json(&json!({
            "question": question,
            "answer": answer,
            "marking_scheme": scheme,
        }));

        dispatch(request, EVALUATE_EXPERIMENTAL_ENDPOINT).await
    }

    /// 根据题目生成评分方案草稿
    pub async fn generate_scheme(
        &self,
        question: &str,
        total_marks: f64,
    ) -> SessionResult<GeneratedScheme> {
        let url = format!("{}{}", self.base_url, GENERATE_SCHEME_ENDPOINT);

        debug!("方案生成请求，总分 {}", total_marks);

        let request = self.http.post(&url).bearer_auth(&self.token).json(&json!({
            "question": question,
            "total_marks": total_marks,
        }));

        dispatch(request, GENERATE_SCHEME_ENDPOINT).await
    }
}
