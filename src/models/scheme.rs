//! 评分方案数据结构

use serde::{Deserialize, Serialize};

/// 一个评分要点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemePoint {
    #[serde(rename = "point_code")]
    pub code: String,
    pub description: String,
    pub max_marks: f64,
}

impl SchemePoint {
    pub fn new(code: impl Into<String>, description: impl Into<String>, max_marks: f64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            max_marks,
        }
    }

    /// 一个空白要点（表单初始状态）
    pub fn blank() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            max_marks: 0.0,
        }
    }
}

/// 校验通过、可随实验性评估请求一并发送的评分方案
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkingScheme {
    pub total_marks: f64,
    pub scheme: Vec<SchemePoint>,
}

/// 方案生成服务的响应数据
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedScheme {
    /// 服务可能同时修订总分
    #[serde(default)]
    pub total_marks: Option<f64>,
    pub scheme: Vec<SchemePoint>,
}
