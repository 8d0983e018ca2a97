//! OCR 服务返回的数据结构
//!
//! 每次成功的 OCR 调用产生一个不可变的 `OcrOutcome`；
//! 同一角色的后续调用以新值整体取代旧值，而非原地修改。

use serde::{Deserialize, Serialize};

/// 单个文件的识别结果，顺序与提交时的文件顺序按位置对齐
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrFileResult {
    pub filename: String,
    pub text: String,
    /// 识别置信度，范围 [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// 一次 OCR 调用的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutcome {
    #[serde(default)]
    pub individual_results: Vec<OcrFileResult>,
    /// 所有文件的合并转写文本
    #[serde(default)]
    pub combined_text: String,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub average_confidence: Option<f64>,
}

/// 文本分类结果：把一段合并转写拆分为题目与答案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedText {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}
