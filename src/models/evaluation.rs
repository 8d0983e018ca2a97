//! 评估服务返回的数据结构
//!
//! 一次会话同一时刻至多保留一种评估结果（标准 / 实验性），
//! 代表"最近一次评估尝试"。

use serde::{Deserialize, Serialize};

/// 评估类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationKind {
    /// 标准评估
    Standard,
    /// 实验性评估（基于评分方案）
    Experimental,
}

/// 实验性评估中单个要点的批改明细
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// 服务端两种字段名都可能出现
    #[serde(default)]
    pub scheme_point: Option<String>,
    #[serde(default)]
    pub point_code: Option<String>,
    #[serde(default)]
    pub max_marks: f64,
    #[serde(default)]
    pub marks_awarded: f64,
    /// attempted / attempted_but_not_awarded / not_attempted
    #[serde(default)]
    pub status: Option<String>,
    /// 学生答案中与该要点对应的原文
    #[serde(default)]
    pub student_point: Option<String>,
}

impl BreakdownItem {
    /// 展示用的要点编码：优先 scheme_point，其次 point_code
    pub fn display_code(&self) -> Option<&str> {
        self.scheme_point
            .as_deref()
            .or(self.point_code.as_deref())
    }
}

/// 评估服务返回的完整报告，收到后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    #[serde(default)]
    pub marks_awarded: f64,
    #[serde(default)]
    pub total_marks: f64,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub conceptual_accuracy: Option<String>,
    /// 服务端偶尔会把列表字段返回成一整段文本，两种形态都接受
    #[serde(default, deserialize_with = "deserialize_string_or_list")]
    pub key_points_covered: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_list")]
    pub missing_or_incorrect_points: Vec<String>,
    #[serde(default)]
    pub presentation_feedback: Option<String>,
    #[serde(default)]
    pub examiner_remarks: Option<String>,
    /// 仅实验性评估返回
    #[serde(default)]
    pub marking_breakdown: Vec<BreakdownItem>,
}

/// 带类型标签的评估结果
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub kind: EvaluationKind,
    pub report: EvaluationReport,
}

// Helper: 同时接受字符串与字符串数组两种形态
fn deserialize_string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{SeqAccess, Visitor};
    use std::fmt;

    struct StringOrListVisitor;

    impl<'de> Visitor<'de> for StringOrListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![value.to_string()])
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }
    }

    deserializer.deserialize_any(StringOrListVisitor)
}
