//! 评估结果展示映射 - 业务能力层
//!
//! 把评估服务返回的原始报告映射为可展示的结构：
//! 百分比、评语档位、逐要点明细行。不负责任何渲染。

use crate::models::{BreakdownItem, EvaluationKind, EvaluationOutcome};

/// 学生未作答且服务端没有给出原文时的占位叙述
const NOT_ATTEMPTED_PLACEHOLDER: &str = "学生未作答该要点";

/// 评语档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictTier {
    Excellent,
    Good,
    Average,
    Poor,
}

/// 逐要点明细的展示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownStatus {
    /// 已作答
    Attempted,
    /// 已作答但未得分
    NotAwarded,
    /// 未作答
    NotAttempted,
    /// 方案要点与学生答案无法对应
    NoMatch,
}

/// 一行展示用的批改明细
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub point_code: String,
    pub max_marks: f64,
    pub marks_awarded: f64,
    pub status: BreakdownStatus,
    pub student_text: String,
}

/// 展示就绪的评估结果
#[derive(Debug, Clone)]
pub struct DisplayResult {
    pub kind: EvaluationKind,
    pub marks_awarded: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub verdict: String,
    pub verdict_tier: VerdictTier,
    pub breakdown: Vec<BreakdownRow>,
    pub conceptual_accuracy: Option<String>,
    pub key_points_covered: Vec<String>,
    pub missing_or_incorrect_points: Vec<String>,
    pub presentation_feedback: Option<String>,
    pub examiner_remarks: Option<String>,
}

/// 评估结果展示映射器
pub struct ResultPresenter;

impl ResultPresenter {
    /// 得分百分比，保留一位小数；总分非正时恒为 0，绝不除零
    pub fn percentage(marks_awarded: f64, total_marks: f64) -> f64 {
        if total_marks > 0.0 {
            (marks_awarded / total_marks * 1000.0).round() / 10.0
        } else {
            0.0
        }
    }

    /// 评语档位分类
    ///
    /// 大小写无关的子串匹配，按优先级顺序取第一个命中档位；
    /// 全部不命中时落到 Poor。
    pub fn classify_verdict(verdict: &str) -> VerdictTier {
        let lower = verdict.to_lowercase();
        if lower.contains("excellent") || lower.contains("outstanding") {
            VerdictTier::Excellent
        } else if lower.contains("good") {
            VerdictTier::Good
        } else if lower.contains("average") || lower.contains("satisfactory") {
            VerdictTier::Average
        } else {
            VerdictTier::Poor
        }
    }

    /// 单个明细项的展示状态
    ///
    /// `scheme_point == "no_match"` 覆盖服务端给出的任何 status；
    /// 其余情况透传 status 字段。
    pub fn classify_breakdown_status(item: &BreakdownItem) -> BreakdownStatus {
        if item.scheme_point.as_deref() == Some("no_match") {
            return BreakdownStatus::NoMatch;
        }
        match item.status.as_deref() {
            Some("attempted") => BreakdownStatus::Attempted,
            Some("attempted_but_not_awarded") => BreakdownStatus::NotAwarded,
            _ => BreakdownStatus::NotAttempted,
        }
    }

    /// 把一条原始明细映射为展示行
    pub fn present_breakdown_item(index: usize, item: &BreakdownItem) -> BreakdownRow {
        let status = Self::classify_breakdown_status(item);
        let student_text = match (&item.student_point, status) {
            (Some(text), _) if !text.is_empty() => text.clone(),
            (_, BreakdownStatus::NotAttempted) => NOT_ATTEMPTED_PLACEHOLDER.to_string(),
            _ => String::new(),
        };

        BreakdownRow {
            point_code: item
                .display_code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("要点 {}", index + 1)),
            max_marks: item.max_marks,
            marks_awarded: item.marks_awarded,
            status,
            student_text,
        }
    }

    /// 把完整的评估结果映射为展示结构
    pub fn present(outcome: &EvaluationOutcome) -> DisplayResult {
        let report = &outcome.report;
        DisplayResult {
            kind: outcome.kind,
            marks_awarded: report.marks_awarded,
            total_marks: report.total_marks,
            percentage: Self::percentage(report.marks_awarded, report.total_marks),
            verdict: report.verdict.clone(),
            verdict_tier: Self::classify_verdict(&report.verdict),
            breakdown: report
                .marking_breakdown
                .iter()
                .enumerate()
                .map(|(i, item)| Self::present_breakdown_item(i, item))
                .collect(),
            conceptual_accuracy: report.conceptual_accuracy.clone(),
            key_points_covered: report.key_points_covered.clone(),
            missing_or_incorrect_points: report.missing_or_incorrect_points.clone(),
            presentation_feedback: report.presentation_feedback.clone(),
            examiner_remarks: report.examiner_remarks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_never_divides_by_zero() {
        assert_eq!(ResultPresenter::percentage(0.0, 0.0), 0.0);
        assert_eq!(ResultPresenter::percentage(5.0, 10.0), 50.0);
        assert_eq!(ResultPresenter::percentage(7.0, 9.0), 77.8);
    }

    #[test]
    fn verdict_tiers_match_in_precedence_order() {
        assert_eq!(
            ResultPresenter::classify_verdict("Outstanding work"),
            VerdictTier::Excellent
        );
        assert_eq!(
            ResultPresenter::classify_verdict("Very Good overall"),
            VerdictTier::Good
        );
        assert_eq!(
            ResultPresenter::classify_verdict("SATISFACTORY attempt"),
            VerdictTier::Average
        );
        // 无关键词命中时落到 Poor
        assert_eq!(
            ResultPresenter::classify_verdict("needs improvement"),
            VerdictTier::Poor
        );
    }

    #[test]
    fn no_match_overrides_provided_status() {
        let item = BreakdownItem {
            scheme_point: Some("no_match".to_string()),
            point_code: None,
            max_marks: 2.0,
            marks_awarded: 0.0,
            status: Some("attempted".to_string()),
            student_point: None,
        };
        assert_eq!(
            ResultPresenter::classify_breakdown_status(&item),
            BreakdownStatus::NoMatch
        );
    }

    #[test]
    fn not_attempted_without_student_text_gets_placeholder() {
        let item = BreakdownItem {
            scheme_point: Some("MC_DEF".to_string()),
            point_code: None,
            max_marks: 4.0,
            marks_awarded: 0.0,
            status: Some("not_attempted".to_string()),
            student_point: None,
        };
        let row = ResultPresenter::present_breakdown_item(0, &item);
        assert_eq!(row.status, BreakdownStatus::NotAttempted);
        assert_eq!(row.student_text, "学生未作答该要点");
        assert_eq!(row.point_code, "MC_DEF");
    }

    #[test]
    fn status_passthrough() {
        let mut item = BreakdownItem {
            scheme_point: None,
            point_code: Some("P1".to_string()),
            max_marks: 2.0,
            marks_awarded: 2.0,
            status: Some("attempted".to_string()),
            student_point: Some("边际成本是...".to_string()),
        };
        assert_eq!(
            ResultPresenter::classify_breakdown_status(&item),
            BreakdownStatus::Attempted
        );
        item.status = Some("attempted_but_not_awarded".to_string());
        assert_eq!(
            ResultPresenter::classify_breakdown_status(&item),
            BreakdownStatus::NotAwarded
        );
    }
}
