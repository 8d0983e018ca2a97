//! 评分方案构建器 - 业务能力层
//!
//! 维护一份可编辑的方案草稿（手工录入或由生成服务整体替换），
//! 并在实验性评估发起前做一致性校验。

use tracing::{debug, info};

use crate::error::{SchemeError, SessionError, SessionResult};
use crate::models::{GeneratedScheme, MarkingScheme, SchemePoint};

/// 草稿的默认总分（与录入表单的初始值一致）
const DEFAULT_TOTAL_MARKS: f64 = 10.0;

/// 评分方案构建器
#[derive(Debug, Clone)]
pub struct MarkingSchemeBuilder {
    total_marks: f64,
    points: Vec<SchemePoint>,
}

impl Default for MarkingSchemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkingSchemeBuilder {
    /// 创建新草稿：总分 10，一个空白要点
    pub fn new() -> Self {
        Self {
            total_marks: DEFAULT_TOTAL_MARKS,
            points: vec![SchemePoint::blank()],
        }
    }

    pub fn total_marks(&self) -> f64 {
        self.total_marks
    }

    pub fn set_total_marks(&mut self, total_marks: f64) {
        self.total_marks = total_marks;
    }

    pub fn points(&self) -> &[SchemePoint] {
        &self.points
    }

    /// 追加一个空白要点
    pub fn add_point(&mut self) {
        self.points.push(SchemePoint::blank());
    }

    /// 删除一个要点；必须至少保留一个
    pub fn remove_point(&mut self, index: usize) -> SessionResult<()> {
        if self.points.len() <= 1 {
            return Err(SessionError::Scheme(SchemeError::LastPoint));
        }
        if index >= self.points.len() {
            return Ok(());
        }
        self.points.remove(index);
        Ok(())
    }

    /// 编辑一个要点的全部字段
    pub fn set_point(
        &mut self,
        index: usize,
        code: impl Into<String>,
        description: impl Into<String>,
        max_marks: f64,
    ) {
        if let Some(point) = self.points.get_mut(index) {
            point.code = code.into();
            point.description = description.into();
            point.max_marks = max_marks;
        }
    }

    /// 生成服务调用前的本地前置校验
    ///
    /// 题目为空或总分非正时本地拒绝，不发起网络请求。
    pub fn check_generate_preconditions(
        &self,
        question_text: &str,
        total_marks: f64,
    ) -> SessionResult<()> {
        if question_text.trim().is_empty() {
            return Err(SessionError::Input(
                crate::error::InputError::MissingQuestion,
            ));
        }
        if !(total_marks > 0.0) {
            return Err(SessionError::Scheme(SchemeError::InvalidTotalMarks {
                total: total_marks,
            }));
        }
        Ok(())
    }

    /// 用生成服务的响应整体替换草稿
    ///
    /// 仅在成功响应到手后调用；失败路径不走这里，
    /// 用户编辑中的草稿保持原样。
    pub fn replace_from_generated(&mut self, generated: GeneratedScheme) {
        info!("✓ 方案生成成功，共 {} 个要点", generated.scheme.len());
        self.points = generated.scheme;
        if let Some(total) = generated.total_marks {
            self.total_marks = total;
        }
    }

    /// 提交前校验
    ///
    /// 要点满分之和必须与总分精确相等（不做浮点容差），
    /// 且每个要点的编码 / 描述非空、满分非负。
    /// 成功时返回规范化的方案，可直接随请求发送。
    pub fn validate_for_submit(&self) -> SessionResult<MarkingScheme> {
        for (index, point) in self.points.iter().enumerate() {
            if point.code.trim().is_empty() {
                return Err(SessionError::incomplete_scheme(index, "point_code"));
            }
            if point.description.trim().is_empty() {
                return Err(SessionError::incomplete_scheme(index, "description"));
            }
            if point.max_marks.is_nan() || point.max_marks < 0.0 {
                return Err(SessionError::incomplete_scheme(index, "max_marks"));
            }
        }

        let sum: f64 = self.points.iter().map(|p| p.max_marks).sum();
        if sum != self.total_marks {
            return Err(SessionError::scheme_mismatch(self.total_marks, sum));
        }

        debug!(
            "方案校验通过：{} 个要点，总分 {}",
            self.points.len(),
            self.total_marks
        );

        Ok(MarkingScheme {
            total_marks: self.total_marks,
            scheme: self.points.clone(),
        })
    }
}
