//! 文本覆盖存储 - 业务能力层
//!
//! 让用户在不重跑 OCR 的前提下修正识别错误：
//! OCR 成功后立刻把合并文本"预填"为可编辑的覆盖值；
//! 一旦覆盖值存在（包括空字符串），它就始终优先于 OCR 文本，
//! 同角色的新 OCR 调用必须显式重新预填，旧的编辑不会被悄悄丢弃。

use crate::models::Role;

/// 按角色存储的文本覆盖
#[derive(Debug, Clone, Default)]
pub struct TextOverrideStore {
    question: Option<String>,
    answer: Option<String>,
}

impl TextOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// OCR 成功后用合并文本预填覆盖值（置为存在，立即可编辑）
    pub fn prime_from_ocr(&mut self, role: Role, combined_text: impl Into<String>) {
        *self.slot_mut(role) = Some(combined_text.into());
    }

    /// 用户显式编辑，始终优先
    pub fn set_override(&mut self, role: Role, value: impl Into<String>) {
        *self.slot_mut(role) = Some(value.into());
    }

    /// 清除覆盖值（批次清空 / 模式切换时级联调用）
    pub fn clear(&mut self, role: Role) {
        *self.slot_mut(role) = None;
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Question => self.question.as_deref(),
            Role::Answer => self.answer.as_deref(),
        }
    }

    /// 生效文本：覆盖值优先，其次 OCR 合并文本，都没有则为空串
    pub fn effective_text(&self, role: Role, ocr_combined: Option<&str>) -> String {
        self.get(role)
            .or(ocr_combined)
            .unwrap_or_default()
            .to_string()
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Question => &mut self.question,
            Role::Answer => &mut self.answer,
        }
    }
}
