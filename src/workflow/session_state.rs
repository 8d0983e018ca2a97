//! 会话状态机 - 流程层
//!
//! 核心职责：持有一次"题目 / 答案 / 评估"会话的全部状态，
//! 并以纯转换函数的形式暴露每一步的前置校验与状态变更。
//! 异步的远端调用不在这里发生：每个异步操作拆成
//! `begin_*`（本地校验 + 置加载标志）与 `finish_*`（写回结果）两段，
//! 由流程编排层（`SessionFlow`）在两段之间完成网络请求。
//!
//! 共享状态只由本状态机修改；其余组件只处理递给它们的数据。

use crate::error::{InputError, SessionError, SessionResult};
use crate::models::{
    Artifact, EvaluationKind, EvaluationOutcome, EvaluationReport, FileBatch, OcrOutcome, Role,
};
use crate::services::{MarkingSchemeBuilder, TextOverrideStore};

/// 会话步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 第 1 步：题目
    Question,
    /// 第 2 步：答案
    Answer,
    /// 第 3 步：评估
    Evaluation,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Question => 1,
            Step::Answer => 2,
            Step::Evaluation => 3,
        }
    }

    fn next(self) -> Step {
        match self {
            Step::Question => Step::Answer,
            Step::Answer => Step::Evaluation,
            Step::Evaluation => Step::Evaluation,
        }
    }

    fn previous(self) -> Step {
        match self {
            Step::Question => Step::Question,
            Step::Answer => Step::Question,
            Step::Evaluation => Step::Answer,
        }
    }
}

/// 输入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 上传图片并 OCR
    Upload,
    /// 直接键入文本
    Direct,
}

/// 各异步操作的加载标志
#[derive(Debug, Clone, Copy, Default)]
struct LoadingFlags {
    question_ocr: bool,
    answer_ocr: bool,
    standard_eval: bool,
    experimental_eval: bool,
}

/// 一次评估请求所需的文本，由 `begin_evaluation` 产出
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInputs {
    pub question: String,
    pub answer: String,
}

/// 会话状态
///
/// 每个会话一个实例：会话开始时创建，切换模式时重置（不销毁），
/// 会话结束时丢弃。
#[derive(Debug, Clone)]
pub struct SessionState {
    step: Step,
    mode: InputMode,
    question_batch: FileBatch,
    answer_batch: FileBatch,
    question_ocr: Option<OcrOutcome>,
    answer_ocr: Option<OcrOutcome>,
    overrides: TextOverrideStore,
    direct_question: String,
    direct_answer: String,
    scheme_builder: MarkingSchemeBuilder,
    /// 至多保留一种评估结果（标准 / 实验性互斥）
    evaluation: Option<EvaluationOutcome>,
    loading: LoadingFlags,
    last_error: Option<SessionError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            step: Step::Question,
            mode: InputMode::Upload,
            question_batch: FileBatch::new(Role::Question),
            answer_batch: FileBatch::new(Role::Answer),
            question_ocr: None,
            answer_ocr: None,
            overrides: TextOverrideStore::new(),
            direct_question: String::new(),
            direct_answer: String::new(),
            scheme_builder: MarkingSchemeBuilder::new(),
            evaluation: None,
            loading: LoadingFlags::default(),
            last_error: None,
        }
    }

    // ========== 只读访问 ==========

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn batch(&self, role: Role) -> &FileBatch {
        match role {
            Role::Question => &self.question_batch,
            Role::Answer => &self.answer_batch,
        }
    }

    pub fn ocr(&self, role: Role) -> Option<&OcrOutcome> {
        match role {
            Role::Question => self.question_ocr.as_ref(),
            Role::Answer => self.answer_ocr.as_ref(),
        }
    }

    pub fn overrides(&self) -> &TextOverrideStore {
        &self.overrides
    }

    pub fn evaluation(&self) -> Option<&EvaluationOutcome> {
        self.evaluation.as_ref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn is_ocr_loading(&self, role: Role) -> bool {
        match role {
            Role::Question => self.loading.question_ocr,
            Role::Answer => self.loading.answer_ocr,
        }
    }

    pub fn is_evaluating(&self) -> bool {
        self.loading.standard_eval || self.loading.experimental_eval
    }

    pub fn scheme_builder(&self) -> &MarkingSchemeBuilder {
        &self.scheme_builder
    }

    pub fn scheme_builder_mut(&mut self) -> &mut MarkingSchemeBuilder {
        &mut self.scheme_builder
    }

    /// 当前生效的文本
    ///
    /// 直接键入模式返回修剪后的键入文本；
    /// 上传模式按"覆盖值 → OCR 合并文本 → 空串"取值。
    pub fn effective_text(&self, role: Role) -> String {
        match self.mode {
            InputMode::Direct => match role {
                Role::Question => self.direct_question.trim().to_string(),
                Role::Answer => self.direct_answer.trim().to_string(),
            },
            InputMode::Upload => self
                .overrides
                .effective_text(role, self.ocr(role).map(|o| o.combined_text.as_str())),
        }
    }

    // ========== 文件与文本变更 ==========

    /// 为一个角色追加文件；整体接收或整体拒绝
    pub fn select_files(&mut self, role: Role, artifacts: Vec<Artifact>) -> SessionResult<usize> {
        match self.batch_mut(role).select(artifacts) {
            Ok(added) => Ok(added),
            Err(e) => self.fail(e),
        }
    }

    /// 移除一个文件；批次因此清空时该角色的 OCR 结果一并失效
    pub fn remove_file(&mut self, role: Role, index: usize) -> Option<Artifact> {
        let removed = self.batch_mut(role).remove(index);
        if removed.is_some() && self.batch(role).is_empty() {
            *self.ocr_mut(role) = None;
        }
        removed
    }

    /// 清空一个角色的批次，并级联清除其 OCR 结果与文本覆盖
    pub fn clear_files(&mut self, role: Role) {
        self.batch_mut(role).clear();
        *self.ocr_mut(role) = None;
        self.overrides.clear(role);
    }

    /// 用户编辑 OCR 文本（上传模式）
    pub fn set_override(&mut self, role: Role, value: impl Into<String>) {
        self.overrides.set_override(role, value);
    }

    /// 直接键入文本（直接模式）
    pub fn set_direct_text(&mut self, role: Role, value: impl Into<String>) {
        match role {
            Role::Question => self.direct_question = value.into(),
            Role::Answer => self.direct_answer = value.into(),
        }
    }

    // ========== OCR 两段式转换 ==========

    /// OCR 发起前校验
    ///
    /// 本地拒绝不触碰加载标志。成功时置加载标志、清除旧错误与
    /// 该角色的旧结果，并交出待上传文件的副本。
    /// 同角色请求在途时拒绝重入：结果写回是"存结果、再预填覆盖"
    /// 两步，交错执行会让过期响应覆盖更新的响应。
    pub fn begin_ocr(&mut self, role: Role) -> SessionResult<Vec<Artifact>> {
        if self.is_ocr_loading(role) {
            return self.fail(SessionError::Input(InputError::OcrInProgress { role }));
        }

        let batch = self.batch(role);
        if batch.is_empty() {
            return self.fail(SessionError::empty_input(role));
        }
        if batch.len() > batch.capacity() {
            let (max, attempted) = (batch.capacity(), batch.len());
            return self.fail(SessionError::too_many_files(role, max, attempted));
        }

        let artifacts = batch.artifacts().to_vec();
        self.set_ocr_loading(role, true);
        self.last_error = None;
        *self.ocr_mut(role) = None;
        Ok(artifacts)
    }

    /// OCR 成功：存结果，再用合并文本预填覆盖值
    pub fn finish_ocr_success(&mut self, role: Role, outcome: OcrOutcome) {
        let combined = outcome.combined_text.clone();
        *self.ocr_mut(role) = Some(outcome);
        self.overrides.prime_from_ocr(role, combined);
        self.set_ocr_loading(role, false);
    }

    /// OCR 失败：结果保持为 None（不存部分结果），记录错误
    pub fn finish_ocr_failure(&mut self, role: Role, error: SessionError) {
        self.last_error = Some(error);
        self.set_ocr_loading(role, false);
    }

    // ========== 评估两段式转换 ==========

    /// 评估发起前校验
    ///
    /// 两种评估互斥：任一评估在途时拒绝新的发起。
    /// 发起即清除已保留的上一次评估结果（无论何种类型），
    /// 会话只代表"最近一次评估尝试"。
    pub fn begin_evaluation(&mut self, kind: EvaluationKind) -> SessionResult<EvaluationInputs> {
        if self.is_evaluating() {
            return self.fail(SessionError::Input(InputError::EvaluationInProgress));
        }

        let question = self.effective_text(Role::Question);
        if question.trim().is_empty() {
            return self.fail(SessionError::Input(InputError::MissingQuestion));
        }

        let answer = self.effective_text(Role::Answer);
        if answer.trim().is_empty() {
            return self.fail(SessionError::Input(InputError::MissingAnswer));
        }

        self.set_eval_loading(kind, true);
        self.last_error = None;
        self.evaluation = None;
        Ok(EvaluationInputs { question, answer })
    }

    /// 评估成功：存带类型标签的结果并强制跳到第 3 步
    pub fn finish_evaluation_success(&mut self, kind: EvaluationKind, report: EvaluationReport) {
        self.evaluation = Some(EvaluationOutcome { kind, report });
        self.step = Step::Evaluation;
        self.set_eval_loading(kind, false);
    }

    /// 评估失败：记录错误，结果槽位保持为空
    pub fn finish_evaluation_failure(&mut self, kind: EvaluationKind, error: SessionError) {
        self.last_error = Some(error);
        self.set_eval_loading(kind, false);
    }

    // ========== 导航与模式 ==========

    /// 前进一步；已到边界时不做任何事
    pub fn next_step(&mut self) {
        let next = self.step.next();
        if next != self.step {
            self.step = next;
            self.last_error = None;
        }
    }

    /// 后退一步；已到边界时不做任何事
    pub fn previous_step(&mut self) {
        let previous = self.step.previous();
        if previous != self.step {
            self.step = previous;
            self.last_error = None;
        }
    }

    /// 切换输入模式：完全重置
    ///
    /// 步骤回到 1，两类评估结果全部清除，被离开模式的角色数据
    /// 全部清空。跨模式混用部分状态没有合法含义，破坏性重置是
    /// 有意为之。切到当前模式不做任何事。
    pub fn switch_mode(&mut self, mode: InputMode) {
        if mode == self.mode {
            return;
        }

        let leaving = self.mode;
        self.mode = mode;
        self.step = Step::Question;
        self.evaluation = None;
        self.last_error = None;

        match leaving {
            InputMode::Upload => {
                self.question_batch.clear();
                self.answer_batch.clear();
                self.question_ocr = None;
                self.answer_ocr = None;
                self.overrides.clear(Role::Question);
                self.overrides.clear(Role::Answer);
            }
            InputMode::Direct => {
                self.direct_question.clear();
                self.direct_answer.clear();
            }
        }
    }

    // ========== 错误槽位 ==========

    /// 记录一个错误（最新的胜出）
    pub fn record_error(&mut self, error: SessionError) {
        self.last_error = Some(error);
    }

    /// 显式关闭错误提示，不影响其他状态
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    // ========== 私有辅助 ==========

    fn fail<T>(&mut self, error: SessionError) -> SessionResult<T> {
        self.last_error = Some(error.clone());
        Err(error)
    }

    fn batch_mut(&mut self, role: Role) -> &mut FileBatch {
        match role {
            Role::Question => &mut self.question_batch,
            Role::Answer => &mut self.answer_batch,
        }
    }

    fn ocr_mut(&mut self, role: Role) -> &mut Option<OcrOutcome> {
        match role {
            Role::Question => &mut self.question_ocr,
            Role::Answer => &mut self.answer_ocr,
        }
    }

    fn set_ocr_loading(&mut self, role: Role, value: bool) {
        match role {
            Role::Question => self.loading.question_ocr = value,
            Role::Answer => self.loading.answer_ocr = value,
        }
    }

    fn set_eval_loading(&mut self, kind: EvaluationKind, value: bool) {
        match kind {
            EvaluationKind::Standard => self.loading.standard_eval = value,
            EvaluationKind::Experimental => self.loading.experimental_eval = value,
        }
    }
}
