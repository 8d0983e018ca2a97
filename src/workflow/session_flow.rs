//! 会话流程编排 - 流程层
//!
//! 核心职责：把状态机的 begin/finish 两段转换与真正的远端调用
//! 缝合起来。所有网络请求在这里发起；状态只通过 `SessionState`
//! 的转换函数修改。
//!
//! 流程顺序：
//! 1. 选择文件 → runOCR（按角色）→ 覆盖值预填 / 用户修正
//! 2. evaluate_standard 或 evaluate_experimental（互斥）
//! 3. ResultPresenter 映射展示

use tracing::{error, info, warn};

use crate::clients::{EvalClient, OcrClient};
use crate::config::Config;
use crate::error::SessionResult;
use crate::models::{EvaluationKind, Role};
use crate::workflow::session_state::SessionState;

/// 会话流程
///
/// - 持有会话状态与两个远端客户端
/// - 每个异步操作：begin（本地校验）→ 网络请求 → finish（写回）
/// - 加载标志在每条出口路径上都会被清除
pub struct SessionFlow {
    state: SessionState,
    ocr_client: OcrClient,
    eval_client: EvalClient,
}

impl SessionFlow {
    /// 创建新的会话流程
    pub fn new(config: &Config) -> Self {
        Self {
            state: SessionState::new(),
            ocr_client: OcrClient::new(config),
            eval_client: EvalClient::new(config),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// 识别一个角色批次内的全部图片
    ///
    /// 成功后该角色的覆盖值被预填为合并文本；
    /// 失败时该角色的 OCR 结果保持为 None。
    pub async fn run_ocr(&mut self, role: Role) -> SessionResult<()> {
        let artifacts = self.state.begin_ocr(role)?;

        info!("🔍 正在识别{}图片，共 {} 个文件...", role, artifacts.len());

        match self.ocr_client.recognize(role, &artifacts).await {
            Ok(outcome) => {
                info!(
                    "✓ {}识别完成，合并文本 {} 字符",
                    role,
                    outcome.combined_text.chars().count()
                );
                self.state.finish_ocr_success(role, outcome);
                Ok(())
            }
            Err(e) => {
                error!("❌ {}识别失败: {}", role, e);
                self.state.finish_ocr_failure(role, e.clone());
                Err(e)
            }
        }
    }

    /// 标准评估
    pub async fn evaluate_standard(&mut self) -> SessionResult<()> {
        let inputs = self.state.begin_evaluation(EvaluationKind::Standard)?;

        info!("📊 正在发起标准评估...");

        match self
            .eval_client
            .evaluate_standard(&inputs.question, &inputs.answer)
            .await
        {
            Ok(report) => {
                info!(
                    "✓ 标准评估完成: {} / {} ({})",
                    report.marks_awarded, report.total_marks, report.verdict
                );
                self.state
                    .finish_evaluation_success(EvaluationKind::Standard, report);
                Ok(())
            }
            Err(e) => {
                error!("❌ 标准评估失败: {}", e);
                self.state
                    .finish_evaluation_failure(EvaluationKind::Standard, e.clone());
                Err(e)
            }
        }
    }

    /// 实验性评估
    ///
    /// 先校验评分方案（失败只记录错误，不触碰加载标志），
    /// 再走与标准评估相同的文本前置校验与互斥检查。
    pub async fn evaluate_experimental(&mut self) -> SessionResult<()> {
        let scheme = match self.state.scheme_builder().validate_for_submit() {
            Ok(scheme) => scheme,
            Err(e) => {
                warn!("⚠️ 评分方案校验未通过: {}", e);
                self.state.record_error(e.clone());
                return Err(e);
            }
        };

        let inputs = self.state.begin_evaluation(EvaluationKind::Experimental)?;

        info!(
            "🧪 正在发起实验性评估，方案共 {} 个要点...",
            scheme.scheme.len()
        );

        match self
            .eval_client
            .evaluate_experimental(&inputs.question, &inputs.answer, &scheme)
            .await
        {
            Ok(report) => {
                info!(
                    "✓ 实验性评估完成: {} / {}，明细 {} 条",
                    report.marks_awarded,
                    report.total_marks,
                    report.marking_breakdown.len()
                );
                self.state
                    .finish_evaluation_success(EvaluationKind::Experimental, report);
                Ok(())
            }
            Err(e) => {
                error!("❌ 实验性评估失败: {}", e);
                self.state
                    .finish_evaluation_failure(EvaluationKind::Experimental, e.clone());
                Err(e)
            }
        }
    }

    /// 请求生成服务产出评分方案草稿
    ///
    /// 本地前置校验失败不发起网络请求；远端失败时
    /// 用户编辑中的草稿保持原样。
    pub async fn generate_scheme(&mut self, total_marks: f64) -> SessionResult<()> {
        let question = self.state.effective_text(Role::Question);

        if let Err(e) = self
            .state
            .scheme_builder()
            .check_generate_preconditions(&question, total_marks)
        {
            warn!("⚠️ 方案生成前置校验未通过: {}", e);
            self.state.record_error(e.clone());
            return Err(e);
        }

        info!("📋 正在请求生成评分方案，总分 {}...", total_marks);

        match self.eval_client.generate_scheme(&question, total_marks).await {
            Ok(generated) => {
                self.state
                    .scheme_builder_mut()
                    .replace_from_generated(generated);
                Ok(())
            }
            Err(e) => {
                error!("❌ 方案生成失败，草稿保持原样: {}", e);
                self.state.record_error(e.clone());
                Err(e)
            }
        }
    }

    /// 把一段合并文本分类为题目与答案并填入直接键入框
    pub async fn classify_direct_text(&mut self, text: &str) -> SessionResult<()> {
        info!("📋 正在分类文本...");

        match self.ocr_client.classify_text(text).await {
            Ok(classified) => {
                info!(
                    "✓ 分类完成，题目 {} 字符 / 答案 {} 字符",
                    classified.question.chars().count(),
                    classified.answer.chars().count()
                );
                self.state.set_direct_text(Role::Question, classified.question);
                self.state.set_direct_text(Role::Answer, classified.answer);
                Ok(())
            }
            Err(e) => {
                error!("❌ 文本分类失败: {}", e);
                self.state.record_error(e.clone());
                Err(e)
            }
        }
    }
}
