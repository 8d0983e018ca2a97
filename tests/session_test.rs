//! 会话状态机的纯状态测试
//!
//! 不发起任何网络请求：异步操作的两段式转换
//! （begin / finish）直接在测试里衔接。

use answer_eval_session::{
    Artifact, EvaluationKind, EvaluationReport, InputError, InputMode, OcrOutcome, Role,
    SessionError, SessionState, Step,
};

fn image(id: u64, name: &str) -> Artifact {
    Artifact::new(id, vec![0u8; 8], name, "image/png")
}

fn ocr_outcome(combined: &str) -> OcrOutcome {
    OcrOutcome {
        individual_results: Vec::new(),
        combined_text: combined.to_string(),
        total_files: 1,
        average_confidence: Some(0.9),
    }
}

fn report(awarded: f64, total: f64, verdict: &str) -> EvaluationReport {
    serde_json::from_value(serde_json::json!({
        "marks_awarded": awarded,
        "total_marks": total,
        "verdict": verdict,
    }))
    .expect("报告构造失败")
}

#[test]
fn begin_ocr_rejects_empty_batch_without_touching_loading_flag() {
    let mut state = SessionState::new();
    let err = state.begin_ocr(Role::Question).unwrap_err();
    assert_eq!(
        err,
        SessionError::Input(InputError::EmptyInput {
            role: Role::Question
        })
    );
    assert!(!state.is_ocr_loading(Role::Question));
    // 本地拒绝同样写入错误槽位
    assert_eq!(state.last_error(), Some(&err));
}

#[test]
fn overlapping_ocr_for_same_role_is_rejected() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();

    state.begin_ocr(Role::Question).unwrap();
    assert!(state.is_ocr_loading(Role::Question));

    let err = state.begin_ocr(Role::Question).unwrap_err();
    assert_eq!(
        err,
        SessionError::Input(InputError::OcrInProgress {
            role: Role::Question
        })
    );
    // 第一个请求的加载标志不受影响
    assert!(state.is_ocr_loading(Role::Question));
}

#[test]
fn ocr_failure_leaves_outcome_none_and_clears_loading() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Answer, vec![image(1, "a.png")])
        .unwrap();

    state.begin_ocr(Role::Answer).unwrap();
    let failure = SessionError::transport_failure("/ocr/ocr-answer", "服务不可达");
    state.finish_ocr_failure(Role::Answer, failure.clone());

    assert!(state.ocr(Role::Answer).is_none());
    assert!(!state.is_ocr_loading(Role::Answer));
    assert_eq!(state.last_error(), Some(&failure));
}

#[test]
fn ocr_success_stores_outcome_then_primes_override() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();

    state.begin_ocr(Role::Question).unwrap();
    state.finish_ocr_success(Role::Question, ocr_outcome("识别出的题目"));

    assert!(!state.is_ocr_loading(Role::Question));
    assert_eq!(
        state.ocr(Role::Question).unwrap().combined_text,
        "识别出的题目"
    );
    assert_eq!(state.effective_text(Role::Question), "识别出的题目");
}

#[test]
fn clear_files_cascades_to_ocr_and_override() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();
    state.begin_ocr(Role::Question).unwrap();
    state.finish_ocr_success(Role::Question, ocr_outcome("旧文本"));
    state.set_override(Role::Question, "编辑过的文本");

    state.clear_files(Role::Question);

    assert!(state.batch(Role::Question).is_empty());
    assert!(state.ocr(Role::Question).is_none());
    assert_eq!(state.effective_text(Role::Question), "");
}

#[test]
fn evaluation_requires_both_texts() {
    let mut state = SessionState::new();
    state.switch_mode(InputMode::Direct);

    let err = state.begin_evaluation(EvaluationKind::Standard).unwrap_err();
    assert_eq!(err, SessionError::Input(InputError::MissingQuestion));

    state.set_direct_text(Role::Question, "什么是边际成本？");
    let err = state.begin_evaluation(EvaluationKind::Standard).unwrap_err();
    assert_eq!(err, SessionError::Input(InputError::MissingAnswer));

    // 纯空白不算有效答案
    state.set_direct_text(Role::Answer, "   \n ");
    let err = state.begin_evaluation(EvaluationKind::Standard).unwrap_err();
    assert_eq!(err, SessionError::Input(InputError::MissingAnswer));
    assert!(!state.is_evaluating());
}

#[test]
fn concurrent_evaluations_are_rejected_not_queued() {
    let mut state = SessionState::new();
    state.switch_mode(InputMode::Direct);
    state.set_direct_text(Role::Question, "Q");
    state.set_direct_text(Role::Answer, "A");

    state.begin_evaluation(EvaluationKind::Standard).unwrap();
    let err = state
        .begin_evaluation(EvaluationKind::Experimental)
        .unwrap_err();
    assert_eq!(err, SessionError::Input(InputError::EvaluationInProgress));
}

#[test]
fn at_most_one_evaluation_outcome_is_retained() {
    let mut state = SessionState::new();
    state.switch_mode(InputMode::Direct);
    state.set_direct_text(Role::Question, "Q");
    state.set_direct_text(Role::Answer, "A");

    state.begin_evaluation(EvaluationKind::Standard).unwrap();
    state.finish_evaluation_success(EvaluationKind::Standard, report(7.0, 10.0, "Good"));
    assert_eq!(
        state.evaluation().unwrap().kind,
        EvaluationKind::Standard
    );

    // 发起实验性评估即清除已保留的标准结果
    state
        .begin_evaluation(EvaluationKind::Experimental)
        .unwrap();
    assert!(state.evaluation().is_none());
    state.finish_evaluation_success(EvaluationKind::Experimental, report(8.0, 10.0, "Excellent"));
    assert_eq!(
        state.evaluation().unwrap().kind,
        EvaluationKind::Experimental
    );
}

#[test]
fn successful_evaluation_forces_step_three_from_anywhere() {
    let mut state = SessionState::new();
    state.switch_mode(InputMode::Direct);
    state.set_direct_text(Role::Question, "Q");
    state.set_direct_text(Role::Answer, "A");
    assert_eq!(state.step(), Step::Question);

    state.begin_evaluation(EvaluationKind::Standard).unwrap();
    state.finish_evaluation_success(EvaluationKind::Standard, report(5.0, 10.0, "Average"));
    assert_eq!(state.step(), Step::Evaluation);
}

#[test]
fn evaluation_failure_keeps_slot_empty_and_clears_loading() {
    let mut state = SessionState::new();
    state.switch_mode(InputMode::Direct);
    state.set_direct_text(Role::Question, "Q");
    state.set_direct_text(Role::Answer, "A");

    state.begin_evaluation(EvaluationKind::Standard).unwrap();
    let failure = SessionError::invalid_response("/evaluate/evaluate");
    state.finish_evaluation_failure(EvaluationKind::Standard, failure.clone());

    assert!(state.evaluation().is_none());
    assert!(!state.is_evaluating());
    assert_eq!(state.last_error(), Some(&failure));
}

#[test]
fn steps_clamp_at_both_edges() {
    let mut state = SessionState::new();
    state.previous_step();
    assert_eq!(state.step(), Step::Question);

    state.next_step();
    state.next_step();
    assert_eq!(state.step(), Step::Evaluation);
    state.next_step();
    assert_eq!(state.step(), Step::Evaluation);

    state.previous_step();
    assert_eq!(state.step(), Step::Answer);
}

#[test]
fn mode_switch_resets_step_and_clears_results() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();
    state.begin_ocr(Role::Question).unwrap();
    state.finish_ocr_success(Role::Question, ocr_outcome("Q"));
    state
        .select_files(Role::Answer, vec![image(2, "b.png")])
        .unwrap();
    state.begin_ocr(Role::Answer).unwrap();
    state.finish_ocr_success(Role::Answer, ocr_outcome("A"));

    state.begin_evaluation(EvaluationKind::Standard).unwrap();
    state.finish_evaluation_success(EvaluationKind::Standard, report(9.0, 10.0, "Excellent"));
    assert_eq!(state.step(), Step::Evaluation);

    state.switch_mode(InputMode::Direct);

    assert_eq!(state.step(), Step::Question);
    assert!(state.evaluation().is_none());
    assert!(state.last_error().is_none());
    // 被离开的上传模式数据全部清空
    assert!(state.batch(Role::Question).is_empty());
    assert!(state.batch(Role::Answer).is_empty());
    assert!(state.ocr(Role::Question).is_none());
    assert_eq!(state.effective_text(Role::Question), "");

    // 切回上传模式时，直接键入的文本同样被清空
    state.set_direct_text(Role::Question, "typed");
    state.switch_mode(InputMode::Upload);
    state.switch_mode(InputMode::Direct);
    assert_eq!(state.effective_text(Role::Question), "");
}

#[test]
fn switching_to_current_mode_is_a_noop() {
    let mut state = SessionState::new();
    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();
    state.next_step();

    state.switch_mode(InputMode::Upload);

    assert_eq!(state.step(), Step::Answer);
    assert_eq!(state.batch(Role::Question).len(), 1);
}

#[test]
fn error_slot_latest_wins_and_dismiss_only_clears_error() {
    let mut state = SessionState::new();
    state.record_error(SessionError::Input(InputError::MissingQuestion));
    state.record_error(SessionError::Input(InputError::MissingAnswer));
    assert_eq!(
        state.last_error(),
        Some(&SessionError::Input(InputError::MissingAnswer))
    );

    state
        .select_files(Role::Question, vec![image(1, "a.png")])
        .unwrap();
    state.dismiss_error();
    assert!(state.last_error().is_none());
    assert_eq!(state.batch(Role::Question).len(), 1);
}

/// 端到端场景：选 2 张题目图 → OCR 合并文本 "X" → 覆盖预填 "X"
/// → 用户改成 "X2" → 发起标准评估时载荷为 question="X2"、answer="Y"
#[test]
fn end_to_end_override_flows_into_dispatch_payload() {
    let mut state = SessionState::new();

    state
        .select_files(
            Role::Question,
            vec![image(1, "q1.png"), image(2, "q2.png")],
        )
        .unwrap();
    state.begin_ocr(Role::Question).unwrap();
    state.finish_ocr_success(Role::Question, ocr_outcome("X"));
    assert_eq!(state.effective_text(Role::Question), "X");

    state.set_override(Role::Question, "X2");

    state
        .select_files(Role::Answer, vec![image(3, "a1.png")])
        .unwrap();
    state.begin_ocr(Role::Answer).unwrap();
    state.finish_ocr_success(Role::Answer, ocr_outcome("Y"));

    let inputs = state.begin_evaluation(EvaluationKind::Standard).unwrap();
    assert_eq!(inputs.question, "X2");
    assert_eq!(inputs.answer, "Y");
}
