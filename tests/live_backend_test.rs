use answer_eval_session::config::Config;
use answer_eval_session::utils::logging;
use answer_eval_session::{EvaluationKind, InputMode, ResultPresenter, Role, SessionFlow};

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_direct_text_standard_evaluation() {
    // 初始化日志
    logging::init(false);

    // 加载配置
    let config = Config::from_env();

    let mut flow = SessionFlow::new(&config);

    // 直接键入模式
    flow.state_mut().switch_mode(InputMode::Direct);
    flow.state_mut().set_direct_text(
        Role::Question,
        "What is the law of demand? Explain with an example.",
    );
    flow.state_mut().set_direct_text(
        Role::Answer,
        "The law of demand states that, other things being equal, \
         as the price of a good rises the quantity demanded falls. \
         For example, when the price of apples doubles, consumers buy fewer apples.",
    );

    // 发起标准评估
    flow.evaluate_standard().await.expect("标准评估失败");

    let outcome = flow
        .state()
        .evaluation()
        .expect("评估成功后应保留结果");
    assert_eq!(outcome.kind, EvaluationKind::Standard);

    let display = ResultPresenter::present(outcome);
    assert!(display.total_marks > 0.0, "总分应大于 0");
}

#[tokio::test]
#[ignore]
async fn test_generate_marking_scheme() {
    // 初始化日志
    logging::init(false);

    // 加载配置
    let config = Config::from_env();

    let mut flow = SessionFlow::new(&config);

    flow.state_mut().switch_mode(InputMode::Direct);
    flow.state_mut().set_direct_text(
        Role::Question,
        "Define opportunity cost and give two examples.",
    );

    // 远端生成评分方案草稿
    flow.generate_scheme(10.0).await.expect("方案生成失败");

    let builder = flow.state().scheme_builder();
    assert!(!builder.points().is_empty(), "生成的方案应至少有一个得分点");
}

#[tokio::test]
#[ignore]
async fn test_classify_combined_text() {
    // 初始化日志
    logging::init(false);

    // 加载配置
    let config = Config::from_env();

    let mut flow = SessionFlow::new(&config);
    flow.state_mut().switch_mode(InputMode::Direct);

    // 文本分类：把混合文本拆成题目与答案
    flow.classify_direct_text(
        "Q: What is inflation? A: Inflation is a sustained rise in the general price level.",
    )
    .await
    .expect("文本分类失败");

    assert!(
        !flow.state().effective_text(Role::Question).is_empty(),
        "分类后题目文本不应为空"
    );
}
