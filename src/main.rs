use anyhow::{Context, Result};
use tracing::{info, warn};

use answer_eval_session::utils::logging;
use answer_eval_session::{
    Artifact, Config, DisplayResult, InputMode, ResultPresenter, Role, SessionFlow,
};

/// 命令行用法：
///
/// 上传模式：`answer_eval_session <题目图片>... -- <答案图片>...`
/// 直接模式：不带参数，从 QUESTION_TEXT / ANSWER_TEXT 环境变量读取文本
#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config.api_base_url);

    let mut flow = SessionFlow::new(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_direct_session(&mut flow).await?;
    } else {
        run_upload_session(&mut flow, &args).await?;
    }

    // 输出评估结果
    if let Some(outcome) = flow.state().evaluation() {
        print_display_result(&ResultPresenter::present(outcome));
    }

    Ok(())
}

/// 直接键入模式：文本来自环境变量
async fn run_direct_session(flow: &mut SessionFlow) -> Result<()> {
    let question = std::env::var("QUESTION_TEXT").unwrap_or_default();
    let answer = std::env::var("ANSWER_TEXT").unwrap_or_default();

    flow.state_mut().switch_mode(InputMode::Direct);
    flow.state_mut().set_direct_text(Role::Question, question);
    flow.state_mut().set_direct_text(Role::Answer, answer);

    flow.evaluate_standard().await?;
    Ok(())
}

/// 上传模式：`--` 之前是题目图片，之后是答案图片
async fn run_upload_session(flow: &mut SessionFlow, args: &[String]) -> Result<()> {
    let split = args.iter().position(|a| a == "--").unwrap_or(args.len());
    let (question_paths, answer_paths) = args.split_at(split);
    let answer_paths = answer_paths.iter().skip(1);

    let mut next_id = 0u64;

    let question_files = load_artifacts(question_paths.iter(), &mut next_id)?;
    let answer_files = load_artifacts(answer_paths, &mut next_id)?;

    flow.state_mut().select_files(Role::Question, question_files)?;
    flow.state_mut().select_files(Role::Answer, answer_files)?;

    flow.run_ocr(Role::Question).await?;
    log_recognized_text(flow, Role::Question);
    flow.state_mut().next_step();

    flow.run_ocr(Role::Answer).await?;
    log_recognized_text(flow, Role::Answer);

    flow.evaluate_standard().await?;
    Ok(())
}

/// 从磁盘加载图片文件
fn load_artifacts<'a>(
    paths: impl Iterator<Item = &'a String>,
    next_id: &mut u64,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for path in paths {
        let content =
            std::fs::read(path).with_context(|| format!("读取文件失败: {}", path))?;
        let name = std::path::Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());
        artifacts.push(Artifact::new(*next_id, content, name, guess_content_type(path)));
        *next_id += 1;
    }
    Ok(artifacts)
}

/// 按扩展名猜测 MIME 类型
fn guess_content_type(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

// ========== 日志辅助函数 ==========

fn log_recognized_text(flow: &SessionFlow, role: Role) {
    let text = flow.state().effective_text(role);
    if text.is_empty() {
        warn!("⚠️ {}识别结果为空", role);
    } else {
        info!("{}文本: {}", role, logging::truncate_text(&text, 80));
    }
}

fn print_display_result(result: &DisplayResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评估结果");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "得分: {} / {} ({}%)",
        result.marks_awarded, result.total_marks, result.percentage
    );
    info!("评语: {} ({:?})", result.verdict, result.verdict_tier);

    for row in &result.breakdown {
        info!(
            "  [{}] {} / {} ({:?}) {}",
            row.point_code,
            row.marks_awarded,
            row.max_marks,
            row.status,
            logging::truncate_text(&row.student_text, 40)
        );
    }

    if let Some(accuracy) = &result.conceptual_accuracy {
        info!("🎯 概念准确性: {}", accuracy);
    }
    for point in &result.key_points_covered {
        info!("✅ 已覆盖要点: {}", point);
    }
    for point in &result.missing_or_incorrect_points {
        info!("⚠️ 缺失或错误要点: {}", point);
    }
    if let Some(feedback) = &result.presentation_feedback {
        info!("📝 表达反馈: {}", feedback);
    }
    if let Some(remarks) = &result.examiner_remarks {
        info!("💬 考官评语: {}", remarks);
    }
    info!("{}", "=".repeat(60));
}
