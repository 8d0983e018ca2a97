//! # Answer Eval Session
//!
//! 一个用于"题目 / 答案 / 评估"会话编排的 Rust 客户端库
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 纯数据类型：文件批次、OCR 结果、评分方案、评估报告
//! - `FileBatch` - 按角色划分的文件批次，容量受限、整体接收或整体拒绝
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 每个远端系统一个客户端，只负责请求与信封校验
//! - `OcrClient` - 按角色的批量图片识别 / 文本分类
//! - `EvalClient` - 标准评估 / 实验性评估 / 方案生成
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理递给它们的数据
//! - `TextOverrideStore` - OCR 文本的用户覆盖
//! - `MarkingSchemeBuilder` - 评分方案草稿的编辑与校验
//! - `ResultPresenter` - 评估报告到展示结构的映射
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/session_state` - 会话状态机，纯转换函数
//! - `workflow/session_flow` - 流程编排，缝合状态转换与远端调用
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{EvalClient, OcrClient};
pub use config::Config;
pub use error::{ApiError, InputError, SchemeError, SessionError, SessionResult};
pub use models::{
    Artifact, EvaluationKind, EvaluationOutcome, EvaluationReport, FileBatch, OcrOutcome, Role,
};
pub use services::{
    BreakdownStatus, DisplayResult, MarkingSchemeBuilder, ResultPresenter, TextOverrideStore,
    VerdictTier,
};
pub use workflow::{InputMode, SessionFlow, SessionState, Step};
