use std::fmt;

use crate::models::artifact::Role;

/// 会话错误类型
///
/// 所有错误在会话层面均可恢复：写入 `last_error` 槽位、
/// 保留已有的有效状态、清除对应的加载标志。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// 输入校验错误（本地拒绝，不发起网络请求）
    Input(InputError),
    /// 评分方案错误
    Scheme(SchemeError),
    /// 远端服务调用错误
    Api(ApiError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Input(e) => write!(f, "输入错误: {}", e),
            SessionError::Scheme(e) => write!(f, "评分方案错误: {}", e),
            SessionError::Api(e) => write!(f, "服务错误: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Input(e) => Some(e),
            SessionError::Scheme(e) => Some(e),
            SessionError::Api(e) => Some(e),
        }
    }
}

/// 输入校验错误
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// 没有选择任何文件
    EmptyInput { role: Role },
    /// 选择的文件中没有有效的图片
    NoValidFiles { role: Role },
    /// 文件数量超出该角色的上限
    TooManyFiles {
        role: Role,
        max: usize,
        attempted: usize,
    },
    /// 题目文本为空
    MissingQuestion,
    /// 答案文本为空
    MissingAnswer,
    /// 该角色的 OCR 请求尚未完成
    OcrInProgress { role: Role },
    /// 已有评估请求在执行中
    EvaluationInProgress,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyInput { role } => {
                write!(f, "请至少为{}选择一个文件", role)
            }
            InputError::NoValidFiles { role } => {
                write!(f, "为{}选择的文件中没有有效的图片，已全部跳过", role)
            }
            InputError::TooManyFiles {
                role,
                max,
                attempted,
            } => {
                write!(
                    f,
                    "{}最多允许 {} 个文件，实际提供了 {} 个",
                    role, max, attempted
                )
            }
            InputError::MissingQuestion => write!(f, "评估前请先提供题目"),
            InputError::MissingAnswer => write!(f, "评估前请先提供答案"),
            InputError::OcrInProgress { role } => {
                write!(f, "{}的 OCR 请求仍在执行中，请等待其完成", role)
            }
            InputError::EvaluationInProgress => {
                write!(f, "已有评估请求在执行中，请等待其完成")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// 评分方案错误
#[derive(Debug, Clone, PartialEq)]
pub enum SchemeError {
    /// 各要点满分之和与总分不一致
    Mismatch { expected: f64, actual: f64 },
    /// 要点缺少必填字段
    Incomplete { index: usize, field: &'static str },
    /// 不能删除最后一个要点
    LastPoint,
    /// 总分必须大于 0
    InvalidTotalMarks { total: f64 },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeError::Mismatch { expected, actual } => {
                write!(
                    f,
                    "方案各要点满分之和 ({}) 必须等于总分 ({})",
                    actual, expected
                )
            }
            SchemeError::Incomplete { index, field } => {
                write!(f, "第 {} 个要点缺少字段: {}", index + 1, field)
            }
            SchemeError::LastPoint => write!(f, "至少需要保留一个评分要点"),
            SchemeError::InvalidTotalMarks { total } => {
                write!(f, "总分必须大于 0，实际为 {}", total)
            }
        }
    }
}

impl std::error::Error for SchemeError {}

/// 远端服务调用错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 响应不满足 status_code == 200 且携带 data 的约定
    InvalidResponseFormat { endpoint: String },
    /// 网络或服务端失败，携带从错误信封中提取的可读信息
    TransportFailure { endpoint: String, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidResponseFormat { endpoint } => {
                write!(f, "响应格式无效 ({})", endpoint)
            }
            ApiError::TransportFailure { endpoint, message } => {
                write!(f, "请求失败 ({}): {}", endpoint, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

// ========== 便捷构造函数 ==========

impl SessionError {
    pub fn empty_input(role: Role) -> Self {
        SessionError::Input(InputError::EmptyInput { role })
    }

    pub fn no_valid_files(role: Role) -> Self {
        SessionError::Input(InputError::NoValidFiles { role })
    }

    pub fn too_many_files(role: Role, max: usize, attempted: usize) -> Self {
        SessionError::Input(InputError::TooManyFiles {
            role,
            max,
            attempted,
        })
    }

    pub fn scheme_mismatch(expected: f64, actual: f64) -> Self {
        SessionError::Scheme(SchemeError::Mismatch { expected, actual })
    }

    pub fn incomplete_scheme(index: usize, field: &'static str) -> Self {
        SessionError::Scheme(SchemeError::Incomplete { index, field })
    }

    pub fn invalid_response(endpoint: impl Into<String>) -> Self {
        SessionError::Api(ApiError::InvalidResponseFormat {
            endpoint: endpoint.into(),
        })
    }

    pub fn transport_failure(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::Api(ApiError::TransportFailure {
            endpoint: endpoint.into(),
            message: message.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 会话结果类型
pub type SessionResult<T> = Result<T, SessionError>;
