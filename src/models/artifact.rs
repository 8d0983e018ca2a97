//! 图片文件与文件批次
//!
//! 每个角色（题目 / 答案）各持有一个独立的 `FileBatch`，
//! 批次内的文件顺序决定 OCR 响应按位置对齐到哪个文件。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// 文件所属角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// 题目（最多 2 个文件）
    Question,
    /// 答案（最多 5 个文件）
    Answer,
}

impl Role {
    /// 该角色的文件数量上限
    pub fn capacity(self) -> usize {
        match self {
            Role::Question => 2,
            Role::Answer => 5,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Question => write!(f, "题目"),
            Role::Answer => write!(f, "答案"),
        }
    }
}

/// 一个待 OCR 的图片文件
///
/// 归属其所在的 `FileBatch` 独占；移除或清空批次即销毁。
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub id: u64,
    pub content: Vec<u8>,
    pub display_name: String,
    /// MIME 类型，用于过滤非图片内容
    pub content_type: String,
}

impl Artifact {
    pub fn new(
        id: u64,
        content: Vec<u8>,
        display_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            content,
            display_name: display_name.into(),
            content_type: content_type.into(),
        }
    }

    /// 是否是图片文件
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// 按角色划分的文件批次
///
/// 不变式：任何时刻 `len() <= capacity`。
#[derive(Debug, Clone)]
pub struct FileBatch {
    role: Role,
    capacity: usize,
    artifacts: Vec<Artifact>,
}

impl FileBatch {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            capacity: role.capacity(),
            artifacts: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// 追加一组新文件
    ///
    /// 先过滤掉非图片内容；若过滤后为空则整体不生效并报告
    /// "没有有效文件"。若加入后会超过上限则整体拒绝（不做部分接收），
    /// 批次保持原样。成功时保持到达顺序追加，返回实际加入的数量。
    pub fn select(&mut self, new_artifacts: Vec<Artifact>) -> SessionResult<usize> {
        let valid: Vec<Artifact> = new_artifacts.into_iter().filter(|a| a.is_image()).collect();

        if valid.is_empty() {
            return Err(SessionError::no_valid_files(self.role));
        }

        let attempted = self.artifacts.len() + valid.len();
        if attempted > self.capacity {
            return Err(SessionError::too_many_files(
                self.role,
                self.capacity,
                attempted,
            ));
        }

        let added = valid.len();
        self.artifacts.extend(valid);
        Ok(added)
    }

    /// 移除一个文件，其余文件顺序不变；索引越界时不做任何事
    pub fn remove(&mut self, index: usize) -> Option<Artifact> {
        if index >= self.artifacts.len() {
            return None;
        }
        Some(self.artifacts.remove(index))
    }

    /// 清空批次
    ///
    /// 调用方需要级联清除该角色的 OCR 结果与文本覆盖，
    /// 批次清空后先前的 OCR 输出不再可信。
    pub fn clear(&mut self) {
        self.artifacts.clear();
    }
}
