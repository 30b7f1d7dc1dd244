//! 会话存储 - 业务能力层
//!
//! 只负责"读写会话状态文件"能力，简单键值持久化，不关心流程

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::ChatMessage;

/// 持久化的会话状态
///
/// 简单键值集合，文件缺失时按默认值初始化
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub current_question: String,
    #[serde(default)]
    pub current_hint_level: usize,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
    /// 最近一次保存的 Unix 时间戳
    #[serde(default)]
    pub last_used: i64,
}

/// 会话存储服务
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// 创建新的会话存储
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 读取会话状态
    ///
    /// 文件不存在返回默认状态；文件损坏时告警并重置，不让坏数据卡死启动
    pub async fn load(&self) -> AppResult<StoredState> {
        if !self.path.exists() {
            debug!("会话文件不存在，使用默认状态: {}", self.path.display());
            return Ok(StoredState::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::storage_read_failed(self.path.display().to_string(), e))?;

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!("会话文件解析失败，重置为默认状态: {}", e);
                Ok(StoredState::default())
            }
        }
    }

    /// 保存会话状态（自动盖上时间戳）
    pub async fn save(&self, state: &StoredState) -> AppResult<()> {
        let mut stamped = state.clone();
        stamped.last_used = chrono::Local::now().timestamp();

        let content = serde_json::to_string_pretty(&stamped)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::storage_write_failed(self.path.display().to_string(), e))?;

        debug!("会话已保存: {}", self.path.display());
        Ok(())
    }

    /// 清除会话状态
    pub async fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .map_err(|e| AppError::storage_write_failed(self.path.display().to_string(), e))?;
            debug!("会话已清除: {}", self.path.display());
        }
        Ok(())
    }
}
