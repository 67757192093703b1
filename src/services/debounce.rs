//! 重复请求拦截
//!
//! 同一用户在短时间内重复发送同一请求时直接拒绝，避免重复调用 LLM。
//! 由调用方持有实例，不使用全局状态。

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 默认重复判定窗口
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(10);
/// 默认记录保留时长
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60);

/// 按时间淘汰的请求去重表
#[derive(Debug, Clone)]
pub struct RequestDebouncer {
    window: Duration,
    retention: Duration,
    recent: HashMap<String, Instant>,
}

impl RequestDebouncer {
    pub fn new(window: Duration, retention: Duration) -> Self {
        Self {
            window,
            retention: retention.max(window),
            recent: HashMap::new(),
        }
    }

    /// 判断请求是否放行
    ///
    /// 窗口内出现过的 key 返回 `false` 且不刷新时间；
    /// 否则记录本次时间并清理超过保留时长的记录。
    pub fn check(&mut self, key: &str, now: Instant) -> bool {
        if let Some(last) = self.recent.get(key) {
            if now.saturating_duration_since(*last) < self.window {
                info!("🔄 拦截重复请求: {}", key);
                return false;
            }
        }

        self.recent.insert(key.to_string(), now);

        let retention = self.retention;
        let before = self.recent.len();
        self.recent
            .retain(|_, seen| now.saturating_duration_since(*seen) <= retention);
        if self.recent.len() < before {
            debug!("清理过期请求记录 {} 条", before - self.recent.len());
        }

        true
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

impl Default for RequestDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_RETENTION)
    }
}

/// 由用户 ID 和请求内容的哈希组成去重 key
pub fn request_key(user_id: i64, input: &str) -> String {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    format!("{}:{:x}", user_id, hasher.finish())
}
