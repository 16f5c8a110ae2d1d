//! 通用类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 审计信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuditInfo {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// 从持久化的时间戳恢复
    pub fn from_timestamps(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }

    /// 标记一次修改
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_audit_info_has_equal_timestamps() {
        let audit = AuditInfo::new();
        assert_eq!(audit.created_at, audit.updated_at);
    }

    #[test]
    fn test_touch_keeps_created_at() {
        let created = Utc::now() - chrono::Duration::hours(1);
        let mut audit = AuditInfo::from_timestamps(created, created);
        audit.touch();
        assert_eq!(audit.created_at, created);
        assert!(audit.updated_at > created);
    }
}
