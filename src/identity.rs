// ==========================================
// 目录批量导入 - 身份协作方
// ==========================================
// 职责: 提供当前调用方的制造商 ID（归属范围）
// 说明: 认证本身不在本层，这里只消费认证结果
// ==========================================

/// 身份提供者
pub trait IdentityProvider: Send + Sync {
    /// 当前已认证的制造商 ID；未认证返回 None
    fn current_owner_id(&self) -> Option<String>;
}

/// 固定身份（CLI / 测试 / 已在外层完成认证的调用方）
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    owner_id: Option<String>,
}

impl StaticIdentity {
    pub fn authenticated(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { owner_id: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_owner_id(&self) -> Option<String> {
        self.owner_id
            .as_ref()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
    }
}
