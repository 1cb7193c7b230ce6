//! 核心授权模块

/// 授权检查 trait，删除接口通过它校验调用方提供的 key
pub trait Authorizer: Send + Sync {
    fn authorize(&self, api_key: Option<&str>) -> bool;
}

/// 基于单个共享密钥的授权实现
pub struct SharedSecretAuthorizer {
    secret: String,
}

impl SharedSecretAuthorizer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Authorizer for SharedSecretAuthorizer {
    fn authorize(&self, api_key: Option<&str>) -> bool {
        api_key == Some(self.secret.as_str())
    }
}
