use crate::error::Result;
use crate::paths::validate_user_id;

pub const DATA_KEY: &str = "essenceTrackerDataV2";
pub const DEMO_NAMESPACE: &str = "demo";

/// Who the aggregate belongs to. Only used to namespace the storage key; an
/// anonymous session shares the `demo` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn for_user(user_id: &str) -> Result<Self> {
        validate_user_id(user_id)?;
        Ok(Self {
            user_id: Some(user_id.to_string()),
        })
    }

    /// Resolve an optional user id; `None` falls back to the demo namespace.
    pub fn resolve(user_id: Option<&str>) -> Result<Self> {
        match user_id {
            Some(id) => Self::for_user(id),
            None => Ok(Self::anonymous()),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn namespace(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEMO_NAMESPACE)
    }

    pub fn storage_key(&self) -> String {
        format!("{DATA_KEY}:{}", self.namespace())
    }
}
