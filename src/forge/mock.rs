//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge keeps statuses and protection rules in memory, records
//! every operation, and can be told to fail a specific operation.
//!
//! # Example
//!
//! ```
//! use signoff::core::types::BranchName;
//! use signoff::forge::mock::MockForge;
//! use signoff::forge::{Forge, ProtectionRequest};
//!
//! let forge = MockForge::new().with_default_branch("main");
//! let main = forge.default_branch().unwrap();
//!
//! forge.set_protection(&main, &ProtectionRequest::signoff_only()).unwrap();
//! assert!(forge.get_protection(&main).unwrap().requires_signoff());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{
    AdminEnforcement, BranchProtection, Forge, ForgeError, ProtectionRequest, SignoffStatus,
};
use crate::core::types::BranchName;

/// Mock forge for testing.
///
/// Clones share state via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

#[derive(Debug)]
struct MockForgeInner {
    default_branch: String,
    protections: HashMap<String, BranchProtection>,
    statuses: Vec<SignoffStatus>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Which operation should fail, and how.
#[derive(Debug, Clone)]
pub enum FailOn {
    CreateStatus(String),
    DefaultBranch(String),
    GetProtection(String),
    SetProtection(String),
    DeleteProtection(String),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CreateStatus {
        sha: String,
        description: String,
    },
    DefaultBranch,
    GetProtection {
        branch: String,
    },
    SetProtection {
        branch: String,
        contexts: Vec<String>,
    },
    DeleteProtection {
        branch: String,
    },
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockForge {
    /// Create an empty mock forge whose default branch is `main`.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                default_branch: "main".to_string(),
                protections: HashMap::new(),
                statuses: Vec::new(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    pub fn with_default_branch(self, branch: &str) -> Self {
        self.lock().default_branch = branch.to_string();
        self
    }

    /// Seed a protection rule for `branch`.
    pub fn with_protection(self, branch: &str, protection: BranchProtection) -> Self {
        self.lock()
            .protections
            .insert(branch.to_string(), protection);
        self
    }

    /// Make one operation fail with an API error carrying `message`.
    pub fn fail_on(self, fail: FailOn) -> Self {
        self.lock().fail_on = Some(fail);
        self
    }

    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    pub fn statuses(&self) -> Vec<SignoffStatus> {
        self.lock().statuses.clone()
    }

    pub fn protection(&self, branch: &str) -> Option<BranchProtection> {
        self.lock().protections.get(branch).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockForgeInner> {
        self.inner.lock().expect("mock forge lock poisoned")
    }

    fn api_error(message: &str) -> ForgeError {
        ForgeError::ApiError {
            status: 1,
            message: message.to_string(),
        }
    }
}

impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn create_status(&self, status: &SignoffStatus) -> Result<(), ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::CreateStatus {
            sha: status.sha.to_string(),
            description: status.description.clone(),
        });
        if let Some(FailOn::CreateStatus(ref message)) = inner.fail_on {
            return Err(Self::api_error(message));
        }
        inner.statuses.push(status.clone());
        Ok(())
    }

    fn default_branch(&self) -> Result<BranchName, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::DefaultBranch);
        if let Some(FailOn::DefaultBranch(ref message)) = inner.fail_on {
            return Err(Self::api_error(message));
        }
        BranchName::new(inner.default_branch.clone())
            .map_err(|e| ForgeError::InvalidResponse(e.to_string()))
    }

    fn get_protection(&self, branch: &BranchName) -> Result<BranchProtection, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::GetProtection {
            branch: branch.to_string(),
        });
        if let Some(FailOn::GetProtection(ref message)) = inner.fail_on {
            return Err(Self::api_error(message));
        }
        inner
            .protections
            .get(branch.as_str())
            .cloned()
            .ok_or_else(|| ForgeError::NotFound("Branch not protected (HTTP 404)".to_string()))
    }

    fn set_protection(
        &self,
        branch: &BranchName,
        request: &ProtectionRequest,
    ) -> Result<(), ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::SetProtection {
            branch: branch.to_string(),
            contexts: request
                .required_status_checks
                .context_names()
                .map(String::from)
                .collect(),
        });
        if let Some(FailOn::SetProtection(ref message)) = inner.fail_on {
            return Err(Self::api_error(message));
        }
        inner.protections.insert(
            branch.to_string(),
            BranchProtection {
                required_status_checks: Some(request.required_status_checks.clone()),
                enforce_admins: request
                    .enforce_admins
                    .map(|enabled| AdminEnforcement { enabled }),
            },
        );
        Ok(())
    }

    fn delete_protection(&self, branch: &BranchName) -> Result<(), ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::DeleteProtection {
            branch: branch.to_string(),
        });
        if let Some(FailOn::DeleteProtection(ref message)) = inner.fail_on {
            return Err(Self::api_error(message));
        }
        inner.protections.remove(branch.as_str());
        Ok(())
    }
}
