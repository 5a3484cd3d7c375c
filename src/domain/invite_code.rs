//! 班级邀请码分配

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClassConfig;
use crate::storage::RosterStore;
use crate::utils::random_code::generate_random_code;

/// 候选邀请码生成器
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 随机字母数字码
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    pub length: usize,
    pub uppercase: bool,
}

impl RandomCodeGenerator {
    pub fn from_config(config: &ClassConfig) -> Self {
        Self {
            length: config.invite_code_length,
            uppercase: config.invite_code_uppercase,
        }
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length, self.uppercase)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("no unique invite code found after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub struct InviteCodeAllocator<S: RosterStore + ?Sized> {
    store: Arc<S>,
    generator: Box<dyn CodeGenerator>,
    max_attempts: u32,
}

impl<S: RosterStore + ?Sized> InviteCodeAllocator<S> {
    pub fn new(store: Arc<S>, config: &ClassConfig) -> Self {
        Self::with_generator(
            store,
            Box::new(RandomCodeGenerator::from_config(config)),
            config.invite_code_max_attempts,
        )
    }

    pub fn with_generator(
        store: Arc<S>,
        generator: Box<dyn CodeGenerator>,
        max_attempts: u32,
    ) -> Self {
        Self {
            store,
            generator,
            max_attempts,
        }
    }

    /// 生成一个候选码，不检查唯一性
    pub fn allocate(&self) -> String {
        self.generator.generate()
    }

    /// 没有任何班级持有该邀请码时返回 true
    pub async fn is_unique(&self, code: &str) -> Result<bool, AllocationError> {
        self.store
            .class_with_invite_code_exists(code)
            .await
            .map(|exists| !exists)
            .map_err(|e| AllocationError::StorageUnavailable(e.to_string()))
    }

    /// 生成并校验，直到得到未被占用的邀请码或用尽尝试次数
    ///
    /// 返回的邀请码在写入前仍可能被并发请求占用，
    /// 最终由 `classes.invite_code` 唯一约束保证不重复。
    pub async fn allocate_unique(&self) -> Result<String, AllocationError> {
        for attempt in 1..=self.max_attempts {
            let code = self.allocate();
            if self.is_unique(&code).await? {
                debug!("Allocated invite code on attempt {}", attempt);
                return Ok(code);
            }
            debug!("Invite code collision on attempt {}", attempt);
        }

        warn!(
            "Invite code allocation exhausted after {} attempts",
            self.max_attempts
        );
        Err(AllocationError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
