use crate::error::AppError;

/// app 的生命周期阶段，只会向前推进
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecyclePhase {
    #[default]
    Uninitialized,
    Initialized,
    Running,
    Finished,
}

/// 生命周期状态机
///
/// ```text
/// Uninitialized --init--> Initialized --run--> Running --finish--> Finished
///                              \_______________finish______________/
/// ```
#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: LifecyclePhase,
}
impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// 检查能否进入 `to`，不修改状态
    pub fn check(&self, to: LifecyclePhase) -> Result<(), AppError> {
        use LifecyclePhase::*;

        match (self.phase, to) {
            (Uninitialized, Initialized) | (Initialized, Running) | (Initialized, Finished) | (Running, Finished) => {
                Ok(())
            }

            (Finished, _) => Err(AppError::AlreadyFinished),
            (Uninitialized, Running | Finished) => Err(AppError::NotInitialized),
            (Initialized | Running, Initialized) => Err(AppError::AlreadyInitialized),
            (from, to) => Err(AppError::InvalidTransition { from, to }),
        }
    }

    /// 进入 `to`，返回之前的阶段
    pub fn advance(&mut self, to: LifecyclePhase) -> Result<LifecyclePhase, AppError> {
        self.check(to)?;

        let from = std::mem::replace(&mut self.phase, to);
        log::info!("lifecycle: {from:?} -> {to:?}");
        Ok(from)
    }
}
