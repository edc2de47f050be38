use crate::lifecycle::LifecyclePhase;
use crate::platform::window_system::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("application is not initialized")]
    NotInitialized,
    #[error("application is already initialized")]
    AlreadyInitialized,
    #[error("application is already finished")]
    AlreadyFinished,
    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition { from: LifecyclePhase, to: LifecyclePhase },
    #[error("OpenGL functions are not loaded")]
    GlNotLoaded,
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
