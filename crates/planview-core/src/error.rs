//! 核心模型错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawingError {
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Layer is locked: {0}")]
    LayerLocked(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
