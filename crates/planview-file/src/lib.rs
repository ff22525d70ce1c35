//! Planview 文件格式处理
//!
//! - 原生 `.plv` 格式：MessagePack + Zstd，带魔数/版本文件头
//! - JSON 互换格式：人类可读，结构与原生格式一致

pub mod document;
pub mod error;
pub mod json;
pub mod native;

pub use document::{Document, DocumentMetadata};
pub use error::FileError;

use std::path::Path;

/// 按扩展名加载文档
///
/// `.json` 走JSON解析，其余按原生格式处理。
pub fn load(path: &Path) -> Result<Document, FileError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => json::load(path),
        _ => native::load(path),
    }
}
