//! JSON互换格式
//!
//! 人类可读的文档表示，用于调试和与外部工具交换数据。

use crate::document::Document;
use crate::error::FileError;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// 保存为JSON文件
pub fn save(document: &Document, path: &Path) -> Result<(), FileError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, document)?;
    tracing::info!("Saved document as JSON to {}", path.display());
    Ok(())
}

/// 从JSON文件加载
pub fn load(path: &Path) -> Result<Document, FileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let document = serde_json::from_reader(reader)?;
    tracing::info!("Loaded document from JSON {}", path.display());
    Ok(document)
}

/// 从JSON字符串解析
pub fn from_str(json: &str) -> Result<Document, FileError> {
    Ok(serde_json::from_str(json)?)
}
