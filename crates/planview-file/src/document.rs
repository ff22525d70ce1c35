//! 文档
//!
//! 绘图数据 + 元数据。查看器加载的就是这个结构。

use chrono::{DateTime, Utc};
use planview_core::drawing::Drawing;
use serde::{Deserialize, Serialize};

/// 文档元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: "Untitled".to_string(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// 文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMetadata,
    pub drawing: Drawing,
}

impl Document {
    pub fn new(drawing: Drawing) -> Self {
        Self {
            metadata: DocumentMetadata::default(),
            drawing,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = title.into();
        self
    }

    /// 标记为已修改（刷新修改时间）
    pub fn touch(&mut self) {
        self.metadata.modified_at = Utc::now();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Drawing::sample())
    }
}
