//! 图层定义
//!
//! 图层持有有序的元素列表和可见性/锁定/颜色/不透明度属性。
//! 不透明度在每次写入时钳制到 [0,1]；锁定图层拒绝元素变更。

use crate::geometry::Element;
use crate::style::Color;
use serde::{Deserialize, Serialize};

/// 图层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 唯一标识（字符串，来自绘图数据）
    pub id: String,
    /// 显示名称
    pub name: String,
    /// 是否可见
    pub visible: bool,
    /// 是否锁定（锁定时拒绝元素变更）
    pub locked: bool,
    /// 图层默认颜色
    pub color: Color,
    /// 图层不透明度 [0,1]
    opacity: f64,
    /// 元素列表（渲染按此顺序）
    pub elements: Vec<Element>,
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
            color,
            opacity: 1.0,
            elements: Vec::new(),
        }
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// 设置不透明度，钳制到 [0,1]
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
