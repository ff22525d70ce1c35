//! Planview 核心模型
//!
//! 提供建筑图纸查看器的几何图元、图层、标注和视口变换。
//!
//! # 架构设计
//!
//! - `Geometry`: 封闭的图元枚举（7种），缺字段状态不可表示
//! - `Layer`: 有序元素列表 + 可见性/锁定/颜色/不透明度
//! - `Drawing`: 图层与标注的唯一变更入口
//! - `Viewport`: 设备像素 ↔ 模型空间的完整逆仿射变换与网格吸附
//!
//! # 示例
//!
//! ```rust
//! use planview_core::prelude::*;
//!
//! let line = Line::new(Point2::origin(), Point2::new(300.0, 400.0));
//! assert_eq!(line.length(), 500.0);
//! ```

pub mod annotation;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod math;
pub mod style;
pub mod viewport;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::annotation::{Annotation, AnnotationKind};
    pub use crate::drawing::Drawing;
    pub use crate::error::DrawingError;
    pub use crate::geometry::{
        Arc, Circle, Dimension, Element, Geometry, Line, Polyline, Rectangle, Text,
    };
    pub use crate::layer::Layer;
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
    pub use crate::style::{Color, LineType, ResolvedStyle, Style};
    pub use crate::viewport::{Rotation, Viewport};
}
