//! 标注
//!
//! 测量/区域/角度/便签/云线/引注六种标注类型，
//! 目前只有测量标注有创建路径（测量工具的两次点击）。

use crate::math::{Point2, Vector2};
use crate::style::{Color, LineType, Style};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 测量标注的默认单位
pub const MEASUREMENT_UNIT: &str = "mm";

/// 标注类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Measurement,
    Area,
    Angle,
    Note,
    Cloud,
    Callout,
}

impl AnnotationKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationKind::Measurement => "Measurement",
            AnnotationKind::Area => "Area",
            AnnotationKind::Angle => "Angle",
            AnnotationKind::Note => "Note",
            AnnotationKind::Cloud => "Cloud",
            AnnotationKind::Callout => "Callout",
        }
    }
}

/// 标注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub kind: AnnotationKind,
    /// 模型空间坐标序列（至少2个点）
    pub points: Vec<Point2>,
    /// 计算值（测量标注为两点间距离）
    pub value: f64,
    /// 值的单位
    pub unit: String,
    #[serde(default)]
    pub style: Style,
}

impl Annotation {
    /// 从两次测量点击创建测量标注
    ///
    /// 距离为欧几里得距离，与点击顺序无关。
    pub fn measurement(first: Point2, second: Point2) -> Self {
        let delta: Vector2 = second - first;
        Self {
            id: Uuid::new_v4(),
            kind: AnnotationKind::Measurement,
            points: vec![first, second],
            value: delta.norm(),
            unit: MEASUREMENT_UNIT.to_string(),
            style: Style::default()
                .with_stroke(Color::rgb(0xf5, 0x9e, 0x0b))
                .with_line_type(LineType::Dashed),
        }
    }

    /// 标注的显示文本
    pub fn display_text(&self) -> String {
        format!("{:.1} {}", self.value, self.unit)
    }
}
