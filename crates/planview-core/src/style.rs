//! 视觉属性
//!
//! 颜色、线型和元素级样式覆盖。图层提供默认值，
//! 元素样式中的 `Some` 字段逐项覆盖。

use crate::error::DrawingError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 默认字体大小（模型单位）
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// 默认字体族
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// RGB颜色
///
/// 序列化为 `#rrggbb` 十六进制字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 从 `#rrggbb` 字符串解析
    pub fn from_hex(hex: &str) -> Result<Self, DrawingError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DrawingError::InvalidColor(hex.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| DrawingError::InvalidColor(hex.to_string()))?;
        Ok(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }

    /// 格式化为 `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(D::Error::custom)
    }
}

/// 线型
///
/// 每种线型对应一个固定的 dash 数组。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineType {
    /// 获取dash数组（Solid为None）
    pub fn dash_array(&self) -> Option<&'static [f64]> {
        match self {
            LineType::Solid => None,
            LineType::Dashed => Some(&[8.0, 4.0]),
            LineType::Dotted => Some(&[2.0, 2.0]),
            LineType::DashDot => Some(&[8.0, 4.0, 2.0, 4.0]),
        }
    }
}

/// 元素级样式覆盖
///
/// 所有字段可选，缺省时回退到图层默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stroke: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line_type: Option<LineType>,
}

/// 解析后的有效样式
///
/// 图层默认值与元素覆盖合并后的结果，渲染器直接使用。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub opacity: f64,
    pub font_size: f64,
    pub font_family: String,
    pub line_type: LineType,
}

impl Style {
    /// 合并图层默认值
    ///
    /// 元素自身的字段优先，缺省字段取图层的颜色/不透明度。
    pub fn resolve(&self, layer_color: Color, layer_opacity: f64) -> ResolvedStyle {
        ResolvedStyle {
            stroke: self.stroke.unwrap_or(layer_color),
            stroke_width: self.stroke_width.unwrap_or(1.0),
            fill: self.fill,
            opacity: self.opacity.unwrap_or(layer_opacity).clamp(0.0, 1.0),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            line_type: self.line_type.unwrap_or_default(),
        }
    }

    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = Some(line_type);
        self
    }
}
