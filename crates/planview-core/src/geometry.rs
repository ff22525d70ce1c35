//! 几何图元定义
//!
//! 支持的图元（封闭枚举，7种）：
//! - 线段 (Line)
//! - 多段线 (Polyline)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//! - 矩形 (Rectangle)
//! - 文本 (Text)
//! - 尺寸标注 (Dimension)
//!
//! 每个变体只携带其渲染所需的字段，缺字段的状态在类型上不可表示。

use crate::math::{deg_to_rad, BoundingBox2, Point2, Vector2, EPSILON};
use crate::style::Style;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Line(Line),
    Polyline(Polyline),
    Circle(Circle),
    Arc(Arc),
    Rectangle(Rectangle),
    Text(Text),
    Dimension(Dimension),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
            Geometry::Rectangle(r) => r.bounding_box(),
            Geometry::Text(t) => t.bounding_box(),
            Geometry::Dimension(d) => d.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "Line",
            Geometry::Polyline(_) => "Polyline",
            Geometry::Circle(_) => "Circle",
            Geometry::Arc(_) => "Arc",
            Geometry::Rectangle(_) => "Rectangle",
            Geometry::Text(_) => "Text",
            Geometry::Dimension(_) => "Dimension",
        }
    }

    /// 检查点是否在几何上（考虑容差）
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        match self {
            Geometry::Line(l) => l.distance_to_point(point) <= tolerance,
            Geometry::Polyline(pl) => pl.distance_to_point(point) <= tolerance,
            Geometry::Circle(c) => c.distance_to_point(point).abs() <= tolerance,
            Geometry::Arc(a) => a.distance_to_point(point) <= tolerance,
            Geometry::Rectangle(r) => r.distance_to_point(point) <= tolerance,
            Geometry::Text(t) => t.contains_point(point, tolerance),
            Geometry::Dimension(d) => {
                Line::new(d.start, d.end).distance_to_point(point) <= tolerance
            }
        }
    }
}

/// 绘图元素
///
/// 几何 + 唯一标识 + 元素级样式覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: Uuid,
    pub geometry: Geometry,
    #[serde(default)]
    pub style: Style,
}

impl Element {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// 计算线段方向向量（单位向量）
    ///
    /// 零长度线段返回零向量。
    pub fn direction(&self) -> Vector2 {
        let v = self.end - self.start;
        let len = v.norm();
        if len < EPSILON {
            Vector2::zeros()
        } else {
            v / len
        }
    }

    /// 计算点到线段的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let v = self.end - self.start;
        let w = point - self.start;

        let c1 = w.dot(&v);
        if c1 <= 0.0 {
            return (point - self.start).norm();
        }

        let c2 = v.dot(&v);
        if c2 <= c1 {
            return (point - self.end).norm();
        }

        let b = c1 / c2;
        let pb = self.start + v * b;
        (point - pb).norm()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 多段线
///
/// 开放路径：依次连接所有顶点，不隐式闭合。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// 计算点到多段线的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self.points.len() {
            0 => f64::MAX,
            1 => (point - self.points[0]).norm(),
            _ => self
                .points
                .windows(2)
                .map(|w| Line::new(w[0], w[1]).distance_to_point(point))
                .fold(f64::MAX, f64::min),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.points.iter().copied())
    }
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 计算周长
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    /// 计算面积
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// 计算点到圆周的距离（负值表示在圆内）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        (point - self.center).norm() - self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 圆弧
///
/// 角度以度为单位（与绘图数据一致），渲染时转换为弧度。
/// 扫掠方向固定为正方向（角度增大）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（度）
    pub start_angle: f64,
    /// 终止角度（度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 扫掠角度（度），归一化到 [0, 360)
    pub fn sweep_angle(&self) -> f64 {
        let mut sweep = (self.end_angle - self.start_angle) % 360.0;
        if sweep < 0.0 {
            sweep += 360.0;
        }
        sweep
    }

    /// 扫掠是否超过半圆（SVG large-arc 标志）
    pub fn is_large_arc(&self) -> bool {
        self.sweep_angle() > 180.0
    }

    /// 圆上指定角度（度）的点
    pub fn point_at_angle(&self, angle_deg: f64) -> Point2 {
        let rad = deg_to_rad(angle_deg);
        Point2::new(
            self.center.x + self.radius * rad.cos(),
            self.center.y + self.radius * rad.sin(),
        )
    }

    /// 获取起点
    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    /// 获取终点
    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle)
    }

    /// 计算弧长
    pub fn length(&self) -> f64 {
        deg_to_rad(self.sweep_angle()) * self.radius
    }

    /// 计算点到圆弧的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let angle = (point.y - self.center.y)
            .atan2(point.x - self.center.x)
            .to_degrees();

        if self.contains_angle(angle) {
            ((point - self.center).norm() - self.radius).abs()
        } else {
            let d1 = (point - self.start_point()).norm();
            let d2 = (point - self.end_point()).norm();
            d1.min(d2)
        }
    }

    /// 检查角度（度）是否在弧的扫掠范围内
    fn contains_angle(&self, angle_deg: f64) -> bool {
        let normalize = |a: f64| {
            let mut a = a % 360.0;
            if a < 0.0 {
                a += 360.0;
            }
            a
        };
        let a = normalize(angle_deg);
        let start = normalize(self.start_angle);
        let end = normalize(self.end_angle);

        if start <= end {
            a >= start && a <= end
        } else {
            a >= start || a <= end
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 检查象限点
        for angle in [0.0, 90.0, 180.0, 270.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&self.point_at_angle(angle));
            }
        }

        bbox
    }
}

/// 矩形
///
/// 由两个任意对角点定义；渲染前先归一化，
/// 保证宽高非负。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub corner1: Point2,
    pub corner2: Point2,
}

/// 归一化后的矩形（原点 + 非负宽高）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(corner1: Point2, corner2: Point2) -> Self {
        Self { corner1, corner2 }
    }

    /// 归一化：x/y 取两角的最小值，宽高取绝对差
    pub fn normalized(&self) -> NormalizedRect {
        NormalizedRect {
            x: self.corner1.x.min(self.corner2.x),
            y: self.corner1.y.min(self.corner2.y),
            width: (self.corner2.x - self.corner1.x).abs(),
            height: (self.corner2.y - self.corner1.y).abs(),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.corner1, self.corner2])
    }

    /// 计算点到矩形边框的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let r = self.normalized();
        let corners = [
            Point2::new(r.x, r.y),
            Point2::new(r.x + r.width, r.y),
            Point2::new(r.x + r.width, r.y + r.height),
            Point2::new(r.x, r.y + r.height),
        ];
        (0..4)
            .map(|i| Line::new(corners[i], corners[(i + 1) % 4]).distance_to_point(point))
            .fold(f64::MAX, f64::min)
    }
}

/// 文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// 插入点
    pub position: Point2,
    /// 文本内容
    pub content: String,
}

impl Text {
    pub fn new(position: Point2, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }

    /// 估算文本宽度（每个字符约为字号的0.6倍）
    pub fn estimated_width(&self, font_size: f64) -> f64 {
        self.content.chars().count() as f64 * font_size * 0.6
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let width = self.estimated_width(crate::style::DEFAULT_FONT_SIZE);
        BoundingBox2::new(
            self.position,
            Point2::new(
                self.position.x + width,
                self.position.y + crate::style::DEFAULT_FONT_SIZE,
            ),
        )
    }

    /// 检查点是否在文本包围盒内
    pub fn contains_point(&self, point: &Point2, tolerance: f64) -> bool {
        let bbox = self.bounding_box();
        let expanded = BoundingBox2::new(
            Point2::new(bbox.min.x - tolerance, bbox.min.y - tolerance),
            Point2::new(bbox.max.x + tolerance, bbox.max.y + tolerance),
        );
        expanded.contains(point)
    }
}

/// 尺寸标注
///
/// 两个测量点之间的线段，端部带垂直刻度线，中央显示标签。
/// 标签文本由作者提供，不从点距推导。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub start: Point2,
    pub end: Point2,
    /// 显示文本（作者提供）
    pub label: String,
}

impl Dimension {
    pub fn new(start: Point2, end: Point2, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// 两测量点之间的距离（仅用于命中测试等，不决定标签）
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 标签的放置位置（线段中点）
    pub fn label_position(&self) -> Point2 {
        Line::new(self.start, self.end).midpoint()
    }

    /// 端部刻度线方向（垂直于标注线的单位向量）
    pub fn tick_direction(&self) -> Vector2 {
        let dir = Line::new(self.start, self.end).direction();
        Vector2::new(-dir.y, dir.x)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}
