//! 绘图文档
//!
//! 有序图层列表 + 标注列表。所有图层属性变更都经过这里，
//! 保证一次变更只触及一个图层；锁定图层拒绝元素写入。

use crate::annotation::Annotation;
use crate::error::DrawingError;
use crate::geometry::{
    Arc, Circle, Dimension, Element, Geometry, Line, Polyline, Rectangle, Text,
};
use crate::layer::Layer;
use crate::math::{BoundingBox2, Point2};
use crate::style::{Color, LineType, Style};

/// 绘图文档
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drawing {
    layers: Vec<Layer>,
    annotations: Vec<Annotation>,
}

impl Drawing {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            annotations: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: &str) -> Result<&mut Layer, DrawingError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DrawingError::LayerNotFound(id.to_string()))
    }

    /// 切换图层可见性
    pub fn toggle_layer_visible(&mut self, id: &str) -> Result<bool, DrawingError> {
        let layer = self.layer_mut(id)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// 切换图层锁定
    pub fn toggle_layer_locked(&mut self, id: &str) -> Result<bool, DrawingError> {
        let layer = self.layer_mut(id)?;
        layer.locked = !layer.locked;
        Ok(layer.locked)
    }

    /// 设置图层不透明度（钳制到 [0,1]）
    pub fn set_layer_opacity(&mut self, id: &str, opacity: f64) -> Result<(), DrawingError> {
        self.layer_mut(id)?.set_opacity(opacity);
        Ok(())
    }

    /// 向图层添加元素
    ///
    /// 锁定图层拒绝写入。
    pub fn add_element(&mut self, layer_id: &str, element: Element) -> Result<(), DrawingError> {
        let layer = self.layer_mut(layer_id)?;
        if layer.locked {
            tracing::debug!(layer = %layer.id, "rejected element mutation on locked layer");
            return Err(DrawingError::LayerLocked(layer.id.clone()));
        }
        layer.elements.push(element);
        Ok(())
    }

    /// 追加标注
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// 所有可见元素的包围盒
    pub fn bounds(&self) -> Option<BoundingBox2> {
        let mut bbox = BoundingBox2::empty();
        for layer in self.layers.iter().filter(|l| l.visible) {
            for element in &layer.elements {
                bbox = bbox.union(&element.geometry.bounding_box());
            }
        }
        if bbox.is_empty() {
            None
        } else {
            Some(bbox)
        }
    }

    /// 在可见且未锁定的图层中命中测试
    ///
    /// 返回最先命中的元素及其图层id。
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> Option<(&str, &Element)> {
        for layer in self.layers.iter().filter(|l| l.visible && !l.locked) {
            for element in &layer.elements {
                if element.geometry.contains_point(point, tolerance) {
                    return Some((layer.id.as_str(), element));
                }
            }
        }
        None
    }

    /// 内置的5图层示例绘图（未提供图层数据时的回退）
    pub fn sample() -> Self {
        let walls = Layer::new("walls", "墙体", Color::rgb(0x1f, 0x29, 0x37)).with_elements(vec![
            Element::new(Geometry::Rectangle(Rectangle::new(
                Point2::new(100.0, 100.0),
                Point2::new(700.0, 500.0),
            )))
            .with_style(Style::default().with_stroke(Color::rgb(0x1f, 0x29, 0x37))),
            Element::new(Geometry::Line(Line::new(
                Point2::new(400.0, 100.0),
                Point2::new(400.0, 500.0),
            ))),
            Element::new(Geometry::Polyline(Polyline::new(vec![
                Point2::new(100.0, 300.0),
                Point2::new(250.0, 300.0),
                Point2::new(250.0, 380.0),
            ]))),
        ]);

        let openings = Layer::new("openings", "门窗", Color::rgb(0x0e, 0xa5, 0xe9))
            .with_elements(vec![
                // 门扇开启弧线
                Element::new(Geometry::Arc(Arc::new(
                    Point2::new(400.0, 300.0),
                    60.0,
                    0.0,
                    90.0,
                ))),
                Element::new(Geometry::Line(Line::new(
                    Point2::new(400.0, 300.0),
                    Point2::new(460.0, 300.0),
                ))),
                Element::new(Geometry::Circle(Circle::new(Point2::new(550.0, 200.0), 25.0))),
            ]);

        let dimensions = Layer::new("dimensions", "尺寸", Color::rgb(0x64, 0x74, 0x8b))
            .with_elements(vec![
                Element::new(Geometry::Dimension(Dimension::new(
                    Point2::new(100.0, 70.0),
                    Point2::new(700.0, 70.0),
                    "6000",
                )))
                .with_style(Style::default().with_line_type(LineType::Solid)),
                Element::new(Geometry::Dimension(Dimension::new(
                    Point2::new(70.0, 100.0),
                    Point2::new(70.0, 500.0),
                    "4000",
                ))),
            ]);

        let furniture = Layer::new("furniture", "家具", Color::rgb(0x84, 0x5b, 0x3c))
            .with_opacity(0.8)
            .with_elements(vec![
                Element::new(Geometry::Rectangle(Rectangle::new(
                    Point2::new(150.0, 150.0),
                    Point2::new(230.0, 210.0),
                ))),
                Element::new(Geometry::Text(Text::new(Point2::new(155.0, 230.0), "桌"))),
            ]);

        let grid = Layer::new("grid", "轴网", Color::rgb(0xcb, 0xd5, 0xe1))
            .with_opacity(0.5)
            .with_elements(vec![
                Element::new(Geometry::Line(Line::new(
                    Point2::new(0.0, 300.0),
                    Point2::new(800.0, 300.0),
                )))
                .with_style(Style::default().with_line_type(LineType::DashDot)),
                Element::new(Geometry::Line(Line::new(
                    Point2::new(400.0, 0.0),
                    Point2::new(400.0, 600.0),
                )))
                .with_style(Style::default().with_line_type(LineType::DashDot)),
                Element::new(Geometry::Text(Text::new(Point2::new(405.0, 15.0), "A"))),
            ]);

        Self::new(vec![walls, openings, dimensions, furniture, grid])
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_five_layers() {
        let drawing = Drawing::sample();
        assert_eq!(drawing.layers().len(), 5);
        assert!(drawing.layer("walls").is_some());
        assert!(drawing.layer("grid").is_some());
    }

    #[test]
    fn test_layer_isolation() {
        let mut drawing = Drawing::sample();
        let before: Vec<Layer> = drawing.layers().to_vec();

        drawing.toggle_layer_visible("openings").unwrap();
        drawing.toggle_layer_locked("openings").unwrap();
        drawing.set_layer_opacity("openings", 0.3).unwrap();

        for (prev, now) in before.iter().zip(drawing.layers()) {
            if now.id == "openings" {
                assert_ne!(prev.visible, now.visible);
                assert_ne!(prev.locked, now.locked);
                assert!((now.opacity() - 0.3).abs() < 1e-12);
            } else {
                // 其他图层的所有属性保持不变
                assert_eq!(prev, now);
            }
        }
    }

    #[test]
    fn test_locked_layer_rejects_elements() {
        let mut drawing = Drawing::sample();
        drawing.toggle_layer_locked("walls").unwrap();

        let element = Element::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
        )));
        let result = drawing.add_element("walls", element.clone());
        assert!(matches!(result, Err(DrawingError::LayerLocked(_))));

        // 解锁后写入成功
        drawing.toggle_layer_locked("walls").unwrap();
        assert!(drawing.add_element("walls", element).is_ok());
    }

    #[test]
    fn test_unknown_layer() {
        let mut drawing = Drawing::sample();
        assert!(matches!(
            drawing.toggle_layer_visible("nope"),
            Err(DrawingError::LayerNotFound(_))
        ));
    }

    #[test]
    fn test_hit_test_skips_hidden_and_locked() {
        let mut layer = Layer::new("l1", "L1", Color::WHITE);
        layer.elements.push(Element::new(Geometry::Circle(Circle::new(
            Point2::new(0.0, 0.0),
            10.0,
        ))));
        let mut drawing = Drawing::new(vec![layer]);

        let on_rim = Point2::new(10.0, 0.0);
        assert!(drawing.hit_test(&on_rim, 1.0).is_some());

        drawing.toggle_layer_visible("l1").unwrap();
        assert!(drawing.hit_test(&on_rim, 1.0).is_none());

        drawing.toggle_layer_visible("l1").unwrap();
        drawing.toggle_layer_locked("l1").unwrap();
        assert!(drawing.hit_test(&on_rim, 1.0).is_none());
    }

    #[test]
    fn test_bounds_ignores_hidden_layers() {
        let mut drawing = Drawing::sample();
        let full = drawing.bounds().unwrap();
        // 隐藏轴网后包围盒收缩
        drawing.toggle_layer_visible("grid").unwrap();
        let without_grid = drawing.bounds().unwrap();
        assert!(without_grid.width() <= full.width());
        assert!(without_grid.height() <= full.height());
    }
}
