//! SVG渲染器
//!
//! 按数组顺序遍历可见图层，把每个图元光栅化为SVG节点。
//! 图层的颜色/不透明度作为默认值，被元素自身样式逐项覆盖。
//! 退化几何（顶点不足、半径非正、空文本）不产生输出，
//! 仅记录debug日志，不报错。

use planview_core::annotation::{Annotation, AnnotationKind};
use planview_core::drawing::Drawing;
use planview_core::geometry::{Element, Geometry, Line as CoreLine};
use planview_core::layer::Layer;
use planview_core::math::{Point2, EPSILON};
use planview_core::style::{LineType, ResolvedStyle};
use planview_core::viewport::Viewport;
use svg::node::element::{Circle, Group, Line, Path, Rectangle, Text};
use svg::node::Node;
use svg::Document;

use crate::grid::render_grid;

/// 尺寸标注端部刻度线的半长（模型单位）
const DIMENSION_TICK: f64 = 6.0;

/// SVG渲染器
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// 输出画布宽度（设备像素）
    pub width: f64,
    /// 输出画布高度（设备像素）
    pub height: f64,
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 渲染整个绘图
    ///
    /// 输出结构：网格（可选）→ 可见图层（按数组顺序）→ 标注。
    /// 视口变换施加在模型空间根分组上，等价于对整个画布的CSS变换。
    pub fn render(&self, drawing: &Drawing, viewport: &Viewport) -> Document {
        let mut canvas = Group::new().set("transform", viewport_transform(viewport));

        if viewport.show_grid {
            canvas = canvas.add(render_grid(viewport, self.width, self.height));
        }

        for layer in drawing.layers() {
            if !layer.visible {
                continue;
            }
            canvas = canvas.add(self.render_layer(layer));
        }

        for annotation in drawing.annotations() {
            if let Some(node) = render_annotation(annotation) {
                canvas = canvas.add(node);
            }
        }

        Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0.0, 0.0, self.width, self.height))
            .add(canvas)
    }

    /// 渲染单个图层为一个分组
    ///
    /// 图层不透明度只作为元素样式的回退值写到元素自身，
    /// 不写到分组上，避免SVG乘法语义叠加两次。
    fn render_layer(&self, layer: &Layer) -> Group {
        let mut group = Group::new().set("data-layer", layer.id.clone());

        for element in &layer.elements {
            let resolved = element.style.resolve(layer.color, layer.opacity());
            if let Some(node) = render_element(element, &resolved) {
                group = group.add(node);
            } else {
                tracing::debug!(
                    element = %element.id,
                    kind = element.geometry.type_name(),
                    "skipped degenerate element"
                );
            }
        }

        group
    }
}

/// 视口的SVG变换串
fn viewport_transform(viewport: &Viewport) -> String {
    format!(
        "translate({} {}) rotate({}) scale({})",
        viewport.pan.x,
        viewport.pan.y,
        viewport.rotation.degrees(),
        viewport.scale()
    )
}

/// dash数组属性值（Solid为None）
fn dash_attr(line_type: LineType) -> Option<String> {
    line_type.dash_array().map(|dashes| {
        dashes
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// 把描边样式写到任意SVG节点上
fn apply_stroke<N: Node>(node: &mut N, style: &ResolvedStyle) {
    node.assign("stroke", style.stroke.to_hex());
    node.assign("stroke-width", style.stroke_width);
    if let Some(dash) = dash_attr(style.line_type) {
        node.assign("stroke-dasharray", dash);
    }
    if (style.opacity - 1.0).abs() > EPSILON {
        node.assign("opacity", style.opacity);
    }
}

/// 填充属性值（未指定填充时为"none"）
fn fill_attr(style: &ResolvedStyle) -> String {
    style
        .fill
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "none".to_string())
}

/// 渲染单个元素
///
/// 枚举分派是穷尽的；返回None仅表示几何退化。
fn render_element(element: &Element, style: &ResolvedStyle) -> Option<Box<dyn Node>> {
    match &element.geometry {
        Geometry::Line(line) => {
            let mut node = Line::new()
                .set("x1", line.start.x)
                .set("y1", line.start.y)
                .set("x2", line.end.x)
                .set("y2", line.end.y);
            apply_stroke(&mut node, style);
            Some(Box::new(node))
        }
        Geometry::Polyline(polyline) => {
            if polyline.points.len() < 2 {
                return None;
            }
            let mut data = format!("M {} {}", polyline.points[0].x, polyline.points[0].y);
            for p in &polyline.points[1..] {
                data.push_str(&format!(" L {} {}", p.x, p.y));
            }
            // 开放路径：不闭合；仅在指定了填充时填充
            let mut node = Path::new().set("d", data).set("fill", fill_attr(style));
            apply_stroke(&mut node, style);
            Some(Box::new(node))
        }
        Geometry::Circle(circle) => {
            if circle.radius <= 0.0 {
                return None;
            }
            let mut node = Circle::new()
                .set("cx", circle.center.x)
                .set("cy", circle.center.y)
                .set("r", circle.radius)
                .set("fill", fill_attr(style));
            apply_stroke(&mut node, style);
            Some(Box::new(node))
        }
        Geometry::Arc(arc) => {
            if arc.radius <= 0.0 {
                return None;
            }
            let start = arc.start_point();
            let end = arc.end_point();
            let large_arc = if arc.is_large_arc() { 1 } else { 0 };
            // 扫掠方向固定为正方向（sweep = 1）
            let data = format!(
                "M {} {} A {} {} 0 {} 1 {} {}",
                start.x, start.y, arc.radius, arc.radius, large_arc, end.x, end.y
            );
            let mut node = Path::new().set("d", data).set("fill", fill_attr(style));
            apply_stroke(&mut node, style);
            Some(Box::new(node))
        }
        Geometry::Rectangle(rect) => {
            let n = rect.normalized();
            let mut node = Rectangle::new()
                .set("x", n.x)
                .set("y", n.y)
                .set("width", n.width)
                .set("height", n.height)
                .set("fill", fill_attr(style));
            apply_stroke(&mut node, style);
            Some(Box::new(node))
        }
        Geometry::Text(text) => {
            if text.content.is_empty() {
                return None;
            }
            Some(Box::new(render_text(
                text.position,
                &text.content,
                style,
                false,
            )))
        }
        Geometry::Dimension(dim) => {
            let mut group = Group::new();

            let mut segment = Line::new()
                .set("x1", dim.start.x)
                .set("y1", dim.start.y)
                .set("x2", dim.end.x)
                .set("y2", dim.end.y);
            apply_stroke(&mut segment, style);
            group = group.add(segment);

            // 端部垂直刻度线
            let tick = dim.tick_direction() * DIMENSION_TICK;
            for endpoint in [dim.start, dim.end] {
                let mut node = Line::new()
                    .set("x1", endpoint.x - tick.x)
                    .set("y1", endpoint.y - tick.y)
                    .set("x2", endpoint.x + tick.x)
                    .set("y2", endpoint.y + tick.y);
                apply_stroke(&mut node, style);
                group = group.add(node);
            }

            // 居中标签：作者提供的文本，不从点距推导
            if !dim.label.is_empty() {
                group = group.add(render_text(dim.label_position(), &dim.label, style, true));
            }
            Some(Box::new(group))
        }
    }
}

/// 渲染文本节点
fn render_text(position: Point2, content: &str, style: &ResolvedStyle, centered: bool) -> Text {
    let mut node = Text::new(content)
        .set("x", position.x)
        .set("y", position.y)
        .set("font-size", style.font_size)
        .set("font-family", style.font_family.clone())
        .set("fill", style.stroke.to_hex());
    if centered {
        node = node.set("text-anchor", "middle");
    }
    node
}

/// 渲染标注
///
/// 测量标注：虚线 + 居中的数值标签。其余类型尚无渲染规则。
fn render_annotation(annotation: &Annotation) -> Option<Box<dyn Node>> {
    if annotation.kind != AnnotationKind::Measurement {
        tracing::debug!(kind = annotation.kind.name(), "annotation kind not rendered");
        return None;
    }
    let [first, second] = annotation.points[..] else {
        tracing::debug!(id = %annotation.id, "measurement without two points");
        return None;
    };

    let style = annotation.style.resolve(
        planview_core::style::Color::rgb(0xf5, 0x9e, 0x0b),
        1.0,
    );

    let mut group = Group::new().set("data-annotation", annotation.id.to_string());

    let mut segment = Line::new()
        .set("x1", first.x)
        .set("y1", first.y)
        .set("x2", second.x)
        .set("y2", second.y);
    apply_stroke(&mut segment, &style);
    group = group.add(segment);

    // 端部刻度线与尺寸标注一致
    let dir = CoreLine::new(first, second).direction();
    let tick = planview_core::math::Vector2::new(-dir.y, dir.x) * DIMENSION_TICK;
    for endpoint in [first, second] {
        let mut node = Line::new()
            .set("x1", endpoint.x - tick.x)
            .set("y1", endpoint.y - tick.y)
            .set("x2", endpoint.x + tick.x)
            .set("y2", endpoint.y + tick.y);
        apply_stroke(&mut node, &style);
        group = group.add(node);
    }

    let mid = Point2::new((first.x + second.x) / 2.0, (first.y + second.y) / 2.0);
    group = group.add(render_text(mid, &annotation.display_text(), &style, true));

    Some(Box::new(group))
}

#[cfg(test)]
mod tests {
    use super::SvgRenderer;
    use planview_core::geometry::{Arc as ArcGeom, Rectangle as RectGeom};
    use planview_core::prelude::*;

    fn render_to_string(drawing: &Drawing) -> String {
        let mut viewport = Viewport::default();
        viewport.show_grid = false;
        SvgRenderer::new(800.0, 600.0)
            .render(drawing, &viewport)
            .to_string()
    }

    fn single_layer_drawing(elements: Vec<Element>) -> Drawing {
        let layer = Layer::new("l1", "L1", Color::BLACK).with_elements(elements);
        Drawing::new(vec![layer])
    }

    #[test]
    fn test_hidden_layer_not_rendered() {
        let mut drawing = Drawing::sample();
        let svg = render_to_string(&drawing);
        assert!(svg.contains("data-layer=\"walls\""));

        drawing.toggle_layer_visible("walls").unwrap();
        let svg = render_to_string(&drawing);
        assert!(!svg.contains("data-layer=\"walls\""));
    }

    #[test]
    fn test_rectangle_normalized_in_output() {
        let drawing = single_layer_drawing(vec![Element::new(Geometry::Rectangle(
            RectGeom::new(Point2::new(500.0, 400.0), Point2::new(100.0, 100.0)),
        ))]);
        let svg = render_to_string(&drawing);
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("height=\"300\""));
        assert!(svg.contains("x=\"100\""));
        assert!(svg.contains("y=\"100\""));
    }

    #[test]
    fn test_arc_large_arc_flag() {
        let small = single_layer_drawing(vec![Element::new(Geometry::Arc(ArcGeom::new(
            Point2::origin(),
            50.0,
            0.0,
            90.0,
        )))]);
        let large = single_layer_drawing(vec![Element::new(Geometry::Arc(ArcGeom::new(
            Point2::origin(),
            50.0,
            0.0,
            270.0,
        )))]);
        // A rx ry x-rotation large-arc sweep x y
        assert!(render_to_string(&small).contains("A 50 50 0 0 1"));
        assert!(render_to_string(&large).contains("A 50 50 0 1 1"));
    }

    #[test]
    fn test_dash_pattern_emitted() {
        let element = Element::new(Geometry::Line(Line::new(
            Point2::origin(),
            Point2::new(10.0, 0.0),
        )))
        .with_style(Style::default().with_line_type(LineType::DashDot));
        let svg = render_to_string(&single_layer_drawing(vec![element]));
        assert!(svg.contains("stroke-dasharray=\"8 4 2 4\""));
    }

    #[test]
    fn test_layer_opacity_applied_once_per_element() {
        let plain = Element::new(Geometry::Line(Line::new(
            Point2::origin(),
            Point2::new(10.0, 0.0),
        )));
        let mut overridden = Element::new(Geometry::Line(Line::new(
            Point2::new(0.0, 5.0),
            Point2::new(10.0, 5.0),
        )));
        overridden.style.opacity = Some(0.9);

        let layer = Layer::new("l1", "L1", Color::BLACK)
            .with_opacity(0.5)
            .with_elements(vec![plain, overridden]);
        let svg = render_to_string(&Drawing::new(vec![layer]));

        // 图层不透明度落在未覆盖的元素上，元素覆盖值独立生效，
        // 分组不再携带不透明度，总共恰好两处
        assert_eq!(svg.matches("opacity=\"0.5\"").count(), 1);
        assert_eq!(svg.matches("opacity=\"0.9\"").count(), 1);
        assert_eq!(svg.matches("opacity=").count(), 2);
    }

    #[test]
    fn test_degenerate_elements_skipped() {
        let drawing = single_layer_drawing(vec![
            Element::new(Geometry::Polyline(Polyline::new(vec![Point2::origin()]))),
            Element::new(Geometry::Circle(Circle::new(Point2::origin(), 0.0))),
            Element::new(Geometry::Text(Text::new(Point2::origin(), ""))),
        ]);
        let svg = render_to_string(&drawing);
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_dimension_label_is_author_text() {
        let drawing = single_layer_drawing(vec![Element::new(Geometry::Dimension(
            Dimension::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), "6000"),
        ))]);
        let svg = render_to_string(&drawing);
        // 文本内容由svg库换行输出，不与标签定界符相邻
        assert!(svg.contains("<text"));
        assert!(svg.contains("6000"));
        // 两端刻度线 + 标注线 = 3条线段
        assert_eq!(svg.matches("<line").count(), 3);
    }

    #[test]
    fn test_measurement_annotation_rendered() {
        let mut drawing = Drawing::new(vec![Layer::new("l1", "L1", Color::BLACK)]);
        drawing.add_annotation(Annotation::measurement(
            Point2::new(0.0, 0.0),
            Point2::new(300.0, 400.0),
        ));
        let svg = render_to_string(&drawing);
        assert!(svg.contains("data-annotation"));
        assert!(svg.contains("<text"));
        assert!(svg.contains("500.0 mm"));
        assert!(svg.contains("stroke-dasharray=\"8 4\""));
    }

    #[test]
    fn test_viewport_transform_on_canvas() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(200.0);
        viewport.pan = Vector2::new(40.0, 20.0);
        viewport.rotate_cw();

        let svg = SvgRenderer::new(800.0, 600.0)
            .render(&Drawing::sample(), &viewport)
            .to_string();
        assert!(svg.contains("translate(40 20) rotate(90) scale(2)"));
    }
}
