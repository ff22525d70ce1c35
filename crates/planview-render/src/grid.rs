//! 网格绘制
//!
//! 在可见模型范围内按网格间距绘制水平/垂直细线。
//! 线条生成在模型空间，随画布变换一起缩放/旋转。

use planview_core::math::{BoundingBox2, Point2, EPSILON};
use planview_core::viewport::Viewport;
use svg::node::element::{Group, Line};

/// 网格线颜色
const GRID_COLOR: &str = "#e2e8f0";

/// 渲染网格分组
///
/// 取设备视口四角的模型坐标求包围盒，
/// 向外取整到网格间距后逐线绘制。
pub fn render_grid(viewport: &Viewport, width: f64, height: f64) -> Group {
    let mut group = Group::new().set("data-grid", "true");

    let pitch = viewport.grid_pitch;
    if pitch <= EPSILON {
        return group;
    }

    // 视口四角对应的模型范围（任意旋转下都正确）
    let bounds = BoundingBox2::from_points([
        viewport.to_model(Point2::new(0.0, 0.0)),
        viewport.to_model(Point2::new(width, 0.0)),
        viewport.to_model(Point2::new(0.0, height)),
        viewport.to_model(Point2::new(width, height)),
    ]);

    let start_x = (bounds.min.x / pitch).floor() * pitch;
    let end_x = (bounds.max.x / pitch).ceil() * pitch;
    let start_y = (bounds.min.y / pitch).floor() * pitch;
    let end_y = (bounds.max.y / pitch).ceil() * pitch;

    // 垂直线
    let mut x = start_x;
    while x <= end_x + EPSILON {
        group = group.add(grid_line(x, start_y, x, end_y));
        x += pitch;
    }

    // 水平线
    let mut y = start_y;
    while y <= end_y + EPSILON {
        group = group.add(grid_line(start_x, y, end_x, y));
        y += pitch;
    }

    group
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", GRID_COLOR)
        .set("stroke-width", 0.5)
}
