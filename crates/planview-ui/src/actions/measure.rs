//! 测量 Action
//!
//! 显式两状态机：等待第一点 → 等待第二点。
//! 第二次点击计算两点间的欧几里得距离并生成测量标注。
//! 待定的第一点属于 action 自身，切换工具时随 reset 一起丢弃。

use crate::action::{
    Action, ActionContext, ActionResult, MouseButton, PreviewGeometry, ViewerTool,
};
use planview_core::annotation::Annotation;
use planview_core::geometry::{Geometry, Line};
use planview_core::math::Point2;

/// 测量状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 等待第一个测量点
    SetFirstPoint,
    /// 已有第一点，等待第二点
    SetSecondPoint(Point2),
}

/// 测量 Action
pub struct MeasureAction {
    status: Status,
}

impl MeasureAction {
    pub fn new() -> Self {
        Self {
            status: Status::SetFirstPoint,
        }
    }

    /// 当前待定的第一点（用于测试和预览）
    pub fn pending_point(&self) -> Option<Point2> {
        match self.status {
            Status::SetFirstPoint => None,
            Status::SetSecondPoint(p) => Some(p),
        }
    }
}

impl Default for MeasureAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for MeasureAction {
    fn tool(&self) -> ViewerTool {
        ViewerTool::Measure
    }

    fn reset(&mut self) {
        self.status = Status::SetFirstPoint;
    }

    fn on_pointer_down(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        match button {
            MouseButton::Left => match self.status {
                Status::SetFirstPoint => {
                    self.status = Status::SetSecondPoint(ctx.model_pos);
                    ActionResult::Continue
                }
                Status::SetSecondPoint(first) => {
                    let annotation = Annotation::measurement(first, ctx.model_pos);
                    tracing::debug!(value = annotation.value, "measurement completed");
                    self.status = Status::SetFirstPoint;
                    ActionResult::CreateAnnotation(annotation)
                }
            },
            MouseButton::Right => {
                // 右键取消未完成的测量
                self.reset();
                ActionResult::Cancel
            }
            MouseButton::Middle => ActionResult::Continue,
        }
    }

    fn get_prompt(&self) -> &str {
        match self.status {
            Status::SetFirstPoint => "指定第一个测量点:",
            Status::SetSecondPoint(_) => "指定第二个测量点:",
        }
    }

    fn get_preview(&self, ctx: &ActionContext) -> Vec<PreviewGeometry> {
        match self.status {
            Status::SetFirstPoint => vec![],
            Status::SetSecondPoint(first) => {
                vec![PreviewGeometry::reference(Geometry::Line(Line::new(
                    first,
                    ctx.model_pos,
                )))]
            }
        }
    }
}
