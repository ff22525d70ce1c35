//! 平移 Action
//!
//! 拖拽期间把设备像素增量累加到视口平移上。
//! 平移在设备空间进行，与缩放/旋转无关。

use crate::action::{Action, ActionContext, ActionResult, MouseButton, ViewerTool};
use planview_core::math::Point2;

/// 平移 Action
pub struct PanAction {
    /// 拖拽中的上一个设备坐标
    last_device_pos: Option<Point2>,
}

impl PanAction {
    pub fn new() -> Self {
        Self {
            last_device_pos: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.last_device_pos.is_some()
    }
}

impl Default for PanAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PanAction {
    fn tool(&self) -> ViewerTool {
        ViewerTool::Pan
    }

    fn reset(&mut self) {
        self.last_device_pos = None;
    }

    fn on_pointer_down(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        if button == MouseButton::Left {
            self.last_device_pos = Some(ctx.device_pos);
        }
        ActionResult::Continue
    }

    fn on_pointer_move(&mut self, ctx: &ActionContext) -> ActionResult {
        match self.last_device_pos {
            Some(last) => {
                let delta = ctx.device_pos - last;
                self.last_device_pos = Some(ctx.device_pos);
                ActionResult::PanBy(delta)
            }
            None => ActionResult::Continue,
        }
    }

    fn on_pointer_up(&mut self, _ctx: &ActionContext) -> ActionResult {
        self.last_device_pos = None;
        ActionResult::Continue
    }

    fn get_prompt(&self) -> &str {
        if self.is_dragging() {
            "拖拽以平移视图"
        } else {
            "按住左键平移视图"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planview_core::drawing::Drawing;
    use planview_core::math::Vector2;

    fn ctx_at(drawing: &Drawing, x: f64, y: f64) -> ActionContext<'_> {
        ActionContext {
            model_pos: Point2::new(x, y),
            device_pos: Point2::new(x, y),
            drawing,
            tolerance: 5.0,
        }
    }

    #[test]
    fn test_drag_produces_device_deltas() {
        let drawing = Drawing::sample();
        let mut action = PanAction::new();

        action.on_pointer_down(&ctx_at(&drawing, 100.0, 100.0), MouseButton::Left);
        assert!(action.is_dragging());

        let result = action.on_pointer_move(&ctx_at(&drawing, 110.0, 95.0));
        match result {
            ActionResult::PanBy(delta) => assert_eq!(delta, Vector2::new(10.0, -5.0)),
            other => panic!("expected PanBy, got {:?}", other),
        }

        action.on_pointer_up(&ctx_at(&drawing, 110.0, 95.0));
        assert!(!action.is_dragging());
        // 非拖拽状态下移动不产生平移
        assert!(matches!(
            action.on_pointer_move(&ctx_at(&drawing, 200.0, 200.0)),
            ActionResult::Continue
        ));
    }
}
