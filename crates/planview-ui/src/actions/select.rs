//! 选择 Action
//!
//! 左键点击对可见且未锁定的图层做命中测试。
//! 点中元素返回其 id，点击空白处返回 None 以清除选中。

use crate::action::{Action, ActionContext, ActionResult, MouseButton, ViewerTool};

/// 选择 Action
pub struct SelectAction;

impl SelectAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SelectAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for SelectAction {
    fn tool(&self) -> ViewerTool {
        ViewerTool::Select
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult {
        if button != MouseButton::Left {
            return ActionResult::Continue;
        }
        let hit = ctx.drawing.hit_test(&ctx.model_pos, ctx.tolerance);
        match hit {
            Some((layer_id, element)) => {
                tracing::debug!(layer = layer_id, id = %element.id, "element selected");
                ActionResult::Select(Some(element.id))
            }
            None => ActionResult::Select(None),
        }
    }

    fn get_prompt(&self) -> &str {
        "点击选择元素:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planview_core::drawing::Drawing;
    use planview_core::geometry::{Element, Geometry, Line};
    use planview_core::layer::Layer;
    use planview_core::math::Point2;
    use planview_core::style::Color;

    fn ctx_at(drawing: &Drawing, x: f64, y: f64) -> ActionContext<'_> {
        ActionContext {
            model_pos: Point2::new(x, y),
            device_pos: Point2::new(x, y),
            drawing,
            tolerance: 5.0,
        }
    }

    fn one_line_drawing() -> (Drawing, uuid::Uuid) {
        let element = Element::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
        )));
        let id = element.id;
        let layer = Layer::new("walls", "墙体", Color::from_hex("#1f2937").unwrap())
            .with_elements(vec![element]);
        (Drawing::new(vec![layer]), id)
    }

    #[test]
    fn test_click_on_element_selects_it() {
        let (drawing, id) = one_line_drawing();
        let mut action = SelectAction::new();

        let result = action.on_pointer_down(&ctx_at(&drawing, 50.0, 2.0), MouseButton::Left);
        match result {
            ActionResult::Select(Some(hit)) => assert_eq!(hit, id),
            other => panic!("expected Select(Some), got {:?}", other),
        }
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let (drawing, _) = one_line_drawing();
        let mut action = SelectAction::new();

        let result = action.on_pointer_down(&ctx_at(&drawing, 50.0, 200.0), MouseButton::Left);
        assert!(matches!(result, ActionResult::Select(None)));
    }

    #[test]
    fn test_right_click_is_ignored() {
        let (drawing, _) = one_line_drawing();
        let mut action = SelectAction::new();

        let result = action.on_pointer_down(&ctx_at(&drawing, 50.0, 2.0), MouseButton::Right);
        assert!(matches!(result, ActionResult::Continue));
    }
}
