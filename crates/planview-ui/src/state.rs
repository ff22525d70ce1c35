//! 查看器状态
//!
//! 集中管理视口、当前工具与选中状态。
//! 切换工具时总是重建并 reset 对应的 Action，
//! 上一个工具未完成的输入不会泄漏到新工具。

use crate::action::{Action, ViewerTool};
use crate::actions::create_action;
use planview_core::viewport::Viewport;
use uuid::Uuid;

/// 查看器状态
pub struct ViewerState {
    pub viewport: Viewport,
    tool: ViewerTool,
    action: Box<dyn Action>,
    /// 图层面板中选中的图层
    pub selected_layer: Option<String>,
    /// 画布中选中的元素
    pub selected_element: Option<Uuid>,
    pub show_layers_panel: bool,
    pub show_properties_panel: bool,
    pub fullscreen: bool,
    pub status_message: String,
}

impl ViewerState {
    pub fn new() -> Self {
        let tool = ViewerTool::Select;
        let action = create_action(tool);
        let status_message = action.get_prompt().to_string();
        Self {
            viewport: Viewport::new(),
            tool,
            action,
            selected_layer: None,
            selected_element: None,
            show_layers_panel: true,
            show_properties_panel: false,
            fullscreen: false,
            status_message,
        }
    }

    pub fn tool(&self) -> ViewerTool {
        self.tool
    }

    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }

    pub fn action_mut(&mut self) -> &mut dyn Action {
        self.action.as_mut()
    }

    /// 切换工具
    ///
    /// 丢弃当前 action 的全部中间状态。同一工具重复设置也会重置。
    pub fn set_tool(&mut self, tool: ViewerTool) {
        tracing::debug!(from = self.tool.name(), to = tool.name(), "tool changed");
        self.action = create_action(tool);
        self.action.reset();
        self.tool = tool;
        self.status_message = self.action.get_prompt().to_string();
    }

    /// 取消当前操作，回到选择工具
    pub fn cancel(&mut self) {
        self.set_tool(ViewerTool::Select);
        self.selected_element = None;
    }

    /// 键盘快捷键切换工具（V/H/M，忽略大小写）
    ///
    /// 未绑定的按键返回false，由宿主继续处理。
    pub fn handle_shortcut(&mut self, key: &str) -> bool {
        for tool in ViewerTool::ALL {
            if key.eq_ignore_ascii_case(tool.shortcut()) {
                self.set_tool(tool);
                return true;
            }
        }
        false
    }

    pub fn toggle_layers_panel(&mut self) {
        self.show_layers_panel = !self.show_layers_panel;
    }

    pub fn toggle_properties_panel(&mut self) {
        self.show_properties_panel = !self.show_properties_panel;
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}
