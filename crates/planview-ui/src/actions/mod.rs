//! 具体的 Action 实现
//!
//! 每个查看器工具对应一个 Action 实现

mod measure;
mod pan;
mod select;

pub use measure::MeasureAction;
pub use pan::PanAction;
pub use select::SelectAction;

use crate::action::{Action, ViewerTool};

/// 创建指定工具的 Action
pub fn create_action(tool: ViewerTool) -> Box<dyn Action> {
    match tool {
        ViewerTool::Select => Box::new(SelectAction::new()),
        ViewerTool::Pan => Box::new(PanAction::new()),
        ViewerTool::Measure => Box::new(MeasureAction::new()),
    }
}
