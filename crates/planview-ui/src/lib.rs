//! Planview 查看器状态层
//!
//! 不依赖任何具体 GUI 框架：工具状态机、查看器状态、
//! 图层面板视图模型与导出请求都以纯数据/回调的形式暴露，
//! 由宿主（桌面壳或无头渲染）驱动。

pub mod action;
pub mod actions;
pub mod export;
pub mod layer_panel;
pub mod state;
pub mod viewer;

pub use action::{Action, ActionContext, ActionResult, MouseButton, PreviewGeometry, ViewerTool};
pub use actions::{create_action, MeasureAction, PanAction, SelectAction};
pub use export::ExportFormat;
pub use layer_panel::{LayerPanel, LayerRow};
pub use state::ViewerState;
pub use viewer::Viewer;
