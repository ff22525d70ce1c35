//! Action 系统 - 查看器工具的状态机接口
//!
//! 每个工具是一个独立的 Action 实现。指针事件先经过视口
//! 逆变换（含吸附），Action 只接触模型空间坐标。

use planview_core::annotation::Annotation;
use planview_core::drawing::Drawing;
use planview_core::geometry::Geometry;
use planview_core::math::{Point2, Vector2};
use uuid::Uuid;

/// 查看器工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerTool {
    Select,
    Pan,
    Measure,
}

impl ViewerTool {
    pub const ALL: [ViewerTool; 3] = [ViewerTool::Select, ViewerTool::Pan, ViewerTool::Measure];

    pub fn name(&self) -> &'static str {
        match self {
            ViewerTool::Select => "Select",
            ViewerTool::Pan => "Pan",
            ViewerTool::Measure => "Measure",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            ViewerTool::Select => "V",
            ViewerTool::Pan => "H",
            ViewerTool::Measure => "M",
        }
    }
}

/// Action 执行结果
#[derive(Debug, Clone)]
pub enum ActionResult {
    /// 继续当前 action
    Continue,
    /// 创建标注（测量完成）
    CreateAnnotation(Annotation),
    /// 平移视口（设备像素增量）
    PanBy(Vector2),
    /// 选中元素（None 表示点击空白处取消选中）
    Select(Option<Uuid>),
    /// 取消当前 action
    Cancel,
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 指针的模型空间坐标（已吸附）
    pub model_pos: Point2,
    /// 指针的设备像素坐标（平移工具使用）
    pub device_pos: Point2,
    /// 当前绘图（用于命中测试）
    pub drawing: &'a Drawing,
    /// 命中测试容差（模型单位，已按缩放换算）
    pub tolerance: f64,
}

/// 预览几何体
#[derive(Debug, Clone)]
pub struct PreviewGeometry {
    pub geometry: Geometry,
    /// 参考线（虚线显示）
    pub is_reference: bool,
}

impl PreviewGeometry {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            is_reference: false,
        }
    }

    pub fn reference(geometry: Geometry) -> Self {
        Self {
            geometry,
            is_reference: true,
        }
    }
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Action trait - 所有查看器工具的核心接口
pub trait Action: Send {
    /// 获取工具类型
    fn tool(&self) -> ViewerTool;

    /// 获取工具名称
    fn name(&self) -> &str {
        self.tool().name()
    }

    /// 重置 action 状态
    ///
    /// 切换工具时必须调用，丢弃未完成的输入（如悬空的测量起点）。
    fn reset(&mut self);

    /// 指针按下事件
    fn on_pointer_down(&mut self, ctx: &ActionContext, button: MouseButton) -> ActionResult;

    /// 指针移动事件
    fn on_pointer_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    /// 指针抬起事件
    fn on_pointer_up(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    /// 获取当前状态的提示文本
    fn get_prompt(&self) -> &str;

    /// 获取预览几何体
    fn get_preview(&self, _ctx: &ActionContext) -> Vec<PreviewGeometry> {
        vec![]
    }
}
