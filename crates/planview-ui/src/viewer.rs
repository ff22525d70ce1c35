//! 查看器外壳
//!
//! 把设备坐标的指针事件换算到模型空间，分发给当前工具的 Action，
//! 并把 Action 的结果落回绘图/视口/选中状态。
//! 测量完成与导出请求通过宿主注册的回调向外传递。

use crate::action::{ActionContext, ActionResult, MouseButton};
use crate::export::ExportFormat;
use crate::state::ViewerState;
use planview_core::annotation::Annotation;
use planview_core::drawing::Drawing;
use planview_core::math::Point2;

/// 命中测试的屏幕像素容差
const PICK_TOLERANCE_PX: f64 = 5.0;

pub type MeasurementCallback = Box<dyn FnMut(&Annotation)>;
pub type ExportCallback = Box<dyn FnMut(ExportFormat)>;

/// 查看器
pub struct Viewer {
    pub drawing: Drawing,
    pub state: ViewerState,
    on_measurement: Option<MeasurementCallback>,
    on_export: Option<ExportCallback>,
}

impl Viewer {
    pub fn new(drawing: Drawing) -> Self {
        Self {
            drawing,
            state: ViewerState::new(),
            on_measurement: None,
            on_export: None,
        }
    }

    /// 注册测量完成回调
    pub fn on_measurement(&mut self, callback: MeasurementCallback) {
        self.on_measurement = Some(callback);
    }

    /// 注册导出请求回调
    pub fn on_export(&mut self, callback: ExportCallback) {
        self.on_export = Some(callback);
    }

    /// 指针按下（设备像素坐标）
    pub fn pointer_down(&mut self, device_pos: Point2, button: MouseButton) {
        let (model_pos, tolerance) = self.pick(device_pos);
        let result = {
            let ctx = ActionContext {
                model_pos,
                device_pos,
                drawing: &self.drawing,
                tolerance,
            };
            self.state.action_mut().on_pointer_down(&ctx, button)
        };
        self.apply(result);
    }

    /// 指针移动（设备像素坐标）
    pub fn pointer_move(&mut self, device_pos: Point2) {
        let (model_pos, tolerance) = self.pick(device_pos);
        let result = {
            let ctx = ActionContext {
                model_pos,
                device_pos,
                drawing: &self.drawing,
                tolerance,
            };
            self.state.action_mut().on_pointer_move(&ctx)
        };
        self.apply(result);
    }

    /// 指针抬起（设备像素坐标）
    pub fn pointer_up(&mut self, device_pos: Point2) {
        let (model_pos, tolerance) = self.pick(device_pos);
        let result = {
            let ctx = ActionContext {
                model_pos,
                device_pos,
                drawing: &self.drawing,
                tolerance,
            };
            self.state.action_mut().on_pointer_up(&ctx)
        };
        self.apply(result);
    }

    /// 请求导出
    ///
    /// 查看器本身不产出文件，由宿主回调完成。
    pub fn request_export(&mut self, format: ExportFormat) {
        tracing::info!(format = format.name(), "export requested");
        if let Some(callback) = self.on_export.as_mut() {
            callback(format);
        }
    }

    /// 设备坐标换算到（已吸附的）模型坐标与模型单位容差
    fn pick(&self, device_pos: Point2) -> (Point2, f64) {
        let viewport = &self.state.viewport;
        // 屏幕像素容差换算到模型单位，缩放越大容差越小
        (
            viewport.pick(device_pos),
            PICK_TOLERANCE_PX / viewport.scale(),
        )
    }

    fn apply(&mut self, result: ActionResult) {
        match result {
            ActionResult::Continue => {}
            ActionResult::CreateAnnotation(annotation) => {
                if let Some(callback) = self.on_measurement.as_mut() {
                    callback(&annotation);
                }
                self.state.status_message = annotation.display_text();
                self.drawing.add_annotation(annotation);
            }
            ActionResult::PanBy(delta) => {
                self.state.viewport.pan += delta;
            }
            ActionResult::Select(selection) => {
                self.state.selected_element = selection;
            }
            ActionResult::Cancel => {
                self.state.status_message = self.state.action().get_prompt().to_string();
            }
        }
    }
}
