//! Planview 演示程序入口
//! 无头运行：加载（或生成）一张施工图，执行一次脚本化测量，
//! 然后把视图渲染为 SVG 文件。

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use planview_core::math::Point2;
use planview_core::viewport::Rotation;
use planview_render::SvgRenderer;
use planview_ui::{ExportFormat, MouseButton, Viewer, ViewerTool};

/// 输出画布尺寸（设备像素）
const CANVAS_WIDTH: f64 = 1200.0;
const CANVAS_HEIGHT: f64 = 800.0;

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    info!("Starting Planview...");

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let output = args.next().unwrap_or_else(|| "planview.svg".to_string());

    // 有输入文件则加载，否则使用内置示例绘图
    let document = match &input {
        Some(path) => {
            info!("Loading drawing from {}", path);
            planview_file::load(Path::new(path))
                .with_context(|| format!("无法加载文件: {}", path))?
        }
        None => {
            info!("No input file given, using built-in sample drawing");
            planview_file::Document::default()
        }
    };

    let mut viewer = Viewer::new(document.drawing.clone());
    viewer.on_measurement(Box::new(|annotation| {
        info!("Measured: {}", annotation.display_text());
    }));
    viewer.on_export(Box::new(|format| {
        info!("Export to {} requested (handled by host)", format.name());
    }));

    // 视图设置：125% 缩放、旋转90度、轻微平移
    viewer.state.viewport.set_zoom(125.0);
    viewer.state.viewport.rotation = Rotation::R90;
    viewer.state.viewport.pan = planview_core::math::Vector2::new(640.0, 80.0);

    // 脚本化测量：沿示例户型的外墙量一段距离
    viewer.state.set_tool(ViewerTool::Measure);
    let first = viewer.state.viewport.to_device(Point2::new(100.0, 100.0));
    let second = viewer.state.viewport.to_device(Point2::new(700.0, 100.0));
    viewer.pointer_down(first, MouseButton::Left);
    viewer.pointer_down(second, MouseButton::Left);

    // 渲染到SVG
    let renderer = SvgRenderer::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let svg_document = renderer.render(&viewer.drawing, &viewer.state.viewport);
    svg::save(&output, &svg_document).with_context(|| format!("无法写入SVG: {}", output))?;
    info!("Rendered {} layers to {}", viewer.drawing.layers().len(), output);

    // 导出格式一览（真实转换由宿主实现）
    for format in ExportFormat::ALL {
        viewer.request_export(format);
    }

    Ok(())
}
