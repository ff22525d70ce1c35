//! Planview SVG渲染器
//!
//! 把绘图文档（图层 + 标注）在给定视口下光栅化为 `svg::Document`。
//! 渲染对封闭的图元枚举是全函数：退化几何输出为空，从不报错。

pub mod grid;
pub mod renderer;

pub use renderer::SvgRenderer;
