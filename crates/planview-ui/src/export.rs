//! 导出请求
//!
//! 查看器核心不做格式转换，只把导出请求连同格式转交给宿主注册的回调。

use std::fmt;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Dwg,
    Dxf,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Pdf,
        ExportFormat::Dwg,
        ExportFormat::Dxf,
        ExportFormat::Png,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Dwg => "DWG",
            ExportFormat::Dxf => "DXF",
            ExportFormat::Png => "PNG",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Dwg => "dwg",
            ExportFormat::Dxf => "dxf",
            ExportFormat::Png => "png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
