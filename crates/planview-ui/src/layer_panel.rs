//! 图层面板视图模型
//!
//! 把绘图的图层状态整理成面板行，并把面板上的操作
//! 转发给 Drawing 的单图层变更接口。

use planview_core::drawing::Drawing;
use planview_core::error::DrawingError;
use planview_core::style::Color;

/// 面板中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub color: Color,
    /// 面板用百分比整数显示不透明度
    pub opacity_percent: u8,
    pub element_count: usize,
}

/// 图层面板
#[derive(Debug, Default)]
pub struct LayerPanel {
    /// 面板中高亮的图层
    pub active_layer: Option<String>,
}

impl LayerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成面板行，顺序与绘图中的图层顺序一致
    pub fn rows(&self, drawing: &Drawing) -> Vec<LayerRow> {
        drawing
            .layers()
            .iter()
            .map(|layer| LayerRow {
                id: layer.id.clone(),
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
                color: layer.color,
                opacity_percent: (layer.opacity() * 100.0).round() as u8,
                element_count: layer.element_count(),
            })
            .collect()
    }

    pub fn set_active(&mut self, id: impl Into<String>) {
        self.active_layer = Some(id.into());
    }

    /// 切换可见性（眼睛图标）
    pub fn toggle_visible(&self, drawing: &mut Drawing, id: &str) -> Result<bool, DrawingError> {
        drawing.toggle_layer_visible(id)
    }

    /// 切换锁定（锁图标）
    pub fn toggle_locked(&self, drawing: &mut Drawing, id: &str) -> Result<bool, DrawingError> {
        drawing.toggle_layer_locked(id)
    }

    /// 不透明度滑块（0-100 整数）
    pub fn set_opacity_percent(
        &self,
        drawing: &mut Drawing,
        id: &str,
        percent: u8,
    ) -> Result<(), DrawingError> {
        drawing.set_layer_opacity(id, f64::from(percent.min(100)) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_drawing_order() {
        let drawing = Drawing::sample();
        let panel = LayerPanel::new();
        let rows = panel.rows(&drawing);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].id, "walls");
        assert_eq!(rows[0].name, "墙体");
        assert!(rows[0].visible);
        assert!(!rows[0].locked);
        let furniture = rows.iter().find(|r| r.id == "furniture").unwrap();
        assert_eq!(furniture.opacity_percent, 80);
    }

    #[test]
    fn test_panel_toggles_only_target_layer() {
        let mut drawing = Drawing::sample();
        let panel = LayerPanel::new();

        let visible = panel.toggle_visible(&mut drawing, "openings").unwrap();
        assert!(!visible);

        let rows = panel.rows(&drawing);
        for row in rows {
            if row.id == "openings" {
                assert!(!row.visible);
            } else {
                assert!(row.visible);
            }
        }
    }

    #[test]
    fn test_opacity_slider_maps_percent() {
        let mut drawing = Drawing::sample();
        let panel = LayerPanel::new();

        panel.set_opacity_percent(&mut drawing, "walls", 35).unwrap();
        let rows = panel.rows(&drawing);
        let walls = rows.iter().find(|r| r.id == "walls").unwrap();
        assert_eq!(walls.opacity_percent, 35);

        // 超过 100 的输入收敛到 100
        panel.set_opacity_percent(&mut drawing, "walls", 250).unwrap();
        let rows = panel.rows(&drawing);
        let walls = rows.iter().find(|r| r.id == "walls").unwrap();
        assert_eq!(walls.opacity_percent, 100);
    }
}
