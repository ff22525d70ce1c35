//! 视口变换
//!
//! 设备像素坐标与模型空间坐标之间的映射。
//! 正向变换：`device = R(rotation) * (model * zoom/100) + pan`。
//! 逆向变换对缩放、平移和旋转一致求逆，因此任意旋转下拾取都正确。
//!
//! 缩放以百分比表示，钳制在 [10,500]，步长25，永远不会到0。

use crate::math::{Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 最小缩放（百分比）
pub const MIN_ZOOM: f64 = 10.0;
/// 最大缩放（百分比）
pub const MAX_ZOOM: f64 = 500.0;
/// 缩放步长（百分比）
pub const ZOOM_STEP: f64 = 25.0;
/// 默认网格间距（模型单位）
pub const DEFAULT_GRID_PITCH: f64 = 20.0;

/// 画布旋转（仅限90°的倍数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// 角度值（度）
    pub fn degrees(&self) -> f64 {
        match self {
            Rotation::R0 => 0.0,
            Rotation::R90 => 90.0,
            Rotation::R180 => 180.0,
            Rotation::R270 => 270.0,
        }
    }

    /// 精确的 (cos, sin)，避免浮点三角函数误差
    fn cos_sin(&self) -> (f64, f64) {
        match self {
            Rotation::R0 => (1.0, 0.0),
            Rotation::R90 => (0.0, 1.0),
            Rotation::R180 => (-1.0, 0.0),
            Rotation::R270 => (0.0, -1.0),
        }
    }

    /// 顺时针旋转90°
    pub fn rotate_cw(&self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }
}

/// 视口状态
///
/// 进程内状态，随查看器创建/销毁，不持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// 缩放百分比，[10,500]
    zoom: f64,
    /// 画布旋转
    pub rotation: Rotation,
    /// 平移偏移（设备像素）
    pub pan: Vector2,
    /// 是否显示网格
    pub show_grid: bool,
    /// 网格间距（模型单位）
    pub grid_pitch: f64,
    /// 是否吸附到网格
    pub snap_to_grid: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 100.0,
            rotation: Rotation::R0,
            pan: Vector2::zeros(),
            show_grid: true,
            grid_pitch: DEFAULT_GRID_PITCH,
            snap_to_grid: false,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// 模型单位到设备像素的比例因子
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    /// 设置缩放，钳制到 [10,500]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// 放大一档
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// 缩小一档
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// 顺时针旋转画布90°
    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// 模型空间 → 设备像素
    pub fn to_device(&self, model: Point2) -> Point2 {
        let s = self.scale();
        let (c, si) = self.rotation.cos_sin();
        let x = model.x * s;
        let y = model.y * s;
        Point2::new(x * c - y * si + self.pan.x, x * si + y * c + self.pan.y)
    }

    /// 设备像素 → 模型空间
    ///
    /// 完整的逆仿射变换（平移、旋转、缩放），
    /// 旋转为0时退化为 `(device - pan) * (100 / zoom)`。
    pub fn to_model(&self, device: Point2) -> Point2 {
        let s = self.scale();
        let (c, si) = self.rotation.cos_sin();
        let px = device.x - self.pan.x;
        let py = device.y - self.pan.y;
        // R(-θ)
        let x = px * c + py * si;
        let y = -px * si + py * c;
        Point2::new(x / s, y / s)
    }

    /// 吸附到网格：每个轴独立取最近的网格倍数
    ///
    /// 间距非正时不做吸附。
    pub fn snap(&self, point: Point2) -> Point2 {
        if self.grid_pitch <= EPSILON {
            return point;
        }
        Point2::new(
            (point.x / self.grid_pitch).round() * self.grid_pitch,
            (point.y / self.grid_pitch).round() * self.grid_pitch,
        )
    }

    /// 拾取：设备坐标转模型坐标，按需吸附
    pub fn pick(&self, device: Point2) -> Point2 {
        let model = self.to_model(device);
        if self.snap_to_grid {
            self.snap(model)
        } else {
            model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point2, b: Point2) {
        assert!(
            (a - b).norm() < 1e-9,
            "points differ: {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_roundtrip_all_rotations() {
        for rotation in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
            let mut vp = Viewport::new();
            vp.set_zoom(175.0);
            vp.pan = Vector2::new(42.0, -17.5);
            vp.rotation = rotation;

            let device = Point2::new(123.4, -56.7);
            let model = vp.to_model(device);
            let back = vp.to_device(model);
            assert_point_eq(device, back);
        }
    }

    #[test]
    fn test_inverse_matches_spec_formula_at_rotation_zero() {
        let mut vp = Viewport::new();
        vp.set_zoom(200.0);
        vp.pan = Vector2::new(50.0, 30.0);

        let device = Point2::new(250.0, 130.0);
        let model = vp.to_model(device);
        // (device - pan) * (100 / zoom)
        assert_point_eq(model, Point2::new(100.0, 50.0));
    }

    #[test]
    fn test_snap_idempotent() {
        let vp = Viewport::new();
        let p = Point2::new(37.3, -11.8);
        let once = vp.snap(p);
        let twice = vp.snap(once);
        assert_point_eq(once, twice);
        assert_point_eq(once, Point2::new(40.0, -20.0));
    }

    #[test]
    fn test_snap_zero_pitch_is_noop() {
        let mut vp = Viewport::new();
        vp.grid_pitch = 0.0;
        let p = Point2::new(37.3, -11.8);
        assert_point_eq(vp.snap(p), p);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut vp = Viewport::new();
        vp.set_zoom(5.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);
        vp.set_zoom(9999.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);

        // 从100开始反复步进也不会越界
        vp.set_zoom(100.0);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom(), MAX_ZOOM);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom(), MIN_ZOOM);
        // 缩放永远不为0，变换无除零
        let model = vp.to_model(Point2::new(1.0, 1.0));
        assert!(model.x.is_finite() && model.y.is_finite());
    }

    #[test]
    fn test_pick_applies_snap_when_enabled() {
        let mut vp = Viewport::new();
        vp.snap_to_grid = true;
        // 默认间距20：模型(37.3, -11.8) → (40, -20)
        let picked = vp.pick(Point2::new(37.3, -11.8));
        assert_point_eq(picked, Point2::new(40.0, -20.0));
    }

    #[test]
    fn test_rotation_cycle() {
        let mut r = Rotation::R0;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::R0);
        assert_eq!(Rotation::R270.degrees(), 270.0);
    }
}
