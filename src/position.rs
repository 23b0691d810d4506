//! カード位置計算
//!
//! カーソル位置から右下へオフセットし、ビューポート端からpadding分内側に収める。

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// カーソルからのずれ
    pub offset: f64,
    /// ビューポート端との余白
    pub padding: f64,
}

/// カードの左上座標を求める
///
/// 右端・下端のはみ出しを先に補正し、その後で左端・上端を補正する。
/// ビューポートがカードより小さい場合は左上の余白が優先される。
pub fn place_card(pointer: Point, card: Size, viewport: Size, geometry: Geometry) -> Point {
    let Geometry { offset, padding } = geometry;
    let mut x = pointer.x + offset;
    let mut y = pointer.y + offset;

    if x + card.width + padding > viewport.width {
        x = viewport.width - card.width - padding;
    }
    if y + card.height + padding > viewport.height {
        y = viewport.height - card.height - padding;
    }
    if x < padding {
        x = padding;
    }
    if y < padding {
        y = padding;
    }

    Point { x, y }
}

/// 現在のビューポートサイズ
pub fn viewport_size() -> Option<Size> {
    let window = web_sys::window()?;
    Some(Size {
        width: window.inner_width().ok()?.as_f64()?,
        height: window.inner_height().ok()?.as_f64()?,
    })
}
