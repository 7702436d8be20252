use crate::foundation::core::{Rect, Rgba, Viewport};

/// Rect vertex layout: NDC x, y; r, g, b, a; local x, y; width, height; corner radius.
pub const RECT_FLOATS_PER_VERTEX: usize = 11;
/// Text vertex layout: NDC x, y; u, v.
pub const TEXT_FLOATS_PER_VERTEX: usize = 4;
/// Two triangles per quad.
pub const VERTICES_PER_QUAD: usize = 6;

pub const RECT_QUAD_FLOATS: usize = RECT_FLOATS_PER_VERTEX * VERTICES_PER_QUAD;
pub const TEXT_QUAD_FLOATS: usize = TEXT_FLOATS_PER_VERTEX * VERTICES_PER_QUAD;

/// Map a logical rect onto clip space (y up).
fn ndc(rect: Rect, viewport: Viewport) -> [f32; 4] {
    let vw = if viewport.width > 0.0 { viewport.width } else { 1.0 };
    let vh = if viewport.height > 0.0 { viewport.height } else { 1.0 };
    [
        (rect.x0 / vw * 2.0 - 1.0) as f32,
        (1.0 - rect.y0 / vh * 2.0) as f32,
        (rect.x1 / vw * 2.0 - 1.0) as f32,
        (1.0 - rect.y1 / vh * 2.0) as f32,
    ]
}

/// Background quad for a box. Local coordinates span `0..w` and `0..h` for the SDF corner shader.
pub fn rect_vertices(
    rect: Rect,
    color: Rgba,
    corner_radius: f64,
    viewport: Viewport,
) -> [f32; RECT_QUAD_FLOATS] {
    let [x0, y0, x1, y1] = ndc(rect, viewport);
    let [r, g, b, a] = color.to_array();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    let rad = corner_radius as f32;

    #[rustfmt::skip]
    let v = [
        x0, y0, r, g, b, a, 0.0, 0.0, w, h, rad,
        x1, y0, r, g, b, a, w, 0.0, w, h, rad,
        x0, y1, r, g, b, a, 0.0, h, w, h, rad,
        x0, y1, r, g, b, a, 0.0, h, w, h, rad,
        x1, y0, r, g, b, a, w, 0.0, w, h, rad,
        x1, y1, r, g, b, a, w, h, w, h, rad,
    ];
    v
}

/// Textured quad for a text leaf.
pub fn text_vertices(rect: Rect, viewport: Viewport) -> [f32; TEXT_QUAD_FLOATS] {
    let [x0, y0, x1, y1] = ndc(rect, viewport);

    #[rustfmt::skip]
    let v = [
        x0, y0, 0.0, 0.0,
        x1, y0, 1.0, 0.0,
        x0, y1, 0.0, 1.0,
        x0, y1, 0.0, 1.0,
        x1, y0, 1.0, 0.0,
        x1, y1, 1.0, 1.0,
    ];
    v
}

#[cfg(test)]
#[path = "../../tests/unit/render/vertices.rs"]
mod tests;
