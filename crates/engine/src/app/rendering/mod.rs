use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::stage::{Color, DrawList, DrawOp, Rect};

const FALLBACK_CLEAR_COLOR: Color = [12, 12, 16, 255];

/// Software framebuffer at a fixed logical resolution. The surface scales
/// the buffer to the window, so stages draw in logical pixels regardless of
/// the window size.
pub struct Renderer {
    pixels: Pixels<'static>,
    logical_width: u32,
    logical_height: u32,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        logical_width: u32,
        logical_height: u32,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(logical_width, logical_height, surface)?;
        Ok(Self {
            pixels,
            logical_width,
            logical_height,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub fn present(&mut self, draw: &DrawList) -> Result<(), Error> {
        let frame = self.pixels.frame_mut();
        rasterize(frame, self.logical_width, self.logical_height, draw);
        self.pixels.render()
    }
}

fn rasterize(frame: &mut [u8], width: u32, height: u32, draw: &DrawList) {
    if !draw.ops().iter().any(|op| matches!(op, DrawOp::Clear(_))) {
        clear_frame(frame, FALLBACK_CLEAR_COLOR);
    }
    for op in draw.ops() {
        match op {
            DrawOp::Clear(color) => clear_frame(frame, *color),
            DrawOp::Rect { rect, color } => fill_rect(frame, width, height, *rect, *color),
        }
    }
}

fn clear_frame(frame: &mut [u8], color: Color) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

fn fill_rect(frame: &mut [u8], width: u32, height: u32, rect: Rect, color: Color) {
    let x_min = (rect.x.floor().max(0.0) as i64).min(width as i64) as u32;
    let y_min = (rect.y.floor().max(0.0) as i64).min(height as i64) as u32;
    let x_max = (rect.right().ceil().max(0.0) as i64).min(width as i64) as u32;
    let y_max = (rect.bottom().ceil().max(0.0) as i64).min(height as i64) as u32;

    for y in y_min..y_max {
        let row_start = (y as usize * width as usize + x_min as usize) * 4;
        let row_end = (y as usize * width as usize + x_max as usize) * 4;
        for chunk in frame[row_start..row_end].chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 8;
    const H: u32 = 6;

    fn blank_frame() -> Vec<u8> {
        vec![0u8; (W * H * 4) as usize]
    }

    fn pixel(frame: &[u8], x: u32, y: u32) -> Color {
        let start = ((y * W + x) * 4) as usize;
        [
            frame[start],
            frame[start + 1],
            frame[start + 2],
            frame[start + 3],
        ]
    }

    #[test]
    fn fill_rect_paints_interior_only() {
        let mut frame = blank_frame();
        fill_rect(
            &mut frame,
            W,
            H,
            Rect::new(2.0, 1.0, 3.0, 2.0),
            [255, 0, 0, 255],
        );

        assert_eq!(pixel(&frame, 2, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 4, 2), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 1, 1), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 5, 1), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 2, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_clips_at_frame_edges() {
        let mut frame = blank_frame();
        fill_rect(
            &mut frame,
            W,
            H,
            Rect::new(-4.0, -4.0, 100.0, 100.0),
            [0, 255, 0, 255],
        );

        assert_eq!(pixel(&frame, 0, 0), [0, 255, 0, 255]);
        assert_eq!(pixel(&frame, W - 1, H - 1), [0, 255, 0, 255]);
    }

    #[test]
    fn fill_rect_fully_outside_is_noop() {
        let mut frame = blank_frame();
        fill_rect(
            &mut frame,
            W,
            H,
            Rect::new(50.0, 50.0, 10.0, 10.0),
            [0, 0, 255, 255],
        );
        assert!(frame.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn rasterize_without_clear_op_uses_fallback_clear() {
        let mut frame = blank_frame();
        let mut draw = DrawList::default();
        draw.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [9, 9, 9, 255]);
        rasterize(&mut frame, W, H, &draw);

        assert_eq!(pixel(&frame, 0, 0), [9, 9, 9, 255]);
        assert_eq!(pixel(&frame, 3, 3), FALLBACK_CLEAR_COLOR);
    }

    #[test]
    fn rasterize_applies_ops_in_order() {
        let mut frame = blank_frame();
        let mut draw = DrawList::default();
        draw.push_clear([1, 1, 1, 255]);
        draw.push_rect(Rect::new(0.0, 0.0, 2.0, 2.0), [2, 2, 2, 255]);
        draw.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), [3, 3, 3, 255]);
        rasterize(&mut frame, W, H, &draw);

        assert_eq!(pixel(&frame, 0, 0), [3, 3, 3, 255]);
        assert_eq!(pixel(&frame, 1, 1), [2, 2, 2, 255]);
        assert_eq!(pixel(&frame, 5, 5), [1, 1, 1, 255]);
    }
}
