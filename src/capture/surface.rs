#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
}

/// Byte layout of a pixel within the surface buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Little-endian ARGB32, the layout framebuffer reads are normalized into.
    Bgra,
    /// The layout clipboards and image encoders expect.
    Rgba,
}

/// An owned raster buffer with explicit stride and channel order.
///
/// The stride may exceed `width * 4` to account for row padding; every pixel
/// access goes through it. Surfaces are exclusively owned and never aliased
/// between the editable image and any snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    stride: usize,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32, order: ChannelOrder) -> Self {
        let stride = width as usize * 4;
        Self {
            width,
            height,
            stride,
            order,
            data: vec![0u8; stride * height as usize],
        }
    }

    pub fn with_stride(width: u32, height: u32, stride: usize, order: ChannelOrder) -> Self {
        assert!(stride >= width as usize * 4, "stride must cover the row");
        Self {
            width,
            height,
            stride,
            order,
            data: vec![0u8; stride * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let idx = self.offset(x, y);
        let px = &self.data[idx..idx + 4];
        match self.order {
            ChannelOrder::Bgra => Rgba8::rgba(px[2], px[1], px[0], px[3]),
            ChannelOrder::Rgba => Rgba8::rgba(px[0], px[1], px[2], px[3]),
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        let idx = self.offset(x, y);
        let px = &mut self.data[idx..idx + 4];
        match self.order {
            ChannelOrder::Bgra => {
                px[0] = color.b;
                px[1] = color.g;
                px[2] = color.r;
                px[3] = color.a;
            }
            ChannelOrder::Rgba => {
                px[0] = color.r;
                px[1] = color.g;
                px[2] = color.b;
                px[3] = color.a;
            }
        }
    }

    /// Straight-alpha source-over blend of `color` onto the stored pixel.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if color.a == 255 {
            self.put_pixel(x, y, color);
            return;
        }
        if color.a == 0 {
            return;
        }
        let dst = self.pixel(x, y);
        self.put_pixel(x, y, blend(dst, color));
    }

    pub fn fill(&mut self, color: Rgba8) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Copy `src` into this surface with its top-left corner at `(dx, dy)`,
    /// clipping against both surfaces. Channel orders may differ.
    pub fn blit(&mut self, src: &PixelSurface, dx: i32, dy: i32) {
        for sy in 0..src.height {
            let ty = dy + sy as i32;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let tx = dx + sx as i32;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                self.put_pixel(tx as u32, ty as u32, src.pixel(sx, sy));
            }
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

fn blend(bottom: Rgba8, top: Rgba8) -> Rgba8 {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Rgba8::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba8 {
        r: channel(top.r, bottom.r),
        g: channel(top.g, bottom.g),
        b: channel(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelOrder, PixelSurface, Rgba8};

    #[test]
    fn pixel_roundtrip_respects_channel_order() {
        let color = Rgba8::rgba(10, 20, 30, 40);
        for order in [ChannelOrder::Bgra, ChannelOrder::Rgba] {
            let mut surface = PixelSurface::new(2, 2, order);
            surface.put_pixel(1, 0, color);
            assert_eq!(surface.pixel(1, 0), color);
        }
    }

    #[test]
    fn padded_stride_keeps_rows_independent() {
        let mut surface = PixelSurface::with_stride(2, 2, 12, ChannelOrder::Bgra);
        surface.put_pixel(1, 0, Rgba8::WHITE);
        surface.put_pixel(0, 1, Rgba8::BLACK);
        assert_eq!(surface.pixel(1, 0), Rgba8::WHITE);
        assert_eq!(surface.pixel(0, 1), Rgba8::BLACK);
        assert_eq!(surface.pixel(0, 0), Rgba8::TRANSPARENT);
    }

    #[test]
    fn blend_over_opaque_background_matches_source_over() {
        let mut surface = PixelSurface::new(1, 1, ChannelOrder::Bgra);
        surface.put_pixel(0, 0, Rgba8::rgba(100, 100, 100, 255));
        surface.blend_pixel(0, 0, Rgba8::rgba(200, 0, 0, 128));
        assert_eq!(surface.pixel(0, 0), Rgba8::rgba(150, 50, 50, 255));
    }

    #[test]
    fn blit_clips_against_destination_edges() {
        let mut dst = PixelSurface::new(2, 2, ChannelOrder::Bgra);
        let mut src = PixelSurface::new(2, 2, ChannelOrder::Rgba);
        src.fill(Rgba8::WHITE);
        dst.blit(&src, 1, 1);
        assert_eq!(dst.pixel(0, 0), Rgba8::TRANSPARENT);
        assert_eq!(dst.pixel(1, 1), Rgba8::WHITE);
    }
}
