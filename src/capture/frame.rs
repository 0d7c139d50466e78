use crate::capture::surface::{ChannelOrder, PixelSurface, Rgba8};

/// A raw framebuffer read: packed pixel words plus the server-reported
/// channel masks. The masks vary by visual, so extraction is always
/// mask-driven rather than assuming a fixed bit layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub pixels: Vec<u32>,
}

/// Bit position of a channel within a pixel word, i.e. the count of trailing
/// zero bits in its mask. An empty mask shifts by zero.
pub fn channel_shift(mask: u32) -> u32 {
    if mask == 0 {
        0
    } else {
        mask.trailing_zeros()
    }
}

/// Normalize a raw frame into a surface in the requested channel order.
/// Framebuffer reads carry no usable alpha, so alpha is forced opaque.
pub fn normalize(frame: &RawFrame, order: ChannelOrder) -> PixelSurface {
    let red_shift = channel_shift(frame.red_mask);
    let green_shift = channel_shift(frame.green_mask);
    let blue_shift = channel_shift(frame.blue_mask);

    let mut surface = PixelSurface::new(frame.width, frame.height, order);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let word = frame.pixels[(y * frame.width + x) as usize];
            let color = Rgba8 {
                r: ((word & frame.red_mask) >> red_shift) as u8,
                g: ((word & frame.green_mask) >> green_shift) as u8,
                b: ((word & frame.blue_mask) >> blue_shift) as u8,
                a: 0xFF,
            };
            surface.put_pixel(x, y, color);
        }
    }
    surface
}
