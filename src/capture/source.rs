use crate::capture::frame::{normalize, RawFrame};
use crate::capture::surface::{ChannelOrder, PixelSurface};
use crate::select::area::CaptureArea;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("display connection unavailable: {0}")]
    Init(String),
    #[error("screen capture failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    FullScreen,
    Area,
}

/// Captures raw framebuffer regions and normalizes them into surfaces.
///
/// The connection is logical: each grab opens and releases its own screen
/// device context, but callers must `initialize` first so a missing display
/// is reported before any interaction starts.
#[derive(Debug, Default)]
pub struct ScreenCaptureSource {
    connected: bool,
}

impl ScreenCaptureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self) -> Result<(), CaptureError> {
        probe_display()?;
        self.connected = true;
        Ok(())
    }

    pub fn capture_region(
        &self,
        mode: CaptureMode,
        area: Option<CaptureArea>,
    ) -> Result<PixelSurface, CaptureError> {
        if !self.connected {
            return Err(CaptureError::Init("capture source not initialized".into()));
        }

        let screen = display_geometry()?;
        let (x, y, width, height) = resolve_request(mode, area, screen)?;
        debug!(x, y, width, height, "capturing screen region");

        let frame = grab_raw_frame(x, y, width, height)?;
        Ok(normalize(&frame, ChannelOrder::Bgra))
    }

    /// Safe to call when never initialized.
    pub fn shutdown(&mut self) {
        self.connected = false;
    }
}

impl Drop for ScreenCaptureSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Turn a capture request into concrete screen coordinates. `Area` requires
/// an area with non-negative extents.
pub fn resolve_request(
    mode: CaptureMode,
    area: Option<CaptureArea>,
    screen: (i32, i32),
) -> Result<(i32, i32, i32, i32), CaptureError> {
    match mode {
        CaptureMode::FullScreen => Ok((0, 0, screen.0, screen.1)),
        CaptureMode::Area => {
            let area = area
                .ok_or_else(|| CaptureError::Failed("area capture requires a region".into()))?;
            if area.width < 0 || area.height < 0 {
                return Err(CaptureError::Failed(format!(
                    "area capture requires non-negative extents, got {}x{}",
                    area.width, area.height
                )));
            }
            Ok((area.x, area.y, area.width, area.height))
        }
    }
}

// 32-bit BI_RGB device-independent bitmaps pack channels as xRGB words.
#[cfg(windows)]
const DIB_RED_MASK: u32 = 0x00FF_0000;
#[cfg(windows)]
const DIB_GREEN_MASK: u32 = 0x0000_FF00;
#[cfg(windows)]
const DIB_BLUE_MASK: u32 = 0x0000_00FF;

#[cfg(windows)]
fn probe_display() -> Result<(), CaptureError> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::{GetDC, ReleaseDC};

    unsafe {
        let screen_dc = GetDC(HWND::default());
        if screen_dc.0.is_null() {
            return Err(CaptureError::Init("GetDC failed for the screen".into()));
        }
        let _ = ReleaseDC(HWND::default(), screen_dc);
    }
    Ok(())
}

#[cfg(windows)]
fn display_geometry() -> Result<(i32, i32), CaptureError> {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    if width <= 0 || height <= 0 {
        return Err(CaptureError::Failed("display geometry unavailable".into()));
    }
    Ok((width, height))
}

#[cfg(windows)]
fn grab_raw_frame(x: i32, y: i32, width: i32, height: i32) -> Result<RawFrame, CaptureError> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::{
        BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
        GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
        HGDIOBJ, SRCCOPY,
    };

    if width <= 0 || height <= 0 {
        return Err(CaptureError::Failed("capture bounds are empty".into()));
    }

    unsafe {
        let screen_dc = GetDC(HWND::default());
        if screen_dc.0.is_null() {
            return Err(CaptureError::Failed("GetDC failed for screen grab".into()));
        }
        let mem_dc = CreateCompatibleDC(screen_dc);
        if mem_dc.0.is_null() {
            let _ = ReleaseDC(HWND::default(), screen_dc);
            return Err(CaptureError::Failed(
                "CreateCompatibleDC failed for screen grab".into(),
            ));
        }

        let bmp = CreateCompatibleBitmap(screen_dc, width, height);
        if bmp.0.is_null() {
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(HWND::default(), screen_dc);
            return Err(CaptureError::Failed(
                "CreateCompatibleBitmap failed for screen grab".into(),
            ));
        }

        let old_obj = SelectObject(mem_dc, HGDIOBJ(bmp.0));
        let blitted = BitBlt(mem_dc, 0, 0, width, height, screen_dc, x, y, SRCCOPY).is_ok();

        let mut result = Err(CaptureError::Failed("BitBlt failed for screen grab".into()));
        if blitted {
            let mut bmi = BITMAPINFO::default();
            bmi.bmiHeader = BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            };

            let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
            let rows = GetDIBits(
                mem_dc,
                bmp,
                0,
                height as u32,
                Some(bytes.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            );

            if rows != 0 {
                let pixels = bytes
                    .chunks_exact(4)
                    .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
                    .collect();
                result = Ok(RawFrame {
                    width: width as u32,
                    height: height as u32,
                    red_mask: DIB_RED_MASK,
                    green_mask: DIB_GREEN_MASK,
                    blue_mask: DIB_BLUE_MASK,
                    pixels,
                });
            } else {
                result = Err(CaptureError::Failed(
                    "GetDIBits failed for screen grab".into(),
                ));
            }
        }

        let _ = SelectObject(mem_dc, old_obj);
        let _ = DeleteObject(bmp);
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(HWND::default(), screen_dc);

        result
    }
}

#[cfg(not(windows))]
fn probe_display() -> Result<(), CaptureError> {
    Err(CaptureError::Init(
        "screen capture is only implemented for Windows".into(),
    ))
}

#[cfg(not(windows))]
fn display_geometry() -> Result<(i32, i32), CaptureError> {
    Err(CaptureError::Failed(
        "display geometry is only available on Windows".into(),
    ))
}

#[cfg(not(windows))]
fn grab_raw_frame(_x: i32, _y: i32, _w: i32, _h: i32) -> Result<RawFrame, CaptureError> {
    Err(CaptureError::Failed(
        "screen capture is only implemented for Windows".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::{resolve_request, CaptureError, CaptureMode, ScreenCaptureSource};
    use crate::select::area::CaptureArea;

    #[test]
    fn fullscreen_resolves_to_display_geometry() {
        let request = resolve_request(CaptureMode::FullScreen, None, (1920, 1080)).expect("ok");
        assert_eq!(request, (0, 0, 1920, 1080));
    }

    #[test]
    fn area_mode_requires_a_region() {
        let err = resolve_request(CaptureMode::Area, None, (1920, 1080)).unwrap_err();
        assert!(matches!(err, CaptureError::Failed(_)));
    }

    #[test]
    fn area_mode_rejects_negative_extents() {
        let area = CaptureArea {
            x: 10,
            y: 10,
            width: -5,
            height: 20,
        };
        let err = resolve_request(CaptureMode::Area, Some(area), (1920, 1080)).unwrap_err();
        assert!(matches!(err, CaptureError::Failed(_)));
    }

    #[test]
    fn area_mode_passes_region_through() {
        let area = CaptureArea {
            x: 3,
            y: 4,
            width: 100,
            height: 50,
        };
        let request = resolve_request(CaptureMode::Area, Some(area), (1920, 1080)).expect("ok");
        assert_eq!(request, (3, 4, 100, 50));
    }

    #[test]
    fn capture_before_initialize_reports_init_error() {
        let source = ScreenCaptureSource::new();
        let err = source.capture_region(CaptureMode::FullScreen, None).unwrap_err();
        assert!(matches!(err, CaptureError::Init(_)));
    }

    #[test]
    fn shutdown_without_initialize_is_a_noop() {
        let mut source = ScreenCaptureSource::new();
        source.shutdown();
        source.shutdown();
    }
}
