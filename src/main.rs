use anyhow::{Context, Result};
use chrono::Local;
use linshot::capture::{CaptureMode, Rgba8, ScreenCaptureSource};
use linshot::compose::{add_border, copy_to_clipboard, export_to_file, CAPTURE_BORDER_WIDTH};
use linshot::history::ScreenshotHistory;
use linshot::save::next_screenshot_path;
use linshot::settings::Settings;
use tracing::{error, info, warn};

fn main() {
    let mut settings = Settings::load();
    linshot::logging::init(settings.debug_logging);

    if let Err(err) = run(&mut settings) {
        error!("capture failed: {err:#}");
        std::process::exit(1);
    }
}

fn run(settings: &mut Settings) -> Result<()> {
    let mut source = ScreenCaptureSource::new();
    source.initialize().context("initialize screen capture")?;

    let frame = source
        .capture_region(CaptureMode::FullScreen, None)
        .context("capture full screen")?;
    source.shutdown();

    let framed = add_border(&frame, CAPTURE_BORDER_WIDTH, Rgba8::BLACK);

    std::fs::create_dir_all(&settings.screenshot_path).with_context(|| {
        format!(
            "create screenshot folder {}",
            settings.screenshot_path.display()
        )
    })?;

    let number_before = settings.auto_number;
    let path = next_screenshot_path(settings, Local::now());
    export_to_file(&framed, &path).with_context(|| format!("export {}", path.display()))?;
    info!(path = %path.display(), "screenshot saved");

    if settings.auto_number != number_before {
        // The next run must not reuse this number and overwrite the file.
        if let Err(err) = settings.save() {
            warn!("could not persist the screenshot counter: {err:#}");
        }
    }

    let mut history = ScreenshotHistory::new();
    history.load(&settings.screenshot_path);
    history.add(&path);

    if let Err(err) = copy_to_clipboard(&framed) {
        // A clipboard failure should not undo a successful save.
        error!("clipboard copy failed: {err:#}");
    }

    Ok(())
}
