use crate::settings::{FilenameFormat, Settings};
use chrono::{DateTime, Local};
use std::path::PathBuf;

pub fn timestamped_stem(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Compute the next output path under the configured screenshot directory.
/// Numbered formats consume and advance `counter`; timestamped formats leave
/// it untouched.
pub fn screenshot_filename(
    settings: &Settings,
    counter: &mut u32,
    now: DateTime<Local>,
) -> PathBuf {
    let name = match settings.filename_format {
        FilenameFormat::LinshotNumbered => {
            let n = *counter;
            *counter += 1;
            format!("LinShot_{n:04}.png")
        }
        FilenameFormat::ScreenshotNumbered => {
            let n = *counter;
            *counter += 1;
            format!("Screenshot_{n:04}.png")
        }
        FilenameFormat::LinshotTimestamped => format!("LinShot_{}.png", timestamped_stem(now)),
        FilenameFormat::ScreenshotTimestamped => {
            format!("Screenshot_{}.png", timestamped_stem(now))
        }
    };
    settings.screenshot_path.join(name)
}

/// Like [`screenshot_filename`], but writes the advanced counter back into
/// `settings.auto_number` so the caller can persist it across runs.
pub fn next_screenshot_path(settings: &mut Settings, now: DateTime<Local>) -> PathBuf {
    let mut counter = settings.auto_number;
    let path = screenshot_filename(settings, &mut counter, now);
    settings.auto_number = counter;
    path
}
