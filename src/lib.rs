pub mod annotate;
pub mod capture;
pub mod compose;
pub mod history;
pub mod logging;
pub mod save;
pub mod select;
pub mod settings;
