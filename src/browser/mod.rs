pub mod chrome_engine;
pub mod headless;
pub mod network_idle;
pub mod pdf_params;

pub use chrome_engine::{ChromeEngine, ChromeSession};
pub use headless::launch_headless_browser;
