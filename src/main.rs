//! Entry point: bring up logging and config, run the window until close.

mod config;
mod model;
mod render;
mod vulkan;
mod window;

use config::AppConfig;
use window::Window;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match AppConfig::load("crater.toml") {
        Ok(config) => config,
        Err(e) => {
            log::error!("config error: {}", e);
            std::process::exit(1);
        }
    };

    let mut window = match Window::new(&config) {
        Ok(window) => window,
        Err(e) => {
            log::error!("window init error: {}", e);
            std::process::exit(1);
        }
    };

    window.run();
    window.cleanup();
}
