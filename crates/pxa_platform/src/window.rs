use std::sync::Arc;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl PlatformConfig {
    pub fn fixed(title: &str, width: u32, height: u32) -> Self {
        Self {
            title: title.to_string(),
            width,
            height,
            resizable: false,
        }
    }

    pub fn attributes(&self) -> WindowAttributes {
        let size = LogicalSize::new(self.width, self.height);
        let attrs = WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(size)
            .with_resizable(self.resizable);
        if self.resizable {
            attrs
        } else {
            attrs.with_min_inner_size(size).with_max_inner_size(size)
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::fixed("Pixel Adventure", 800, 600)
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let window = event_loop
        .create_window(config.attributes())
        .map_err(|e| format!("Failed to create window '{}': {e}", config.title))?;
    log::info!(
        "Window created: {}x{} (resizable: {})",
        config.width,
        config.height,
        config.resizable
    );
    Ok(Arc::new(window))
}
