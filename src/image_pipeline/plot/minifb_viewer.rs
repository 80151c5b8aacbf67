use minifb::{Key, Window, WindowOptions};
use tracing::{debug, info};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::plot::render::render_figure;
use crate::image_pipeline::plot::viewer::{Figure, ImageViewer};

const TARGET_FPS: usize = 30;

/// Shows figures in native windows. Closing a window or pressing Escape in
/// it dismisses that figure.
pub struct MinifbViewer {
    side: usize,
}

impl MinifbViewer {
    pub fn new(side: usize) -> Self {
        Self { side }
    }
}

impl ImageViewer for MinifbViewer {
    fn show(&self, figures: &[Figure<'_>]) -> Result<()> {
        let side = self.side;
        let mut windows = Vec::with_capacity(figures.len());
        for figure in figures {
            debug!("Opening window '{}' for {}x{} image", figure.title, figure.image.width(), figure.image.height());
            let buffer = render_figure(figure.image, side);
            let mut window = Window::new(figure.title, side, side, WindowOptions::default())
                .map_err(|e| ConversionError::ViewerError(e.to_string()))?;
            window.set_target_fps(TARGET_FPS);
            windows.push(Some((window, buffer)));
        }

        info!("Showing {} figure(s); close the windows to exit", windows.len());

        while windows.iter().any(Option::is_some) {
            for slot in windows.iter_mut() {
                let dismissed = match slot {
                    Some((window, buffer)) => {
                        if window.is_open() && !window.is_key_down(Key::Escape) {
                            window
                                .update_with_buffer(buffer, side, side)
                                .map_err(|e| ConversionError::ViewerError(e.to_string()))?;
                            false
                        } else {
                            true
                        }
                    }
                    None => false,
                };
                if dismissed {
                    *slot = None;
                }
            }
        }
        Ok(())
    }
}
