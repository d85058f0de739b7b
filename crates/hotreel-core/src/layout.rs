//! Display surface layout

use crate::types::{SurfaceRect, VideoDimensions, WindowSize};

/// Fit a video into the window, keeping its aspect ratio.
///
/// The surface fills the window height minus `padding` above and below.
/// A video too wide for that height is fitted to the window width
/// instead. The result is centered in both directions.
pub fn fit_surface(video: VideoDimensions, window: WindowSize, padding: u32) -> Option<SurfaceRect> {
    if video.is_empty() || window.width == 0 {
        return None;
    }

    let area_height = window.height.checked_sub(padding.saturating_mul(2))?;
    if area_height == 0 {
        return None;
    }

    let scaled_width = u64::from(video.width) * u64::from(area_height) / u64::from(video.height);
    let (width, height) = if scaled_width <= u64::from(window.width) {
        (scaled_width as u32, area_height)
    } else {
        let scaled_height = u64::from(video.height) * u64::from(window.width) / u64::from(video.width);
        (window.width, scaled_height as u32)
    };

    Some(SurfaceRect {
        x: (window.width - width) / 2,
        y: (window.height - height) / 2,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: WindowSize = WindowSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_fit_to_height() {
        let rect = fit_surface(VideoDimensions::new(1280, 720), WINDOW, 20);
        // 440 * 16 / 9 = 782 > 640, so width wins
        assert_eq!(
            rect,
            Some(SurfaceRect {
                x: 0,
                y: 60,
                width: 640,
                height: 360
            })
        );

        let rect = fit_surface(VideoDimensions::new(480, 640), WINDOW, 20).unwrap();
        assert_eq!((rect.width, rect.height), (330, 440));
        assert_eq!((rect.x, rect.y), (155, 20));
    }

    #[test]
    fn test_square_video() {
        let rect = fit_surface(VideoDimensions::new(100, 100), WINDOW, 20).unwrap();
        assert_eq!(rect, SurfaceRect { x: 100, y: 20, width: 440, height: 440 });
    }

    #[test]
    fn test_unknown_dimensions() {
        assert_eq!(fit_surface(VideoDimensions::new(0, 0), WINDOW, 20), None);
        assert_eq!(fit_surface(VideoDimensions::new(640, 0), WINDOW, 20), None);
    }

    #[test]
    fn test_padding_consumes_window() {
        assert_eq!(fit_surface(VideoDimensions::new(640, 480), WINDOW, 240), None);
        assert_eq!(fit_surface(VideoDimensions::new(640, 480), WINDOW, 400), None);
    }
}
