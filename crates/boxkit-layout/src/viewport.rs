//! Window viewport and reference frame.
//!
//! Layout happens in frame units rather than window pixels. A [`Viewport`]
//! maps the window onto the reference [`Frame`] according to a [`FrameFit`]
//! policy and yields the extent the root box is laid out in.

use crate::LayoutError;

/// Reference design size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        check_size("frame", width, height)?;
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// How the frame responds to the window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFit {
    /// One unit per pixel; the frame size is ignored.
    Fixed,
    /// Always exactly the frame, even if units stop being square.
    Stretch,
    /// Frame width matches the window, height follows the window aspect.
    Width,
    /// Frame height matches the window, width follows the window aspect.
    Height,
    /// The larger projection; parts of the frame may fall outside the window.
    Max,
    /// The smaller projection; the whole frame stays visible.
    #[default]
    Min,
}

/// A window onto the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    frame: Frame,
    fit: FrameFit,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(frame: Frame, fit: FrameFit, width: f64, height: f64) -> Result<Self, LayoutError> {
        check_size("viewport", width, height)?;
        Ok(Self {
            frame,
            fit,
            width,
            height,
        })
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn fit(&self) -> FrameFit {
        self.fit
    }

    pub fn set_fit(&mut self, fit: FrameFit) {
        self.fit = fit;
    }

    /// Window size in pixels.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        check_size("viewport", width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Extent of the layout area in frame units.
    pub fn projection(&self) -> (f64, f64) {
        let Frame {
            width: base_width,
            height: base_height,
        } = self.frame;
        let aspect = self.frame.aspect();
        let window_aspect = self.width / self.height;
        let window_is_wider = aspect * self.height < self.width;

        match self.fit {
            FrameFit::Fixed => (self.width, self.height),
            FrameFit::Stretch => (base_width, base_height),
            FrameFit::Width => (base_width, base_width / window_aspect),
            FrameFit::Height => (base_height * window_aspect, base_height),
            FrameFit::Max if window_is_wider => (base_width, base_width / window_aspect),
            FrameFit::Min if !window_is_wider => (base_width, base_width / window_aspect),
            FrameFit::Max | FrameFit::Min => (base_height * window_aspect, base_height),
        }
    }

    /// Window pixels per frame unit along each axis.
    pub fn scale(&self) -> (f64, f64) {
        let (width, height) = self.projection();
        (self.width / width, self.height / height)
    }
}

fn check_size(what: &str, width: f64, height: f64) -> Result<(), LayoutError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if positive(width) && positive(height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{what} size must be positive, got {width}x{height}"
        )))
    }
}
