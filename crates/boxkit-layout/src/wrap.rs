//! Content wrap hooks.
//!
//! Content such as wrapped text only knows how tall it is once its width is
//! fixed. A content provider installs a [`WrapHook`] on the box holding that
//! content; the solver calls it after widths are distributed and before
//! heights are measured.

/// Reports the height content needs at a given width.
pub trait WrapHook {
    /// Height of the content when laid out `fixed_width` units wide.
    ///
    /// Both values exclude the box's padding. Non-finite results are ignored.
    fn resolve_wrap(&self, fixed_width: f64) -> f64;
}

impl<F> WrapHook for F
where
    F: Fn(f64) -> f64,
{
    fn resolve_wrap(&self, fixed_width: f64) -> f64 {
        self(fixed_width)
    }
}
