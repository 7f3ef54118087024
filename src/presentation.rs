//! Presents a [Report] to the user.
//!
//! Report assembly does not touch the page. The caller decides how support is shown by passing a
//! [SupportView] for each graphics API to [present].
use crate::report::Report;

/// A UI sink that tells the user whether a capability is supported.
pub trait SupportView {
    fn show_supported(&self);

    fn show_unsupported(&self);
}

impl<'a, V> SupportView for &'a V
where
    V: SupportView + ?Sized,
{
    fn show_supported(&self) {
        (**self).show_supported()
    }

    fn show_unsupported(&self) {
        (**self).show_unsupported()
    }
}

/// Shows the support status of the report's `webgl2` and `webgpu` sub-reports on the
/// corresponding view.
pub fn present<A, B>(report: &Report, webgl2_view: &A, webgpu_view: &B)
where
    A: SupportView + ?Sized,
    B: SupportView + ?Sized,
{
    show(webgl2_view, report.webgl2.is_supported());
    show(webgpu_view, report.webgpu.is_supported());
}

fn show<V>(view: &V, supported: bool)
where
    V: SupportView + ?Sized,
{
    if supported {
        view.show_supported();
    } else {
        view.show_unsupported();
    }
}
