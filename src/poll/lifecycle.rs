use std::time::Duration;

/// The whole lifecycle contract between a controller and its host.
///
/// Hosts translate their own activate/deactivate notifications into these
/// two calls. `stop` may be called without a prior `start`.
pub trait Lifecycle {
    fn start(&self, interval: Duration);

    fn stop(&self);
}

/// Starts a controller on creation and stops it on drop
pub struct Binding<'a, L: Lifecycle + ?Sized> {
    target: &'a L,
}

impl<'a, L: Lifecycle + ?Sized> Binding<'a, L> {
    #[must_use = "dropping the binding stops the controller immediately"]
    pub fn activate(target: &'a L, interval: Duration) -> Self {
        target.start(interval);
        Self { target }
    }
}

impl<L: Lifecycle + ?Sized> Drop for Binding<'_, L> {
    fn drop(&mut self) {
        self.target.stop();
    }
}
