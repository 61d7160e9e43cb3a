/// Trailing-edge debouncer driven by synthetic elapsed time.
///
/// Each `push` restarts the quiet period; `tick` yields the latest value once
/// the period has elapsed without another push.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debouncer<T: Copy> {
    delay_ms: f64,
    pending: Option<T>,
    elapsed_ms: f64,
}

impl<T: Copy> Debouncer<T> {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
            elapsed_ms: 0.0,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
        self.elapsed_ms = 0.0;
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.elapsed_ms = 0.0;
    }

    pub fn tick(&mut self, delta_ms: f64) -> Option<T> {
        self.pending?;
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        if self.elapsed_ms >= self.delay_ms {
            self.elapsed_ms = 0.0;
            return self.pending.take();
        }
        None
    }
}
