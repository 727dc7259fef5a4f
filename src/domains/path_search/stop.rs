use std::time::{Duration, Instant};

/// Checked before every iteration; returning true cancels the search.
pub trait StopCondition {
    fn should_stop(&mut self, iteration: usize) -> bool;
}

impl<S: StopCondition + ?Sized> StopCondition for &mut S {
    fn should_stop(&mut self, iteration: usize) -> bool {
        (**self).should_stop(iteration)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Never;

impl StopCondition for Never {
    fn should_stop(&mut self, _iteration: usize) -> bool {
        false
    }
}

/// Adapts a closure over the iteration index.
pub struct StopWhen<F>(pub F);

impl<F: FnMut(usize) -> bool> StopCondition for StopWhen<F> {
    fn should_stop(&mut self, iteration: usize) -> bool {
        (self.0)(iteration)
    }
}

/// Wall-clock budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self { at: Instant::now() + budget }
    }

    pub fn at(at: Instant) -> Self {
        Self { at }
    }
}

impl StopCondition for Deadline {
    fn should_stop(&mut self, _iteration: usize) -> bool {
        Instant::now() >= self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_see_the_iteration_index() {
        let mut stop = StopWhen(|iteration| iteration >= 2);
        assert!(!stop.should_stop(0));
        assert!(!stop.should_stop(1));
        assert!(stop.should_stop(2));
    }

    #[test]
    fn test_expired_deadline_stops_immediately() {
        let mut stop = Deadline::at(Instant::now());
        assert!(stop.should_stop(0));
        let mut later = Deadline::after(Duration::from_secs(3600));
        assert!(!later.should_stop(0));
        assert!(!Never.should_stop(100));
    }
}
