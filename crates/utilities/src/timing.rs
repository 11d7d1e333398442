use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::info;
use log::warn;

/// Keeps track of named timers, such that the duration of the different phases
/// of a computation can be reported at the end.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f32)>>>,
}

/// A timer that measures the time between its creation and the call to
/// `finish()`. Finish should be called explicitly, dropping an unfinished
/// timer results in a warning and no measurement.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f32)>>>,
    registered: bool,
}

impl Timing {
    /// Creates a new timing object to track timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer with the given name.
    pub fn start(&self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the finished measurements, summed per name and sorted by name.
    pub fn results(&self) -> Vec<(String, f32)> {
        let mut totals: Vec<(String, f32)> = Vec::new();
        for (name, time) in self.results.borrow().iter() {
            match totals.iter_mut().find(|(existing, _)| existing == name) {
                Some((_, total)) => *total += *time,
                None => totals.push((name.clone(), *time)),
            }
        }

        totals.sort_by(|a, b| a.0.cmp(&b.0));
        totals
    }

    /// Prints all the finished timers to stderr.
    pub fn print(&self) {
        for (name, time) in self.results() {
            eprintln!("Time {name}: {time:.3}s");
        }
    }
}

impl Timer {
    /// Finishes the timer and registers the result.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        info!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time as f32));
        self.registered = true
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_results() {
        let timing = Timing::new();

        let mut first = timing.start("construct");
        first.finish();
        let mut second = timing.start("construct");
        second.finish();
        let mut third = timing.start("analyse");
        third.finish();

        let names: Vec<String> = timing.results().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["analyse".to_string(), "construct".to_string()]);
    }
}
