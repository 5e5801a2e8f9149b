use std::time::Instant;

/// Runs `f` and returns its result plus wall-clock seconds.
pub fn measure_seconds<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_closure_result() {
        let (out, seconds) = measure_seconds(|| 21 * 2);
        assert_eq!(out, 42);
        assert!(seconds >= 0.0);
    }
}
