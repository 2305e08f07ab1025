//! Bounded retry combinator.

/// Run `op` up to `max_attempts` times, returning the first success or the
/// final failure.
pub fn retry<T, E>(max_attempts: u32, mut op: impl FnMut() -> Result<T, E>) -> Result<T, E> {
    debug_assert!(max_attempts > 0);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => return Err(err),
            Err(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_success() {
        let mut calls = 0;
        let result: Result<u32, ()> = retry(5, || {
            calls += 1;
            Ok(7)
        });
        assert_eq!(result, Ok(7));
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result: Result<(), &str> = retry(5, || {
            calls += 1;
            if calls < 3 {
                Err("not yet")
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Ok(()));
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausts_attempts_and_returns_final_error() {
        let mut calls = 0;
        let result: Result<(), &str> = retry(5, || {
            calls += 1;
            Err("still broken")
        });
        assert_eq!(result, Err("still broken"));
        assert_eq!(calls, 5);
    }
}
