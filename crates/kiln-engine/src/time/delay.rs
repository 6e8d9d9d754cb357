use std::time::Duration;

/// Blocks the calling thread for at least `seconds`.
///
/// Non-positive, NaN and infinite values return immediately.
pub fn delay(seconds: f64) {
    if !seconds.is_finite() || seconds <= 0.0 {
        return;
    }
    match Duration::try_from_secs_f64(seconds) {
        Ok(d) => std::thread::sleep(d),
        Err(e) => log::warn!("delay of {seconds}s ignored: {e}"),
    }
}
