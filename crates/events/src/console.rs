//! Console alert output with a blinking banner.
//!
//! [`ConsoleAlertSink`] writes the failure summary and banner synchronously
//! and then
//! plays the `* ` / ` *` blink on a background thread, so the evaluator
//! is never held up by the animation.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use vitalwatch_core::{AlertSink, VitalVerdict};

/// Banner printed at the top of every alert.
pub const ALERT_BANNER: &str = "!!! CRITICAL ALERT !!!";

/// Default length of the blink animation.
const DEFAULT_BLINK_DURATION: Duration = Duration::from_secs(12);

/// Default time each animation frame stays on screen.
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_secs(1);

const FRAMES: [&str; 2] = ["\r* ", "\r *"];

/// Timing of the blink animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkConfig {
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl BlinkConfig {
    /// No animation at all; only the text summary is written.
    pub fn disabled() -> Self {
        Self {
            duration: Duration::ZERO,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Number of frames to draw. Always even: one cycle is `* ` then ` *`.
    pub fn frame_count(&self) -> u64 {
        if self.frame_interval.is_zero() {
            return 0;
        }
        let frames = self.duration.as_nanos() / self.frame_interval.as_nanos();
        let cycles = frames / 2;
        u64::try_from(cycles * 2).unwrap_or(u64::MAX)
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_BLINK_DURATION,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

/// Heading of the failure list written before the banner.
pub const SUMMARY_HEADING: &str = "Summary of critical issues:";

/// Render the text part of an alert: the list of failing vitals as
/// `"- <name>: <reason>"` lines, then the banner.
pub fn render_alert(failing: &[VitalVerdict]) -> String {
    let mut text = format!("\n{SUMMARY_HEADING}\n");
    for verdict in failing {
        text.push_str(&format!("- {}: {}\n", verdict.name, verdict.reason));
    }
    text.push_str(&format!("\n{ALERT_BANNER}\n"));
    text
}

/// [`AlertSink`] that writes to a terminal-like stream.
pub struct ConsoleAlertSink<W> {
    out: Arc<Mutex<W>>,
    blink: BlinkConfig,
    animations: Mutex<Vec<JoinHandle<()>>>,
}

impl ConsoleAlertSink<io::Stdout> {
    pub fn stdout(blink: BlinkConfig) -> Self {
        Self::new(io::stdout(), blink)
    }
}

impl<W: Write + Send + 'static> ConsoleAlertSink<W> {
    pub fn new(out: W, blink: BlinkConfig) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            blink,
            animations: Mutex::new(Vec::new()),
        }
    }

    /// Shared handle to the underlying writer.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.out)
    }

    /// Block until every animation started so far has finished.
    pub fn wait(&self) {
        let handles: Vec<_> = self.lock_animations().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                tracing::warn!("Alert animation thread panicked");
            }
        }
    }

    fn start_animation(&self) {
        let frames = self.blink.frame_count();
        if frames == 0 {
            return;
        }

        let out = Arc::clone(&self.out);
        let interval = self.blink.frame_interval;
        let spawned = thread::Builder::new()
            .name("alert-blink".into())
            .spawn(move || blink(&out, frames, interval));

        match spawned {
            Ok(handle) => {
                let mut animations = self.lock_animations();
                animations.retain(|h| !h.is_finished());
                animations.push(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Could not start alert animation"),
        }
    }

    fn lock_animations(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.animations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send + 'static> AlertSink for ConsoleAlertSink<W> {
    fn notify(&self, failing: &[VitalVerdict]) {
        let text = render_alert(failing);
        {
            let mut out = lock_writer(&self.out);
            if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
                tracing::warn!(error = %e, "Failed to write alert to console");
                return;
            }
        }
        self.start_animation();
    }
}

/// Draw `frames` frames, each after one `interval` of sleep, so whatever the
/// caller prints right after `notify` lands before the first frame.
fn blink<W: Write>(out: &Mutex<W>, frames: u64, interval: Duration) {
    for frame in 0..frames {
        thread::sleep(interval);
        let symbol = FRAMES[(frame % 2) as usize];
        let mut out = lock_writer(out);
        if out
            .write_all(symbol.as_bytes())
            .and_then(|()| out.flush())
            .is_err()
        {
            return;
        }
    }
    let mut out = lock_writer(out);
    let _ = out.write_all(b"\n\n").and_then(|()| out.flush());
}

fn lock_writer<W>(out: &Mutex<W>) -> MutexGuard<'_, W> {
    out.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use vitalwatch_core::{Reading, ThresholdRegistry, VitalsEvaluator};

    use super::*;

    fn written(sink: &ConsoleAlertSink<Vec<u8>>) -> String {
        let writer = sink.writer();
        let bytes = writer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn default_blink_is_twelve_frames() {
        assert_eq!(BlinkConfig::default().frame_count(), 12);
    }

    #[test]
    fn frame_count_rounds_down_to_whole_cycles() {
        let config = BlinkConfig::with_duration(Duration::from_secs(5));
        assert_eq!(config.frame_count(), 4);
        assert_eq!(BlinkConfig::disabled().frame_count(), 0);

        let zero_interval = BlinkConfig {
            duration: Duration::from_secs(3),
            frame_interval: Duration::ZERO,
        };
        assert_eq!(zero_interval.frame_count(), 0);
    }

    #[test]
    fn notify_writes_banner_and_each_failure() {
        let sink = ConsoleAlertSink::new(Vec::new(), BlinkConfig::disabled());
        let evaluator = VitalsEvaluator::new(&sink);

        evaluator.evaluate(
            &ThresholdRegistry::standard(),
            &[
                Reading::new("temperature", 94.0),
                Reading::new("pulseRate", 75.0),
                Reading::new("spo2", 85.0),
            ],
        );

        assert_eq!(
            written(&sink),
            format!(
                "\n{SUMMARY_HEADING}\n\
                 - temperature: (94°F) is too low (expected >= 95°F).\n\
                 - spo2: (85%) is too low (expected >= 90%).\n\
                 \n{ALERT_BANNER}\n"
            )
        );
    }

    #[test]
    fn passing_evaluation_writes_nothing() {
        let sink = ConsoleAlertSink::new(Vec::new(), BlinkConfig::disabled());
        VitalsEvaluator::new(&sink)
            .evaluate(&ThresholdRegistry::standard(), &[Reading::new("spo2", 99.0)]);
        assert!(written(&sink).is_empty());
    }

    #[test]
    fn animation_runs_in_background_and_can_be_awaited() {
        let blink = BlinkConfig {
            duration: Duration::from_millis(4),
            frame_interval: Duration::from_millis(1),
        };
        let sink = ConsoleAlertSink::new(Vec::new(), blink);
        sink.notify(&[]);
        sink.wait();

        let text = written(&sink);
        assert!(text.starts_with(&format!("\n{SUMMARY_HEADING}\n\n{ALERT_BANNER}\n")));
        assert_eq!(text.matches("\r* ").count(), 2);
        assert_eq!(text.matches("\r *").count(), 2);
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn notify_returns_before_animation_finishes() {
        let blink = BlinkConfig {
            duration: Duration::from_secs(2),
            frame_interval: Duration::from_millis(500),
        };
        let sink = ConsoleAlertSink::new(Vec::new(), blink);
        let evaluator = VitalsEvaluator::new(&sink);

        let started = Instant::now();
        let result = evaluator.evaluate(
            &ThresholdRegistry::standard(),
            &[Reading::new("pulseRate", 130.0)],
        );
        let returned_after = started.elapsed();

        assert!(!result.all_ok);
        assert!(
            returned_after < Duration::from_millis(400),
            "evaluate blocked for {returned_after:?}"
        );
        assert!(!written(&sink).contains('*'));

        sink.wait();
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(written(&sink).matches("\r* ").count(), 2);
    }
}
