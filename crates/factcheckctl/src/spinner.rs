//! Terminal spinner shown while a check is in flight.
//! Draws on stderr so stdout stays clean for piping and --json.

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Braille spinner frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner update interval (ms)
const SPINNER_INTERVAL_MS: u64 = 120;

pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
    start_time: Instant,
    width: usize,
}

impl Spinner {
    /// Start a spinner with message. Silent when stderr is not a terminal.
    pub fn new(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let width = message.chars().count() + 4;

        if !io::stderr().is_terminal() {
            return Self {
                running,
                handle: None,
                start_time: Instant::now(),
                width: 0,
            };
        }

        let running_clone = running.clone();
        let message = message.to_string();
        let handle = std::thread::spawn(move || {
            let mut frame = 0;
            while running_clone.load(Ordering::Relaxed) {
                eprint!("\r{} {}", SPINNER_FRAMES[frame].bright_yellow(), message.dimmed());
                let _ = io::stderr().flush();
                frame = (frame + 1) % SPINNER_FRAMES.len();
                std::thread::sleep(Duration::from_millis(SPINNER_INTERVAL_MS));
            }
        });

        Self {
            running,
            handle: Some(handle),
            start_time: Instant::now(),
            width,
        }
    }

    /// Stop spinner, clear its line, and return elapsed time
    pub fn stop(mut self) -> Duration {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            eprint!("\r{}\r", " ".repeat(self.width));
            let _ = io::stderr().flush();
        }
        self.start_time.elapsed()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
