//! Serialized, line-at-a-time report output.
//!
//! Both drivers print through one process-wide [`Console`]. Every call holds
//! the lock for exactly one line, so lines from concurrent sessions never
//! interleave, while their relative order stays unspecified.

use crate::pipeline::ExecutionMode;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::LazyLock;

static STDOUT: LazyLock<Console<io::Stdout>> = LazyLock::new(|| Console::new(io::stdout()));

/// The process-wide stdout console.
pub fn stdout() -> &'static Console<io::Stdout> {
    &STDOUT
}

/// Receives the report lines of a session.
pub trait Reporter: Send + Sync {
    fn report(&self, mode: ExecutionMode, line: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, mode: ExecutionMode, line: &str) {
        (**self).report(mode, line)
    }
}

/// A writer guarded by a mutex.
#[derive(Debug)]
pub struct Console<W> {
    out: Mutex<W>,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Writes `[tag] text` as one line. Line breaks inside `text` become
    /// spaces.
    pub fn println(&self, tag: &str, text: &str) -> io::Result<()> {
        let line = format!("[{tag}] {}\n", fold_lines(text));
        let mut out = self.out.lock();
        out.write_all(line.as_bytes())?;
        out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> Reporter for Console<W> {
    fn report(&self, mode: ExecutionMode, line: &str) {
        if let Err(e) = self.println(mode.tag(), line) {
            tracing::warn!(%mode, error = %e, "failed to write report line");
        }
    }
}

fn fold_lines(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lines(console: Console<Vec<u8>>) -> Vec<String> {
        String::from_utf8(console.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_println_format() {
        let console = Console::new(Vec::new());
        console.println("sync", "Success").unwrap();
        console.report(ExecutionMode::Cooperative, "Hello, world!");
        assert_eq!(lines(console), ["[sync] Success", "[async] Hello, world!"]);
    }

    #[test]
    fn test_embedded_newlines_folded() {
        let console = Console::new(Vec::new());
        console.println("sync", "first\r\nsecond\nthird").unwrap();
        assert_eq!(lines(console), ["[sync] first second third"]);
    }

    #[test]
    fn test_concurrent_lines_not_interleaved() {
        let console = Arc::new(Console::new(Vec::new()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let console = Arc::clone(&console);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        console.println("t", &format!("{i}-{j}-{}", "x".repeat(64))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let console = Arc::try_unwrap(console).unwrap();
        let lines = lines(console);
        assert_eq!(lines.len(), 400);
        assert!(lines
            .iter()
            .all(|l| l.starts_with("[t] ") && l.ends_with(&"x".repeat(64))));
    }
}
