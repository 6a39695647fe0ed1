#![cfg(test)]

use std::io::{self, Write};

use super::{command, usage};

/// Stdout whose reader went away
struct Closed;

impl Write for Closed {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn usage_lists_flags() {
    let mut out = Vec::new();
    usage(&mut command(), &mut out).expect("usage");
    let text = String::from_utf8(out).expect("utf-8");
    assert!(text.contains("--recv"));
    assert!(text.contains("--write"));
}

#[test]
fn usage_write_failure_is_reported() {
    let err = usage(&mut command(), &mut Closed).expect_err("closed stdout");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
