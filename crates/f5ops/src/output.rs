//! Stdout writers. Stdout carries exactly one document per invocation;
//! logs go to stderr.

use std::io::{self, Write};

/// Print an action's rendered body, newline-terminated.
pub fn print_body(body: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(body)?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}

/// Print plain text output (config commands).
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end());
}
