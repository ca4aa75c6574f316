use std::io::Write;
use std::process::{Command, Stdio};

/// Formats generated source with `rustfmt`, falling back to the raw text
/// when `rustfmt` is unavailable or rejects the input.
pub fn rustfmt<S: AsRef<str>>(src: S) -> String {
    let src = src.as_ref();
    format_with_rustfmt(src).unwrap_or_else(|| src.to_string())
}

fn format_with_rustfmt(src: &str) -> Option<String> {
    let mut child = Command::new("rustfmt")
        .args(["--emit", "stdout", "--edition", "2024"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    child.stdin.take()?.write_all(src.as_bytes()).ok()?;
    let output = child.wait_with_output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
