use std::io::{self, Write};

use super::types::{BatchEvent, BatchReport, ScriptOutcome, ScriptOutput, ScriptReport};

#[derive(Debug, Clone, Copy)]
pub struct TextMarkers {
    pub start: &'static str,
    pub ok: &'static str,
    pub fail: &'static str,
    pub warn: &'static str,
}

impl TextMarkers {
    pub fn unicode() -> Self {
        Self {
            start: "▶",
            ok: "✓",
            fail: "✗",
            warn: "⚠",
        }
    }

    pub fn ascii() -> Self {
        Self {
            start: ">",
            ok: "[OK]",
            fail: "[FAIL]",
            warn: "[WARN]",
        }
    }
}

pub fn render_event<W: Write>(
    event: BatchEvent<'_>,
    markers: &TextMarkers,
    w: &mut W,
) -> io::Result<()> {
    match event {
        BatchEvent::Started { path } => {
            writeln!(w)?;
            writeln!(w, "{} Running {}...", markers.start, path.display())
        }
        BatchEvent::Finished(report) => render_report(report, markers, w),
    }
}

/// Stdout always, stderr only when the child wrote something.
pub fn render_report<W: Write>(
    report: &ScriptReport,
    markers: &TextMarkers,
    w: &mut W,
) -> io::Result<()> {
    let path = report.path.display();
    match &report.outcome {
        ScriptOutcome::Completed(output) => {
            writeln!(w, "{} Output of {}:", markers.ok, path)?;
            write_block(w, &output.stdout)?;
            if !output.stderr.is_empty() {
                writeln!(w, "{} Errors in {}:", markers.warn, path)?;
                write_block(w, &output.stderr)?;
            }
            if let Some(status) = abnormal_exit(output) {
                writeln!(w, "{} {} {}", markers.warn, path, status)?;
            }
            Ok(())
        }
        ScriptOutcome::Failed(err) => {
            writeln!(w, "{} Failed to run {}: {}", markers.fail, path, err)
        }
    }
}

pub fn render_summary<W: Write>(
    batch: &BatchReport,
    markers: &TextMarkers,
    w: &mut W,
) -> io::Result<()> {
    let marker = if batch.failed() == 0 {
        markers.ok
    } else {
        markers.fail
    };
    writeln!(w)?;
    writeln!(
        w,
        "{} {} script(s): {} completed, {} failed",
        marker,
        batch.total(),
        batch.completed(),
        batch.failed()
    )
}

fn write_block<W: Write>(w: &mut W, text: &str) -> io::Result<()> {
    w.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}

fn abnormal_exit(output: &ScriptOutput) -> Option<String> {
    match output.exit_code {
        Some(0) => None,
        Some(code) => Some(format!("exited with code {code}")),
        None => Some("was terminated by a signal".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn completed(stdout: &str, stderr: &str, exit_code: Option<i32>) -> ScriptReport {
        ScriptReport {
            path: PathBuf::from("a.py"),
            prompts: 1,
            outcome: ScriptOutcome::Completed(ScriptOutput {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                duration_ms: 3,
            }),
        }
    }

    fn render(report: &ScriptReport) -> String {
        let mut buf = Vec::new();
        render_report(report, &TextMarkers::ascii(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn stdout_only_when_stderr_empty() {
        assert_eq!(
            render(&completed("hi\n", "", Some(0))),
            "[OK] Output of a.py:\nhi\n"
        );
    }

    #[test]
    fn stderr_shown_when_present() {
        assert_eq!(
            render(&completed("", "oops", Some(0))),
            "[OK] Output of a.py:\n[WARN] Errors in a.py:\noops\n"
        );
    }

    #[test]
    fn non_zero_exit_is_noted() {
        let text = render(&completed("x\n", "", Some(3)));
        assert!(text.ends_with("[WARN] a.py exited with code 3\n"), "{text}");
    }

    #[test]
    fn failure_line_names_path_and_error() {
        let report = ScriptReport {
            path: PathBuf::from("gone.py"),
            prompts: 0,
            outcome: ScriptOutcome::Failed("cannot read gone.py: not found".into()),
        };
        assert_eq!(
            render(&report),
            "[FAIL] Failed to run gone.py: cannot read gone.py: not found\n"
        );
    }

    #[test]
    fn start_and_summary_lines() {
        let mut buf = Vec::new();
        let path = PathBuf::from("b.py");
        render_event(
            BatchEvent::Started { path: &path },
            &TextMarkers::unicode(),
            &mut buf,
        )
        .unwrap();
        let batch = BatchReport {
            scripts: vec![completed("", "", Some(0))],
        };
        render_summary(&batch, &TextMarkers::unicode(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\n▶ Running b.py...\n\n✓ 1 script(s): 1 completed, 0 failed\n"
        );
    }
}
