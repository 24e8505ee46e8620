//! Process-spawning adapters for the tool ports.

use std::{
    io::{self, Read},
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use super::{Compiler, GenerationOutput, Renderer, find_executable};
use crate::config::AppConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs the `umple` executable.
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: String,
    timeout: Option<Duration>,
}

impl ProcessCompiler {
    /// Create an adapter for `program` with an optional run timeout.
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Create an adapter from the `[tools]` and `[generation]` sections.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tools().compiler(), config.generation().timeout())
    }
}

impl Compiler for ProcessCompiler {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        find_executable(&self.program).is_some()
    }

    fn compile(&self, input: &Path, generator: &str, suboptions: &[String]) -> GenerationOutput {
        let mut command = Command::new(&self.program);
        command.arg(input).arg("-g").arg(generator);
        for opt in suboptions {
            command.arg("-s").arg(opt);
        }

        info!(program = self.program, generator; "Running model compiler");
        debug!(command:? = command; "Compiler command line");

        let child = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(err) => {
                return GenerationOutput::failure(format!("Failed to run {}: {err}", self.program));
            }
        };

        match wait_capturing(child, self.timeout) {
            Ok(captured) => {
                debug!(status:? = captured.status; "Model compiler exited");
                GenerationOutput::from_streams(
                    captured.status.success(),
                    &captured.stdout,
                    &captured.stderr,
                )
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                GenerationOutput::failure(format!("{} {err}", self.program))
            }
            Err(err) => GenerationOutput::failure(format!("Failed to run {}: {err}", self.program)),
        }
    }
}

/// Runs the Graphviz `dot` executable.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    program: String,
    timeout: Option<Duration>,
}

impl ProcessRenderer {
    /// Create an adapter for `program` with an optional run timeout.
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Create an adapter from the `[tools]` and `[generation]` sections.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tools().renderer(), config.generation().timeout())
    }
}

impl Renderer for ProcessRenderer {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        find_executable(&self.program).is_some()
    }

    fn render(&self, graph: &Path, image: &Path) -> bool {
        info!(program = self.program, graph:? = graph; "Rendering graph");

        let child = Command::new(&self.program)
            .arg("-Tsvg")
            .arg(graph)
            .arg("-o")
            .arg(image)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let status = match child.and_then(|child| wait_capturing(child, self.timeout)) {
            Ok(captured) => captured.status,
            Err(err) => {
                warn!(program = self.program, err:err; "Renderer did not complete");
                return false;
            }
        };

        if !status.success() {
            debug!(status:?; "Renderer exited unsuccessfully");
            return false;
        }

        image.is_file()
    }
}

/// Exit status and captured streams of a finished child.
struct Captured {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Wait for `child` to exit, draining any piped output.
///
/// With a timeout, the child is killed once the deadline passes and an
/// [`io::ErrorKind::TimedOut`] error is returned. The same deadline bounds
/// draining the pipes, which a detached grandchild may hold open. A timeout
/// too large to represent as an [`Instant`] is treated as no timeout.
fn wait_capturing(mut child: Child, timeout: Option<Duration>) -> io::Result<Captured> {
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
    let status = match (deadline, timeout) {
        (Some(deadline), Some(timeout)) => wait_until(&mut child, deadline, timeout)?,
        _ => child.wait()?,
    };

    Ok(Captured {
        status,
        stdout: join_reader(stdout, deadline),
        stderr: join_reader(stderr, deadline),
    })
}

fn wait_until(child: &mut Child, deadline: Instant, timeout: Duration) -> io::Result<ExitStatus> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            warn!(timeout:?; "External tool timed out, killing it");
            // The child may have exited between the poll and the kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {timeout:?}"),
            ));
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader(mut stream: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(err) = stream.read_to_end(&mut buf) {
            warn!(err:err; "Failed to read tool output");
        }
        buf
    })
}

/// Collect a reader's output, giving up at `deadline`.
///
/// An abandoned reader thread is detached and ends once the pipe closes.
fn join_reader(handle: Option<JoinHandle<Vec<u8>>>, deadline: Option<Instant>) -> Vec<u8> {
    let Some(handle) = handle else {
        return Vec::new();
    };

    if let Some(deadline) = deadline {
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                warn!("Tool output is still open after exit, not waiting for it");
                return Vec::new();
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    handle.join().unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use tempfile::tempdir;

    use super::*;

    fn write_script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_compiler_passes_arguments_in_order() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let script = write_script(temp_dir.path(), "umple", r#"echo "$@""#);

        let compiler = ProcessCompiler::new(script, None);
        assert!(compiler.is_available());

        let output = compiler.compile(
            Path::new("/m/model.ump"),
            "GvStateDiagram",
            &["hideactions".to_string(), "hideactions".to_string()],
        );

        assert!(output.success);
        assert_eq!(
            output.output,
            "/m/model.ump -g GvStateDiagram -s hideactions -s hideactions"
        );
    }

    #[test]
    fn test_compiler_failure_captures_both_streams() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let script = write_script(
            temp_dir.path(),
            "umple",
            "echo out; echo 'Error 1502' >&2; exit 4",
        );

        let output = ProcessCompiler::new(script, None).compile(
            Path::new("model.ump"),
            "GvClassDiagram",
            &[],
        );

        assert!(!output.success);
        assert_eq!(output.output, "out\nError 1502");
    }

    #[test]
    fn test_compiler_timeout_is_a_failure() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let script = write_script(temp_dir.path(), "umple", "sleep 5");

        let started = Instant::now();
        let output = ProcessCompiler::new(script, Some(Duration::from_millis(200))).compile(
            Path::new("model.ump"),
            "GvStateDiagram",
            &[],
        );

        assert!(!output.success);
        assert!(output.output.contains("timed out"), "{}", output.output);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_huge_timeout_behaves_as_unbounded() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let script = write_script(temp_dir.path(), "umple", "echo ok");

        let output = ProcessCompiler::new(script, Some(Duration::from_secs(u64::MAX))).compile(
            Path::new("model.ump"),
            "GvStateDiagram",
            &[],
        );

        assert!(output.success);
        assert_eq!(output.output, "ok");
    }

    #[test]
    fn test_background_child_holding_stdout_does_not_outlive_timeout() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let script = write_script(temp_dir.path(), "umple", "sleep 5 &\necho done");

        let started = Instant::now();
        let output = ProcessCompiler::new(script, Some(Duration::from_millis(500))).compile(
            Path::new("model.ump"),
            "GvStateDiagram",
            &[],
        );

        assert!(output.success);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_compiler_reports_spawn_failure() {
        let compiler = ProcessCompiler::new("/nonexistent/umple", None);
        assert!(!compiler.is_available());

        let output = compiler.compile(Path::new("model.ump"), "GvStateDiagram", &[]);
        assert!(!output.success);
        assert!(output.output.starts_with("Failed to run /nonexistent/umple"));
    }

    #[test]
    fn test_renderer_requires_output_file() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let graph = temp_dir.path().join("model.gv");
        let image = temp_dir.path().join("model.svg");
        fs::write(&graph, "digraph {}").unwrap();

        // Exits zero but writes nothing
        let lazy = write_script(temp_dir.path(), "lazy-dot", "exit 0");
        assert!(!ProcessRenderer::new(lazy, None).render(&graph, &image));

        // Writes the file named after -o
        let dot = write_script(temp_dir.path(), "dot", r#"echo '<svg/>' > "$4""#);
        assert!(ProcessRenderer::new(dot, None).render(&graph, &image));
        assert_eq!(fs::read_to_string(&image).unwrap(), "<svg/>\n");
    }

    #[test]
    fn test_renderer_nonzero_exit_is_failure() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let graph = temp_dir.path().join("model.gv");
        let image = temp_dir.path().join("model.svg");
        fs::write(&graph, "digraph {}").unwrap();

        let dot = write_script(temp_dir.path(), "dot", r#"touch "$4"; exit 1"#);
        assert!(!ProcessRenderer::new(dot, None).render(&graph, &image));
    }
}
