//! Subprocess implementation of the ExternalTool port
//!
//! The child runs in its own process group so an interrupt or timeout can
//! take down everything it spawned (the synthesis tool forks node, docker, ...).
//! Output is forwarded line by line from reader threads while the main thread
//! polls for exit, cancellation and the deadline.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::domain::ports::{
    DeployEvent, DeployEventSink, ExternalTool, HandoffStep, OutputStream, ToolError, ToolExit,
    ToolInvocation,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TERMINATE_GRACE: Duration = Duration::from_secs(3);

pub struct ProcessTool {
    cancel: Arc<AtomicBool>,
}

impl ProcessTool {
    /// `cancel` is set by the Ctrl-C handler
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self { cancel }
    }

    fn spawn(&self, inv: &ToolInvocation) -> Result<Child, ToolError> {
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args)
            .current_dir(&inv.working_dir)
            .envs(inv.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        cmd.spawn().map_err(|source| ToolError::Spawn {
            program: inv.program.clone(),
            source,
        })
    }

    fn wait(&self, child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, ToolError> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(status) = child.wait_timeout(POLL_INTERVAL)? {
                return Ok(status);
            }
            if self.cancel.load(Ordering::SeqCst) {
                warn!("interrupt received; terminating tool process group");
                terminate(child);
                return Err(ToolError::Interrupted);
            }
            if let (Some(deadline), Some(timeout)) = (deadline, timeout) {
                if Instant::now() >= deadline {
                    warn!(?timeout, "tool timed out; terminating process group");
                    terminate(child);
                    return Err(ToolError::TimedOut(timeout));
                }
            }
        }
    }
}

impl ExternalTool for ProcessTool {
    fn run(
        &self,
        inv: &ToolInvocation,
        sink: &dyn DeployEventSink,
    ) -> Result<ToolExit, ToolError> {
        let command = inv.command_line();
        debug!(step = %inv.step, %command, dir = %inv.working_dir.display(), "starting tool");
        sink.on_event(DeployEvent::StepStarted {
            step: inv.step,
            command,
        });

        let mut child = self.spawn(inv)?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let status = std::thread::scope(|scope| {
            if let Some(out) = stdout {
                scope.spawn(move || forward_lines(out, inv.step, OutputStream::Stdout, sink));
            }
            if let Some(err) = stderr {
                scope.spawn(move || forward_lines(err, inv.step, OutputStream::Stderr, sink));
            }
            self.wait(&mut child, inv.timeout)
        })?;

        let code = exit_code(status);
        sink.on_event(DeployEvent::StepFinished {
            step: inv.step,
            code,
        });
        Ok(ToolExit { code })
    }
}

fn forward_lines<R: Read>(
    reader: R,
    step: HandoffStep,
    stream: OutputStream,
    sink: &dyn DeployEventSink,
) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                sink.on_event(DeployEvent::ToolOutput { step, stream, line });
            }
            Err(err) => {
                debug!("stopped reading tool output: {}", err);
                break;
            }
        }
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let group = Pid::from_raw(child.id() as i32);
    let _ = killpg(group, Signal::SIGTERM);
    match child.wait_timeout(TERMINATE_GRACE) {
        Ok(Some(_)) => {}
        _ => {
            let _ = killpg(group, Signal::SIGKILL);
            let _ = child.wait();
        }
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait_timeout(TERMINATE_GRACE);
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
