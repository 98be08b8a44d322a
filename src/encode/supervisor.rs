use std::collections::VecDeque;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt as _};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::encode::command::SlateCommand;
use crate::encode::events::{RenderEvent, RenderOutcome, RenderState};
use crate::encode::progress::{LineSplitter, OutputTail, ProgressTracker};
use crate::foundation::core::FrameRange;
use crate::foundation::error::{SlateError, SlateResult};

/// Output lines kept for the `Failed` event.
pub const DEFAULT_TAIL_LINES: usize = 20;

const READ_CHUNK: usize = 4096;

/// Runs at most one encoder process at a time and reports its progress.
///
/// Jobs run on the ambient tokio runtime; [`RenderSupervisor::start`] must be called from
/// within one.
#[derive(Debug)]
pub struct RenderSupervisor {
    state: Arc<watch::Sender<RenderState>>,
    tail_lines: usize,
}

impl Default for RenderSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSupervisor {
    /// Idle supervisor.
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(RenderState::Idle)),
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }

    /// Keep `lines` lines of output for failure reports.
    pub fn with_tail_lines(mut self, lines: usize) -> Self {
        self.tail_lines = lines;
        self
    }

    /// Current state.
    pub fn state(&self) -> RenderState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.state.subscribe()
    }

    /// Spawn `command` and supervise it over `range`.
    ///
    /// Fails with [`SlateError::RenderInProgress`] while a job is running, and with
    /// [`SlateError::Spawn`] (no events, state `Failed`) when the process cannot start.
    pub fn start(&self, command: SlateCommand, range: FrameRange) -> SlateResult<RenderHandle> {
        let mut busy = false;
        self.state.send_if_modified(|state| {
            if *state == RenderState::Running {
                busy = true;
                return false;
            }
            *state = RenderState::Running;
            true
        });
        if busy {
            return Err(SlateError::render_in_progress(
                "a render is already running; wait for it or cancel it first",
            ));
        }

        let (child, stdout, stderr) = match spawn_child(&command) {
            Ok(parts) => parts,
            Err(e) => {
                self.state.send_replace(RenderState::Failed);
                return Err(e);
            }
        };

        tracing::info!(
            program = %command.program().display(),
            range = %range,
            "render started"
        );

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let job = RenderJob {
            command,
            frame_range: range,
            child,
            output: MergedOutput::new(stdout, stderr),
            tracker: ProgressTracker::new(range),
            tail: OutputTail::new(self.tail_lines),
            events: events_tx,
        };
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let outcome = job.supervise(cancel_rx).await;
            state.send_replace(outcome.state());
            outcome
        });

        Ok(RenderHandle {
            events: events_rx,
            cancel: Some(cancel_tx),
            task,
        })
    }
}

fn spawn_child(command: &SlateCommand) -> SlateResult<(Child, ChildStdout, ChildStderr)> {
    let mut cmd = command.to_process();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| {
        SlateError::spawn(format!(
            "failed to spawn '{}' (is it installed and on PATH?): {e}",
            command.program().display()
        ))
    })?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SlateError::spawn("failed to open encoder stdout (unexpected)"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| SlateError::spawn("failed to open encoder stderr (unexpected)"))?;
    Ok((child, stdout, stderr))
}

/// Presentation-side end of a running job.
///
/// Dropping the handle cancels the job.
#[derive(Debug)]
pub struct RenderHandle {
    events: mpsc::UnboundedReceiver<RenderEvent>,
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<RenderOutcome>,
}

impl RenderHandle {
    /// Next published event; `None` once the job has ended and all events were read.
    pub async fn next_event(&mut self) -> Option<RenderEvent> {
        self.events.recv().await
    }

    /// Ask the supervision task to kill the encoder.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Feed every event to `on_event` until the terminal one, then wait for the job.
    pub async fn observe(
        mut self,
        mut on_event: impl FnMut(&RenderEvent),
    ) -> SlateResult<RenderOutcome> {
        while let Some(event) = self.next_event().await {
            on_event(&event);
            if event.is_terminal() {
                break;
            }
        }
        self.wait().await
    }

    /// Wait for the supervision task to finish.
    pub async fn wait(self) -> SlateResult<RenderOutcome> {
        let RenderHandle {
            events,
            cancel,
            task,
        } = self;
        // Held so the job is not treated as abandoned while we wait.
        let _cancel = cancel;
        let _events = events;
        task.await
            .map_err(|e| SlateError::Other(anyhow::anyhow!("render supervision task failed: {e}")))
    }
}

/// One in-flight encoder process. Owns the child and its output streams exclusively.
struct RenderJob {
    command: SlateCommand,
    frame_range: FrameRange,
    child: Child,
    output: MergedOutput,
    tracker: ProgressTracker,
    tail: OutputTail,
    events: mpsc::UnboundedSender<RenderEvent>,
}

impl RenderJob {
    async fn supervise(mut self, mut cancel: oneshot::Receiver<()>) -> RenderOutcome {
        loop {
            tokio::select! {
                biased;
                _ = &mut cancel => return self.abandon().await,
                line = self.output.next_line() => match line {
                    Ok(Some(line)) => self.on_line(&line),
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read encoder output");
                        self.tail.push(&format!("<output read error: {e}>"));
                        break;
                    }
                },
            }
        }

        let status = tokio::select! {
            biased;
            _ = &mut cancel => return self.abandon().await,
            status = self.child.wait() => status,
        };
        self.finish(status)
    }

    fn on_line(&mut self, line: &str) {
        self.tail.push(line);
        if let Some(percent) = self.tracker.observe_line(line) {
            self.publish(RenderEvent::Progress { percent });
        }
    }

    fn finish(&mut self, status: std::io::Result<ExitStatus>) -> RenderOutcome {
        match status {
            Ok(status) if status.success() => {
                if self.tracker.finish() {
                    self.publish(RenderEvent::Progress { percent: 100 });
                }
                self.publish(RenderEvent::Completed);
                tracing::info!(range = %self.frame_range, "render completed");
                RenderOutcome::Completed
            }
            Ok(status) => self.fail(format!(
                "'{}' exited with {status}",
                self.command.program().display()
            )),
            Err(e) => self.fail(format!("failed to wait for encoder: {e}")),
        }
    }

    fn fail(&mut self, reason: String) -> RenderOutcome {
        let tail = self.tail.joined();
        let detail = if tail.is_empty() {
            reason
        } else {
            format!("{reason}\n{tail}")
        };
        tracing::warn!(%detail, "render failed");
        self.publish(RenderEvent::Failed {
            detail: detail.clone(),
        });
        RenderOutcome::Failed { detail }
    }

    async fn abandon(mut self) -> RenderOutcome {
        if let Err(e) = self.child.start_kill() {
            tracing::warn!(error = %e, "failed to kill encoder");
        }
        if let Err(e) = self.child.wait().await {
            tracing::warn!(error = %e, "failed to reap encoder");
        }
        tracing::info!(
            last_percent = ?self.tracker.last(),
            "render abandoned"
        );
        RenderOutcome::Abandoned
    }

    fn publish(&self, event: RenderEvent) {
        // A closed receiver means nobody is watching; the job still runs to its end.
        let _ = self.events.send(event);
    }
}

/// stdout and stderr of the child read as one line stream.
struct MergedOutput {
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    stdout_lines: LineSplitter,
    stderr_lines: LineSplitter,
    ready: VecDeque<String>,
}

enum Source {
    Stdout,
    Stderr,
}

impl MergedOutput {
    fn new(stdout: ChildStdout, stderr: ChildStderr) -> Self {
        Self {
            stdout: Some(stdout),
            stderr: Some(stderr),
            stdout_lines: LineSplitter::default(),
            stderr_lines: LineSplitter::default(),
            ready: VecDeque::new(),
        }
    }

    /// Next complete line from either stream; `None` when both are closed.
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut out_buf = [0u8; READ_CHUNK];
        let mut err_buf = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Ok(Some(line));
            }

            let (source, read) = tokio::select! {
                Some(read) = read_some(&mut self.stdout, &mut out_buf) => (Source::Stdout, read),
                Some(read) = read_some(&mut self.stderr, &mut err_buf) => (Source::Stderr, read),
                else => return Ok(None),
            };
            let n = read?;

            match (source, n) {
                (Source::Stdout, 0) => {
                    self.stdout = None;
                    self.ready.extend(self.stdout_lines.finish());
                }
                (Source::Stdout, n) => self.ready.extend(self.stdout_lines.push(&out_buf[..n])),
                (Source::Stderr, 0) => {
                    self.stderr = None;
                    self.ready.extend(self.stderr_lines.finish());
                }
                (Source::Stderr, n) => self.ready.extend(self.stderr_lines.push(&err_buf[..n])),
            }
        }
    }
}

/// Read from `reader` if it is still open; `None` disables the select branch.
async fn read_some<R: AsyncRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut [u8],
) -> Option<std::io::Result<usize>> {
    match reader.as_mut() {
        Some(r) => Some(r.read(buf).await),
        None => None,
    }
}
