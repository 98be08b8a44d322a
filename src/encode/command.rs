use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::foundation::core::FrameRange;
use crate::foundation::error::{SlateError, SlateResult};
use crate::graph::builder::FilterGraphBuilder;
use crate::graph::escape::shell_quote;
use crate::shot::extract::InputKind;
use crate::shot::metadata::ShotMetadata;

/// Video encoder used for every slate (ProRes).
pub const VIDEO_CODEC: &str = "prores_ks";

/// Executable plus argument list; never passed through a shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlateCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl SlateCommand {
    /// Wrap an executable and its arguments.
    pub fn new(
        program: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Executable to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments, without the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value following `flag`, if the flag is present.
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Copy-pasteable POSIX shell rendering, for logs and display.
    pub fn to_shell_string(&self) -> String {
        std::iter::once(shell_quote(&self.program.to_string_lossy()))
            .chain(self.args.iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn to_process(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl std::fmt::Display for SlateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Builds the ffmpeg invocation for a render.
#[derive(Clone, Debug)]
pub struct CommandAssembler {
    ffmpeg: PathBuf,
}

impl CommandAssembler {
    /// Use `ffmpeg` as the encoder executable.
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    /// Assemble the full command; nothing is spawned.
    pub fn assemble(
        &self,
        config: &RenderConfig,
        kind: InputKind,
        range: FrameRange,
        metadata: &ShotMetadata,
    ) -> SlateResult<SlateCommand> {
        let output = config.output_path()?;
        config.validate()?;

        let input = utf8(&config.input_path, "input path", SlateError::InvalidPath)?;
        let output = utf8(&output, "output path", SlateError::MissingOutputPath)?;
        let font = utf8(&config.font_path, "font path", SlateError::Validation)?;

        let graph = FilterGraphBuilder::new(config.layout()?, font, range.first)
            .build(&config.slot_assignment, metadata);

        let mut args: Vec<String> = Vec::new();
        if kind == InputKind::Sequence {
            args.extend([
                "-framerate".to_string(),
                config.framerate.to_string(),
                "-start_number".to_string(),
                range.first.to_string(),
            ]);
        }
        args.extend([
            "-i".to_string(),
            input.to_string(),
            "-vf".to_string(),
            graph.render(),
            "-c:v".to_string(),
            VIDEO_CODEC.to_string(),
            output.to_string(),
            "-y".to_string(),
        ]);

        let cmd = SlateCommand::new(&self.ffmpeg, args);
        tracing::debug!(command = %cmd, "assembled ffmpeg command");
        Ok(cmd)
    }
}

impl Default for CommandAssembler {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

fn utf8<'a>(
    path: &'a Path,
    what: &str,
    err: fn(String) -> SlateError,
) -> SlateResult<&'a str> {
    path.to_str()
        .ok_or_else(|| err(format!("{what} '{}' is not valid UTF-8", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/command.rs"]
mod tests;
