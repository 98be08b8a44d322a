use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use ffslate::{
    EncoderTools, OutputExtension, RenderConfig, RenderEvent, RenderOutcome, SlateError,
    SlateSession, SlotAssignment,
};

#[derive(Parser, Debug)]
#[command(name = "ffslate", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata and frame range extracted from an input path.
    Inspect(InspectArgs),
    /// Print the ffmpeg command line without running it.
    Command(RenderArgs),
    /// Render the slate (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ToolArgs {
    /// ffmpeg executable.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// ffprobe executable, used to count frames of .mov inputs.
    #[arg(long, default_value = "ffprobe")]
    ffprobe: PathBuf,
}

impl ToolArgs {
    fn tools(&self) -> EncoderTools {
        EncoderTools {
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
        }
    }
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// One frame of an image sequence, or a .mov file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    tools: ToolArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// One frame of an image sequence, or a .mov file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Font file for the slate text.
    #[arg(long)]
    font: PathBuf,

    /// Text size in pixels.
    #[arg(long, default_value_t = ffslate::config::DEFAULT_FONT_SIZE)]
    font_size: u32,

    /// Bar height as a fraction of frame height, in [0, 0.5).
    #[arg(long, default_value_t = ffslate::config::DEFAULT_PADDING)]
    padding: f64,

    /// Output container (mov or mp4).
    #[arg(long, default_value = "mov")]
    ext: OutputExtension,

    /// Output path without extension (default: `<input dir>/<base>_slate`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Input frame rate for image sequences.
    #[arg(long, default_value_t = ffslate::config::DEFAULT_FRAMERATE)]
    framerate: u32,

    /// Override one slot, e.g. `top_left=shot` or `bottom_right=none`. Repeatable.
    #[arg(long = "slot", value_name = "SLOT=FIELD")]
    slots: Vec<String>,

    /// Print events as JSON lines (render only).
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    tools: ToolArgs,
}

/// Exit status after Ctrl-C, following the shell's 128 + SIGINT convention.
const EXIT_CANCELLED: u8 = 130;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args).map(|()| ExitCode::SUCCESS),
        Command::Command(args) => cmd_command(args).map(|()| ExitCode::SUCCESS),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn open_session(path: &Path, tools: &ToolArgs) -> anyhow::Result<SlateSession> {
    SlateSession::open(path, &tools.tools())
        .with_context(|| format!("prepare input '{}'", path.display()))
}

fn build_config(session: &SlateSession, args: &RenderArgs) -> anyhow::Result<RenderConfig> {
    let mut slots = SlotAssignment::standard();
    for spec in &args.slots {
        slots
            .apply_spec(spec)
            .with_context(|| format!("parse --slot '{spec}'"))?;
    }

    let mut config = session
        .default_config(&args.font)
        .with_font_size(args.font_size)
        .with_padding(args.padding)
        .with_extension(args.ext)
        .with_framerate(args.framerate)
        .with_slots(slots);
    if let Some(out) = &args.out {
        config = config.with_output_stem(out);
    }
    Ok(config)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path, &args.tools)?;
    let input = session.input();

    if args.json {
        let json = serde_json::to_string_pretty(input).context("serialize input")?;
        println!("{json}");
        return Ok(());
    }

    println!("source:  {}", input.source_path.display());
    println!("input:   {}", input.encoder_input.display());
    println!("kind:    {:?}", input.kind);
    println!("frames:  {}", input.frame_range);
    println!("output:  {}", input.default_output_stem.display());
    for (field, value) in input.metadata.iter() {
        println!("  {:<16} {value}", field.name());
    }
    Ok(())
}

fn cmd_command(args: RenderArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path, &args.tools)?;
    let config = build_config(&session, &args)?;
    let command = session.command(&config).context("assemble ffmpeg command")?;
    println!("{}", command.to_shell_string());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<ExitCode> {
    let session = open_session(&args.in_path, &args.tools)?;
    let config = build_config(&session, &args)?;
    let out = config.output_path().context("resolve output path")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let outcome = runtime.block_on(run_render(&session, &config, args.json))?;

    match outcome {
        RenderOutcome::Completed => {
            eprintln!("wrote {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
        RenderOutcome::Abandoned => {
            eprintln!("render cancelled; '{}' may be incomplete", out.display());
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        RenderOutcome::Failed { detail } => Err(anyhow::Error::new(SlateError::render_failure(
            detail,
        ))
        .context(format!("render '{}'", out.display()))),
    }
}

async fn run_render(
    session: &SlateSession,
    config: &RenderConfig,
    json: bool,
) -> anyhow::Result<RenderOutcome> {
    // One listener for the whole render; polled first so it is armed before any output.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut handle = session.render(config).context("start render")?;

    loop {
        tokio::select! {
            biased;
            signal = &mut ctrl_c => {
                signal.context("listen for Ctrl-C")?;
                eprintln!("cancelling render");
                handle.cancel();
                break;
            }
            event = handle.next_event() => match event {
                Some(event) => {
                    print_event(&event, json)?;
                    if event.is_terminal() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    Ok(handle.wait().await?)
}

fn print_event(event: &RenderEvent, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event).context("serialize event")?);
        return Ok(());
    }
    match event {
        RenderEvent::Progress { percent } => eprintln!("progress {percent:>3}%"),
        RenderEvent::Completed => eprintln!("completed"),
        RenderEvent::Failed { detail } => eprintln!("failed: {detail}"),
    }
    Ok(())
}
