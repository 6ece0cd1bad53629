//! rvi: a small modal terminal text editor

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use editor_screen::{spawn_event_pump, ScreenEvent, TerminalSurface};
use editor_session::{FsEditorIo, Session, SessionControl};

#[derive(Parser)]
#[command(name = "rvi", version, about = "A small modal terminal text editor")]
struct Args {
    /// File to edit
    filename: String,

    /// Diagnostic log destination; the terminal itself is the UI
    #[arg(long, default_value = "/tmp/rvi.log")]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("rvi: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&args.log_file)?;
    let surface = TerminalSurface::new()?;
    let mut session = Session::new(surface, FsEditorIo, args.filename)?;

    let (events, _pump) = spawn_event_pump();
    while let Ok(event) = events.recv() {
        if let ScreenEvent::Resize(width, height) = event {
            session.surface_mut().set_dimensions(width, height);
        }
        if session.handle_event(event)? == SessionControl::Exit {
            break;
        }
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), std::io::Error> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
