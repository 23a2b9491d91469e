use std::env;
use std::io;
use std::process::ExitCode;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use vibe_shooter::assets::Assets;
use vibe_shooter::constants::TARGET_FPS;
use vibe_shooter::error::GameError;
use vibe_shooter::game::Game;
use vibe_shooter::rendering::{OutputTarget, ScreenBuffer};
use vibe_shooter::terminal_io::{FrameClock, InputSource, SimulatedInput};

const DEBUG_SEED: u64 = 7;

struct DebugOptions {
    width: u16,
    height: u16,
    max_frames: Option<u64>,
}

/// `--debug [width height [max_frames]]` runs headless with scripted input.
fn parse_debug_args(args: &[String]) -> Option<DebugOptions> {
    if args.get(1).map(String::as_str) != Some("--debug") {
        return None;
    }
    let mut options = DebugOptions { width: 80, height: 24, max_frames: Some(900) };
    if args.len() >= 4 {
        options.width = args[2].parse::<u16>().unwrap_or(80);
        options.height = args[3].parse::<u16>().unwrap_or(24);
    }
    if let Some(frames) = args.get(4) {
        options.max_frames = frames.parse::<u64>().ok();
    }
    Some(options)
}

fn main() -> ExitCode {
    if let Err(e) = simple_logging::log_to_file("vibe-shooter.log", log::LevelFilter::Info) {
        eprintln!("Could not open log file: {}", e);
    }
    info!("Starting vibe-shooter.");

    let assets = match Assets::load(&Assets::default_dir()) {
        Ok(assets) => assets,
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("vibe-shooter: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = env::args().collect();
    let result = match parse_debug_args(&args) {
        Some(options) => run_headless(&assets, options),
        None => run_terminal(&assets),
    };

    match result {
        Ok(()) => {
            info!("Exiting application.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("vibe-shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_headless(assets: &Assets, options: DebugOptions) -> Result<(), GameError> {
    info!("Debug mode enabled at {}x{}, frame limit {:?}", options.width, options.height, options.max_frames);
    let mut game = Game::new(
        options.width,
        options.height,
        OutputTarget::ScreenBuffer(ScreenBuffer::new(options.width, options.height)),
        InputSource::Simulated(SimulatedInput::demo_script()),
        FrameClock::fixed(1.0 / TARGET_FPS as f64),
        options.max_frames,
        Some(DEBUG_SEED),
    );
    game.run(assets)?;
    Ok(())
}

fn run_terminal(assets: &Assets) -> Result<(), GameError> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let (terminal_width, terminal_height) = match size() {
        Ok(dimensions) => dimensions,
        Err(e) => {
            error!("Failed to get terminal size: {}", e);
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    let setup = prepare_terminal(&mut stdout_target);
    let keyboard_enhanced = stdout_target
        .execute_other_command(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    let mut game = Game::new(
        terminal_width,
        terminal_height,
        stdout_target,
        InputSource::Terminal,
        FrameClock::realtime(),
        None,
        None,
    );
    let result = match setup {
        Ok(()) => game.run(assets).map(|_| ()),
        Err(e) => Err(e.into()),
    };

    // Always restore the terminal, whatever ended the session.
    if keyboard_enhanced {
        let _ = game.stdout_target.execute_other_command(PopKeyboardEnhancementFlags);
    }
    let _ = game.stdout_target.execute_other_command(DisableMouseCapture);
    let _ = game.stdout_target.execute_other_command(Show);
    let _ = game.stdout_target.execute_other_command(LeaveAlternateScreen);
    if let Err(e) = disable_raw_mode() {
        error!("Failed to disable raw mode on exit: {}", e);
    }
    result
}

fn prepare_terminal(stdout_target: &mut OutputTarget) -> io::Result<()> {
    stdout_target.execute_other_command(EnterAlternateScreen)?;
    stdout_target.execute_other_command(Hide)?;
    stdout_target.execute_other_command(EnableMouseCapture)?;
    info!("Terminal prepared: alternate screen, hidden cursor, mouse capture.");
    Ok(())
}
