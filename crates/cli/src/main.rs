use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use logfold_decode::{Decoder, JsonDecoder, RegexDecoder, ZaplogDecoder};
use logfold_engine::{Config, Store};
use logfold_tui::{draw, Action, App};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::OpenOptions;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

const RENDER_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "logfold")]
#[command(about = "Live terminal table that folds near-duplicate log records", long_about = None)]
#[command(version)]
struct Cli {
    /// Ordered key fields used as table columns and for grouping
    /// (default: derived from the first record)
    keys: Vec<String>,

    /// Trend window duration in seconds
    #[arg(long, default_value_t = 10)]
    trend_secs: u64,

    /// Maximum edit distance for folding similar records into one row
    #[arg(long, default_value_t = 3)]
    distance: usize,

    /// Input format read from stdin
    #[arg(long, value_enum, default_value_t = Format::Zaplog)]
    format: Format,

    /// Line pattern with named capture groups (requires --format regex)
    #[arg(long)]
    regex: Option<String>,

    /// Process log destination; the terminal itself shows the table
    #[arg(long, default_value = "logfold.log")]
    log_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Stream of JSON objects
    Json,
    /// zap console lines: `<ts> <LEVEL> <file.go:line> [func] <msg> {fields}`
    Zaplog,
    /// Custom line pattern given with --regex
    Regex,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = Config {
        trend: Duration::from_secs(cli.trend_secs),
        distance: cli.distance,
        keys: cli.keys.clone(),
    };
    let store = Arc::new(Store::new(config).context("invalid configuration")?);
    let decoder = build_decoder(&cli)?;
    log::info!(
        "starting: format {:?}, distance {}, trend {:?}",
        cli.format,
        cli.distance,
        store.config().trend
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_ingest(decoder, store.clone(), shutdown_tx.clone());
    spawn_shift(store.clone(), shutdown_rx.clone());

    install_panic_hook();
    let mut terminal = setup_terminal().context("failed to initialize the terminal")?;
    let result = run_ui(&mut terminal, &store, shutdown_tx, shutdown_rx).await;
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("failed to open log file {}", cli.log_file.display()))?;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Pipe(Box::new(file))).init();
    Ok(())
}

fn build_decoder(cli: &Cli) -> Result<Box<dyn Decoder + Send>> {
    let input = BufReader::new(io::stdin());
    Ok(match cli.format {
        Format::Json => Box::new(JsonDecoder::new(input)),
        Format::Zaplog => Box::new(ZaplogDecoder::new(input)),
        Format::Regex => {
            let pattern = cli
                .regex
                .as_deref()
                .context("--format regex requires --regex <pattern>")?;
            Box::new(RegexDecoder::new(input, pattern).context("invalid --regex pattern")?)
        }
    })
}

/// Feed stdin through the decoder into the store.
///
/// Runs on a detached thread: reads block, and a reader stuck on an open
/// but idle stream must not hold up process exit. Clean end of stream
/// leaves the table interactive; a decode error tears the process down.
fn spawn_ingest(
    mut decoder: Box<dyn Decoder + Send>,
    store: Arc<Store>,
    shutdown: watch::Sender<bool>,
) {
    thread::spawn(move || {
        let mut records = 0u64;
        loop {
            match decoder.next_record() {
                Ok(Some(record)) => {
                    store.write().push(record);
                    records += 1;
                }
                Ok(None) => {
                    log::info!("input stream ended after {records} records; table stays interactive");
                    break;
                }
                Err(err) => {
                    log::error!("stopping after {records} records: {err}");
                    let _ = shutdown.send(true);
                    break;
                }
            }
        }
    });
}

/// Advance every trend window one bucket per shift interval.
fn spawn_shift(store: Arc<Store>, mut shutdown: watch::Receiver<bool>) {
    let every = store.config().shift_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender means the UI is gone.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    store.write().shift();
                }
            }
        }
    });
}

async fn run_ui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &Store,
    shutdown_tx: watch::Sender<bool>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(RENDER_INTERVAL);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupt received");
                break;
            }
            _ = tick.tick() => {
                let state = store.read();
                terminal.draw(|frame| draw(frame, &state, &mut app))?;
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let rows = store.read().len();
                        if app.on_event(&event, rows) == Action::Quit {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        log::error!("terminal event error: {err}");
                        break;
                    }
                    None => break,
                }
            }
        }
    }
    let _ = shutdown_tx.send(true);
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restore the terminal before the default panic report so the message is
/// readable outside the alternate screen.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
