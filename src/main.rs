mod ui;

use clickmash::{
    app_dirs::AppDirs,
    best_score::{BestScoreStore, MemoryBestScoreStore, SqliteBestScoreStore},
    config::{Config, ConfigStore, FileConfigStore},
    presenter::Presenter,
    runtime::{spawn_terminal_input, ChannelEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
    session::{DifficultyChange, Session},
    sound::{Beeper, TerminalBell},
    timer::ThreadTickScheduler,
    ConfigError, DifficultyCatalog,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::mpsc::{self, Sender},
    time::{Duration, Instant},
};

/// Animation frame interval.
const FRAME_MS: u64 = 100;

/// retro click-speed minigame: mash as fast as you can before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Click (or hit space) as many times as you can before the countdown ends. Each round length has bronze, silver and gold targets, and your best score is kept between runs."
)]
pub struct Cli {
    /// round length in seconds (5, 10 or 30); defaults to the last one played
    #[clap(short = 'd', long)]
    duration: Option<u32>,

    /// play without sound cues
    #[clap(long)]
    mute: bool,

    /// database holding the best score; ":memory:" keeps it for this run only
    #[clap(long, value_name = "PATH")]
    best_score_db: Option<PathBuf>,
}

pub type GameSession =
    Session<ThreadTickScheduler, Box<dyn BestScoreStore>, Presenter<Box<dyn Beeper>>>;

pub struct App {
    pub session: GameSession,
    pub config: Config,
    config_store: Box<dyn ConfigStore>,
    last_frame: Instant,
}

impl App {
    pub fn new(
        cli: &Cli,
        tick_tx: Sender<GameEvent>,
        store: Box<dyn BestScoreStore>,
        config_store: Box<dyn ConfigStore>,
        beeper: Box<dyn Beeper>,
    ) -> Result<Self, ConfigError> {
        let catalog = DifficultyCatalog::standard();
        let config = config_store.load();

        let duration = match cli.duration {
            Some(d) => d,
            None => config.duration_in(&catalog),
        };
        let presenter = Presenter::new(beeper, config.sound && !cli.mute, store.load());
        let session = Session::new(
            catalog,
            duration,
            ThreadTickScheduler::new(tick_tx),
            store,
            presenter,
        )?;

        Ok(Self {
            session,
            config,
            config_store,
            last_frame: Instant::now(),
        })
    }

    /// Handle a key press. Returns true when the player asked to quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.click();
            }
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('m') => {
                self.config.sound = self.session.notifier_mut().toggle_sound();
                self.save_config();
            }
            KeyCode::Left => self.cycle_difficulty(-1),
            KeyCode::Right => self.cycle_difficulty(1),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                let picked = self.session.catalog().durations().nth(idx);
                if let Some(d) = picked {
                    self.select_difficulty(d);
                }
            }
            _ => {}
        }
        false
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            self.session.click();
        }
    }

    /// Step the confetti if a frame interval has passed since the last step.
    pub fn animate(&mut self) {
        if self.last_frame.elapsed() >= Duration::from_millis(FRAME_MS) {
            self.session.notifier_mut().celebration.update();
            self.last_frame = Instant::now();
        }
    }

    fn cycle_difficulty(&mut self, step: isize) {
        let next = self
            .session
            .catalog()
            .cycle(self.session.selected_duration(), step);
        self.select_difficulty(next);
    }

    fn select_difficulty(&mut self, duration: u32) {
        match self.session.select_difficulty(duration) {
            Ok(DifficultyChange::Applied) => {
                self.config.duration = duration;
                self.save_config();
            }
            Ok(DifficultyChange::Locked) => {}
            Err(e) => warn!("{e}"),
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config_store.save(&self.config) {
            warn!("failed to save config: {e}");
        }
    }
}

fn open_best_score_store(path: Option<&Path>) -> Box<dyn BestScoreStore> {
    let path = path.map(Path::to_path_buf).or_else(AppDirs::db_path);
    match path {
        Some(p) if p.as_os_str() == ":memory:" => Box::new(MemoryBestScoreStore::new()),
        Some(p) => match SqliteBestScoreStore::open(&p) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("best score database {} unavailable: {e}", p.display());
                Box::new(MemoryBestScoreStore::new())
            }
        },
        None => Box::new(MemoryBestScoreStore::new()),
    }
}

/// Log to a file in the state dir so output never lands on the game screen.
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

/// Reject a `--duration` the catalog does not know before touching the terminal.
fn check_duration(cli: &Cli, catalog: &DifficultyCatalog) -> Result<(), ConfigError> {
    match cli.duration {
        Some(d) => catalog.lookup(d).map(|_| ()),
        None => Ok(()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(e) = check_duration(&cli, &DifficultyCatalog::standard()) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let (tx, rx) = mpsc::channel();
    let mut app = match App::new(
        &cli,
        tx.clone(),
        open_best_score_store(cli.best_score_db.as_deref()),
        Box::new(FileConfigStore::new()),
        Box::new(TerminalBell),
    ) {
        Ok(app) => app,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e).exit();
        }
    };
    info!("starting with {}s rounds", app.session.selected_duration());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    spawn_terminal_input(tx);
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(FRAME_MS)),
    );
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let size = terminal.size().unwrap_or_default();
        app.session
            .notifier_mut()
            .set_viewport(size.width, size.height);
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
            GameEvent::Mouse(mouse) => app.on_mouse(mouse),
            GameEvent::Tick(id) => {
                app.session.on_tick(id);
            }
            GameEvent::Resize | GameEvent::Frame => {}
        }
        app.animate();
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
