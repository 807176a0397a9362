use std::io;
use std::io::Stdout;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use octant_field::app::Field;
use octant_field::camera::Camera;
use octant_field::camera::DOTS_X;
use octant_field::camera::DOTS_Y;
use octant_field::events::AppEvent;
use octant_field::events::CameraEvent;
use octant_field::events::Event;
use octant_field::events::FieldEvent;
use octant_field::io::convert_event;
use octant_field::render::draw_tower;
use octant_field::session::FileSession;
use octant_field::session::MemorySession;
use octant_field::session::SessionStore;
use octant_field::svg::Scene;
use octant_field::tower::Tower;

const FRAMERATE: u64 = 60;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE);

/// Terminal characters panned per key press
const PAN_CHARS: i64 = 4;

const SESSION_FILE: &str = "octant-field-session.json";

/// Builds the octant tower of a grid of cells and draws it.
#[derive(Parser, Debug)]
#[command(name = "octant-field")]
struct Args {
    /// Width of the field, a whole number in 1..=256
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    width: Option<String>,

    /// Height of the field, a whole number in 1..=256
    #[arg(short = 'y', long, allow_hyphen_values = true)]
    height: Option<String>,

    /// Session file holding the last applied dimensions
    #[arg(long)]
    session: Option<PathBuf>,

    /// Don't read or write any session file
    #[arg(long, conflicts_with = "session")]
    no_session: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal view (the default)
    Ui,

    /// Write the field as an SVG document
    Svg {
        /// Output file, stdout if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        steps: Steps,
    },

    /// Print the size of every level
    Summary {
        #[command(flatten)]
        steps: Steps,
    },
}

#[derive(clap::Args, Debug)]
struct Steps {
    /// Extra levels to build on top of the applied field
    #[arg(long, default_value_t = 0)]
    steps: usize,

    /// Build every level up to the 1x1 one
    #[arg(long, conflicts_with = "steps")]
    full: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.no_session {
        return run(args, MemorySession::new());
    }

    let path = args
        .session
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(SESSION_FILE));
    let store = FileSession::open(&path)
        .with_context(|| format!("Failed to open session {}", path.display()))?;

    run(args, store)
}

fn run<S: SessionStore>(args: Args, store: S) -> anyhow::Result<()> {
    let mut field = match (&args.width, &args.height) {
        (Some(x), Some(y)) => {
            let mut field = Field::new(store);
            field.apply(x, y).context("Failed to apply dimensions")?;
            field
        }
        (None, None) => Field::restore(store),
        _ => bail!("--width and --height must be given together"),
    };

    if field.tower().is_none() {
        bail!("No field to show yet, pass --width and --height");
    }

    match args.command.unwrap_or(Command::Ui) {
        Command::Ui => ui(&mut field),
        Command::Svg { out, steps } => {
            let scene = Scene::from_tower(stepped(&mut field, &steps)?);
            let svg = scene.to_svg();

            match out {
                Some(path) => std::fs::write(&path, svg)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{svg}"),
            }

            Ok(())
        }
        Command::Summary { steps } => {
            let tower = stepped(&mut field, &steps)?;
            print!("{}", summary(tower));

            Ok(())
        }
    }
}

/// Run the requested number of next steps and hand back the resulting tower.
fn stepped<'a, S: SessionStore>(
    field: &'a mut Field<S>,
    steps: &Steps,
) -> anyhow::Result<&'a Tower> {
    if steps.full {
        while field.next_step().is_some() {}
    } else {
        for _ in 0..steps.steps {
            if field.next_step().is_none() {
                info!("tower complete, skipping remaining steps");
                break;
            }
        }
    }

    field.tower().context("Field has no tower")
}

fn summary(tower: &Tower) -> String {
    let mut out = format!("field {}\n", tower.dimensions());

    for (index, level) in tower.levels().iter().enumerate() {
        let partial = level
            .items
            .iter()
            .filter(|n| index > 0 && n.children.len() < 4)
            .count();

        out.push_str(&format!(
            "level {index}: {}x{}, {} nodes, {partial} partial\n",
            level.width,
            level.height,
            level.len()
        ));
    }

    if tower.is_complete() {
        out.push_str("complete\n");
    }

    out
}

fn ui<S: SessionStore>(field: &mut Field<S>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, cursor::Hide)?;

    let res = ui_loop(field, &mut stdout);

    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()?;

    res
}

fn ui_loop<S: SessionStore>(field: &mut Field<S>, stdout: &mut Stdout) -> anyhow::Result<()> {
    // the last row holds the status line
    let view_rows = |rows: u16| rows.saturating_sub(1).max(1);

    let (cols, rows) = terminal::size()?;
    let mut cam = Camera::new(cols, view_rows(rows));
    let mut shown = field.tower().map_or(0, Tower::top_index);

    loop {
        let t = Instant::now();

        let event = if event::poll(FRAMETIME)? {
            convert_event(event::read()?)
        } else {
            None
        };

        let top = field.tower().map_or(0, Tower::top_index);

        match event {
            None => {}
            Some(Event::AppEvent(AppEvent::Exit)) => break,
            Some(Event::AppEvent(AppEvent::LevelUp)) => shown = (shown + 1).min(top),
            Some(Event::AppEvent(AppEvent::LevelDown)) => shown = shown.saturating_sub(1),
            Some(Event::FieldEvent(FieldEvent::NextStep)) => {
                if let Some(index) = field.next_step() {
                    shown = index;
                }
            }
            Some(Event::AppEvent(AppEvent::CameraEvent(ev))) => match ev {
                CameraEvent::Move { dx, dy } => {
                    cam.offset_x(dx as i64 * PAN_CHARS * DOTS_X as i64);
                    cam.offset_y(dy as i64 * PAN_CHARS * DOTS_Y as i64);
                }
                CameraEvent::Resize { cols, rows } => cam.resize(cols, view_rows(rows)),
                CameraEvent::ResetView => cam.reset_view(),
            },
        }

        cam.reset();

        let status = match field.tower() {
            Some(tower) => {
                draw_tower(&mut cam, tower, shown);

                let level = tower.level(shown).map_or((0, 0), |l| (l.width, l.height));
                format!(
                    "{} | level {shown}/{} ({}x{}){} | n: next step  [ ]: level  hjkl: move  q: quit",
                    tower.dimensions(),
                    tower.top_index(),
                    level.0,
                    level.1,
                    if tower.is_complete() { " complete" } else { "" },
                )
            }
            None => String::from("no field"),
        };

        let s = cam.render();

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in s.lines() {
            execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        execute!(stdout, style::Print(status))?;

        thread::sleep(FRAMETIME.saturating_sub(t.elapsed()));
    }

    Ok(())
}
