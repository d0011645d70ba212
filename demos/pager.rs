//! Pager Demo: Page through a file with the `Viewport` widget.
//!
//! ```text
//! cargo run --example pager -- <path> [--high-performance]
//! ```
//!
//! With `--high-performance` the content area is drawn through terminal
//! scroll regions instead of being repainted on every key.
//!
//! Set `FLYWHEEL_LOG=<path>` to write debug logs to a file.

use flywheel_widgets::{Component, ContentError, Engine, Event, KeyCode, Modifiers, Style, Viewport};
use std::fs::File;
use std::time::Duration;

/// Rows taken by the header and footer.
const CHROME_ROWS: u16 = 2;

fn init_logging() {
    let Ok(path) = std::env::var("FLYWHEEL_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// Header, content rows padded to the viewport height, then footer.
fn frame(title: &str, viewport: &Viewport) -> String {
    let header = Style::new().add_modifier(Modifiers::BOLD | Modifiers::REVERSED).paint(&format!(" {title} "));

    let mut rows = vec![header];
    let height = usize::from(viewport.height());
    let mut content: Vec<String> = viewport.view().split('\n').map(String::from).collect();
    content.resize(height, String::new());
    rows.extend(content);

    rows.push(format!(
        "{:>3.0}%  line {}/{}  (q to quit)",
        viewport.scroll_percent() * 100.0,
        viewport.offset() + 1,
        viewport.line_count()
    ));
    rows.join("\n")
}

fn main() -> std::io::Result<()> {
    init_logging();

    let mut path = None;
    let mut high_performance = false;
    for arg in std::env::args().skip(1) {
        if arg == "--high-performance" {
            high_performance = true;
        } else {
            path = Some(arg);
        }
    }
    let Some(path) = path else {
        eprintln!("usage: pager <path> [--high-performance]");
        std::process::exit(2);
    };

    let mut engine = Engine::new()?;
    let mut viewport = Viewport::new(engine.width(), engine.height().saturating_sub(CHROME_ROWS))
        .with_y_position(1)
        .with_high_performance(high_performance);

    let loaded = match File::open(&path) {
        Ok(file) => viewport.load(file),
        Err(err) => {
            let err = ContentError::Read(err.to_string());
            viewport.set_error(err.clone());
            Err(err)
        }
    };
    if loaded.is_ok() && viewport.is_high_performance() {
        engine.execute(&viewport.sync_command())?;
    }
    engine.draw(&frame(&path, &viewport))?;

    while engine.is_running() {
        let Some(event) = engine.wait_event(Duration::from_millis(100)) else {
            continue;
        };

        match &event {
            Event::Key { code: KeyCode::Char('q') | KeyCode::Esc, .. } | Event::Shutdown => {
                engine.stop();
                continue;
            }
            Event::Key { code: KeyCode::Char('c'), modifiers } if modifiers.control => {
                engine.stop();
                continue;
            }
            Event::Resize { width, height } => {
                engine.handle_resize(*width, *height);
                viewport.set_size(1, *width, height.saturating_sub(CHROME_ROWS));
                if viewport.is_high_performance() && viewport.error().is_none() {
                    engine.execute(&viewport.sync_command())?;
                }
            }
            _ => {
                let (next, cmd) = viewport.update(&event);
                viewport = next;
                if let Some(cmd) = cmd {
                    engine.execute(&cmd)?;
                }
            }
        }

        engine.draw(&frame(&path, &viewport))?;
    }

    Ok(())
}
