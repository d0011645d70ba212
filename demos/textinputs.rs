//! Text Inputs Demo: A small form with three inputs and a submit button.
//!
//! Demonstrates:
//! - Several `TextInput`s with one focused at a time
//! - Tab / Shift+Tab / Enter / arrows to move focus
//! - One shared blink timer driving every caret
//!
//! Set `FLYWHEEL_LOG=<path>` to write debug logs to a file.

use flywheel_widgets::{
    Command, Component, Engine, Event, KeyCode, Modifiers, Rgb, Style, TextInput, TextInputStyle,
};
use std::time::Duration;

const LABELS: [&str; 3] = ["Name", "Nickname", "Email"];

const ACCENT: Rgb = Rgb::new(205, 94, 255);

/// What currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Field(usize),
    Submit,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Field(i) if i + 1 < LABELS.len() => Self::Field(i + 1),
            Self::Field(_) => Self::Submit,
            Self::Submit => Self::Field(0),
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Field(0) => Self::Submit,
            Self::Field(i) => Self::Field(i - 1),
            Self::Submit => Self::Field(LABELS.len() - 1),
        }
    }
}

struct Form {
    inputs: Vec<TextInput>,
    focus: Focus,
    submitted: bool,
}

impl Form {
    fn new() -> Self {
        let inputs = LABELS
            .iter()
            .map(|label| TextInput::new().with_prompt("> ").with_placeholder(*label))
            .collect();
        let mut form = Self {
            inputs,
            focus: Focus::Field(0),
            submitted: false,
        };
        form.apply_focus();
        form
    }

    fn apply_focus(&mut self) {
        let focused = TextInputStyle {
            prompt: Style::new().fg(ACCENT),
            text: Style::new().fg(ACCENT),
            ..TextInputStyle::default()
        };
        for (i, input) in self.inputs.iter_mut().enumerate() {
            if self.focus == Focus::Field(i) {
                input.focus();
                input.set_style(focused);
            } else {
                input.blur();
                input.set_style(TextInputStyle::default());
            }
        }
    }

    /// Returns the command to run, if any.
    fn handle(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Blink => {
                // Every input toggles, but only the first re-arms the timer
                let mut rearm = None;
                for (i, input) in std::mem::take(&mut self.inputs).into_iter().enumerate() {
                    let (input, cmd) = input.update(event);
                    if i == 0 {
                        rearm = cmd;
                    }
                    self.inputs.push(input);
                }
                rearm
            }
            Event::Key { code, modifiers } => {
                match code {
                    KeyCode::Tab if modifiers.shift => self.focus = self.focus.prev(),
                    KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
                    KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
                    KeyCode::Enter if self.focus == Focus::Submit => self.submitted = true,
                    KeyCode::Enter => self.focus = self.focus.next(),
                    _ => {
                        if let Focus::Field(i) = self.focus {
                            let input = self.inputs.remove(i);
                            let (input, cmd) = input.update(event);
                            self.inputs.insert(i, input);
                            return cmd;
                        }
                    }
                }
                self.apply_focus();
                None
            }
            _ => None,
        }
    }

    fn view(&self) -> String {
        let mut rows = vec![String::new()];
        rows.extend(self.inputs.iter().map(|input| input.view()));
        rows.push(String::new());

        let button = if self.focus == Focus::Submit {
            Style::new().fg(ACCENT).add_modifier(Modifiers::BOLD).paint("[ Submit ]")
        } else {
            String::from("[ Submit ]")
        };
        rows.push(button);
        rows.push(String::new());
        rows.push(String::from("tab/shift+tab: move focus • enter: next/submit • esc: quit"));
        rows.join("\n")
    }
}

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

fn main() -> std::io::Result<()> {
    init_logging();

    let mut form = Form::new();
    let values = {
        let mut engine = Engine::new()?;
        engine.execute(&form.inputs[0].blink_command())?;
        engine.draw(&form.view())?;

        while engine.is_running() && !form.submitted {
            let Some(event) = engine.wait_event(Duration::from_millis(100)) else {
                continue;
            };

            match &event {
                Event::Key { code: KeyCode::Esc, .. } | Event::Shutdown => engine.stop(),
                Event::Key { code: KeyCode::Char('c'), modifiers } if modifiers.control => engine.stop(),
                Event::Resize { width, height } => engine.handle_resize(*width, *height),
                _ => {
                    if let Some(cmd) = form.handle(&event) {
                        engine.execute(&cmd)?;
                    }
                }
            }

            engine.draw(&form.view())?;
        }

        form.inputs.iter().map(TextInput::value).collect::<Vec<_>>()
    };

    if form.submitted {
        for (label, value) in LABELS.iter().zip(values) {
            println!("{label}: {value}");
        }
    }
    Ok(())
}
