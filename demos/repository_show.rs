//! Repository Show Demo
//!
//! Presents the repository detail scene in the alternate screen. A worker
//! thread plays presenter and interactor: it answers pin taps with a new
//! view state and dismiss taps with a router dismissal.
//!
//! Keys: `p` pin/unpin, `d` or `Esc` dismiss. Mouse clicks hit the buttons.
//! Logs go to `repository_show.log` (filter with `RUST_LOG`).
//!
//! Run with: cargo run --example repository_show

use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing_subscriber::EnvFilter;

use repo_show::layout::{truncate_text, Frame, Geometry, Size};
use repo_show::primitives::ButtonNode;
use repo_show::scene::{
    interactor_channel, InteractorInbox, RepositoryShowController, SceneMetrics, DISMISS_BUTTON,
    INFORMATION, PIN_BUTTON, PROFILE,
};
use repo_show::{Dismiss, Publisher, ViewState};

const REPOSITORY_ID: i64 = 42;

fn main() -> io::Result<()> {
    let log = File::create("repository_show.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let (sinks, inbox) = interactor_channel();
    let controller =
        RepositoryShowController::new(REPOSITORY_ID, SceneMetrics::compact(), Rc::new(sinks));
    controller.attach();

    let worker = spawn_business_logic(
        inbox,
        controller.state_publisher(),
        controller.router().dismiss_publisher(),
    );

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(&controller, &mut stdout);

    let _ = disable_raw_mode();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show);

    // Dropping the controller closes the command channels, which ends the worker.
    drop(controller);
    let _ = worker.join();
    result
}

/// Presenter + interactor stand-in.
fn spawn_business_logic(
    inbox: InteractorInbox,
    state: Publisher<ViewState>,
    dismiss: Publisher<Dismiss>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let snapshot = |pinned: bool| {
            ViewState::new(
                "RLabs-Inc/spark-tui",
                "Reactive terminal UI framework with fine-grained signals and flexbox layout.",
            )
            .with_profile_url("https://avatars.example/rlabs.png")
            .pinned(pinned)
        };

        let mut pinned = false;
        state.send(snapshot(pinned));

        loop {
            if let Ok(command) = inbox.dismiss.try_recv() {
                tracing::info!(repository_id = command.repository_id, "dismiss requested");
                dismiss.send(Dismiss {
                    scene: command.repository_id,
                });
            }
            match inbox.pin.recv_timeout(Duration::from_millis(20)) {
                Ok(command) => {
                    pinned = !pinned;
                    tracing::info!(repository_id = command.repository_id, pinned, "pin toggled");
                    state.send(snapshot(pinned));
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => return,
            }
        }
    })
}

fn run(controller: &Rc<RepositoryShowController>, stdout: &mut io::Stdout) -> io::Result<()> {
    while controller.is_presented() {
        if poll(Duration::from_millis(16))? {
            controller.handle_event(&read()?);
        }
        let delivered = controller.pump();

        let (width, height) = terminal::size()?;
        let bounds = Size::new(f32::from(width), f32::from(height));
        if let Some(geometry) = controller.layout_if_needed(bounds).map_err(io::Error::other)? {
            draw(controller, &geometry, stdout)?;
        } else if delivered > 0 {
            // Selection changes never relayout but still need a redraw.
            if let Some(geometry) = controller.geometry() {
                draw(controller, &geometry, stdout)?;
            }
        }
    }
    Ok(())
}

fn draw(
    controller: &RepositoryShowController,
    geometry: &Geometry,
    stdout: &mut io::Stdout,
) -> io::Result<()> {
    let nodes = controller.container().nodes();
    queue!(stdout, Clear(ClearType::All))?;

    if let Some(frame) = geometry.frame(PROFILE) {
        let glyph = nodes.profile.glyph_size();
        for row in 0..glyph.height as u16 {
            let line = "▒".repeat(glyph.width as usize);
            print_at(stdout, frame, 0, row, &line)?;
        }
        if let Some(badge) = nodes.profile.badge() {
            let badge = truncate_text(badge, frame.width as usize);
            print_at(stdout, frame, 0, glyph.height as u16, &badge)?;
        }
    }

    if let Some(frame) = geometry.frame(INFORMATION) {
        for (row, line) in nodes.information.render_lines(frame.width as usize).iter().enumerate() {
            if row as f32 >= frame.height {
                break;
            }
            print_at(stdout, frame, 0, row as u16, line)?;
        }
    }

    for (id, button) in [(PIN_BUTTON, &nodes.pin_button), (DISMISS_BUTTON, &nodes.dismiss_button)] {
        if let Some(frame) = geometry.frame(id) {
            draw_button(stdout, frame, button)?;
        }
    }

    stdout.flush()
}

fn draw_button(stdout: &mut io::Stdout, frame: Frame, button: &ButtonNode) -> io::Result<()> {
    let width = frame.width as usize;
    if width < 2 || frame.height < 2.0 {
        return print_at(stdout, frame, 0, 0, &button.label_within(width));
    }
    let inner = width - 2;
    let bottom = frame.height as u16 - 1;
    print_at(stdout, frame, 0, 0, &format!("┌{}┐", "─".repeat(inner)))?;
    for row in 1..bottom {
        print_at(stdout, frame, 0, row, &format!("│{:^inner$}│", "", inner = inner))?;
    }
    print_at(stdout, frame, 0, bottom, &format!("└{}┘", "─".repeat(inner)))?;
    let label = button.label_within(inner);
    print_at(stdout, frame, 1, bottom / 2, &format!("{:^inner$}", label, inner = inner))
}

fn print_at(stdout: &mut io::Stdout, frame: Frame, dx: u16, dy: u16, text: &str) -> io::Result<()> {
    queue!(
        stdout,
        MoveTo(frame.x as u16 + dx, frame.y as u16 + dy),
        Print(text)
    )
}
