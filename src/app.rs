//! The interactive raffle: a names form next to the wheel, driven by key presses and a frame clock.

use crate::{
    celebrate::WinnerOverlay,
    config::Config,
    draw::Rotation,
    render::{
        Canvas, Pollable, Rect, palette,
        terminal::{CanvasWriter, TerminalGuard},
    },
    scheduler::RevealTimer,
    session::{RevealTicket, Session, SessionError, SessionState},
    wheel::{SpinAnimation, Wheel},
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    io,
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthChar;

const TITLE: &str = "Raffle Winner Spinner";
const SUBTITLE: &str = "Enter names and spin the wheel to find a winner!";
const INPUT_LABEL: &str = "Participants (one per line)";
const PLACEHOLDER: [&str; 4] = ["Alice", "Bob", "Charlie", "Dave"];
const CURSOR: char = '▏';

/// Side by side layout kicks in at this many columns.
const WIDE_LAYOUT: u16 = 80;
const PANEL_WIDTH: u16 = 44;

/// How long to sleep when nothing is moving.
const IDLE_WAKEUP: Duration = Duration::from_millis(500);

pub struct App {
    session: Session,
    config: Config,
    timer: RevealTimer,
    spin: SpinAnimation,
    overlay: Option<WinnerOverlay>,
    rng: fastrand::Rng,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, input: String, rng: fastrand::Rng) -> Self {
        Self {
            session: Session::new(input),
            config,
            timer: RevealTimer::default(),
            spin: SpinAnimation::resting(Rotation::ZERO),
            overlay: None,
            rng,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_showing_winner(&self) -> bool {
        self.overlay.is_some()
    }

    /// Takes over the terminal until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut writer = CanvasWriter::new(io::stdout());
        let (width, height) = crossterm::terminal::size()?;
        let mut size = (width, height);
        let mut dirty = true;

        while !self.should_quit {
            dirty |= self.tick(Instant::now());
            if dirty {
                let mut canvas = Canvas::new(size.0, size.1);
                self.draw(&mut canvas);
                writer.render(&canvas)?;
                dirty = false;
            }
            if !event::poll(self.next_wakeup(Instant::now()))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    self.handle_key(key, Instant::now());
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    size = (width, height);
                    dirty = true;
                }
                _ => (),
            }
        }
        log::info!("quitting");
        Ok(())
    }

    /// How long the event loop can wait for input before something needs to move.
    fn next_wakeup(&self, now: Instant) -> Duration {
        let animating = self.spin.is_running() || self.overlay.is_some();
        let frame = if animating { self.config.spin.frame_interval() } else { IDLE_WAKEUP };
        self.timer.time_until_due(now).map_or(frame, |due| due.min(frame))
    }

    /// Advances animations and fires the reveal once it's due. Returns whether to redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut redraw = self.spin.poll(now).needs_redraw();
        if let Some(ticket) = self.timer.fire(now) {
            match self.session.reveal(ticket, now) {
                Ok(winner) => {
                    let winner = winner.to_string();
                    self.overlay = Some(WinnerOverlay::new(&winner, &self.config.celebration, &mut self.rng));
                    redraw = true;
                }
                Err(e) => log::warn!("reveal skipped: {e}"),
            }
        }
        if let Some(overlay) = &mut self.overlay {
            redraw |= overlay.poll(now).needs_redraw();
        }
        redraw
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        if control && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }
        if self.overlay.is_some() {
            self.handle_overlay_key(key, now);
            return;
        }

        match key.code {
            KeyCode::Char('s') if control => self.spin(now),
            KeyCode::F(5) => self.spin(now),
            KeyCode::Char('r') if control => self.reset(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(ch) if !control => self.edit(|input| input.push(ch)),
            KeyCode::Enter => self.edit(|input| input.push('\n')),
            KeyCode::Backspace => self.edit(|input| {
                input.pop();
            }),
            _ => (),
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => {
                self.overlay = None;
                self.session.close();
            }
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.overlay = None;
                let from = self.session.rotation();
                let result = self.session.spin_again_with(&mut self.rng, now, self.config.spin.duration());
                self.start_spin(from, now, result);
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.timer.cancel();
                self.session.start_new_raffle();
                self.spin = SpinAnimation::resting(Rotation::ZERO);
                self.overlay = None;
            }
            _ => (),
        }
    }

    fn edit<F: FnOnce(&mut String)>(&mut self, edit: F) {
        if let Err(e) = self.session.edit_input(edit) {
            log::debug!("ignoring key: {e}");
        }
    }

    fn spin(&mut self, now: Instant) {
        // nothing to offer a spin for yet
        if self.session.parsed_input().is_empty() {
            return;
        }
        let from = self.session.rotation();
        let result = self.session.spin_with(&mut self.rng, now, self.config.spin.duration());
        self.start_spin(from, now, result);
    }

    /// Starts turning the wheel for a spin made at `now`, on the same clock as its reveal.
    fn start_spin(&mut self, from: Rotation, now: Instant, result: Result<RevealTicket, SessionError>) {
        match result {
            Ok(ticket) => {
                self.timer.schedule(ticket);
                self.spin = SpinAnimation::new(from, self.session.rotation(), now, self.config.spin.duration());
            }
            Err(e) => log::debug!("spin refused: {e}"),
        }
    }

    fn reset(&mut self) {
        self.timer.cancel();
        self.session.reset();
        self.spin = SpinAnimation::resting(Rotation::ZERO);
        self.overlay = None;
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        let screen = canvas.area();
        canvas.fill(screen, palette::BACKGROUND);
        if screen.height < 6 {
            canvas.put_str(0, 0, "Terminal too small", palette::ERROR, true);
            return;
        }
        canvas.put_centered(screen, 1, TITLE, palette::PURPLE, true);
        canvas.put_centered(screen, 2, SUBTITLE, palette::MUTED, false);

        let body = Rect::new(screen.x + 1, screen.y + 4, screen.width.saturating_sub(2), screen.height - 5);
        let (wheel_area, panel_area) = if body.width >= WIDE_LAYOUT {
            let wheel_width = body.width - PANEL_WIDTH - 2;
            (
                Rect::new(body.x, body.y, wheel_width, body.height),
                Rect::new(body.x + wheel_width + 2, body.y, PANEL_WIDTH, body.height.min(20)),
            )
        } else {
            let panel_height = (body.height / 2).min(14);
            let wheel_height = body.height - panel_height;
            (
                Rect::new(body.x, body.y, body.width, wheel_height),
                Rect::new(body.x, body.y + wheel_height, body.width, panel_height),
            )
        };

        let live;
        let participants = match self.session.state() {
            SessionState::Idle => {
                live = self.session.parsed_input();
                &live
            }
            SessionState::Drawing | SessionState::Revealing => self.session.participants(),
        };
        Wheel::new(participants, &self.config.wheel).draw(canvas, wheel_area, self.spin.current_degrees());
        self.draw_panel(canvas, panel_area);

        if let Some(overlay) = &self.overlay {
            overlay.draw(canvas, screen);
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas, area: Rect) {
        if area.width < 8 || area.height < 7 {
            return;
        }
        canvas.fill(area, palette::PANEL);
        canvas.frame(area, palette::PANEL_BORDER);
        let inner = area.inset(2);
        let mut y = inner.y;
        canvas.put_str(inner.x, y, INPUT_LABEL, palette::SUBTLE, true);
        y += 1;

        // label, error and two rows of hints sit around the input box
        let input_height = inner.height.saturating_sub(5).max(1);
        let input_area = Rect::new(inner.x, y, inner.width, input_height);
        self.draw_input(canvas, input_area);
        y += input_height + 1;

        if let Some(error) = self.session.error() {
            canvas.put_str(inner.x, y, tail(error, inner.width as usize), palette::ERROR, false);
        }
        y += 1;

        if self.session.state() == SessionState::Drawing {
            canvas.put_str(inner.x, y, "Spinning...", palette::GOLD, true);
        } else if !self.session.parsed_input().is_empty() {
            canvas.put_str(inner.x, y, "[Ctrl+S] Spin", palette::GOLD, true);
        }
        y += 1;
        canvas.put_str(inner.x, y, "[Ctrl+R] Reset  [Esc] Quit", palette::MUTED, false);
    }

    fn draw_input(&self, canvas: &mut Canvas, area: Rect) {
        canvas.fill(area, palette::INPUT);
        let width = area.width.saturating_sub(1) as usize;
        let input = self.session.input();
        if input.is_empty() {
            for (row, name) in PLACEHOLDER.iter().take(area.height as usize).enumerate() {
                canvas.put_str(area.x, area.y + row as u16, name, palette::MUTED, false);
            }
        }

        let lines: Vec<&str> = input.split('\n').collect();
        let skip = lines.len().saturating_sub(area.height as usize);
        let mut last = (area.x, area.y);
        for (row, line) in lines.iter().skip(skip).enumerate() {
            let y = area.y + row as u16;
            let used = canvas.put_str(area.x, y, tail(line, width), palette::TEXT, false);
            last = (area.x + used, y);
        }
        if self.session.state() != SessionState::Drawing {
            canvas.put_char(last.0, last.1, CURSOR, palette::GOLD, false);
        }
    }
}

/// The end of `line` that fits in `width` columns.
fn tail(line: &str, width: usize) -> &str {
    let mut used = 0;
    for (index, ch) in line.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &line[index + ch.len_utf8()..];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn app(input: &str) -> App {
        App::new(Config::default(), input.to_string(), fastrand::Rng::with_seed(42))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn control(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut canvas = Canvas::new(width, height);
        app.draw(&mut canvas);
        (0..canvas.height()).map(|y| canvas.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    fn spin_duration() -> Duration {
        Config::default().spin.duration()
    }

    #[test]
    fn typing_fills_the_input() {
        let mut app = app("");
        let now = Instant::now();
        for ch in "Alice".chars() {
            app.handle_key(key(KeyCode::Char(ch)), now);
        }
        app.handle_key(key(KeyCode::Enter), now);
        app.handle_key(key(KeyCode::Char('B')), now);
        app.handle_key(key(KeyCode::Char('x')), now);
        app.handle_key(key(KeyCode::Backspace), now);
        assert_eq!(app.session().input(), "Alice\nB");
    }

    #[test]
    fn spin_then_reveal() {
        let mut app = app("Alice\nBob\nCharlie\nDave");
        let start = Instant::now();
        app.handle_key(control('s'), start);
        assert_eq!(app.session().state(), SessionState::Drawing);
        assert!(app.tick(start));

        // the names are locked and the winner stays hidden while spinning
        app.handle_key(key(KeyCode::Char('x')), start);
        assert_eq!(app.session().input(), "Alice\nBob\nCharlie\nDave");
        app.tick(start + spin_duration() / 2);
        assert!(!app.is_showing_winner());
        assert_eq!(app.session().winner(), None);

        app.tick(start + spin_duration());
        assert!(app.is_showing_winner());
        assert_eq!(app.session().state(), SessionState::Revealing);
        assert_eq!(app.spin.current_degrees(), app.session().rotation().degrees());
        assert!(app.session().winner().is_some());
    }

    #[test]
    fn wheel_has_stopped_when_the_winner_shows() {
        let mut app = app("Alice\nBob\nCharlie\nDave");
        let start = Instant::now();
        app.handle_key(control('s'), start);

        // the first frame only gets drawn a while after the spin
        app.tick(start + Duration::from_millis(200));
        assert!(!app.is_showing_winner());
        assert!(app.spin.is_running());

        app.tick(start + spin_duration());
        assert!(app.is_showing_winner());
        assert!(!app.spin.is_running());
        assert_eq!(app.spin.current_degrees(), app.session().rotation().degrees());
    }

    #[test]
    fn reset_while_spinning_drops_the_reveal() {
        let mut app = app("Alice\nBob");
        let start = Instant::now();
        app.handle_key(key(KeyCode::F(5)), start);
        app.tick(start);
        app.handle_key(control('r'), start + Duration::from_secs(1));
        app.tick(start + spin_duration() * 2);
        assert!(!app.is_showing_winner());
        assert_eq!(app.session().state(), SessionState::Idle);
        assert_eq!(app.session().rotation(), Rotation::ZERO);
        assert_eq!(app.session().input(), "");
    }

    #[rstest]
    #[case::close(key(KeyCode::Esc), SessionState::Idle, "Alice\nBob\nCharlie")]
    #[case::spin_again(key(KeyCode::Enter), SessionState::Drawing, "Alice\nBob\nCharlie")]
    #[case::new_raffle(key(KeyCode::Char('n')), SessionState::Idle, "")]
    fn overlay_actions(#[case] action: KeyEvent, #[case] state: SessionState, #[case] input: &str) {
        let mut app = app("Alice\nBob\nCharlie");
        let start = Instant::now();
        app.handle_key(control('s'), start);
        app.tick(start);
        let after = start + spin_duration();
        app.tick(after);
        assert!(app.is_showing_winner());

        app.handle_key(action, after);
        assert!(!app.is_showing_winner());
        assert_eq!(app.session().state(), state);
        assert_eq!(app.session().input(), input);
        assert!(!app.should_quit());
    }

    #[test]
    fn empty_input_offers_no_spin() {
        let mut app = app("   \n");
        app.handle_key(control('s'), Instant::now());
        assert_eq!(app.session().state(), SessionState::Idle);
        assert_eq!(app.session().error(), None);
        assert!(!screen_text(&app, 100, 30).contains("[Ctrl+S] Spin"));
    }

    #[test]
    fn single_name_shows_the_error() {
        let mut app = app("Alice");
        app.handle_key(control('s'), Instant::now());
        assert_eq!(app.session().state(), SessionState::Idle);
        assert!(screen_text(&app, 100, 30).contains("Please enter at least two participants."));
    }

    #[rstest]
    #[case::control_c(control('c'))]
    #[case::control_q(control('q'))]
    #[case::escape(key(KeyCode::Esc))]
    fn quitting(#[case] event: KeyEvent) {
        let mut app = app("Alice\nBob");
        app.handle_key(event, Instant::now());
        assert!(app.should_quit());
    }

    #[rstest]
    #[case::wide(120, 40)]
    #[case::narrow(60, 40)]
    fn layout_shows_form(#[case] width: u16, #[case] height: u16) {
        let app = app("Alice\nBob");
        let text = screen_text(&app, width, height);
        assert!(text.contains(TITLE));
        assert!(text.contains(INPUT_LABEL));
        assert!(text.contains("Alice"));
        assert!(text.contains("[Ctrl+S] Spin"));
    }

    #[test]
    fn tiny_terminal() {
        let app = app("");
        assert!(screen_text(&app, 30, 4).contains("Terminal too small"));
    }

    #[test]
    fn waits_for_the_reveal() {
        let mut app = app("Alice\nBob");
        let start = Instant::now();
        assert_eq!(app.next_wakeup(start), IDLE_WAKEUP);
        app.handle_key(control('s'), start);
        assert_eq!(app.next_wakeup(start), app.config.spin.frame_interval());
    }

    #[rstest]
    #[case("Alice", 10, "Alice")]
    #[case("Bartholomew", 4, "omew")]
    #[case("", 3, "")]
    fn tails(#[case] line: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(tail(line, width), expected);
    }
}
