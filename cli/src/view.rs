use std::io::{self, Write};

use fieldsweep_core::*;

/// Receives game events and shows them to the player.
pub trait Presenter {
    fn new_field(&mut self, snapshot: &GridSnapshot) -> io::Result<()>;

    fn revealed(
        &mut self,
        coords: (i32, i32),
        outcome: &RevealOutcome,
        snapshot: &GridSnapshot,
    ) -> io::Result<()>;

    fn settings(&mut self, config: &GameConfig) -> io::Result<()>;

    fn message(&mut self, text: &str) -> io::Result<()>;

    fn draw(&mut self, snapshot: &GridSnapshot) -> io::Result<()>;
}

pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Hidden => '#',
        CellState::RevealedSafe(0) => '.',
        CellState::RevealedSafe(count) => char::from(b'0' + count),
        CellState::RevealedMine => 'M',
    }
}

/// Draws the field with a column ruler on top and row numbers on the left.
pub fn render_field(snapshot: &GridSnapshot) -> String {
    let (width, _) = snapshot.size;
    let mut out = String::from("    ");
    for x in 0..width {
        out.push(char::from(b'0' + x % 10));
    }
    out.push('\n');

    for (y, row) in snapshot.rows().enumerate() {
        out.push_str(&format!("{y:>3} "));
        out.extend(row.iter().map(|&state| glyph(state)));
        out.push('\n');
    }
    out
}

pub fn describe_settings(config: &GameConfig) -> String {
    format!(
        "{}x{} field, {} mines ({:.0}%)",
        config.width(),
        config.height(),
        config.mines,
        config.mine_fraction() * 100.0
    )
}

pub fn describe_outcome((x, y): (i32, i32), outcome: &RevealOutcome) -> Option<String> {
    use RevealOutcome::*;
    match outcome {
        AlreadyLost => {
            Some("You already lost! Generate a new field to play again.".to_owned())
        }
        InvalidPosition => Some(format!("({x}, {y}) is outside the field")),
        AlreadyRevealed => Some(format!("({x}, {y}) is already revealed")),
        StruckMine(_) => Some("You lose!".to_owned()),
        RevealedNumbered(_) | RevealedRegion(_) => None,
    }
}

/// Plain text field for interactive play.
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn status(&mut self, snapshot: &GridSnapshot) -> io::Result<()> {
        if snapshot.lost {
            writeln!(self.out, "game over")
        } else {
            writeln!(
                self.out,
                "{} mines, {} safe cells left",
                snapshot.mine_count, snapshot.remaining_safe_cells
            )
        }
    }
}

impl<W: Write> Presenter for TerminalView<W> {
    fn new_field(&mut self, snapshot: &GridSnapshot) -> io::Result<()> {
        self.draw(snapshot)
    }

    fn revealed(
        &mut self,
        coords: (i32, i32),
        outcome: &RevealOutcome,
        snapshot: &GridSnapshot,
    ) -> io::Result<()> {
        if outcome.has_update() {
            write!(self.out, "{}", render_field(snapshot))?;
        }
        if let Some(text) = describe_outcome(coords, outcome) {
            writeln!(self.out, "{text}")?;
        }
        if outcome.has_update() {
            self.status(snapshot)?;
        }
        self.out.flush()
    }

    fn settings(&mut self, config: &GameConfig) -> io::Result<()> {
        writeln!(
            self.out,
            "{}, applies to the next field",
            describe_settings(config)
        )
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    fn draw(&mut self, snapshot: &GridSnapshot) -> io::Result<()> {
        write!(self.out, "{}", render_field(snapshot))?;
        self.status(snapshot)?;
        self.out.flush()
    }
}

/// One JSON document per line, for driving the game from another program.
pub struct JsonView<W> {
    out: W,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &value)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for JsonView<W> {
    fn new_field(&mut self, snapshot: &GridSnapshot) -> io::Result<()> {
        self.emit(serde_json::json!({ "new_field": snapshot }))
    }

    fn revealed(
        &mut self,
        (x, y): (i32, i32),
        outcome: &RevealOutcome,
        snapshot: &GridSnapshot,
    ) -> io::Result<()> {
        self.emit(serde_json::json!({
            "reveal": [x, y],
            "outcome": outcome,
            "snapshot": snapshot,
        }))
    }

    fn settings(&mut self, config: &GameConfig) -> io::Result<()> {
        self.emit(serde_json::json!({ "settings": config }))
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        self.emit(serde_json::json!({ "message": text }))
    }

    fn draw(&mut self, snapshot: &GridSnapshot) -> io::Result<()> {
        self.emit(serde_json::json!({ "snapshot": snapshot }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(size: Coord2, mines: &[Coord2], reveals: &[Coord2]) -> MinefieldEngine {
        let mut engine =
            MinefieldEngine::from_layout(MineLayout::from_mine_coords(size, mines).unwrap());
        for &coords in reveals {
            engine.reveal(coords);
        }
        engine
    }

    #[test]
    fn renders_hidden_numbered_and_empty_cells() {
        let engine = played((4, 2), &[(3, 0)], &[(0, 0)]);

        assert_eq!(render_field(&engine.snapshot()), "    0123\n  0 ..1#\n  1 ..1#\n");
    }

    #[test]
    fn renders_mines_after_loss() {
        let engine = played((2, 1), &[(1, 0)], &[(1, 0)]);

        assert_eq!(render_field(&engine.snapshot()), "    01\n  0 #M\n");
    }

    #[test]
    fn terminal_view_reports_loss() {
        let mut engine = played((2, 1), &[(1, 0)], &[]);
        let outcome = engine.reveal((1, 0));
        let mut view = TerminalView::new(Vec::new());

        view.revealed((1, 0), &outcome, &engine.snapshot()).unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("You lose!"));
        assert!(text.contains("game over"));
    }

    #[test]
    fn terminal_view_skips_redraw_without_update() {
        let mut engine = played((2, 1), &[], &[]);
        let outcome = engine.reveal((5, 0));
        let mut view = TerminalView::new(Vec::new());

        view.revealed((5, 0), &outcome, &engine.snapshot()).unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(text, "(5, 0) is outside the field\n");
    }

    #[test]
    fn json_view_emits_one_document_per_event() {
        let mut engine = played((2, 1), &[], &[]);
        let outcome = engine.reveal((0, 0));
        let mut view = JsonView::new(Vec::new());

        view.revealed((0, 0), &outcome, &engine.snapshot()).unwrap();
        view.message("hi").unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["reveal"], serde_json::json!([0, 0]));
        assert!(lines[0]["outcome"]["RevealedRegion"].is_array());
        assert_eq!(lines[1]["message"], "hi");
    }

    #[test]
    fn settings_mention_density() {
        let config = GameConfig::new(10, 10, MineSpec::Count(15));
        assert_eq!(describe_settings(&config), "10x10 field, 15 mines (15%)");
    }
}
