//! Render contract for the board
//!
//! Renderers get a [`GridSnapshot`] after every board change: fixed
//! dimensions plus every placed event. They draw one marker per event at its
//! (column, row), colored and labeled by outcome. Two renderers ship here:
//! plain text for terminals and one JSON line per frame for anything else.

use crate::grid::GridSnapshot;
use crate::types::Prediction;
use anyhow::Result;
use std::io::Write;
use std::time::Duration;

pub trait Renderer {
    fn render(&mut self, snapshot: &GridSnapshot) -> Result<()>;
}

/// Draw the board as rows of single-letter cells, `.` for empty
pub fn render_text(snapshot: &GridSnapshot) -> String {
    let mut cells = vec![vec!["."; snapshot.columns]; snapshot.rows];
    for event in &snapshot.events {
        if event.row < snapshot.rows && event.column < snapshot.columns {
            cells[event.row][event.column] = event.outcome.label();
        }
    }

    let mut out = String::new();
    for row in cells {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: &GridSnapshot) -> Result<()> {
        write!(self.out, "{}", render_text(snapshot))?;
        self.out.flush()?;
        Ok(())
    }
}

/// One compact JSON object per frame
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, snapshot: &GridSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Hold an already-scored prediction for the "thinking" pause, then hand it over.
///
/// Scoring is finished before this is called; the wait only delays
/// presentation and cannot be cut short.
pub async fn reveal(prediction: Prediction, delay: Duration) -> Prediction {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    prediction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::OutcomeGrid;
    use crate::types::{Advice, Outcome, Reason, Side};

    fn sample_grid() -> OutcomeGrid {
        let mut grid = OutcomeGrid::new();
        for outcome in [Outcome::Banker, Outcome::Player, Outcome::Tie] {
            grid.append(outcome);
        }
        grid
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&sample_grid().snapshot());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("B P T . "));
        assert!(lines[1].chars().all(|c| c == '.' || c == ' '));
        assert_eq!(lines[0].split(' ').count(), 14);
    }

    #[test]
    fn test_text_renderer_writes_frame() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&sample_grid().snapshot()).unwrap();
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(written, render_text(&sample_grid().snapshot()));
    }

    #[test]
    fn test_json_renderer_frame() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&sample_grid().snapshot()).unwrap();
        let written = String::from_utf8(renderer.into_inner()).unwrap();

        let frame: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(frame["columns"], 14);
        assert_eq!(frame["rows"], 6);
        assert_eq!(frame["events"][2]["outcome"], "tie");
        assert_eq!(frame["events"][2]["column"], 2);
    }

    #[test]
    fn test_reveal_returns_prediction_unchanged() {
        let prediction = Prediction {
            outcome: Some(Side::Player),
            confidence: 77,
            reason: Reason::Streak,
            advice: Advice::SteadyGo,
        };
        let revealed = tokio_test::block_on(reveal(prediction.clone(), Duration::from_millis(5)));
        assert_eq!(revealed, prediction);
    }
}
