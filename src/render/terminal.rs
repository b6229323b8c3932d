//! Terminal renderer (ratatui)
//!
//! The 128x64 ring is drawn on a character grid at 2 units per column and
//! 4 units per row. Sprites are 8x3 glyph blocks; spaces are transparent.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use ratatui::Frame;

use crate::combat::constants::{
    FIGHTER_W, RING_BOTTOM, RING_LEFT, RING_RIGHT, RING_TOP, SCREEN_H, SCREEN_W,
};
use crate::combat::state::FighterState;
use crate::core::types::Timestamp;
use crate::render::{FighterView, MatchSnapshot};
use crate::session::match_state::MatchOutcome;

const UNITS_PER_COL: i32 = 2;
const UNITS_PER_ROW: i32 = 4;
pub const GRID_COLS: usize = (SCREEN_W / UNITS_PER_COL) as usize;
pub const GRID_ROWS: usize = (SCREEN_H / UNITS_PER_ROW) as usize;
const SPRITE_COLS: i32 = FIGHTER_W / UNITS_PER_COL;

/// Idle sprites alternate at this period
const IDLE_FRAME_MS: u64 = 200;

type Sprite = [&'static str; 3];

const PLAYER_IDLE: [Sprite; 2] = [
    ["  (oo)  ", " <|##|> ", "  /  \\  "],
    ["  (oo)  ", " <|##|> ", "  |  |  "],
];
const PLAYER_PUNCH: Sprite = ["  (oo)o ", " <|##|  ", "  /  \\  "];
const PLAYER_DODGE: Sprite = [" (oo)   ", "<|##|>  ", " /  \\   "];
const PLAYER_HURT: Sprite = ["  (><)  ", " <|##|> ", "  /  \\  "];
const PLAYER_KO: Sprite = ["        ", "  (xx)  ", " _/##\\_ "];

const ENEMY_IDLE: [Sprite; 2] = [
    ["  H..H  ", " o|##|o ", "  |  |  "],
    ["  H..H  ", " o|##|o ", "  /  \\  "],
];
const ENEMY_PUNCH: Sprite = ["  H..H  ", "  |##|o ", "  |  |O "];
const ENEMY_HURT: Sprite = ["  Hx.H  ", " \\|##|/ ", "  /  \\  "];
const ENEMY_KO: Sprite = ["        ", "  HxxH  ", " _|##|_ "];

/// Head glyphs per boss, so each opponent reads differently
const BOSS_HEADS: [(char, char); 3] = [('[', ']'), ('{', '}'), ('<', '>')];

/// Character grid with per-cell styles
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<(char, Style)>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![(' ', Style::default()); cols * rows],
        }
    }

    pub fn put(&mut self, col: i32, row: i32, ch: char, style: Style) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = (ch, style);
    }

    /// Write `text` left to right; spaces leave the cell underneath alone
    pub fn put_str(&mut self, col: i32, row: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            if ch != ' ' {
                self.put(col + i as i32, row, ch, style);
            }
        }
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|(ch, _)| *ch)
            .collect()
    }

    pub fn style_at(&self, col: usize, row: usize) -> Style {
        self.cells[row * self.cols + col].1
    }

    /// Collapse each row into spans of equal style
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let mut spans = Vec::new();
                let mut run = String::new();
                let mut run_style = Style::default();
                for &(ch, style) in &self.cells[row * self.cols..(row + 1) * self.cols] {
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push(ch);
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }
                Line::from(spans)
            })
            .collect()
    }
}

fn to_col(x: i32) -> i32 {
    x / UNITS_PER_COL
}

fn to_row(y: i32) -> i32 {
    y / UNITS_PER_ROW
}

fn draw_ring(grid: &mut Grid) {
    let rope = Style::default().fg(Color::DarkGray);
    let post = Style::default().fg(Color::White);
    let (left, right) = (to_col(RING_LEFT), to_col(RING_RIGHT));
    let (top, bottom) = (to_row(RING_TOP), to_row(RING_BOTTOM));

    for col in left..=right {
        grid.put(col, top, '═', rope);
        grid.put(col, top + 1, '─', rope);
        grid.put(col, bottom, '─', rope);
    }
    for row in top..=bottom {
        grid.put(left, row, '│', rope);
        grid.put(right, row, '│', rope);
    }
    for (col, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        grid.put(col, row, '█', post);
    }
}

fn player_sprite(view: &FighterView, alt: usize) -> Sprite {
    match view.state {
        FighterState::Punching => PLAYER_PUNCH,
        FighterState::Dodging => PLAYER_DODGE,
        FighterState::HitStun => PLAYER_HURT,
        FighterState::KO => PLAYER_KO,
        FighterState::Idle | FighterState::Telegraph => PLAYER_IDLE[alt],
    }
}

fn enemy_sprite(view: &FighterView, alt: usize) -> Sprite {
    match view.state {
        FighterState::Punching => ENEMY_PUNCH,
        FighterState::HitStun => ENEMY_HURT,
        FighterState::KO => ENEMY_KO,
        _ => ENEMY_IDLE[alt],
    }
}

fn draw_sprite(grid: &mut Grid, view: &FighterView, sprite: Sprite, head: Option<(char, char)>, style: Style) {
    let (col, row) = (to_col(view.x), to_row(view.y));
    for (i, line) in sprite.iter().enumerate() {
        let line = match head {
            Some(head) => with_head(line, head),
            None => line.to_string(),
        };
        grid.put_str(col, row + i as i32, &line, style);
    }
}

/// Swap the `H` placeholders for the boss's bracket pair
fn with_head(line: &str, (open, close): (char, char)) -> String {
    let mut opened = false;
    line.chars()
        .map(|ch| match ch {
            'H' if !opened => {
                opened = true;
                open
            }
            'H' => close,
            other => other,
        })
        .collect()
}

/// Lay out the ring and both fighters for one frame
pub fn ring_grid(snapshot: &MatchSnapshot, now: Timestamp) -> Grid {
    let mut grid = Grid::new(GRID_COLS, GRID_ROWS);
    draw_ring(&mut grid);

    let alt = ((now / IDLE_FRAME_MS) & 1) as usize;
    let enemy = &snapshot.enemy;
    let (ecol, erow) = (to_col(enemy.x), to_row(enemy.y));

    let telegraph_flash = enemy.state == FighterState::Telegraph && enemy.flash;
    let enemy_style = if telegraph_flash {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };

    if telegraph_flash {
        let frame = Style::default().fg(Color::Yellow);
        for col in ecol - 1..=ecol + SPRITE_COLS {
            grid.put(col, erow - 1, '*', frame);
            grid.put(col, erow + 3, '*', frame);
        }
        for row in erow..erow + 3 {
            grid.put(ecol - 1, row, '*', frame);
            grid.put(ecol + SPRITE_COLS, row, '*', frame);
        }
    }

    let head = BOSS_HEADS[snapshot.boss_index.min(BOSS_HEADS.len() - 1)];
    draw_sprite(&mut grid, enemy, enemy_sprite(enemy, alt), Some(head), enemy_style);

    if snapshot.enemy_open {
        grid.put_str(ecol + 3, erow - 1, "!!", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    }

    let player = &snapshot.player;
    draw_sprite(&mut grid, player, player_sprite(player, alt), None, Style::default().fg(Color::Cyan));

    grid
}

fn hp_ratio(view: &FighterView) -> f64 {
    (f64::from(view.hp) / f64::from(view.max_hp.max(1))).clamp(0.0, 1.0)
}

fn hp_gauge(title: String, view: &FighterView, color: Color) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(color))
        .ratio(hp_ratio(view))
        .label(format!("{}/{}", view.hp, view.max_hp))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw a full frame
pub fn draw(frame: &mut Frame, snapshot: &MatchSnapshot, now: Timestamp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(GRID_ROWS as u16),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    frame.render_widget(
        hp_gauge(format!("ENEMY {}", snapshot.boss_name), &snapshot.enemy, Color::Red),
        bars[0],
    );
    frame.render_widget(hp_gauge("YOU".to_string(), &snapshot.player, Color::Cyan), bars[1]);

    frame.render_widget(Paragraph::new(ring_grid(snapshot, now).lines()), rows[1]);

    if let Some(text) = &snapshot.banner {
        let popup = centered(rows[1], text.chars().count() as u16 + 4, 3);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text.clone())
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)),
            popup,
        );
    }

    let hint = match snapshot.outcome {
        MatchOutcome::InProgress => "←/→ dodge   space punch   enter ok   q quit",
        MatchOutcome::Won | MatchOutcome::Lost => "enter restart   q quit",
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::BossCatalog;
    use crate::session::match_state::MatchState;
    use crate::session::progression::reset_match;

    fn snapshot() -> MatchSnapshot {
        let catalog = BossCatalog::default();
        let mut state = MatchState::new();
        reset_match(&mut state, &catalog, 0);
        MatchSnapshot::capture(&state, &catalog, 0)
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(GRID_COLS, 64);
        assert_eq!(GRID_ROWS, 16);
    }

    #[test]
    fn test_put_str_transparent_spaces() {
        let mut grid = Grid::new(8, 1);
        grid.put_str(0, 0, "abcdefgh", Style::default());
        grid.put_str(0, 0, "X  Y", Style::default());
        assert_eq!(grid.row_text(0), "XbcYefgh");
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut grid = Grid::new(4, 2);
        grid.put(-1, 0, 'x', Style::default());
        grid.put(4, 1, 'x', Style::default());
        grid.put(0, 2, 'x', Style::default());
        assert_eq!(grid.row_text(0), "    ");
        assert_eq!(grid.row_text(1), "    ");
    }

    fn cells(grid: &Grid, row: usize, col: usize, len: usize) -> String {
        grid.row_text(row).chars().skip(col).take(len).collect()
    }

    #[test]
    fn test_fighters_drawn_at_scaled_positions() {
        let snap = snapshot();
        let grid = ring_grid(&snap, 0);
        // Player at x=56,y=32 -> col 28, row 8; head "(oo)" starts two cols in
        assert_eq!(cells(&grid, 8, 30, 4), "(oo)");
        // Boss 1 head at row 4
        assert_eq!(cells(&grid, 4, 30, 4), "[..]");
    }

    #[test]
    fn test_boss_heads_differ() {
        assert_eq!(with_head("  H..H  ", ('{', '}')), "  {..}  ");
        assert_eq!(with_head("  HxxH  ", ('<', '>')), "  <xx>  ");
        let mut snap = snapshot();
        snap.boss_index = 2;
        let grid = ring_grid(&snap, 0);
        assert_eq!(cells(&grid, 4, 30, 4), "<..>");
    }

    #[test]
    fn test_idle_sprite_alternates() {
        let snap = snapshot();
        let first = ring_grid(&snap, 0).row_text(10);
        let second = ring_grid(&snap, 200).row_text(10);
        assert_ne!(first, second);
    }

    #[test]
    fn test_flash_draws_frame() {
        let mut snap = snapshot();
        snap.enemy.state = FighterState::Telegraph;
        snap.enemy.flash = true;
        let grid = ring_grid(&snap, 0);
        assert_eq!(cells(&grid, 7, 27, 1), "*");
        assert_eq!(grid.style_at(30, 4).fg, Some(Color::Yellow));
    }

    #[test]
    fn test_open_marker() {
        let mut snap = snapshot();
        snap.enemy_open = true;
        let grid = ring_grid(&snap, 0);
        assert_eq!(cells(&grid, 3, 31, 2), "!!");
    }

    #[test]
    fn test_lines_group_styles() {
        let mut grid = Grid::new(4, 1);
        let red = Style::default().fg(Color::Red);
        grid.put_str(1, 0, "ab", red);
        let lines = grid.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 3);
    }

    #[test]
    fn test_hp_ratio_bounds() {
        let mut view = snapshot().player;
        view.hp = 0;
        assert_eq!(hp_ratio(&view), 0.0);
        view.max_hp = 0;
        assert_eq!(hp_ratio(&view), 0.0);
    }
}
