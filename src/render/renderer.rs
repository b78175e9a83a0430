use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Food, GameConfig, GameEngine, Position, Snake};

pub const WELCOME_TEXT: &str = "Press spacebar to start.";

const CAPTION: &str = " Snake Slither ";

/// Terminal columns per grid cell; keeps cells roughly square
const CELL_WIDTH: u16 = 2;

/// Column, in cells, where the score overlay starts
const SCORE_COLUMN: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, engine: &GameEngine) {
        let blocks = engine.config().blocks as u16;
        let board = centered(
            blocks * CELL_WIDTH + 2,
            blocks + 2,
            frame.area(),
        );

        if engine.is_playing() {
            let grid = self.render_grid(engine);
            frame.render_widget(grid, board);

            let inner = board.inner(ratatui::layout::Margin::new(1, 1));
            let score_area = Rect::new(
                inner.x + SCORE_COLUMN * CELL_WIDTH,
                inner.y,
                inner.width.saturating_sub(SCORE_COLUMN * CELL_WIDTH),
                1,
            )
            .intersection(inner);
            frame.render_widget(self.render_score(engine.score()), score_area);
        } else {
            let welcome = self.render_welcome(blocks);
            frame.render_widget(welcome, board);
        }
    }

    fn render_grid(&self, engine: &GameEngine) -> Paragraph<'static> {
        let cells = layout_cells(engine.config(), engine.snake(), engine.food());

        let lines: Vec<Line> = cells
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Head => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Cell::Body => Span::styled("■ ", Style::default().fg(Color::Green)),
                        Cell::Food => Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        // Grid lines are cosmetic
                        Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(CAPTION),
        )
    }

    fn render_score(&self, score: u32) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::DIM),
        )))
    }

    fn render_welcome(&self, blocks: u16) -> Paragraph<'static> {
        let mut text: Vec<Line> = (0..blocks.saturating_sub(1) / 2).map(|_| Line::from("")).collect();
        text.push(Line::from(Span::styled(
            WELCOME_TEXT,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(CAPTION),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterise the engine's entities into grid cells. Food is drawn under the
/// snake so a snake segment always shows through.
fn layout_cells(config: &GameConfig, snake: &Snake, food: &Food) -> Vec<Vec<Cell>> {
    let blocks = config.blocks;
    let mut cells = vec![vec![Cell::Empty; blocks]; blocks];

    let mut put = |pos: Position, cell: Cell| {
        let (column, row) = pos.cell(config.block_size);
        if (0..blocks as i32).contains(&column) && (0..blocks as i32).contains(&row) {
            cells[row as usize][column as usize] = cell;
        }
    };

    put(food.position, Cell::Food);
    for (i, &segment) in snake.body().iter().enumerate().rev() {
        put(segment, if i == 0 { Cell::Head } else { Cell::Body });
    }

    cells
}

/// A `width` x `height` rect centred in `area`, shrunk to fit
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
