use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

use super::config::GameConfig;
use super::direction::Direction;

/// A position on the playing field, in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell of `block_size` in a direction
    pub fn moved_in_direction(&self, direction: Direction, block_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * block_size, dy * block_size)
    }

    /// Grid cell (column, row) this position falls in
    pub fn cell(&self, block_size: i32) -> (i32, i32) {
        (self.x.div_euclid(block_size), self.y.div_euclid(block_size))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    block_size: i32,
    spawn: Position,
    initial_length: usize,
}

impl Snake {
    /// Create a new snake with given head position and direction; the body
    /// trails behind the head, one cell per segment
    pub fn new(head: Position, direction: Direction, length: usize, block_size: i32) -> Self {
        let mut snake = Self {
            body: VecDeque::with_capacity(length),
            direction,
            block_size,
            spawn: head,
            initial_length: length,
        };
        snake.lay_out(direction);
        snake
    }

    /// Create the snake in its spawn position for a configuration
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(
            config.spawn_head(),
            Direction::Right,
            config.initial_snake_length,
            config.block_size,
        )
    }

    fn lay_out(&mut self, direction: Direction) {
        self.body.clear();
        let mut segment = self.spawn;
        for _ in 0..self.initial_length.max(1) {
            self.body.push_back(segment);
            segment = segment.moved_in_direction(direction.opposite(), self.block_size);
        }
        self.direction = direction;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Move one cell in the current direction.
    ///
    /// The tail segment is recycled as the new head, so the body keeps its
    /// length and no segment is allocated.
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction, self.block_size);
        self.body.rotate_right(1);
        self.body[0] = new_head;
    }

    /// Change direction, unless it would reverse the snake onto its own neck.
    /// The latest accepted turn is the one the next `advance` uses.
    pub fn turn(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Add a segment at the head position. It sits at the back of the body and
    /// becomes the new head on the next advance, so the old tail stays put
    /// for one tick.
    pub fn grow(&mut self) {
        let head = self.head();
        self.body.push_back(head);
    }

    /// Return to the spawn position, length and direction
    pub fn reset(&mut self) {
        self.lay_out(Direction::Right);
    }

    /// Check whether the head overlaps any other segment
    pub fn hits_own_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// A food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Create food at a specific position
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Create food at a random grid-aligned position
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let mut food = Self::at(Position::new(0, 0));
        food.relocate(rng, config);
        food
    }

    /// Move to a uniformly random cell, chosen independently per axis.
    /// The snake is not excluded.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        let x = rng.gen_range(0..config.blocks) as i32 * config.block_size;
        let y = rng.gen_range(0..config.blocks) as i32 * config.block_size;
        self.position = Position::new(x, y);
    }

    /// Move to a uniformly random cell the snake does not occupy. Falls back
    /// to [`Food::relocate`] when the snake fills the grid.
    pub fn relocate_clear_of<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        snake: &Snake,
    ) {
        let free: Vec<Position> = (0..config.blocks as i32)
            .flat_map(|row| {
                (0..config.blocks as i32).map(move |column| {
                    Position::new(column * config.block_size, row * config.block_size)
                })
            })
            .filter(|&pos| !snake.occupies(pos))
            .collect();

        match free.choose(rng) {
            Some(&pos) => self.position = pos,
            None => self.relocate(rng, config),
        }
    }

    /// Check if the snake's head is on this food
    pub fn is_eaten_by(&self, snake: &Snake) -> bool {
        self.position == snake.head()
    }
}
