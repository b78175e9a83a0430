use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, Food, Snake},
};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Waiting for the start signal; nothing moved
    Idle,
    /// The snake moved without eating or colliding
    Moved,
    /// The snake ate the food and grew
    AteFood,
    /// The snake collided and the round restarted
    Reset(CollisionType),
}

/// The game engine that handles all game logic
///
/// Owns the snake, the food, the score and the start flag. Rounds restart in
/// place on collision; there is no terminal state.
pub struct GameEngine {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    playing: bool,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration. Uses
    /// `config.seed` when set, OS entropy otherwise.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create an engine with a fixed seed for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(&config);
        let mut food = Food::random(&mut rng, &config);
        if config.food_avoids_snake {
            food.relocate_clear_of(&mut rng, &config, &snake);
        }

        Self {
            config,
            snake,
            food,
            score: 0,
            playing: false,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Leave the idle state; no-op once playing
    pub fn start(&mut self) {
        if !self.playing {
            info!("round started");
            self.playing = true;
        }
    }

    /// Steer the snake. Ignored until the game has started.
    pub fn turn(&mut self, direction: Direction) {
        if self.playing {
            self.snake.turn(direction);
        }
    }

    /// Execute one tick of the game
    ///
    /// Collisions are checked against the advanced head in a fixed order:
    /// walls, then the snake's own body, then food. A tick that resets the
    /// round never scores.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }

        self.snake.advance();

        if let Some(collision) = self.check_collision() {
            info!(?collision, score = self.score, "round reset");
            self.reset_round();
            return TickOutcome::Reset(collision);
        }

        if self.food.is_eaten_by(&self.snake) {
            self.score += 1;
            self.relocate_food();
            self.snake.grow();
            debug!(score = self.score, length = self.snake.len(), "food eaten");
            return TickOutcome::AteFood;
        }

        TickOutcome::Moved
    }

    /// Start a fresh round: spawn snake, new food, zero score. Play continues.
    pub fn reset_round(&mut self) {
        self.snake.reset();
        self.relocate_food();
        self.score = 0;
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if !self.config.contains(self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.hits_own_body() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn relocate_food(&mut self) {
        if self.config.food_avoids_snake {
            self.food
                .relocate_clear_of(&mut self.rng, &self.config, &self.snake);
        } else {
            self.food.relocate(&mut self.rng, &self.config);
        }
    }
}
