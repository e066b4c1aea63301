//! The game: public state, per-player views, and the turn engine.
//!
//! ## Key Types
//!
//! - `Game` / `GameBuilder`: Seat players, configure, and run one game
//! - `GameState`: Public state shared by every player
//! - `PlayerState`: One seat's hand and card tracker
//! - `PlayerView`: What a strategy sees when it is asked to decide
//! - `GameResult` / `GameSummary`: How the game ended and its statistics

pub mod state;
pub mod view;
pub mod result;
pub mod engine;

pub use state::GameState;
pub use view::{PlayerState, PlayerView};
pub use result::{GameResult, GameSummary};
pub use engine::{Game, GameBuilder};
