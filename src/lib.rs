//! holdem-engine: a Texas Hold'em rules engine
//!
//! Goals:
//! - Deterministic hand evaluation with explicit tie-break vectors
//! - Chip-conserving pot accounting and strict action legality
//! - A betting-round state machine that validates every decision;
//!   illegal provider actions are errors, never silently corrected
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::evaluator::{evaluate, HandRank};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 3c 2d").unwrap();
//! let eval = evaluate(&cards);
//! assert_eq!(eval.rank, HandRank::RoyalFlush);
//! assert_eq!(eval.rank.rank_number(), 1);
//! ```
//!
//! ## Playing a full hand
//! Seat players with [`table::HandState`], plug in a
//! [`provider::DecisionProvider`] per seat, and drive the streets:
//! ```
//! use holdem_engine::provider::{DecisionProvider, RandomProvider};
//! use holdem_engine::table::{HandState, Street, TableConfig};
//!
//! let mut hand = HandState::new_seeded(TableConfig::new(5, 1000), &["a", "b", "c"], 42);
//! let mut providers: Vec<Box<dyn DecisionProvider>> = (0..3)
//!     .map(|i| Box::new(RandomProvider::seeded(i)) as Box<dyn DecisionProvider>)
//!     .collect();
//!
//! let order = hand.setup_hand().unwrap();
//! hand.run_betting_round(&order, Street::Preflop, &mut providers).unwrap();
//! ```

pub mod actions;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod pot;
pub mod provider;
pub mod round;
pub mod showdown;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
