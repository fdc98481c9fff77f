use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::hand::{Board, HandError, HoleCards};
use crate::pot::{Pot, PotError};
use crate::provider::DecisionProvider;
use crate::round::{BettingRound, RoundError};
use crate::showdown;
use rand::Rng;
use std::fmt;
use tracing::{debug, info};

/// Table-level knobs shared by every hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: u64,
    pub starting_stack: u64,
    pub allow_all_in: bool,
}

impl TableConfig {
    pub const fn new(small_blind: u64, starting_stack: u64) -> Self {
        Self { small_blind, starting_stack, allow_all_in: true }
    }

    /// The big blind is conventionally twice the small blind; it also
    /// serves as the minimum opening bet.
    pub const fn big_blind(&self) -> u64 {
        self.small_blind * 2
    }
}

/// The four community-card phases of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Community cards revealed when this street opens.
    pub const fn cards_revealed(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        write!(f, "{name}")
    }
}

/// A seated player: a stack of chips plus per-hand state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    stack: u64,
    hole: Option<HoleCards>,
    folded: bool,
    all_in: bool,
}

impl Player {
    pub fn new(name: String, stack: u64) -> Self {
        Self { name, stack, hole: None, folded: false, all_in: false }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Remove chips that have been committed to the pot. Callers must
    /// have bounds-checked `amount` against the stack already; the pot
    /// does this in [`Pot::add_to_pot`].
    pub(crate) fn take_from_stack(&mut self, amount: u64) {
        self.stack -= amount;
        if self.stack == 0 {
            self.all_in = true;
        }
    }

    pub(crate) fn add_to_stack(&mut self, amount: u64) {
        self.stack += amount;
    }

    pub(crate) fn give_hole(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    pub(crate) fn take_hole(&mut self) -> Option<HoleCards> {
        self.hole.take()
    }

    /// Clear per-hand state. A player with no chips sits out as folded
    /// so the turn order skips them.
    pub(crate) fn reset_for_new_hand(&mut self) {
        self.hole = None;
        self.all_in = false;
        self.folded = self.stack == 0;
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TableError {
    #[error("need at least two players with chips, found {0}")]
    NotEnoughPlayers(usize),
    #[error("no players remaining in the hand")]
    NoPlayersRemaining,
    #[error("showdown requires a full five-card board, found {0} cards")]
    IncompleteBoard(usize),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Everything one hand of hold'em touches: the deck, the board, the pot,
/// the seated players, and the rotating dealer button.
///
/// A hand flows through the lifecycle methods in order:
/// [`setup_hand`](HandState::setup_hand), a betting round per street with
/// [`reveal`](HandState::reveal) between them,
/// [`settle_hand`](HandState::settle_hand), then
/// [`end_hand`](HandState::end_hand) which sweeps every dealt card back
/// and reshuffles.
///
/// ```
/// use holdem_engine::provider::{DecisionProvider, RandomProvider};
/// use holdem_engine::table::{HandState, Street, TableConfig};
///
/// let config = TableConfig::new(5, 1000);
/// let mut hand = HandState::new_seeded(config, &["alice", "bob", "carol"], 7);
/// let mut providers: Vec<Box<dyn DecisionProvider>> = (0..3)
///     .map(|i| Box::new(RandomProvider::seeded(i)) as Box<dyn DecisionProvider>)
///     .collect();
///
/// let order = hand.setup_hand().unwrap();
/// hand.run_betting_round(&order, Street::Preflop, &mut providers).unwrap();
/// ```
#[derive(Debug)]
pub struct HandState {
    config: TableConfig,
    deck: Deck,
    players: Vec<Player>,
    board: Board,
    pot: Pot,
    dealer: usize,
    big_blind_seat: Option<usize>,
}

impl HandState {
    /// Seat the named players with the configured starting stack and a
    /// deterministically shuffled deck.
    pub fn new_seeded(config: TableConfig, names: &[&str], seed: u64) -> Self {
        let players = names
            .iter()
            .map(|n| Player::new((*n).to_string(), config.starting_stack))
            .collect();
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        Self {
            config,
            deck,
            players,
            board: Board::new(),
            pot: Pot::new(names.len()),
            dealer: 0,
            big_blind_seat: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    fn eligible(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        !p.is_folded() && p.stack() > 0
    }

    /// First seat after `from` (exclusive, wrapping) that can still play
    /// this hand. Bounded at one full lap.
    fn next_eligible(&self, from: usize) -> Result<usize, TableError> {
        let n = self.players.len();
        for offset in 1..=n {
            let seat = (from + offset) % n;
            if self.eligible(seat) {
                return Ok(seat);
            }
        }
        Err(TableError::NoPlayersRemaining)
    }

    /// Move the button to the next player who still has chips.
    pub fn advance_dealer(&mut self) -> Result<(), TableError> {
        let n = self.players.len();
        for offset in 1..=n {
            let seat = (self.dealer + offset) % n;
            if self.players[seat].stack() > 0 {
                self.dealer = seat;
                return Ok(());
            }
        }
        Err(TableError::NoPlayersRemaining)
    }

    /// Post blinds and deal hole cards, returning the preflop turn
    /// order. Blinds are clamped to the stack for short players. In a
    /// heads-up hand the dealer posts the small blind and acts first.
    pub fn setup_hand(&mut self) -> Result<Vec<usize>, TableError> {
        for player in &mut self.players {
            player.reset_for_new_hand();
        }
        let live = self.players.iter().filter(|p| !p.is_folded()).count();
        if live < 2 {
            return Err(TableError::NotEnoughPlayers(live));
        }

        self.pot = Pot::new(self.players.len());
        let heads_up = live == 2;
        let small_blind_seat = if heads_up && self.eligible(self.dealer) {
            self.dealer
        } else {
            self.next_eligible(self.dealer)?
        };
        let big_blind_seat = self.next_eligible(small_blind_seat)?;

        self.post_blind(small_blind_seat, self.config.small_blind)?;
        self.post_blind(big_blind_seat, self.config.big_blind())?;
        self.big_blind_seat = Some(big_blind_seat);
        debug!(
            dealer = self.dealer,
            small_blind_seat, big_blind_seat, pot = self.pot.total(), "blinds posted"
        );

        let n = self.players.len();
        for offset in 0..n {
            let seat = (small_blind_seat + offset) % n;
            if !self.players[seat].is_folded() {
                let hole = HoleCards::try_new(self.deck.deal()?, self.deck.deal()?)?;
                self.players[seat].give_hole(hole);
            }
        }

        let first = self.next_eligible(big_blind_seat)?;
        Ok(self.rotation_from(first))
    }

    fn post_blind(&mut self, seat: usize, blind: u64) -> Result<(), TableError> {
        let amount = blind.min(self.players[seat].stack());
        self.pot.add_to_pot(seat, &mut self.players[seat], amount)?;
        Ok(())
    }

    /// Seats in table order starting at `first`, skipping folded players.
    fn rotation_from(&self, first: usize) -> Vec<usize> {
        let n = self.players.len();
        (0..n)
            .map(|offset| (first + offset) % n)
            .filter(|&seat| !self.players[seat].is_folded())
            .collect()
    }

    /// Postflop action starts with the first live seat after the button.
    pub fn postflop_order(&self) -> Result<Vec<usize>, TableError> {
        let first = self.next_eligible(self.dealer)?;
        Ok(self.rotation_from(first))
    }

    /// Burn one card and reveal the street's community cards.
    pub fn reveal(&mut self, street: Street) -> Result<Vec<Card>, TableError> {
        self.deck.burn()?;
        let cards = self.deck.deal_n(street.cards_revealed())?;
        self.board.extend(cards.iter().copied());
        debug!(%street, board = %self.board, "community cards revealed");
        Ok(cards)
    }

    /// Run one betting round over `turn_order`, asking `providers`
    /// (indexed by seat) for each decision.
    pub fn run_betting_round(
        &mut self,
        turn_order: &[usize],
        street: Street,
        providers: &mut [Box<dyn DecisionProvider>],
    ) -> Result<(), TableError> {
        let bb_seat = if street == Street::Preflop { self.big_blind_seat } else { None };
        let mut round = BettingRound::new(
            &mut self.players,
            &mut self.pot,
            &self.board,
            &self.config,
            street,
            bb_seat,
        );
        round.run(turn_order, providers)?;
        Ok(())
    }

    /// Award the pot and return the winning seats. With two or more
    /// players left this is a showdown over the full board; if everyone
    /// else folded, the last player standing wins without one.
    pub fn settle_hand(&mut self) -> Result<Vec<usize>, TableError> {
        let live: Vec<usize> = (0..self.players.len())
            .filter(|&s| !self.players[s].is_folded())
            .collect();
        let winners = match live.len() {
            0 => return Err(TableError::NoPlayersRemaining),
            1 => live,
            _ => showdown::determine_winners(&self.players, &self.board)?,
        };
        let pot = std::mem::replace(&mut self.pot, Pot::new(self.players.len()));
        let total = pot.total();
        pot.resolve(&mut self.players, &winners)?;
        info!(?winners, total, "pot awarded");
        Ok(winners)
    }

    /// Sweep the board and every hole card back into the deck, verify
    /// all 52 cards are accounted for, and reshuffle for the next hand.
    pub fn end_hand<R: Rng>(&mut self, rng: &mut R) -> Result<(), TableError> {
        let swept = self.board.take_all();
        self.deck.discard(swept);
        for player in &mut self.players {
            if let Some(hole) = player.take_hole() {
                self.deck.discard(hole.as_array());
            }
        }
        self.big_blind_seat = None;
        self.deck.reset(rng)?;
        Ok(())
    }
}
