use crate::table::Player;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PotError {
    /// The requested contribution exceeds the player's stack. Amounts must
    /// be bounded by the legality resolver before they reach the pot.
    #[error("seat {seat} cannot contribute {amount}: stack is {stack}")]
    Overdraw { seat: usize, amount: u64, stack: u64 },
    #[error("pot resolved with no winners")]
    NoWinners,
    #[error("seat {0} out of range")]
    BadSeat(usize),
}

/// The single pot for one hand.
///
/// Tracks each seat's total contribution; `current_bet` is the highest
/// contribution and `cost_to_call` the gap to it. Side pots are not
/// modeled: when an all-in is called for less, later chips still flow
/// into this one pot, and `resolve` pays the whole pot out once.
#[derive(Debug, Clone)]
pub struct Pot {
    contributions: Vec<u64>,
}

impl Pot {
    pub fn new(num_seats: usize) -> Self {
        Self { contributions: vec![0; num_seats] }
    }

    pub fn total(&self) -> u64 {
        self.contributions.iter().sum()
    }

    /// The highest contribution any seat has made this hand.
    pub fn current_bet(&self) -> u64 {
        self.contributions.iter().copied().max().unwrap_or(0)
    }

    pub fn contribution(&self, seat: usize) -> u64 {
        self.contributions.get(seat).copied().unwrap_or(0)
    }

    /// Additional chips `seat` must put in to match the current bet.
    /// Zero when the seat already matches it; never negative.
    pub fn cost_to_call(&self, seat: usize) -> u64 {
        self.current_bet().saturating_sub(self.contribution(seat))
    }

    /// Move `amount` chips from the player's stack into the pot.
    ///
    /// Rejects overdraws before mutating anything; a player whose stack
    /// reaches zero is marked all-in.
    pub fn add_to_pot(
        &mut self,
        seat: usize,
        player: &mut Player,
        amount: u64,
    ) -> Result<(), PotError> {
        if seat >= self.contributions.len() {
            return Err(PotError::BadSeat(seat));
        }
        if amount > player.stack() {
            return Err(PotError::Overdraw { seat, amount, stack: player.stack() });
        }
        player.take_from_stack(amount);
        self.contributions[seat] += amount;
        Ok(())
    }

    /// Pay the whole pot to the winners, split evenly. Odd chips go to
    /// the winner listed first. Consumes the pot; a hand resolves its
    /// pot exactly once.
    pub fn resolve(self, players: &mut [Player], winners: &[usize]) -> Result<(), PotError> {
        if winners.is_empty() {
            return Err(PotError::NoWinners);
        }
        if let Some(&bad) = winners.iter().find(|&&w| w >= players.len()) {
            return Err(PotError::BadSeat(bad));
        }
        let total = self.total();
        let share = total / winners.len() as u64;
        let mut odd = total % winners.len() as u64;
        for &seat in winners {
            let mut payout = share;
            if odd > 0 {
                payout += 1;
                odd -= 1;
            }
            players[seat].add_to_stack(payout);
        }
        Ok(())
    }
}
