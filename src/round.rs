use crate::actions::{legal_actions, Action, LegalActions};
use crate::hand::Board;
use crate::pot::{Pot, PotError};
use crate::provider::{DecisionProvider, TableView};
use crate::table::{Player, Street, TableConfig};
use std::collections::VecDeque;
use tracing::{debug, debug_span};

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RoundError {
    /// The round was asked to run with nobody left in the hand; the
    /// caller should have settled earlier.
    #[error("no players remaining to act")]
    NoPlayers,
    #[error("no decision provider for seat {0}")]
    NoProvider(usize),
    /// The provider returned an action outside the legal set. A contract
    /// violation, never coerced into a default.
    #[error("seat {seat} chose {action}, legal set is {legal}")]
    IllegalAction { seat: usize, action: Action, legal: LegalActions },
    #[error("seat {seat} gave a bad amount for {action}: {reason}")]
    IllegalAmount { seat: usize, action: Action, reason: &'static str },
    #[error(transparent)]
    Pot(#[from] PotError),
}

/// One betting round over a caller-supplied turn order.
///
/// Borrows the hand's players and pot; built by
/// [`HandState::run_betting_round`](crate::table::HandState::run_betting_round)
/// per street. A bet or raise reopens the round: every other live player
/// must act again before it can end. The round terminates when everyone
/// remaining has acted since the last raise, when at most one non-folded
/// player remains, or when all remaining players are all-in.
pub struct BettingRound<'a> {
    players: &'a mut [Player],
    pot: &'a mut Pot,
    board: &'a Board,
    config: &'a TableConfig,
    street: Street,
    big_blind_seat: Option<usize>,
}

impl<'a> BettingRound<'a> {
    pub fn new(
        players: &'a mut [Player],
        pot: &'a mut Pot,
        board: &'a Board,
        config: &'a TableConfig,
        street: Street,
        big_blind_seat: Option<usize>,
    ) -> Self {
        Self { players, pot, board, config, street, big_blind_seat }
    }

    /// Drive the round to completion, requesting one decision at a time
    /// from `providers` (indexed by seat).
    pub fn run(
        &mut self,
        turn_order: &[usize],
        providers: &mut [Box<dyn DecisionProvider>],
    ) -> Result<(), RoundError> {
        let span = debug_span!("betting_round", street = %self.street);
        let _enter = span.enter();

        if self.players_in_hand() == 0 {
            return Err(RoundError::NoPlayers);
        }

        let mut queue: VecDeque<usize> =
            turn_order.iter().copied().filter(|&s| self.can_act(s)).collect();

        while let Some(seat) = queue.pop_front() {
            if self.players_in_hand() <= 1 || self.all_remaining_all_in() {
                break;
            }
            // Folds and all-ins earlier in the round invalidate queued turns.
            if !self.can_act(seat) {
                continue;
            }

            let legal = legal_actions(
                seat,
                &self.players[seat],
                self.pot,
                self.config,
                self.is_big_blind_option(seat),
            );
            let view = self.view_for(seat);
            let provider =
                providers.get_mut(seat).ok_or(RoundError::NoProvider(seat))?.as_mut();
            let action = provider.decide(&view, &legal);
            debug!(seat, %action, cost = view.cost_to_call, "decision");

            if !legal.allows(action) {
                return Err(RoundError::IllegalAction { seat, action, legal });
            }
            if self.apply(seat, action)? {
                self.reopen_after(seat, &mut queue);
            }
        }
        debug!(pot = self.pot.total(), remaining = self.players_in_hand(), "round complete");
        Ok(())
    }

    /// Apply a validated-legal action. Returns true when the action
    /// raised the current bet and the round must reopen.
    fn apply(&mut self, seat: usize, action: Action) -> Result<bool, RoundError> {
        let bet_before = self.pot.current_bet();
        let cost = self.pot.cost_to_call(seat);
        let stack = self.players[seat].stack();
        match action {
            Action::Check => Ok(false),
            Action::Fold => {
                self.players[seat].fold();
                Ok(false)
            }
            Action::Call(amount) => {
                if amount != cost {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "a call must match the cost to call exactly",
                    });
                }
                self.pot.add_to_pot(seat, &mut self.players[seat], amount)?;
                Ok(false)
            }
            Action::Bet(amount) => {
                if amount > stack {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "bet exceeds stack",
                    });
                }
                if amount < self.config.big_blind() && amount != stack {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "opening bet is below the big blind",
                    });
                }
                self.pot.add_to_pot(seat, &mut self.players[seat], amount)?;
                Ok(true)
            }
            Action::Raise(amount) => {
                if amount > stack {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "raise exceeds stack",
                    });
                }
                if self.pot.contribution(seat) + amount <= bet_before {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "raise does not exceed the current bet",
                    });
                }
                self.pot.add_to_pot(seat, &mut self.players[seat], amount)?;
                Ok(true)
            }
            Action::AllIn(amount) => {
                if amount != stack {
                    return Err(RoundError::IllegalAmount {
                        seat,
                        action,
                        reason: "all-in must commit the whole stack",
                    });
                }
                self.pot.add_to_pot(seat, &mut self.players[seat], amount)?;
                // A short all-in plays as a call and does not reopen.
                Ok(self.pot.contribution(seat) > bet_before)
            }
        }
    }

    /// After a bet or raise, everyone else still live must act again,
    /// starting from the next seat in table order. The aggressor re-enters
    /// only if somebody raises after them.
    fn reopen_after(&self, raiser: usize, queue: &mut VecDeque<usize>) {
        queue.clear();
        let n = self.players.len();
        for offset in 1..n {
            let seat = (raiser + offset) % n;
            if self.can_act(seat) {
                queue.push_back(seat);
            }
        }
    }

    fn can_act(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        !p.is_folded() && !p.is_all_in()
    }

    fn players_in_hand(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded()).count()
    }

    fn all_remaining_all_in(&self) -> bool {
        self.players.iter().filter(|p| !p.is_folded()).all(|p| p.is_all_in())
    }

    fn is_big_blind_option(&self, seat: usize) -> bool {
        self.street == Street::Preflop
            && self.big_blind_seat == Some(seat)
            && self.pot.current_bet() == self.config.big_blind()
    }

    fn view_for(&self, seat: usize) -> TableView {
        let p = &self.players[seat];
        TableView {
            seat,
            street: self.street,
            hole: p.hole(),
            board: self.board.as_slice().to_vec(),
            stack: p.stack(),
            contribution: self.pot.contribution(seat),
            pot_total: self.pot.total(),
            current_bet: self.pot.current_bet(),
            cost_to_call: self.pot.cost_to_call(seat),
            min_bet: self.config.big_blind(),
            num_players: self.players.len(),
            players_remaining: self.players_in_hand(),
        }
    }
}
