use crate::actions::{Action, ActionKind, LegalActions};
use crate::cards::Card;
use crate::hand::HoleCards;
use crate::table::Street;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Read-only snapshot of everything a decision-provider may know when
/// choosing an action: its own cards and stack, the shared board, and
/// the pot state. Built fresh by the round controller for each turn.
#[derive(Debug, Clone)]
pub struct TableView {
    pub seat: usize,
    pub street: Street,
    pub hole: Option<HoleCards>,
    pub board: Vec<Card>,
    pub stack: u64,
    pub contribution: u64,
    pub pot_total: u64,
    pub current_bet: u64,
    pub cost_to_call: u64,
    /// The table minimum for an opening bet (the big blind).
    pub min_bet: u64,
    pub num_players: usize,
    pub players_remaining: usize,
}

/// The seam between the engine and whoever chooses actions: console
/// input, a bot, an LLM adapter. Implementations must return an action
/// from the legal set with a bounded amount; anything else is a contract
/// violation the round controller turns into an error.
pub trait DecisionProvider {
    fn decide(&mut self, view: &TableView, legal: &LegalActions) -> Action;
}

/// Replays a fixed sequence of actions; the deterministic provider used
/// throughout the engine's own tests. An exhausted script checks when it
/// can and folds otherwise, so a miscounted test script fails loudly in
/// assertions rather than hanging a round.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Action>,
}

impl ScriptedProvider {
    pub fn new<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        Self { script: actions.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide(&mut self, view: &TableView, legal: &LegalActions) -> Action {
        match self.script.pop_front() {
            Some(action) => action,
            None => {
                tracing::warn!(seat = view.seat, "scripted provider exhausted");
                if legal.contains(ActionKind::Check) {
                    Action::Check
                } else {
                    Action::Fold
                }
            }
        }
    }
}

/// Chooses uniformly among the legal kinds with plausible amounts.
/// Useful for smoke-testing full hands; not a poker player.
#[derive(Debug)]
pub struct RandomProvider {
    rng: StdRng,
}

impl RandomProvider {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl DecisionProvider for RandomProvider {
    fn decide(&mut self, view: &TableView, legal: &LegalActions) -> Action {
        let kinds: Vec<ActionKind> = legal.iter().collect();
        if kinds.is_empty() {
            return Action::Fold;
        }
        let kind = kinds[self.rng.random_range(0..kinds.len())];
        match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call(view.cost_to_call),
            ActionKind::AllIn => Action::AllIn(view.stack),
            ActionKind::Bet => {
                let max = view.stack;
                let min = view.min_bet.min(max);
                Action::Bet(self.rng.random_range(min..=max.min(min * 4).max(min)))
            }
            ActionKind::Raise => {
                let to_exceed = view.cost_to_call.saturating_add(view.min_bet);
                Action::Raise(to_exceed.min(view.stack))
            }
        }
    }
}
