use crate::pot::Pot;
use crate::table::{Player, TableConfig};
use std::fmt;

/// A betting decision. The amount on `Bet`/`Raise` is the additional
/// chips pushed this turn; `Call` and `AllIn` carry the exact cost so a
/// provider cannot silently under-call. There is deliberately no string
/// form here: free-text coercion ("b", "be", ...) belongs to UI
/// collaborators, never to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call(u64),
    Bet(u64),
    Raise(u64),
    AllIn(u64),
}

impl Action {
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call(_) => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn(_) => ActionKind::AllIn,
        }
    }

    pub const fn amount(self) -> u64 {
        match self {
            Action::Fold | Action::Check => 0,
            Action::Call(n) | Action::Bet(n) | Action::Raise(n) | Action::AllIn(n) => n,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call(n) => write!(f, "call {n}"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise {n}"),
            Action::AllIn(n) => write!(f, "all-in {n}"),
        }
    }
}

/// Amount-less action discriminant, used for legality membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Bet,
        ActionKind::Raise,
        ActionKind::AllIn,
    ];

    const fn index(self) -> usize {
        match self {
            ActionKind::Fold => 0,
            ActionKind::Check => 1,
            ActionKind::Call => 2,
            ActionKind::Bet => 3,
            ActionKind::Raise => 4,
            ActionKind::AllIn => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of action kinds currently legal for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalActions {
    allowed: [bool; 6],
}

impl LegalActions {
    pub fn of(kinds: &[ActionKind]) -> Self {
        let mut set = Self::default();
        for &k in kinds {
            set.allowed[k.index()] = true;
        }
        set
    }

    fn all() -> Self {
        Self { allowed: [true; 6] }
    }

    fn remove(&mut self, kind: ActionKind) {
        self.allowed[kind.index()] = false;
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.allowed[kind.index()]
    }

    /// Whether `action`'s kind is in the set. Amount bounds are the
    /// round controller's concern.
    pub fn allows(&self, action: Action) -> bool {
        self.contains(action.kind())
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|k| self.contains(*k))
    }

    pub fn len(&self) -> usize {
        self.allowed.iter().filter(|&&a| a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.iter().all(|&a| !a)
    }
}

impl fmt::Display for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|k| k.name()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Compute the actions legal for `seat` right now. Pure function of the
/// pot, the player's stack, and table settings; the round controller
/// calls it once per decision point and `big_blind_option` is true only
/// for the pre-flop big blind facing an unraised pot.
///
/// `Bet` and `Raise` are mutually exclusive by construction: betting
/// opens a round, raising answers an existing bet.
pub fn legal_actions(
    seat: usize,
    player: &Player,
    pot: &Pot,
    config: &TableConfig,
    big_blind_option: bool,
) -> LegalActions {
    if big_blind_option {
        // The big blind's option: nobody raised, so there is nothing to
        // fold to or call; the blind may check it through or put in more.
        let mut set = LegalActions::of(&[ActionKind::Check, ActionKind::Raise, ActionKind::AllIn]);
        if !config.allow_all_in || player.stack() == 0 {
            set.remove(ActionKind::AllIn);
        }
        return set;
    }

    let mut set = LegalActions::all();
    let cost = pot.cost_to_call(seat);
    let current_bet = pot.current_bet();

    if cost == 0 {
        // Nothing to fold to and nothing to call.
        set.remove(ActionKind::Fold);
        set.remove(ActionKind::Call);
    } else {
        set.remove(ActionKind::Check);
        if player.stack() <= cost {
            // Matching the bet takes the whole stack; that is AllIn.
            set.remove(ActionKind::Call);
        }
    }
    if current_bet > 0 || cost > 0 {
        set.remove(ActionKind::Bet);
    }
    if set.contains(ActionKind::Bet) || pot.contribution(seat) + player.stack() <= current_bet {
        set.remove(ActionKind::Raise);
    }
    if !config.allow_all_in || player.stack() == 0 {
        set.remove(ActionKind::AllIn);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TableConfig {
        TableConfig::new(5, 1000)
    }

    fn player(stack: u64) -> Player {
        Player::new("p".into(), stack)
    }

    #[test]
    fn fresh_round_offers_bet_not_raise() {
        let p = player(100);
        let pot = Pot::new(2);
        let set = legal_actions(0, &p, &pot, &config(), false);
        assert!(set.contains(ActionKind::Check));
        assert!(set.contains(ActionKind::Bet));
        assert!(set.contains(ActionKind::AllIn));
        assert!(!set.contains(ActionKind::Fold));
        assert!(!set.contains(ActionKind::Call));
        assert!(!set.contains(ActionKind::Raise));
    }

    #[test]
    fn facing_a_bet_offers_fold_call_raise() {
        let mut players = vec![player(100), player(100)];
        let mut pot = Pot::new(2);
        pot.add_to_pot(0, &mut players[0], 20).unwrap();
        let set = legal_actions(1, &players[1], &pot, &config(), false);
        assert!(set.contains(ActionKind::Fold));
        assert!(set.contains(ActionKind::Call));
        assert!(set.contains(ActionKind::Raise));
        assert!(!set.contains(ActionKind::Check));
        assert!(!set.contains(ActionKind::Bet));
    }

    #[test]
    fn bet_and_raise_are_never_both_legal() {
        for stack in [0u64, 5, 30, 500] {
            for bet in [0u64, 10, 60] {
                let mut players = vec![player(1000), player(stack)];
                let mut pot = Pot::new(2);
                pot.add_to_pot(0, &mut players[0], bet).unwrap();
                let set = legal_actions(1, &players[1], &pot, &config(), false);
                assert!(
                    !(set.contains(ActionKind::Bet) && set.contains(ActionKind::Raise)),
                    "stack {stack}, bet {bet}: {set}"
                );
            }
        }
    }

    #[test]
    fn short_stack_cannot_call_a_covering_bet() {
        let mut players = vec![player(100), player(15)];
        let mut pot = Pot::new(2);
        pot.add_to_pot(0, &mut players[0], 20).unwrap();
        let set = legal_actions(1, &players[1], &pot, &config(), false);
        assert!(!set.contains(ActionKind::Call), "calling would be an implicit all-in");
        assert!(!set.contains(ActionKind::Raise));
        assert!(set.contains(ActionKind::Fold));
        assert!(set.contains(ActionKind::AllIn));
    }

    #[test]
    fn big_blind_option_is_check_raise_all_in_exactly() {
        let p = player(90);
        let mut players = vec![player(95), p];
        let mut pot = Pot::new(2);
        pot.add_to_pot(0, &mut players[0], 10).unwrap();
        pot.add_to_pot(1, &mut players[1], 10).unwrap();
        let set = legal_actions(1, &players[1], &pot, &config(), true);
        let kinds: Vec<ActionKind> = set.iter().collect();
        assert_eq!(kinds, vec![ActionKind::Check, ActionKind::Raise, ActionKind::AllIn]);
    }

    #[test]
    fn all_in_respects_table_settings() {
        let mut cfg = config();
        cfg.allow_all_in = false;
        let p = player(100);
        let pot = Pot::new(1);
        let set = legal_actions(0, &p, &pot, &cfg, false);
        assert!(!set.contains(ActionKind::AllIn));
        let set = legal_actions(0, &p, &pot, &cfg, true);
        assert!(!set.contains(ActionKind::AllIn));
    }

    #[test]
    fn display_lists_the_set() {
        let set = LegalActions::of(&[ActionKind::Fold, ActionKind::Call]);
        assert_eq!(set.to_string(), "[fold, call]");
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
