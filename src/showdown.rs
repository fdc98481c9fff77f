//! Showdown resolution: compare every live hand against the full board
//! and name the winners, keeping genuine ties explicit.

use crate::cards::Card;
use crate::evaluator::{evaluate, HandEval};
use crate::hand::Board;
use crate::table::{Player, TableError};
use tracing::debug;

/// Evaluate each non-folded player's best five-card hand from their two
/// hole cards plus the five community cards.
///
/// Returns `(seat, eval)` pairs in seat order. Requires a complete board.
pub fn showdown_evals(
    players: &[Player],
    board: &Board,
) -> Result<Vec<(usize, HandEval)>, TableError> {
    if board.len() != 5 {
        return Err(TableError::IncompleteBoard(board.len()));
    }
    let mut evals = Vec::new();
    for (seat, player) in players.iter().enumerate() {
        if player.is_folded() {
            continue;
        }
        let Some(hole) = player.hole() else { continue };
        let mut cards: Vec<Card> = Vec::with_capacity(7);
        cards.extend(hole.as_array());
        cards.extend(board.as_slice().iter().copied());
        let eval = evaluate(&cards);
        debug!(seat, name = player.name(), hand = eval.rank.name(), "showdown hand");
        evals.push((seat, eval));
    }
    if evals.is_empty() {
        return Err(TableError::NoPlayersRemaining);
    }
    Ok(evals)
}

/// The seats holding the best hand at showdown. Two or more seats means
/// a genuine tie: identical rank, hand values, and kickers.
pub fn determine_winners(players: &[Player], board: &Board) -> Result<Vec<usize>, TableError> {
    let evals = showdown_evals(players, board)?;
    let mut winners: Vec<usize> = Vec::new();
    let mut best: Option<HandEval> = None;
    for (seat, eval) in evals {
        match &best {
            None => {
                best = Some(eval);
                winners.push(seat);
            }
            Some(current) => match eval.cmp(current) {
                std::cmp::Ordering::Greater => {
                    best = Some(eval);
                    winners.clear();
                    winners.push(seat);
                }
                std::cmp::Ordering::Equal => winners.push(seat),
                std::cmp::Ordering::Less => {}
            },
        }
    }
    Ok(winners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::HandRank;

    fn player(name: &str, hole: &str) -> Player {
        let mut p = Player::new(name.to_string(), 1000);
        p.give_hole(hole.parse().unwrap());
        p
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn best_hand_wins() {
        let players = vec![
            player("set", "8c 8d"),
            player("top pair", "Ah Kd"),
        ];
        let b = board("8s Ad 2c 7h Jd");
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![0]);
    }

    #[test]
    fn folded_players_are_ignored() {
        let mut players = vec![
            player("nuts", "Ah Kh"),
            player("pair", "2c 2d"),
        ];
        players[0].fold();
        let b = board("Qh Jh Th 3s 4s");
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![1]);
    }

    #[test]
    fn a_played_board_ties_everyone() {
        let players = vec![
            player("a", "2c 3d"),
            player("b", "2d 3c"),
            player("c", "2h 3h"),
        ];
        // Board makes a broadway straight for all.
        let b = board("Ah Ks Qd Jc Ts");
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn quads_beat_a_full_house_on_a_paired_board() {
        let players = vec![
            player("quads", "9c 9s"),
            player("boat", "Kd Kc"),
        ];
        // The board pair of nines fills both hands: quads vs kings full.
        let b = board("9h 9d 2c 5s Kh");
        let evals = showdown_evals(&players, &b).unwrap();
        assert_eq!(evals[0].1.rank, HandRank::FourOfAKind);
        assert_eq!(evals[1].1.rank, HandRank::FullHouse);
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![0]);
    }

    #[test]
    fn the_wheel_beats_two_pair() {
        let players = vec![
            player("wheel", "2d 4d"),
            player("two pair", "9d 7d"),
        ];
        let b = board("3s 5s 7c 9c Ah");
        let evals = showdown_evals(&players, &b).unwrap();
        assert_eq!(evals[0].1.rank, HandRank::Straight);
        assert_eq!(evals[0].1.hand_values, vec![5, 4, 3, 2, 1]);
        assert_eq!(evals[1].1.rank, HandRank::TwoPair);
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![0]);
    }

    #[test]
    fn second_flush_card_decides_on_a_five_flush_board() {
        let players = vec![
            player("king high flush", "Kc 2d"),
            player("jack high flush", "Jc 2h"),
        ];
        // Everyone holds a club; the board ace tops both trimmed flushes,
        // so the second hand value carries the comparison.
        let b = board("Ac Qc 9c 6c 3c");
        let evals = showdown_evals(&players, &b).unwrap();
        assert_eq!(evals[0].1.hand_values, vec![14, 13, 12, 9, 6]);
        assert_eq!(evals[1].1.hand_values, vec![14, 12, 11, 9, 6]);
        assert_eq!(evals[0].1.hand_values[1], 13);
        assert_eq!(evals[1].1.hand_values[1], 12);
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![0]);
    }

    #[test]
    fn kickers_break_otherwise_equal_pairs() {
        let players = vec![
            player("weak kicker", "Ac 4d"),
            player("strong kicker", "Ad Kc"),
        ];
        let b = board("As 9h 7c 5d 2s");
        assert_eq!(determine_winners(&players, &b).unwrap(), vec![1]);
    }

    #[test]
    fn incomplete_board_is_rejected() {
        let players = vec![player("a", "Ah Kh"), player("b", "2c 2d")];
        let b = board("Qh Jh Th");
        assert!(matches!(
            determine_winners(&players, &b),
            Err(TableError::IncompleteBoard(3))
        ));
    }
}
