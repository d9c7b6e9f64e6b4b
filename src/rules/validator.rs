//! Move validation.
//!
//! Pure functions of their inputs. The sowing engine trusts its caller, so
//! every pick must pass through here first.

use im::OrdSet;
use smallvec::SmallVec;

use crate::core::{Board, GamePhase, GameState, Player, PlayerMap, PIT_COUNT};

/// Why a pit cannot be picked.
///
/// Checks run in declaration order and the first failure is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IllegalMove {
    #[error("the game is not in live play")]
    NotPlaying,
    #[error("no such pit")]
    OutOfRange,
    #[error("pit belongs to the other player")]
    WrongSide,
    #[error("pit is unusable")]
    Unusable,
    #[error("pit is empty")]
    EmptyPit,
}

/// Validate a pick, reporting the first rule it breaks.
pub fn check_move(
    board: &Board,
    turn: Player,
    phase: GamePhase,
    unusable: &PlayerMap<OrdSet<usize>>,
    pit: usize,
) -> Result<(), IllegalMove> {
    if phase != GamePhase::Playing {
        return Err(IllegalMove::NotPlaying);
    }
    if pit >= PIT_COUNT {
        return Err(IllegalMove::OutOfRange);
    }
    if !turn.owns(pit) {
        return Err(IllegalMove::WrongSide);
    }
    if unusable[turn].contains(&pit) {
        return Err(IllegalMove::Unusable);
    }
    if board[pit] == 0 {
        return Err(IllegalMove::EmptyPit);
    }
    Ok(())
}

/// Can `turn` pick `pit`?
#[must_use]
pub fn is_legal(
    board: &Board,
    turn: Player,
    phase: GamePhase,
    unusable: &PlayerMap<OrdSet<usize>>,
    pit: usize,
) -> bool {
    check_move(board, turn, phase, unusable, pit).is_ok()
}

/// Legal picks for `turn`, ascending.
#[must_use]
pub fn legal_moves(
    board: &Board,
    turn: Player,
    phase: GamePhase,
    unusable: &PlayerMap<OrdSet<usize>>,
) -> SmallVec<[usize; 7]> {
    turn.pits()
        .filter(|&pit| is_legal(board, turn, phase, unusable, pit))
        .collect()
}

/// `check_move` against a snapshot, for the player whose turn it is.
pub fn check_state_move(state: &GameState, pit: usize) -> Result<(), IllegalMove> {
    check_move(&state.board, state.turn, state.phase, &state.unusable, pit)
}

/// `legal_moves` for the player to move in a snapshot.
#[must_use]
pub fn state_legal_moves(state: &GameState) -> SmallVec<[usize; 7]> {
    legal_moves(&state.board, state.turn, state.phase, &state.unusable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleConfig;

    fn opening() -> GameState {
        GameState::new(&RuleConfig::default())
    }

    #[test]
    fn test_opening_moves() {
        let state = opening();
        assert_eq!(state_legal_moves(&state).as_slice(), &[0, 1, 2, 3, 4, 5, 6]);

        let mut two = state.clone();
        two.turn = Player::Two;
        assert_eq!(state_legal_moves(&two).as_slice(), &[7, 8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_rejects_when_not_playing() {
        for phase in [GamePhase::RoundEnd, GamePhase::Ended] {
            let mut state = opening();
            state.phase = phase;
            assert_eq!(check_state_move(&state, 0), Err(IllegalMove::NotPlaying));
            assert!(state_legal_moves(&state).is_empty());
        }
    }

    #[test]
    fn test_rejects_other_side_and_out_of_range() {
        let state = opening();
        assert_eq!(check_state_move(&state, 7), Err(IllegalMove::WrongSide));
        assert_eq!(check_state_move(&state, 13), Err(IllegalMove::WrongSide));
        assert_eq!(check_state_move(&state, 14), Err(IllegalMove::OutOfRange));
    }

    #[test]
    fn test_rejects_unusable_before_empty() {
        let mut state = opening().with_unusable(&[4]);
        state.board[4] = 0;
        assert_eq!(check_state_move(&state, 4), Err(IllegalMove::Unusable));

        state.board[4] = 3;
        assert_eq!(check_state_move(&state, 4), Err(IllegalMove::Unusable));
    }

    #[test]
    fn test_rejects_empty_pit() {
        let mut state = opening();
        state.board[2] = 0;
        assert_eq!(check_state_move(&state, 2), Err(IllegalMove::EmptyPit));
        assert!(!state_legal_moves(&state).contains(&2));
    }

    #[test]
    fn test_validation_is_pure() {
        let state = opening().with_unusable(&[1]);
        let before = state.clone();

        let first: Vec<_> = (0..PIT_COUNT).map(|p| is_legal(&state.board, state.turn, state.phase, &state.unusable, p)).collect();
        let second: Vec<_> = (0..PIT_COUNT).map(|p| is_legal(&state.board, state.turn, state.phase, &state.unusable, p)).collect();

        assert_eq!(first, second);
        assert_eq!(state, before);
    }
}
