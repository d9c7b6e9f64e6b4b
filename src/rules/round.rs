//! Round transitions: refilling emptied halves and deciding game over.

use im::OrdSet;
use smallvec::SmallVec;
use tracing::debug;

use super::engine::GameResult;
use crate::core::{Board, GamePhase, Player, PlayerMap, RuleConfig};

/// What a refill did to one player's half.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refill {
    pub player: Player,
    /// Pits that received `refill_per_pit` shells.
    pub filled: SmallVec<[usize; 7]>,
    /// Shells taken from the reserve.
    pub shells_used: u32,
    /// Pits added to the unusable set by this refill.
    pub newly_unusable: SmallVec<[usize; 7]>,
}

impl Refill {
    /// Number of pits refilled.
    #[must_use]
    pub fn pits_fillable(&self) -> usize {
        self.filled.len()
    }
}

/// Output of `advance_round`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTransition {
    pub board: Board,
    pub scores: PlayerMap<u32>,
    pub unusable: PlayerMap<OrdSet<usize>>,
    /// `Playing` or `Ended`; never `RoundEnd`.
    pub phase: GamePhase,
    pub round: u32,
    /// One entry per emptied half, Player One first.
    pub refills: SmallVec<[Refill; 2]>,
}

impl RoundTransition {
    /// True when at least one half was refilled.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        !self.refills.is_empty()
    }
}

/// Does this board end the round?
#[must_use]
pub fn is_round_over(board: &Board) -> bool {
    Player::ALL.into_iter().any(|p| board.is_side_empty(p))
}

/// Refill every emptied half and decide whether play continues.
///
/// Pits are refilled left to right, skipping pits already unusable. Usable
/// pits the reserve cannot cover become unusable. When neither half is
/// empty the inputs come back unchanged with phase `Playing`.
#[must_use]
pub fn advance_round(
    board: &Board,
    scores: &PlayerMap<u32>,
    unusable: &PlayerMap<OrdSet<usize>>,
    round: u32,
    rules: &RuleConfig,
) -> RoundTransition {
    let mut next = RoundTransition {
        board: *board,
        scores: scores.clone(),
        unusable: unusable.clone(),
        phase: GamePhase::Playing,
        round,
        refills: SmallVec::new(),
    };

    let mut ended = false;
    for player in Player::ALL {
        if !board.is_side_empty(player) {
            continue;
        }
        let refill = refill_side(&mut next, player, rules);
        ended |= rules.end_threshold.ends_game(refill.pits_fillable());
        debug!(
            player = %player,
            filled = refill.pits_fillable(),
            reserve = next.scores[player],
            "refilled emptied half"
        );
        next.refills.push(refill);
    }

    if ended {
        next.phase = GamePhase::Ended;
    } else if next.is_boundary() {
        next.round += 1;
    }
    next
}

fn refill_side(next: &mut RoundTransition, player: Player, rules: &RuleConfig) -> Refill {
    let usable: SmallVec<[usize; 7]> = player
        .pits()
        .filter(|pit| !next.unusable[player].contains(pit))
        .collect();

    // A zero refill size fills nothing.
    let affordable = next.scores[player].checked_div(rules.refill_per_pit).unwrap_or(0) as usize;
    let pits_fillable = affordable.min(usable.len());

    let filled: SmallVec<[usize; 7]> = usable[..pits_fillable].into();
    for &pit in &filled {
        next.board[pit] = rules.refill_per_pit;
    }
    let shells_used = pits_fillable as u32 * rules.refill_per_pit;
    next.scores[player] -= shells_used;

    let newly_unusable: SmallVec<[usize; 7]> = usable[pits_fillable..].into();
    for &pit in &newly_unusable {
        next.unusable[player].insert(pit);
    }

    Refill {
        player,
        filled,
        shells_used,
        newly_unusable,
    }
}

/// Winner by reserve; equal reserves are a draw.
#[must_use]
pub fn decide_winner(scores: &PlayerMap<u32>) -> GameResult {
    let (one, two) = (scores[Player::One], scores[Player::Two]);
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => GameResult::Winner(Player::One),
        std::cmp::Ordering::Less => GameResult::Winner(Player::Two),
        std::cmp::Ordering::Equal => GameResult::Draw,
    }
}
