//! Sowing, relay and capture.
//!
//! A move runs to a fixed point without interruption:
//!
//! ```text
//! Sowing → (RelayCheck → Sowing)* → TerminalCaptureCheck → TurnComplete
//! ```
//!
//! The chain is bounded by `RuleConfig::relay_limit`, so `apply_move`
//! always returns.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{
    Board, Capture, CaptureKind, CaptureRule, MoveResult, Player, PlayerMap, RuleConfig, SowLeg,
};

/// Resolve a pick. The move must already have passed validation.
#[must_use]
pub fn apply_move(
    board: &Board,
    scores: &PlayerMap<u32>,
    turn: Player,
    pit: usize,
    rules: &RuleConfig,
) -> MoveResult {
    let mut sow = Sowing {
        board: *board,
        scores: scores.clone(),
        captures: SmallVec::new(),
        four_shell: rules.capture_rule == CaptureRule::FourShell,
    };
    let mut legs: SmallVec<[SowLeg; 4]> = SmallVec::new();
    let mut sow_steps = 0;
    let mut relay_capped = false;

    let mut from = pit;
    let landing = loop {
        let in_hand = sow.board.take(from);
        let landing = sow.run(from, in_hand);
        sow_steps += in_hand;
        legs.push(SowLeg {
            from,
            shells: in_hand,
            landing,
        });
        trace!(from, shells = in_hand, landing, "sow leg");

        // Landing pit was empty before the last shell, or was just captured.
        if sow.board[landing] <= 1 {
            break landing;
        }
        if legs.len() - 1 >= rules.relay_limit as usize {
            warn!(pit, legs = legs.len(), "relay limit reached, ending move");
            relay_capped = true;
            break landing;
        }
        from = landing;
    };

    if rules.capture_rule == CaptureRule::NextOrOpposite && !relay_capped && sow.board[landing] == 1 {
        sow.terminal_capture(landing, turn);
    }

    MoveResult {
        player: turn,
        pit,
        board: sow.board,
        captures: sow.captures,
        landing,
        scores: sow.scores,
        legs,
        sow_steps,
        relay_capped,
    }
}

/// Working copy of the board for one move.
struct Sowing {
    board: Board,
    scores: PlayerMap<u32>,
    captures: SmallVec<[Capture; 4]>,
    four_shell: bool,
}

impl Sowing {
    /// Drop `shells` one per pit after `from`; return the last pit reached.
    fn run(&mut self, from: usize, shells: u32) -> usize {
        let mut pit = from;
        for _ in 0..shells {
            pit = Board::next(pit);
            self.board[pit] += 1;

            if self.four_shell && self.board[pit] == 4 {
                let owner = Board::owner(pit);
                self.capture(pit, owner, CaptureKind::FourShell);
            }
        }
        pit
    }

    fn terminal_capture(&mut self, landing: usize, mover: Player) {
        let next = Board::next(landing);
        if self.board[next] > 0 {
            self.capture(next, mover, CaptureKind::NextPit);
            return;
        }

        let opposite = Board::opposite(next);
        if self.board[opposite] > 0 {
            self.capture(opposite, mover, CaptureKind::OppositePit);
        }
    }

    fn capture(&mut self, pit: usize, to: Player, kind: CaptureKind) {
        let shells = self.board.take(pit);
        self.scores[to] += shells;
        self.captures.push(Capture {
            pit,
            shells,
            credited_to: to,
            kind,
        });
        trace!(pit, shells, player = %to, ?kind, "capture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_scores() -> PlayerMap<u32> {
        PlayerMap::with_value(0)
    }

    fn play(pits: [u32; 14], pit: usize, rules: &RuleConfig) -> MoveResult {
        apply_move(&Board::from_pits(pits), &zero_scores(), Player::One, pit, rules)
    }

    #[test]
    fn test_opening_first_leg_has_no_capture() {
        let result = play([5; 14], 2, &RuleConfig::default());

        let first = result.legs[0];
        assert_eq!(first, SowLeg { from: 2, shells: 5, landing: 7 });
        // Pits 3-7 each went 5 -> 6 in the first leg; pit 7 then relays.
        assert_eq!(result.legs[1], SowLeg { from: 7, shells: 6, landing: 13 });
    }

    #[test]
    fn test_opening_full_relay_chain() {
        let result = play([5; 14], 2, &RuleConfig::default());

        let legs: Vec<_> = result.legs.iter().map(|l| (l.from, l.shells, l.landing)).collect();
        assert_eq!(legs, vec![(2, 5, 7), (7, 6, 13), (13, 6, 5), (5, 7, 12), (12, 7, 5)]);
        assert_eq!(result.sow_steps, 31);
        assert_eq!(result.landing, 5);

        assert_eq!(result.captures.len(), 1);
        assert_eq!(
            result.captures[0],
            Capture { pit: 6, shells: 7, credited_to: Player::One, kind: CaptureKind::NextPit }
        );
        assert_eq!(result.board.pits(), &[7, 7, 2, 8, 8, 1, 0, 1, 7, 7, 7, 7, 0, 1]);
        assert_eq!(result.scores[Player::One], 7);
        assert_eq!(result.scores[Player::Two], 0);
        assert!(!result.relay_capped);
    }

    #[test]
    fn test_land_in_empty_captures_next_pit() {
        let result = play([5, 5, 1, 0, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5], 2, &RuleConfig::default());

        assert_eq!(result.landing, 3);
        assert_eq!(result.relay_count(), 0);
        assert_eq!(result.board[3], 1);
        assert_eq!(result.board[4], 0);
        assert_eq!(result.captured_pits().collect::<Vec<_>>(), vec![4]);
        assert_eq!(result.scores[Player::One], 5);
        assert_eq!(result.captures[0].kind, CaptureKind::NextPit);
    }

    #[test]
    fn test_land_in_empty_with_empty_next_captures_opposite() {
        let result = play([5, 5, 1, 0, 0, 5, 5, 5, 5, 5, 5, 5, 5, 5], 2, &RuleConfig::default());

        // Next pit 4 is empty, so pit 11 (opposite 4) is taken.
        assert_eq!(result.captured_pits().collect::<Vec<_>>(), vec![11]);
        assert_eq!(result.board[11], 0);
        assert_eq!(result.scores[Player::One], 5);
        assert_eq!(result.captures[0].kind, CaptureKind::OppositePit);
    }

    #[test]
    fn test_land_in_empty_with_nothing_to_capture() {
        let result = play([5, 5, 1, 0, 0, 5, 5, 5, 5, 5, 5, 0, 5, 5], 2, &RuleConfig::default());

        assert!(result.captures.is_empty());
        assert_eq!(result.scores, zero_scores());
        assert_eq!(result.board[3], 1);
    }

    #[test]
    fn test_tutorial_position_relays_to_capture() {
        let result = play([5, 5, 1, 5, 0, 5, 5, 5, 5, 5, 3, 5, 5, 5], 2, &RuleConfig::default());

        assert_eq!(result.legs.len(), 6);
        assert_eq!(result.landing, 7);
        assert_eq!(result.captured_pits().collect::<Vec<_>>(), vec![8]);
        assert_eq!(result.captured_by(Player::One), 7);
        assert_eq!(result.board.pits(), &[0, 1, 2, 2, 3, 8, 8, 1, 0, 1, 5, 7, 7, 7]);
    }

    #[test]
    fn test_four_shell_credits_pit_owner() {
        let rules = RuleConfig::new().with_capture_rule(CaptureRule::FourShell);
        let result = play([0, 0, 0, 0, 0, 3, 3, 3, 0, 0, 0, 0, 0, 0], 5, &rules);

        let captures: Vec<_> = result.captures.iter().map(|c| (c.pit, c.shells, c.credited_to)).collect();
        assert_eq!(captures, vec![(6, 4, Player::One), (7, 4, Player::Two)]);
        assert_eq!(result.scores[Player::One], 4);
        assert_eq!(result.scores[Player::Two], 4);
        assert_eq!(result.landing, 8);
        assert_eq!(result.board.total(), 1);
    }

    #[test]
    fn test_four_shell_capture_on_landing_ends_move() {
        let rules = RuleConfig::new().with_capture_rule(CaptureRule::FourShell);
        let result = play([0, 0, 0, 0, 0, 2, 0, 3, 0, 0, 0, 0, 0, 0], 5, &rules);

        assert_eq!(result.landing, 7);
        assert_eq!(result.board[7], 0);
        assert_eq!(result.relay_count(), 0);
        assert_eq!(result.captured_by(Player::Two), 4);
    }

    #[test]
    fn test_four_shell_has_no_terminal_capture() {
        let rules = RuleConfig::new().with_capture_rule(CaptureRule::FourShell);
        let result = play([5, 5, 1, 0, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5], 2, &rules);

        assert!(result.captures.is_empty());
        assert_eq!(result.board[4], 5);
    }

    #[test]
    fn test_variants_diverge_on_same_board() {
        let pits = [0, 0, 0, 0, 0, 2, 0, 3, 0, 0, 0, 0, 0, 0];
        let traditional = play(pits, 5, &RuleConfig::default());

        // Pit 7 reaches 4 and relays instead of being captured.
        assert_eq!(traditional.relay_count(), 1);
        assert_eq!(traditional.landing, 11);
        assert!(traditional.captures.is_empty());
    }

    #[test]
    fn test_relay_limit_caps_chain() {
        let rules = RuleConfig::new().with_relay_limit(1);
        let result = play([5; 14], 2, &rules);

        assert!(result.relay_capped);
        assert_eq!(result.legs.len(), 2);
        assert_eq!(result.landing, 13);
        assert!(result.captures.is_empty());
        assert_eq!(result.board.total(), 70);
    }

    #[test]
    fn test_default_limit_stops_endless_relay() {
        // Relaying from pit 1 here never lands in an empty pit.
        let cyclic = [1, 4, 0, 18, 0, 10, 0, 8, 5, 8, 1, 10, 3, 2];
        let rules = RuleConfig::default();
        let result = play(cyclic, 1, &rules);

        assert!(result.relay_capped);
        assert_eq!(result.legs.len(), rules.relay_limit as usize + 1);
        assert!(result.captures.is_empty());
        assert_eq!(result.scores, zero_scores());
        assert_eq!(result.board.pits(), &[0, 1, 9, 14, 2, 0, 6, 7, 6, 5, 4, 9, 6, 1]);
        assert_eq!(result.board.total(), 70);
    }

    #[test]
    fn test_input_board_untouched() {
        let board = Board::filled(5);
        let scores = zero_scores();
        let _ = apply_move(&board, &scores, Player::One, 2, &RuleConfig::default());
        assert_eq!(board, Board::filled(5));
    }
}
