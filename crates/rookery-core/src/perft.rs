//! Perft (performance test) for move generation correctness verification.

use crate::board::BoardState;
use crate::chess_move::{Destination, PromotionPiece};
use crate::movegen::all_legal_moves;
use crate::square::Square;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). A pawn reaching its last rank
/// counts once per promotion piece.
pub fn perft(state: &BoardState, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    all_legal_moves(state)
        .into_iter()
        .map(|(from, dest)| perft_after(state, from, dest, depth - 1))
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs such as `("e2e4", 20)`, sorted
/// alphabetically. Promotions are summed under their pawn move.
pub fn divide(state: &BoardState, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = all_legal_moves(state)
        .into_iter()
        .map(|(from, dest)| {
            let count = perft_after(state, from, dest, depth.saturating_sub(1));
            (format!("{from}{}", dest.to), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn perft_after(state: &BoardState, from: Square, dest: Destination, depth: usize) -> u64 {
    let child = state.make_move(from, dest);
    if child.pending_promotion().is_none() {
        return perft(&child, depth);
    }
    PromotionPiece::ALL
        .into_iter()
        .filter_map(|choice| child.promote(choice))
        .map(|promoted| perft(&promoted, depth))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::square::Square;
    use crate::testing::position;

    // --- Position 1: Starting position ---

    #[test]
    fn perft_startpos_depth_1() {
        let board = BoardState::starting_position();
        assert_eq!(perft(&board, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        let board = BoardState::starting_position();
        assert_eq!(perft(&board, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        let board = BoardState::starting_position();
        assert_eq!(perft(&board, 3), 8_902);
    }

    #[test]
    #[ignore] // slow
    fn perft_startpos_depth_4() {
        let board = BoardState::starting_position();
        assert_eq!(perft(&board, 4), 197_281);
    }

    #[test]
    fn divide_startpos_depth_2() {
        let board = BoardState::starting_position();
        let split = divide(&board, 2);
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, count)| *count == 20));
        assert_eq!(split[0].0, "a2a3");
    }

    // --- Position 2: Kiwipete ---
    // r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq

    fn kiwipete() -> BoardState {
        position(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            Color::White,
            CastleRights::ALL,
            None,
        )
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&kiwipete(), 2), 2_039);
    }

    #[test]
    #[ignore] // slow
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&kiwipete(), 3), 97_862);
    }

    // --- Position 3 ---
    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w -

    fn position3() -> BoardState {
        position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White, CastleRights::NONE, None)
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&position3(), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&position3(), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&position3(), 3), 2_812);
    }

    #[test]
    #[ignore] // slow
    fn perft_pos3_depth_4() {
        assert_eq!(perft(&position3(), 4), 43_238);
    }

    // --- Position 4 ---
    // r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq

    fn position4() -> BoardState {
        position(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
            Color::White,
            CastleRights::BLACK_BOTH,
            None,
        )
    }

    #[test]
    fn perft_pos4_depth_1() {
        assert_eq!(perft(&position4(), 1), 6);
    }

    #[test]
    fn perft_pos4_depth_2() {
        assert_eq!(perft(&position4(), 2), 264);
    }

    #[test]
    fn perft_pos4_depth_3() {
        assert_eq!(perft(&position4(), 3), 9_467);
    }

    // --- Position 5 ---
    // rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ

    fn position5() -> BoardState {
        position(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
            Color::White,
            CastleRights::WHITE_BOTH,
            None,
        )
    }

    #[test]
    fn perft_pos5_depth_1() {
        assert_eq!(perft(&position5(), 1), 44);
    }

    #[test]
    fn perft_pos5_depth_2() {
        assert_eq!(perft(&position5(), 2), 1_486);
    }

    // --- Reachable positions stay well formed ---

    /// Perft that also validates every snapshot it reaches, pending promotions included.
    fn validated_walk(state: &BoardState, depth: usize) -> u64 {
        if let Err(e) = state.validate() {
            panic!("{e} in {state:?}");
        }
        if depth == 0 {
            return 1;
        }
        all_legal_moves(state)
            .into_iter()
            .map(|(from, dest)| {
                let child = state.make_move(from, dest);
                if child.pending_promotion().is_none() {
                    return validated_walk(&child, depth - 1);
                }
                if let Err(e) = child.validate() {
                    panic!("{e} in {child:?}");
                }
                PromotionPiece::ALL
                    .into_iter()
                    .filter_map(|choice| child.promote(choice))
                    .map(|promoted| validated_walk(&promoted, depth - 1))
                    .sum()
            })
            .sum()
    }

    #[test]
    fn reachable_startpos_positions_validate() {
        assert_eq!(validated_walk(&BoardState::starting_position(), 3), 8_902);
    }

    #[test]
    fn reachable_kiwipete_positions_validate() {
        assert_eq!(validated_walk(&kiwipete(), 2), 2_039);
    }

    #[test]
    #[ignore] // slow
    fn reachable_kiwipete_positions_validate_depth_3() {
        assert_eq!(validated_walk(&kiwipete(), 3), 97_862);
    }

    #[test]
    fn reachable_promotion_positions_validate() {
        assert_eq!(validated_walk(&position4(), 3), 9_467);
        assert_eq!(validated_walk(&position5(), 2), 1_486);
    }

    // --- En passant ---

    #[test]
    fn perft_en_passant_position() {
        // 8/8/8/3pP3/8/8/8/k3K3 w - d6: five king moves, two pawn moves.
        let board = position("8/8/8/3pP3/8/8/8/k3K3", Color::White, CastleRights::NONE, Some(Square::D6));
        assert_eq!(perft(&board, 1), 7);
    }
}
