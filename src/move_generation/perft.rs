use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    pub deaths: usize,
    pub game_ends: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.deaths += rhs.deaths;
        self.game_ends += rhs.game_ends;
    }
}

/// Count leaf positions reachable in exactly `depth` half-moves.
///
/// Lines stop early at finished games; the finishing move is still counted
/// as a leaf.
pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    let mut sandbox = game_state.clone();
    perft_recurse(&mut sandbox, depth)
}

fn perft_recurse(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(game_state, game_state.active_player) {
        let saved = game_state.save_search_snapshot();
        let Some(record) = game_state.explore_move(mv) else {
            game_state.restore_search_snapshot(saved);
            continue;
        };

        if depth == 1 || game_state.game_over {
            total.nodes += 1;
            total.captures += usize::from(record.captured);
            total.promotions += usize::from(record.promoted);
            total.deaths += record.deaths.len();
            total.game_ends += usize::from(game_state.game_over);
        } else {
            total.merge(perft_recurse(game_state, depth - 1));
        }

        game_state.restore_search_snapshot(saved);
    }

    total
}
