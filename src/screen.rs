//! 合法性筛选
//!
//! 把伪合法走法筛成合法走法：在棋盘副本上逐一试走，凡走后己方的将
//! 会被对方任一棋子的伪合法走法攻击到的，一律剔除。任何棋子的走动
//! 都可能解除或暴露将军（牵制、垫将、拦截），所以必须对每个候选
//! 走法做完整模拟，而不是只看将自己的走法。

use crate::board::{Board, PieceId};
use crate::rules;
use crate::types::Color;

/// 对某一方做合法性筛选，重算其每枚棋子的合法走法缓存
///
/// 模拟全部在进入时克隆出的副本上进行，每试完一个候选立即回退，
/// 保证每个候选都从真实局面出发；真实棋盘的占用状态不被触碰，
/// 只有各棋子的走法缓存被更新。
///
/// 复杂度为 O(己方走法数 x 对方走法数)，对 32 子的棋盘足够快，
/// 未做渐进优化。
pub fn screen(board: &mut Board, color: Color) {
    let ids: Vec<PieceId> = board.pieces_of(color).collect();
    let mut scratch = board.clone();

    for id in ids {
        let origin = scratch.piece(id).position;
        let candidates = rules::pseudo_legal_moves(&scratch, id);
        let mut survivors = Vec::with_capacity(candidates.len());

        for to in candidates {
            let captured = scratch.apply_move(id, to);

            // 将自己移动时取移动后的位置
            let exposed = match scratch.general_of(color) {
                Some(general) => rules::is_square_attacked(
                    &scratch,
                    scratch.piece(general).position,
                    color.opposite(),
                ),
                // 无将的构造局面：没有可暴露的对象
                None => false,
            };

            scratch.revert_move(id, origin, captured);

            if exposed {
                log::trace!("screen: reject {:?} -> {:?} (exposes general)", origin, to);
            } else {
                survivors.push(to);
            }
        }

        board.piece_mut(id).legal_moves = survivors;
    }
}

/// 统计某一方筛选后的合法走法总数
///
/// 读取的是缓存，调用前需先对该方执行 [`screen`]。
pub fn legal_move_count(board: &Board, color: Color) -> usize {
    board
        .pieces_of(color)
        .map(|id| board.piece(id).legal_moves.len())
        .sum()
}
