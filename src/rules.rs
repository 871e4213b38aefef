//! 走法规则
//!
//! 按兵种生成伪合法走法：只考虑几何、阻挡与吃子规则，不考虑走后
//! 己方是否被将军。合法性筛选见 [`crate::screen`]。

use crate::board::{Board, Piece, PieceId};
use crate::types::{Color, PieceKind, Position};

/// 生成一枚棋子的所有伪合法目标位置
///
/// 不修改棋盘，不调用筛选逻辑。所有兵种共享的前提：目标在棋盘内、
/// 目标不是己方棋子。
pub fn pseudo_legal_moves(board: &Board, id: PieceId) -> Vec<Position> {
    let piece = board.piece(id);
    match piece.kind {
        PieceKind::General => general_moves(board, piece),
        PieceKind::Guard => guard_moves(board, piece),
        PieceKind::Elephant => elephant_moves(board, piece),
        PieceKind::Horse => horse_moves(board, piece),
        PieceKind::Chariot => chariot_moves(board, piece),
        PieceKind::Cannon => cannon_moves(board, piece),
        PieceKind::Pawn => pawn_moves(board, piece),
    }
}

/// 检测某格子是否被某方攻击
///
/// 直接按定义重推：攻击方任一棋子的伪合法走法覆盖该格子即为被攻击。
pub fn is_square_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|id| pseudo_legal_moves(board, id).contains(&target))
}

#[inline]
fn can_move_to(board: &Board, piece: &Piece, pos: Position) -> bool {
    if !pos.is_valid() {
        return false;
    }
    match board.piece_at(pos) {
        None => true,
        Some(target) => board.piece(target).color != piece.color,
    }
}

fn general_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(5);
    let pos = piece.position;

    // 将帅走直线一步，不出九宫
    let directions: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    for (dr, dc) in directions {
        let new_pos = pos.offset(dr, dc);
        if new_pos.is_in_palace(piece.color) && can_move_to(board, piece, new_pos) {
            moves.push(new_pos);
        }
    }

    // 飞将：同列且中间无任何棋子时，可直取对方的将
    if let Some(enemy_general) = board.general_of(piece.color.opposite()) {
        let enemy_pos = board.piece(enemy_general).position;
        if !board.piece(enemy_general).captured && enemy_pos.col == pos.col {
            let min_row = pos.row.min(enemy_pos.row);
            let max_row = pos.row.max(enemy_pos.row);
            let blocked = ((min_row + 1)..max_row)
                .any(|row| board.has_piece(Position::new(row, pos.col)));
            if !blocked {
                moves.push(enemy_pos);
            }
        }
    }

    moves
}

fn guard_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(4);
    let pos = piece.position;

    // 士走斜线一步，不出九宫
    let directions: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    for (dr, dc) in directions {
        let new_pos = pos.offset(dr, dc);
        if new_pos.is_in_palace(piece.color) && can_move_to(board, piece, new_pos) {
            moves.push(new_pos);
        }
    }

    moves
}

fn elephant_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(4);
    let pos = piece.position;

    // 象走田字，象眼被塞则不通
    let directions: [((i8, i8), (i8, i8)); 4] = [
        ((2, 2), (1, 1)),
        ((2, -2), (1, -1)),
        ((-2, 2), (-1, 1)),
        ((-2, -2), (-1, -1)),
    ];
    for ((dr, dc), (er, ec)) in directions {
        let new_pos = pos.offset(dr, dc);
        let eye_pos = pos.offset(er, ec);

        // 象不能过河
        if !new_pos.is_on_own_side(piece.color) {
            continue;
        }
        if board.has_piece(eye_pos) {
            continue;
        }
        if new_pos.is_valid() && can_move_to(board, piece, new_pos) {
            moves.push(new_pos);
        }
    }

    moves
}

fn horse_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(8);
    let pos = piece.position;

    // 马走日字，马腿被绊则不通
    let directions: [((i8, i8), (i8, i8)); 8] = [
        ((2, 1), (1, 0)),
        ((2, -1), (1, 0)),
        ((-2, 1), (-1, 0)),
        ((-2, -1), (-1, 0)),
        ((1, 2), (0, 1)),
        ((1, -2), (0, -1)),
        ((-1, 2), (0, 1)),
        ((-1, -2), (0, -1)),
    ];
    for ((dr, dc), (lr, lc)) in directions {
        let new_pos = pos.offset(dr, dc);
        let leg_pos = pos.offset(lr, lc);

        if board.has_piece(leg_pos) {
            continue;
        }
        if new_pos.is_valid() && can_move_to(board, piece, new_pos) {
            moves.push(new_pos);
        }
    }

    moves
}

fn chariot_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(17);
    let pos = piece.position;

    // 车走直线任意距离，遇子即止，敌子可吃
    let directions: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    for (dr, dc) in directions {
        let mut new_pos = pos.offset(dr, dc);
        while new_pos.is_valid() {
            match board.piece_at(new_pos) {
                None => {
                    moves.push(new_pos);
                }
                Some(target) => {
                    if board.piece(target).color != piece.color {
                        moves.push(new_pos);
                    }
                    break;
                }
            }
            new_pos = new_pos.offset(dr, dc);
        }
    }

    moves
}

fn cannon_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(17);
    let pos = piece.position;

    // 炮平移同车，吃子必须隔恰好一个炮架
    let directions: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    for (dr, dc) in directions {
        let mut new_pos = pos.offset(dr, dc);
        let mut found_platform = false;

        while new_pos.is_valid() {
            match board.piece_at(new_pos) {
                None => {
                    if !found_platform {
                        moves.push(new_pos);
                    }
                }
                Some(target) => {
                    if !found_platform {
                        found_platform = true;
                    } else {
                        if board.piece(target).color != piece.color {
                            moves.push(new_pos);
                        }
                        break;
                    }
                }
            }
            new_pos = new_pos.offset(dr, dc);
        }
    }

    moves
}

fn pawn_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::with_capacity(3);
    let pos = piece.position;

    let is_red = piece.color == Color::Red;
    let forward = if is_red { 1 } else { -1 };
    let crossed_river = if is_red { pos.row >= 5 } else { pos.row <= 4 };

    // 只能向前，永不后退
    let forward_pos = pos.offset(forward, 0);
    if forward_pos.is_valid() && can_move_to(board, piece, forward_pos) {
        moves.push(forward_pos);
    }

    // 过河后可以横走
    if crossed_river {
        for dc in [-1, 1] {
            let side_pos = pos.offset(0, dc);
            if side_pos.is_valid() && can_move_to(board, piece, side_pos) {
                moves.push(side_pos);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(board: &Board, pos: Position) -> Vec<Position> {
        let id = board.piece_at(pos).expect("piece expected at position");
        pseudo_legal_moves(board, id)
    }

    #[test]
    fn test_pseudo_moves_in_bounds_and_never_onto_ally() {
        let board = Board::standard_setup();
        for id in board.live_pieces() {
            let color = board.piece(id).color;
            for to in pseudo_legal_moves(&board, id) {
                assert!(to.is_valid(), "move out of bounds: {:?}", to);
                if let Some(target) = board.piece_at(to) {
                    assert_ne!(board.piece(target).color, color, "move onto ally: {:?}", to);
                }
            }
        }
    }

    #[test]
    fn test_general_confined_to_palace() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::General, Position::new(0, 3));
        board.place(Color::Black, PieceKind::General, Position::new(9, 5));

        let moves = moves_of(&board, Position::new(0, 3));
        // 列 2 在九宫之外
        assert!(moves.contains(&Position::new(0, 4)));
        assert!(moves.contains(&Position::new(1, 3)));
        assert!(!moves.contains(&Position::new(0, 2)));
    }

    #[test]
    fn test_flying_general_on_open_column() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::General, Position::new(0, 4));
        board.place(Color::Black, PieceKind::General, Position::new(9, 4));

        assert!(moves_of(&board, Position::new(0, 4)).contains(&Position::new(9, 4)));
        assert!(moves_of(&board, Position::new(9, 4)).contains(&Position::new(0, 4)));
    }

    #[test]
    fn test_flying_general_blocked_by_any_piece() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::General, Position::new(0, 4));
        board.place(Color::Black, PieceKind::General, Position::new(9, 4));
        // 任何一方的棋子挡在中间都阻断飞将
        board.place(Color::Black, PieceKind::Pawn, Position::new(5, 4));

        assert!(!moves_of(&board, Position::new(0, 4)).contains(&Position::new(9, 4)));
        assert!(!moves_of(&board, Position::new(9, 4)).contains(&Position::new(0, 4)));
    }

    #[test]
    fn test_guard_diagonal_in_palace() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Guard, Position::new(0, 3));

        let moves = moves_of(&board, Position::new(0, 3));
        assert_eq!(moves, vec![Position::new(1, 4)]);
    }

    #[test]
    fn test_elephant_eye_block() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Elephant, Position::new(0, 2));

        let open = moves_of(&board, Position::new(0, 2));
        assert!(open.contains(&Position::new(2, 0)));
        assert!(open.contains(&Position::new(2, 4)));

        // 塞象眼后对应目标被移除
        board.place(Color::Black, PieceKind::Pawn, Position::new(1, 3));
        let blocked = moves_of(&board, Position::new(0, 2));
        assert!(blocked.contains(&Position::new(2, 0)));
        assert!(!blocked.contains(&Position::new(2, 4)));
    }

    #[test]
    fn test_elephant_cannot_cross_river() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Elephant, Position::new(4, 2));

        let moves = moves_of(&board, Position::new(4, 2));
        // 行 6 在河对岸
        assert!(!moves.contains(&Position::new(6, 0)));
        assert!(!moves.contains(&Position::new(6, 4)));
        assert!(moves.contains(&Position::new(2, 0)));
        assert!(moves.contains(&Position::new(2, 4)));
    }

    #[test]
    fn test_horse_leg_block() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Horse, Position::new(4, 4));

        assert_eq!(moves_of(&board, Position::new(4, 4)).len(), 8);

        // 绊住上方马腿，去掉 (6,3) 和 (6,5) 两个目标
        board.place(Color::Red, PieceKind::Pawn, Position::new(5, 4));
        let moves = moves_of(&board, Position::new(4, 4));
        assert_eq!(moves.len(), 6);
        assert!(!moves.contains(&Position::new(6, 3)));
        assert!(!moves.contains(&Position::new(6, 5)));
    }

    #[test]
    fn test_chariot_stops_at_first_piece() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Chariot, Position::new(0, 0));
        board.place(Color::Black, PieceKind::Pawn, Position::new(5, 0));
        board.place(Color::Red, PieceKind::Pawn, Position::new(0, 3));

        let moves = moves_of(&board, Position::new(0, 0));
        // 敌子格可吃，其后不可达
        assert!(moves.contains(&Position::new(5, 0)));
        assert!(!moves.contains(&Position::new(6, 0)));
        // 己方子格及其后都不可达
        assert!(moves.contains(&Position::new(0, 2)));
        assert!(!moves.contains(&Position::new(0, 3)));
        assert!(!moves.contains(&Position::new(0, 4)));
    }

    #[test]
    fn test_cannon_screen_capture_counts() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Cannon, Position::new(2, 4));
        board.place(Color::Black, PieceKind::Chariot, Position::new(8, 4));

        // 无炮架：不能吃
        assert!(!moves_of(&board, Position::new(2, 4)).contains(&Position::new(8, 4)));

        // 恰好一个炮架（己方子也算）：可以吃
        board.place(Color::Red, PieceKind::Pawn, Position::new(5, 4));
        assert!(moves_of(&board, Position::new(2, 4)).contains(&Position::new(8, 4)));

        // 两个炮架：不能吃
        board.place(Color::Black, PieceKind::Pawn, Position::new(6, 4));
        assert!(!moves_of(&board, Position::new(2, 4)).contains(&Position::new(8, 4)));
    }

    #[test]
    fn test_cannon_slides_like_chariot_without_capture() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Cannon, Position::new(2, 1));
        board.place(Color::Black, PieceKind::Pawn, Position::new(6, 1));

        let moves = moves_of(&board, Position::new(2, 1));
        // 平移在炮架前止步，炮架格本身不可落
        assert!(moves.contains(&Position::new(5, 1)));
        assert!(!moves.contains(&Position::new(6, 1)));
        assert!(!moves.contains(&Position::new(7, 1)));
    }

    #[test]
    fn test_pawn_forward_then_sideways_after_river() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Pawn, Position::new(3, 4));

        // 未过河：只能前进
        assert_eq!(moves_of(&board, Position::new(3, 4)), vec![Position::new(4, 4)]);

        let mut crossed = Board::empty();
        crossed.place(Color::Red, PieceKind::Pawn, Position::new(5, 4));
        let moves = moves_of(&crossed, Position::new(5, 4));
        assert!(moves.contains(&Position::new(6, 4)));
        assert!(moves.contains(&Position::new(5, 3)));
        assert!(moves.contains(&Position::new(5, 5)));
        // 永不后退
        assert!(!moves.contains(&Position::new(4, 4)));
    }

    #[test]
    fn test_black_pawn_direction() {
        let mut board = Board::empty();
        board.place(Color::Black, PieceKind::Pawn, Position::new(6, 0));

        // 黑卒向行号减小的方向前进，行 6 尚未过河
        assert_eq!(moves_of(&board, Position::new(6, 0)), vec![Position::new(5, 0)]);

        let mut crossed = Board::empty();
        crossed.place(Color::Black, PieceKind::Pawn, Position::new(4, 4));
        let moves = moves_of(&crossed, Position::new(4, 4));
        assert!(moves.contains(&Position::new(3, 4)));
        assert!(moves.contains(&Position::new(4, 3)));
        assert!(moves.contains(&Position::new(4, 5)));
    }

    #[test]
    fn test_square_attacked_rederivation() {
        let mut board = Board::empty();
        board.place(Color::Red, PieceKind::Chariot, Position::new(0, 4));
        board.place(Color::Black, PieceKind::General, Position::new(9, 4));

        assert!(is_square_attacked(&board, Position::new(9, 4), Color::Red));
        assert!(!is_square_attacked(&board, Position::new(9, 3), Color::Red));
    }
}
