//! 棋盘与棋子存储
//!
//! 棋子集中存放在一个固定的记录区（arena）中，以下标作为稳定句柄；
//! 棋盘格子只保存 `Option<PieceId>`。走子和吃子都只是下标的重新赋值，
//! 模拟/回退过程中不存在悬空引用。

use crate::types::{Color, PieceKind, Position};

/// 棋子句柄：记录区中的稳定下标
pub type PieceId = usize;

/// 棋子记录
///
/// 开局时创建一次，整局复用；被吃时只标记 `captured` 并解除格子引用，
/// 位置字段保留最后所在的格子。
#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    pub captured: bool,
    /// 筛选后的合法走法缓存，每次筛选整体重算，未重算前视为过期
    pub legal_moves: Vec<Position>,
}

lazy_static::lazy_static! {
    /// 标准开局布局
    static ref STARTING_LAYOUT: Vec<(Color, PieceKind, Position)> = {
        use PieceKind::*;
        let back_rank = [
            Chariot, Horse, Elephant, Guard, General, Guard, Elephant, Horse, Chariot,
        ];
        let mut layout = Vec::with_capacity(32);
        for (col, kind) in back_rank.iter().enumerate() {
            layout.push((Color::Red, *kind, Position::new(0, col as i8)));
            layout.push((Color::Black, *kind, Position::new(9, col as i8)));
        }
        for col in [1, 7] {
            layout.push((Color::Red, Cannon, Position::new(2, col)));
            layout.push((Color::Black, Cannon, Position::new(7, col)));
        }
        for col in [0, 2, 4, 6, 8] {
            layout.push((Color::Red, Pawn, Position::new(3, col)));
            layout.push((Color::Black, Pawn, Position::new(6, col)));
        }
        layout
    };
}

/// 棋盘：10 行 x 9 列的格子数组 + 棋子记录区
#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    squares: [Option<PieceId>; 90],
    /// 缓存双方将的句柄（红 0 / 黑 1），放子时记录
    generals: [Option<PieceId>; 2],
}

#[inline]
fn color_index(color: Color) -> usize {
    match color {
        Color::Red => 0,
        Color::Black => 1,
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Board {
        Board {
            pieces: Vec::with_capacity(32),
            squares: [None; 90],
            generals: [None, None],
        }
    }

    /// 创建标准开局棋盘
    pub fn standard_setup() -> Board {
        let mut board = Board::empty();
        for &(color, kind, pos) in STARTING_LAYOUT.iter() {
            board.place(color, kind, pos);
        }
        board
    }

    /// 放置一枚新棋子，返回其句柄
    ///
    /// 目标格子必须为空且在棋盘范围内。
    pub fn place(&mut self, color: Color, kind: PieceKind, pos: Position) -> PieceId {
        debug_assert!(pos.is_valid());
        debug_assert!(self.squares[pos.to_index()].is_none());

        let id = self.pieces.len();
        self.pieces.push(Piece {
            kind,
            color,
            position: pos,
            captured: false,
            legal_moves: Vec::new(),
        });
        self.squares[pos.to_index()] = Some(id);

        if kind == PieceKind::General {
            self.generals[color_index(color)] = Some(id);
        }
        id
    }

    /// 获取棋子记录
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id]
    }

    /// 获取某格子上的棋子句柄
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<PieceId> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()]
    }

    /// 检查格子上是否有棋子
    #[inline]
    pub fn has_piece(&self, pos: Position) -> bool {
        pos.is_valid() && self.squares[pos.to_index()].is_some()
    }

    /// 遍历场上（未被吃）的棋子句柄
    pub fn live_pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.captured)
            .map(|(id, _)| id)
    }

    /// 遍历某一方场上的棋子句柄
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(_, p)| !p.captured && p.color == color)
            .map(|(id, _)| id)
    }

    /// 找到某方将的句柄
    ///
    /// 将不会被真正吃掉（终局在此之前就已判出），句柄一经放置不再变化。
    #[inline]
    pub fn general_of(&self, color: Color) -> Option<PieceId> {
        self.generals[color_index(color)]
    }

    /// 执行走子，返回被吃棋子的句柄
    ///
    /// 不做任何规则检查，由上层保证目标合法。格子引用与棋子位置
    /// 字段在此同步更新，两者始终保持一致。
    pub fn apply_move(&mut self, id: PieceId, to: Position) -> Option<PieceId> {
        debug_assert!(to.is_valid());
        let from = self.pieces[id].position;

        let captured = self.squares[to.to_index()];
        if let Some(victim) = captured {
            debug_assert!(self.pieces[victim].color != self.pieces[id].color);
            self.pieces[victim].captured = true;
        }

        self.squares[from.to_index()] = None;
        self.squares[to.to_index()] = Some(id);
        self.pieces[id].position = to;

        captured
    }

    /// 回退一次走子，与 [`Board::apply_move`] 严格配对
    ///
    /// 被吃的棋子按原句柄原样恢复到目标格子上，棋盘回到走子前的
    /// 占用状态。
    pub fn revert_move(&mut self, id: PieceId, from: Position, captured: Option<PieceId>) {
        let to = self.pieces[id].position;

        self.squares[from.to_index()] = Some(id);
        self.pieces[id].position = from;

        self.squares[to.to_index()] = captured;
        if let Some(victim) = captured {
            self.pieces[victim].captured = false;
        }
    }
}
