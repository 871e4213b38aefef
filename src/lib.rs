//! Xiangqi (中国象棋) 规则引擎
//!
//! 维护棋盘状态、按兵种生成走法、执行合法性筛选，并推导
//! 将军/将死/困毙与胜负。不含 AI 选着。

pub mod board;
pub mod game;
pub mod notation;
pub mod rules;
pub mod screen;
pub mod types;

pub use board::{Board, Piece, PieceId};
pub use game::{Game, MoveError};
pub use notation::{
    format_coord, parse_coord, parse_move, render_board, InvalidCoordinate,
};
pub use rules::{is_square_attacked, pseudo_legal_moves};
pub use screen::{legal_move_count, screen};
pub use types::{Color, GameStatus, PieceKind, Position, WinKind};
