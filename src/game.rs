//! 对局状态机
//!
//! 持有棋盘、轮次与对局状态，驱动合法性筛选，推导将军/将死/困毙。

use thiserror::Error;

use crate::board::Board;
use crate::rules;
use crate::screen;
use crate::types::{Color, GameStatus, Position, WinKind};

/// 走子校验失败的原因
///
/// 全部可恢复，任何一种都不会改动棋盘或对局状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// 对局已经结束
    #[error("the game is already over")]
    GameAlreadyOver,
    /// 起点格子上没有棋子
    #[error("no piece on the source square")]
    EmptySource,
    /// 起点棋子不属于当前行棋方
    #[error("it is not that side's turn to move")]
    WrongTurn,
    /// 终点不在该棋子筛选后的合法走法中
    #[error("illegal destination for the selected piece")]
    IllegalDestination,
}

/// 一局象棋
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    win_kind: Option<WinKind>,
}

impl Game {
    /// 创建标准开局的新对局，红方先行
    pub fn new() -> Game {
        Game::from_position(Board::standard_setup(), Color::Red)
    }

    /// 从任意局面创建对局
    pub fn from_position(board: Board, turn: Color) -> Game {
        Game {
            board,
            turn,
            status: GameStatus::InProgress,
            win_kind: None,
        }
    }

    /// 获取棋盘（只读视图）
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前行棋方
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// 当前对局状态
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 终局方式（对局未结束时为 None）
    #[inline]
    pub fn win_kind(&self) -> Option<WinKind> {
        self.win_kind
    }

    /// 查询某方是否被将军
    ///
    /// 按定义重推：对方任一棋子的伪合法走法覆盖该方将的所在格。
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.board.general_of(color) {
            Some(general) => rules::is_square_attacked(
                &self.board,
                self.board.piece(general).position,
                color.opposite(),
            ),
            None => false,
        }
    }

    /// 列出当前行棋方筛选后的全部合法走法
    pub fn legal_moves(&mut self) -> Vec<(Position, Position)> {
        screen::screen(&mut self.board, self.turn);
        let mut moves = Vec::new();
        for id in self.board.pieces_of(self.turn).collect::<Vec<_>>() {
            let from = self.board.piece(id).position;
            for &to in &self.board.piece(id).legal_moves {
                moves.push((from, to));
            }
        }
        moves
    }

    /// 执行一步走子
    ///
    /// 校验依次为：对局是否已结束、起点是否有子、是否轮到该方、
    /// 终点是否在筛选后的合法走法中。校验通过后落子、换边，并对
    /// 新行棋方重新筛选以推导将军与终局。
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameAlreadyOver);
        }
        let id = self.board.piece_at(from).ok_or(MoveError::EmptySource)?;
        if self.board.piece(id).color != self.turn {
            return Err(MoveError::WrongTurn);
        }

        screen::screen(&mut self.board, self.turn);
        if !self.board.piece(id).legal_moves.contains(&to) {
            return Err(MoveError::IllegalDestination);
        }

        let mover = self.turn;
        let kind = self.board.piece(id).kind;
        let captured = self.board.apply_move(id, to);
        match captured {
            Some(victim) => log::debug!(
                "{} {} {}->{} captures {}",
                mover,
                kind,
                from,
                to,
                self.board.piece(victim).kind
            ),
            None => log::debug!("{} {} {}->{}", mover, kind, from, to),
        }

        self.turn = mover.opposite();

        // 对新行棋方重新筛选，推导将军与终局
        screen::screen(&mut self.board, self.turn);
        let in_check = self.is_in_check(self.turn);
        if screen::legal_move_count(&self.board, self.turn) == 0 {
            // 将死与困毙都判走子方获胜
            self.status = match mover {
                Color::Red => GameStatus::RedWins,
                Color::Black => GameStatus::BlackWins,
            };
            let win = if in_check {
                WinKind::Checkmate
            } else {
                WinKind::Stalemate
            };
            self.win_kind = Some(win);
            log::info!("game over: {} wins by {}", mover, win);
        } else if in_check {
            log::debug!("{} is in check", self.turn);
        }

        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
