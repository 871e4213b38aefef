//! 坐标记法与棋盘渲染
//!
//! 代数坐标：列字母 a-i 对应 col 0-8，行号 1-10 对应 row 0-9，
//! 如 `a1` 是红方左下角、`i10` 是黑方右上角。核心引擎只接受
//! 整数坐标，字符串一律在这里转换并校验。

use std::fmt;

use thiserror::Error;

use crate::board::Board;
use crate::types::{Color, PieceKind, Position};

/// 坐标字符串超出可解析范围
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate: {0}")]
pub struct InvalidCoordinate(pub String);

/// 解析代数坐标（如 `a1`、`e5`、`i10`）
///
/// 列字母大小写均可；行号必须是 1-10。其余输入一律拒绝。
pub fn parse_coord(input: &str) -> Result<Position, InvalidCoordinate> {
    let s = input.trim();
    let err = || InvalidCoordinate(input.trim().to_string());

    let mut chars = s.chars();
    let file = chars.next().ok_or_else(err)?.to_ascii_lowercase();
    if !('a'..='i').contains(&file) {
        return Err(err());
    }
    let col = (file as u8 - b'a') as i8;

    let rank_str = chars.as_str();
    if rank_str.is_empty()
        || rank_str.len() > 2
        || !rank_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(err());
    }
    let rank: i8 = rank_str.parse().map_err(|_| err())?;
    if !(1..=10).contains(&rank) {
        return Err(err());
    }

    Ok(Position::new(rank - 1, col))
}

/// 格式化为代数坐标
pub fn format_coord(pos: Position) -> String {
    let file = (b'a' + pos.col as u8) as char;
    format!("{}{}", file, pos.row + 1)
}

/// 解析 `起点-终点` 形式的走法字符串（如 `a1-a2`）
///
/// 行号 10 存在，两个坐标直接拼接会产生歧义，所以用 `-` 分隔。
pub fn parse_move(input: &str) -> Result<(Position, Position), InvalidCoordinate> {
    let s = input.trim();
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| InvalidCoordinate(s.to_string()))?;
    Ok((parse_coord(from)?, parse_coord(to)?))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_coord(*self))
    }
}

fn piece_glyph(kind: PieceKind, color: Color) -> &'static str {
    match (color, kind) {
        (Color::Red, PieceKind::General) => "帅",
        (Color::Red, PieceKind::Guard) => "仕",
        (Color::Red, PieceKind::Elephant) => "相",
        (Color::Red, PieceKind::Horse) => "马",
        (Color::Red, PieceKind::Chariot) => "车",
        (Color::Red, PieceKind::Cannon) => "炮",
        (Color::Red, PieceKind::Pawn) => "兵",
        (Color::Black, PieceKind::General) => "将",
        (Color::Black, PieceKind::Guard) => "士",
        (Color::Black, PieceKind::Elephant) => "象",
        (Color::Black, PieceKind::Horse) => "馬",
        (Color::Black, PieceKind::Chariot) => "車",
        (Color::Black, PieceKind::Cannon) => "砲",
        (Color::Black, PieceKind::Pawn) => "卒",
    }
}

/// 渲染棋盘为多行文本
///
/// 黑方在上（行 10），红方在下（行 1），河界标在两军之间。
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("     a  b  c  d  e  f  g  h  i\n");

    for row in (0..10).rev() {
        if row == 4 {
            out.push_str("    ~~~~~~~~ 楚河  汉界 ~~~~~~~~\n");
        }
        out.push_str(&format!("{:>3} ", row + 1));
        for col in 0..9 {
            let pos = Position::new(row, col);
            match board.piece_at(pos) {
                Some(id) => {
                    let piece = board.piece(id);
                    out.push(' ');
                    out.push_str(piece_glyph(piece.kind, piece.color));
                }
                None => out.push_str(" ・"),
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord_corners() {
        assert_eq!(parse_coord("a1"), Ok(Position::new(0, 0)));
        assert_eq!(parse_coord("i1"), Ok(Position::new(0, 8)));
        assert_eq!(parse_coord("a10"), Ok(Position::new(9, 0)));
        assert_eq!(parse_coord("i10"), Ok(Position::new(9, 8)));
        assert_eq!(parse_coord("e5"), Ok(Position::new(4, 4)));
    }

    #[test]
    fn test_parse_coord_case_and_whitespace() {
        assert_eq!(parse_coord("E5"), Ok(Position::new(4, 4)));
        assert_eq!(parse_coord(" b2 "), Ok(Position::new(1, 1)));
    }

    #[test]
    fn test_parse_coord_rejects_out_of_range() {
        for bad in ["", "e", "5", "j1", "a0", "a11", "e55", "5e", "a1x", "字5"] {
            assert!(parse_coord(bad).is_err(), "should reject {:?}", bad);
        }
    }

    #[test]
    fn test_coord_roundtrip_all_squares() {
        for row in 0..10 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                assert_eq!(parse_coord(&format_coord(pos)), Ok(pos));
            }
        }
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_move("a1-a3"),
            Ok((Position::new(0, 0), Position::new(2, 0)))
        );
        assert_eq!(
            parse_move("e10-e9"),
            Ok((Position::new(9, 4), Position::new(8, 4)))
        );
        assert!(parse_move("a1a3").is_err());
        assert!(parse_move("a1-j3").is_err());
    }

    #[test]
    fn test_render_board_shape() {
        let board = Board::standard_setup();
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        // 表头 + 10 行 + 河界
        assert_eq!(lines.len(), 12);
        assert!(text.contains("楚河"));
        assert!(text.contains("帅"));
        assert!(text.contains("将"));
    }
}
