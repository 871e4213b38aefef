//! Xiangqi 规则引擎 CLI
//!
//! 两种模式：
//! 1. play：交互对局，读入坐标、落子、打印棋盘
//! 2. moves：从开局执行一串走法后列出当前方的合法走法

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use serde::Serialize;
use xiangqi_rules::{
    format_coord, parse_coord, parse_move, render_board, Color, Game, GameStatus,
};

#[derive(Parser)]
#[command(name = "xiangqi-rules")]
#[command(about = "Xiangqi (Chinese chess) rules engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 交互对局
    Play,

    /// 列出当前行棋方的合法走法
    Moves {
        /// 从开局起依次执行的走法（如 a1-a3）
        #[arg(long, value_name = "MOVE")]
        apply: Vec<String>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct MoveItem {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct MovesResponse {
    turn: String,
    total: usize,
    moves: Vec<MoveItem>,
}

fn color_to_str(color: Color) -> &'static str {
    if color == Color::Red {
        "red"
    } else {
        "black"
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play => run_play(),
        Commands::Moves { apply, json } => run_moves(&apply, json),
    }
}

/// moves 命令：重放走法序列并列出合法走法
fn run_moves(apply: &[String], json: bool) {
    let mut game = Game::new();

    for mv_str in apply {
        let (from, to) = match parse_move(mv_str) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = game.make_move(from, to) {
            eprintln!("Error at {}: {}", mv_str, e);
            std::process::exit(1);
        }
    }

    let turn = game.turn();
    let moves = game.legal_moves();

    if json {
        let response = MovesResponse {
            turn: color_to_str(turn).to_string(),
            total: moves.len(),
            moves: moves
                .iter()
                .map(|&(from, to)| MoveItem {
                    from: format_coord(from),
                    to: format_coord(to),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&response).unwrap());
    } else {
        println!("Legal moves for {} ({}):", color_to_str(turn), moves.len());
        for (from, to) in moves {
            println!("  {}-{}", format_coord(from), format_coord(to));
        }
    }
}

/// play 命令：交互式读子-落子-打印循环
fn run_play() {
    let mut game = Game::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", render_board(game.board()));
    println!("Red goes first!");

    while game.status() == GameStatus::InProgress {
        if game.is_in_check(game.turn()) {
            println!("{} is in check!", game.turn());
        }
        print!("{} to move (e.g. a1 a2): ", game.turn());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut tokens = line.split_whitespace();
        let (from_str, to_str) = match (tokens.next(), tokens.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                println!("Please enter a source and a destination coordinate");
                continue;
            }
        };

        let from = match parse_coord(from_str) {
            Ok(pos) => pos,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let to = match parse_coord(to_str) {
            Ok(pos) => pos,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match game.make_move(from, to) {
            Ok(()) => println!("{}", render_board(game.board())),
            Err(e) => println!("{}", e),
        }
    }

    if let (Some(winner), Some(kind)) = (game.status().winner(), game.win_kind()) {
        println!("{}! {} wins", kind, winner);
    }
}
