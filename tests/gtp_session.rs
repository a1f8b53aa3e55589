//! End-to-end GTP sessions over in-memory streams.

use tengen::board::{Board, GridPoint};
use tengen::bot::RandomBot;
use tengen::gtp::GtpEngine;
use tengen::vertex::{Color, Coord};

fn session(input: &str) -> (GtpEngine, String) {
    let mut engine = GtpEngine::with_board(Board::new(19), RandomBot::with_seed(5));
    let mut out = Vec::new();
    engine.run(input.as_bytes(), &mut out).unwrap();
    (engine, String::from_utf8(out).unwrap())
}

/// Split a transcript into individual responses.
fn responses(transcript: &str) -> Vec<&str> {
    transcript
        .split_terminator("\n\n")
        .collect()
}

#[test]
fn test_ids_and_empty_payloads() {
    let (_, out) = session("1 protocol_version\n2 clear_board\nname\n");
    assert_eq!(out, "=1 2\n\n=2\n\n= tengen\n\n");
}

#[test]
fn test_comments_and_blank_lines_ignored() {
    let (_, out) = session("# setup\n\n   \n3 boardsize 9 # small board\n");
    assert_eq!(out, "=3\n\n");
}

#[test]
fn test_failures_use_question_mark() {
    let (_, out) = session("5 boardsize 25\n6 frobnicate\n7 play black\nplay b D4\n8 play w D4\n");
    assert_eq!(
        responses(&out),
        vec![
            "?5 unacceptable size",
            "?6 unknown command",
            "?7 syntax error",
            "=",
            "?8 illegal move",
        ]
    );
}

#[test]
fn test_capture_game() {
    let input = "\
boardsize 9
play b C3
play w C2
play w B3
play w D3
play w C4
captures white
is_legal b C3
";
    let (engine, out) = session(input);
    let replies = responses(&out);
    assert_eq!(replies[6], "= 1");
    // C3 is now empty but surrounded: suicide for black.
    assert_eq!(replies[7], "= 0");
    assert_eq!(engine.board().point(Coord::new(3, 3)), GridPoint::Empty);
}

#[test]
fn test_ko_over_gtp() {
    let input = "\
boardsize 9
play b D4
play b C5
play b D6
play b E5
play w E4
play w E6
play w F5
play w D5
is_legal b E5
play b E5
play b H8
is_legal b E5
";
    let (_, out) = session(input);
    let replies = responses(&out);
    assert_eq!(replies[8], "=");
    assert_eq!(replies[9], "= 0");
    assert_eq!(replies[10], "? illegal move");
    assert_eq!(replies[11], "=");
    assert_eq!(replies[12], "= 1");
}

#[test]
fn test_undo_restores_captured_stone() {
    let input = "\
boardsize 9
play b A2
play w A1
play b B1
undo
captures b
";
    let (engine, out) = session(input);
    assert_eq!(responses(&out)[5], "= 0");
    assert_eq!(
        engine.board().point(Coord::new(1, 1)),
        GridPoint::Stone(Color::White)
    );
    assert_eq!(
        engine.board().point(Coord::new(2, 1)),
        GridPoint::Empty
    );
}

#[test]
fn test_genmove_resigns_on_tiny_board() {
    // On a 1x1 board no point is ever legal.
    let (_, out) = session("boardsize 1\ngenmove b\n");
    assert_eq!(responses(&out)[1], "= resign");
}

#[test]
fn test_genmove_plays_on_board() {
    let (engine, out) = session("boardsize 5\ngenmove w\ngenmove b\n");
    let replies = responses(&out);
    let stones = engine
        .board()
        .coords()
        .filter(|&c| engine.board().point(c) != GridPoint::Empty)
        .count();
    assert_eq!(stones, 2);
    assert!(replies[1].starts_with("= "));
    assert!(replies[2].starts_with("= "));
}

#[test]
fn test_quit_stops_reading() {
    let (_, out) = session("quit\nname\n");
    assert_eq!(out, "=\n\n");
}

#[test]
fn test_showboard() {
    let (_, out) = session("boardsize 3\nplay b B2\nshowboard\n");
    let reply = responses(&out)[2];
    assert!(reply.starts_with("= \n   A B C\n"));
    assert!(reply.contains(" 2 . X . 2"));
}

#[test]
fn test_list_commands() {
    let (_, out) = session("list_commands\n");
    let listed: Vec<&str> = out
        .trim_start_matches("= ")
        .trim_end()
        .lines()
        .collect();
    for cmd in ["play", "genmove", "boardsize", "undo", "quit"] {
        assert!(listed.contains(&cmd), "missing {cmd}");
    }
}
