use chess_core::{
    Board, BoardState, Color, GameState, Layout, LayoutError, Move, MoveGenerator, Notation,
    PieceType, Square,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(state: &BoardState, text: &str) -> BoardState {
    let mv = Notation::parse_coordinate(&state.board, text).unwrap();
    assert!(state.is_legal(&mv), "{} should be legal", text);
    state.play(&mv)
}

/// 每一步都检查所有合法走法不会让己方王被将军
fn assert_legal_moves_are_safe(state: &BoardState) {
    for mv in state.legal_moves() {
        let next = state.board.apply(&mv);
        assert!(
            !MoveGenerator::is_in_check(&next, state.side_to_move),
            "{} leaves {} in check",
            mv,
            state.side_to_move
        );
    }
}

#[test]
fn initial_position_round_trip() {
    let state = BoardState::initial();
    assert_eq!(state.status(), GameState::InProgress);
    assert_eq!(state.legal_moves().len(), 20);

    let pawn_pushes = state
        .legal_moves()
        .iter()
        .filter(|m| m.piece.piece_type == PieceType::Pawn)
        .count();
    assert_eq!(pawn_pushes, 16);
}

#[test]
fn scholars_mate_sequence() {
    let mut state = BoardState::initial();
    for text in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
        state = play(&state, text);
        assert_eq!(state.status(), GameState::InProgress);
        assert_legal_moves_are_safe(&state);
    }

    state = play(&state, "h5f7");
    assert_eq!(state.side_to_move, Color::Black);
    assert!(MoveGenerator::is_in_check(&state.board, Color::Black));
    assert!(state.legal_moves().is_empty());
    assert_eq!(state.status(), GameState::Checkmate);
    assert_eq!(
        Layout::board_to_string(&state.board),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR"
    );
}

#[test]
fn lone_king_stalemate() {
    let state = Layout::parse("7k/5Q2/6K1/8/8/8/8/8 b").unwrap();
    assert!(!MoveGenerator::is_in_check(&state.board, Color::Black));
    assert_eq!(state.status(), GameState::Stalemate);
}

#[test]
fn castling_then_rook_is_relocated() {
    let mut state = Layout::parse("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w").unwrap();
    state = play(&state, "e1g1");
    state = play(&state, "e8c8");

    let board = &state.board;
    assert_eq!(board.get(sq("g1")).map(|p| p.piece_type), Some(PieceType::King));
    assert_eq!(board.get(sq("f1")).map(|p| p.piece_type), Some(PieceType::Rook));
    assert_eq!(board.get(sq("c8")).map(|p| p.piece_type), Some(PieceType::King));
    assert_eq!(board.get(sq("d8")).map(|p| p.piece_type), Some(PieceType::Rook));
    assert!(board.is_empty(sq("h1")));
    assert!(board.is_empty(sq("a8")));
}

#[test]
fn castling_rejected_when_transit_attacked() {
    // 黑象控制 f1，g1 本身不受攻击
    let state = Layout::parse("4k3/8/8/8/8/8/4b3/4K2R w").unwrap();
    let castle = Notation::parse_coordinate(&state.board, "e1g1").unwrap();
    assert!(MoveGenerator::is_square_attacked(&state.board, sq("f1"), Color::Black));
    assert!(!MoveGenerator::is_square_attacked(&state.board, sq("g1"), Color::Black));
    assert!(!state.is_legal(&castle));
}

#[test]
fn promotion_replaces_pawn() {
    let state = Layout::parse("8/4P3/8/4K3/8/8/3k4/8 w - - 0 1").unwrap();
    for piece_type in PieceType::PROMOTIONS {
        let mv = Move::new(sq("e7"), sq("e8"), state.board.get(sq("e7")).unwrap())
            .promoting_to(piece_type);
        assert!(state.is_legal(&mv));
        let next = state.play(&mv);
        let placed = next.board.get(sq("e8")).unwrap();
        assert_eq!(placed.piece_type, piece_type);
        assert_eq!(placed.color, Color::White);
    }
}

#[test]
fn first_move_playout_keeps_invariant() {
    let mut state = BoardState::initial();
    for _ in 0..40 {
        assert_legal_moves_are_safe(&state);
        let moves = state.legal_moves();
        let Some(mv) = moves.last() else {
            break;
        };
        state = state.play(mv);
    }
}

#[test]
fn malformed_layouts_are_rejected() {
    assert!(matches!(
        Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
        Err(LayoutError::RankCount { count: 7 })
    ));
    assert!(matches!(
        Board::from_layout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN"),
        Err(LayoutError::FileCount { .. })
    ));
    assert!(matches!(
        Board::from_layout("rnbqqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
        Err(LayoutError::KingCount {
            color: Color::Black,
            count: 0
        })
    ));
}

#[test]
fn perft_from_kiwipete_depth_two() {
    // 标准结果 2039 含一步吃过路兵（b4xa3），这里不支持吃过路兵
    let state = Layout::parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w").unwrap();
    assert_eq!(MoveGenerator::perft(&state.board, Color::White, 1), 48);
    assert_eq!(MoveGenerator::perft(&state.board, Color::White, 2), 2038);
}
