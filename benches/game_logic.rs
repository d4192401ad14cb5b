use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{
    collides, lock, try_move, try_rotate, Board, ManualScheduler, Piece, PieceGenerator, Session,
};
use blockfall::types::{Color, Difficulty, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(12345, ManualScheduler::new());
    session.start("bench", Difficulty::Hard);

    c.bench_function("session_tick_200ms", |b| {
        b.iter(|| {
            if !session.is_active() {
                session.restart();
            }
            session.scheduler_mut().advance(black_box(200));
            session.pump();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows except the right column
            for row in 16..20 {
                for col in 0..9 {
                    board.set(row, col, Some(Color::Red));
                }
            }
            let piece = Piece::at(PieceKind::I, 16, 9).rotated();
            lock(black_box(&piece), &mut board)
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut generator = PieceGenerator::new(12345);
    let board = Board::new();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            let piece = generator.next_piece();
            collides(black_box(&piece), &board)
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::new(PieceKind::T);

    c.bench_function("try_move", |b| {
        b.iter(|| try_move(black_box(&piece), &board, 1))
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::at(PieceKind::L, 5, 4);

    c.bench_function("try_rotate", |b| {
        b.iter(|| try_rotate(black_box(&piece), &board))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_try_move,
    bench_try_rotate
);
criterion_main!(benches);
