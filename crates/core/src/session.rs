//! Session module - the game state machine
//!
//! A [`Session`] owns the board, the current and next pieces, the score and
//! the descent timer. It moves through three phases:
//!
//! ```text
//!   Idle --start--> Playing --spawn collision--> GameOver
//!                      ^                            |
//!                      +------ start / restart -----+
//! ```
//!
//! Everything runs on a single logical actor. Commands and timer ticks are
//! applied one at a time and each completes before the next is looked at.
//! Ticks are only honored while Playing and only for the handle the session
//! currently owns, so a tick that was already due when the game ended (or was
//! restarted) never touches the new state.

use crate::board::Board;
use crate::collision::collides;
use crate::generator::PieceGenerator;
use crate::merge::lock;
use crate::movement::{try_descend, try_move, try_rotate, Descent};
use crate::piece::Piece;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use crate::scoring;
use crate::snapshot::Snapshot;
use crate::types::{Difficulty, GameAction, Phase, Signal, DEFAULT_PLAYER_NAME};

/// What one descent step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not applied: the session is not Playing, or the tick was stale.
    Ignored,
    /// The current piece moved down one row.
    Descended,
    /// The piece locked and the next piece spawned.
    Locked { lines: u8 },
    /// The piece locked and the next piece had no room.
    GameOver { lines: u8 },
}

/// End-of-game report for score displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub player: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub lines: u32,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<S: Scheduler = ManualScheduler> {
    board: Board,
    current: Option<Piece>,
    next: Piece,
    generator: PieceGenerator,
    scheduler: S,
    /// The one armed descent timer, if any.
    timer: Option<TimerHandle>,
    phase: Phase,
    difficulty: Difficulty,
    player: String,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Cues for the audio collaborator, drained by `take_signals`.
    signals: Vec<Signal>,
}

impl<S: Scheduler> Session<S> {
    /// Create an idle session with a seeded piece generator
    pub fn new(seed: u64, scheduler: S) -> Self {
        Self::with_generator(PieceGenerator::new(seed), scheduler)
    }

    /// Create an idle session with the given piece generator
    pub fn with_generator(mut generator: PieceGenerator, scheduler: S) -> Self {
        let next = generator.next_piece();
        Self {
            board: Board::new(),
            current: None,
            next,
            generator,
            scheduler,
            timer: None,
            phase: Phase::Idle,
            difficulty: Difficulty::default(),
            player: DEFAULT_PLAYER_NAME.to_string(),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            signals: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True only between start and game over.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Handle of the armed descent timer.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Final score, available once the game is over.
    pub fn final_score(&self) -> Option<FinalScore> {
        (self.phase == Phase::GameOver).then(|| FinalScore {
            player: self.player.clone(),
            score: self.score,
            difficulty: self.difficulty,
            lines: self.lines,
        })
    }

    /// Take all signals emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.board.clone_from(&self.board);
        out.current = self.current;
        out.next = self.next;
        out.phase = self.phase;
        out.difficulty = self.difficulty;
        out.player.clear();
        out.player.push_str(&self.player);
        out.score = self.score;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new game from any phase.
    ///
    /// Clears the board and score, draws fresh current and next pieces and
    /// arms the descent timer for `difficulty`. An empty name becomes
    /// `"Player"`.
    pub fn start(&mut self, player: &str, difficulty: Difficulty) {
        self.cancel_timer();

        let player = player.trim();
        self.player.clear();
        self.player
            .push_str(if player.is_empty() { DEFAULT_PLAYER_NAME } else { player });
        self.difficulty = difficulty;

        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;

        self.current = Some(self.generator.next_piece());
        self.next = self.generator.next_piece();
        self.phase = Phase::Playing;

        self.arm_timer();
    }

    /// Start again with the previous player and difficulty.
    ///
    /// Only a finished game can be restarted. While Idle or Playing this does
    /// nothing and returns `false`; use [`Session::start`] to abandon a
    /// running game.
    pub fn restart(&mut self) -> bool {
        self.restart_with(self.difficulty)
    }

    /// Start again with the previous player and a new difficulty.
    pub fn restart_with(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        let player = std::mem::take(&mut self.player);
        self.start(&player, difficulty);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    /// Rotate the current piece clockwise. No wall kicks.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        match try_rotate(&current, &self.board) {
            Some(rotated) => {
                self.current = Some(rotated);
                self.signals.push(Signal::Rotate);
                true
            }
            None => false,
        }
    }

    /// Descend one row now, locking the piece if it cannot move.
    ///
    /// Shares the tick's lock/score/spawn logic but leaves the timer alone.
    pub fn soft_drop(&mut self) -> StepOutcome {
        if self.phase != Phase::Playing {
            return StepOutcome::Ignored;
        }
        self.step()
    }

    /// Apply a no-argument command. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.soft_drop() != StepOutcome::Ignored,
            GameAction::Restart => self.restart(),
        }
    }

    /// Add the points for one lock to the score.
    pub fn apply_score(&mut self, lines_cleared: usize) -> u32 {
        scoring::apply_score(&mut self.score, lines_cleared, self.difficulty)
    }

    /// Handle a fired descent timer.
    ///
    /// The phase and handle are checked before anything is mutated; stale or
    /// cancelled ticks are dropped. The next tick is armed only after this
    /// one has been fully applied, and only if the game is still running.
    pub fn on_timer(&mut self, handle: TimerHandle) -> StepOutcome {
        if self.phase != Phase::Playing || self.timer != Some(handle) {
            return StepOutcome::Ignored;
        }
        self.timer = None;

        let outcome = self.step();
        if self.phase == Phase::Playing {
            self.arm_timer();
        }
        outcome
    }

    /// Fire every timer the scheduler reports as due. Returns the number of
    /// ticks applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(handle) = self.scheduler.poll_due() {
            if self.on_timer(handle) != StepOutcome::Ignored {
                applied += 1;
            }
        }
        applied
    }

    fn shift(&mut self, d_col: i8) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        match try_move(&current, &self.board, d_col) {
            Some(moved) => {
                self.current = Some(moved);
                self.signals.push(Signal::Move);
                true
            }
            None => false,
        }
    }

    fn step(&mut self) -> StepOutcome {
        let Some(current) = self.current else {
            return StepOutcome::Ignored;
        };

        match try_descend(&current, &self.board) {
            Descent::Moved(lowered) => {
                self.current = Some(lowered);
                StepOutcome::Descended
            }
            Descent::Blocked => self.lock_and_spawn(current),
        }
    }

    fn lock_and_spawn(&mut self, piece: Piece) -> StepOutcome {
        let cleared = lock(&piece, &mut self.board);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        // At most BOARD_HEIGHT rows can clear at once.
        let lines = cleared as u8;
        if cleared > 0 {
            self.lines += cleared as u32;
            self.signals.push(Signal::LineClear { lines });
        }
        self.apply_score(cleared);

        let upcoming = self.generator.next_piece();
        let spawned = std::mem::replace(&mut self.next, upcoming);
        self.current = Some(spawned);

        if collides(&spawned, &self.board) {
            self.end_game();
            StepOutcome::GameOver { lines }
        } else {
            StepOutcome::Locked { lines }
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.cancel_timer();
        self.signals.push(Signal::GameOver);
    }

    fn arm_timer(&mut self) {
        self.timer = Some(self.scheduler.schedule(self.difficulty.interval_ms()));
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl Default for Session<ManualScheduler> {
    fn default() -> Self {
        Self::new(1, ManualScheduler::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, BOARD_WIDTH};

    fn playing(difficulty: Difficulty) -> Session {
        let mut session = Session::new(12345, ManualScheduler::new());
        session.start("tester", difficulty);
        session.take_signals();
        session
    }

    fn fill_row_except(board: &mut Board, row: usize, gaps: &[usize]) {
        for col in 0..BOARD_WIDTH {
            if !gaps.contains(&col) {
                board.set(row, col, Some(crate::types::Color::Blue));
            }
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::default();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.is_active());
        assert!(session.current().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.timer(), None);
        assert_eq!(session.final_score(), None);
    }

    #[test]
    fn test_start_arms_timer_for_difficulty() {
        let session = playing(Difficulty::Medium);
        assert!(session.is_active());
        assert!(session.current().is_some());
        assert_eq!(session.scheduler().pending(), 1);
        assert_eq!(session.scheduler().next_due_ms(), Some(500));
    }

    #[test]
    fn test_start_resets_state() {
        let mut session = playing(Difficulty::Easy);
        session.board.set(19, 0, Some(crate::types::Color::Red));
        session.score = 999;
        session.lines = 3;

        session.start("", Difficulty::Hard);

        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.player(), "Player");
        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.scheduler().pending(), 1);
    }

    #[test]
    fn test_commands_ignored_when_idle() {
        let mut session = Session::default();
        assert!(!session.move_left());
        assert!(!session.move_right());
        assert!(!session.rotate());
        assert_eq!(session.soft_drop(), StepOutcome::Ignored);
        assert!(!session.restart());
        assert!(session.take_signals().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_move_left_at_wall_fails_silently() {
        let mut session = playing(Difficulty::Easy);
        session.current = Some(Piece::at(PieceKind::O, 5, 0));

        assert!(!session.move_left());
        assert_eq!(session.current().unwrap().col, 0);
        assert!(session.take_signals().is_empty());
    }

    #[test]
    fn test_move_emits_signal() {
        let mut session = playing(Difficulty::Easy);
        session.current = Some(Piece::at(PieceKind::O, 5, 4));

        assert!(session.move_right());
        assert_eq!(session.current().unwrap().col, 5);
        assert_eq!(session.take_signals(), vec![Signal::Move]);
    }

    #[test]
    fn test_rotate_emits_signal_only_on_success() {
        let mut session = playing(Difficulty::Easy);
        session.current = Some(Piece::at(PieceKind::I, 5, 4));
        assert!(session.rotate());
        assert_eq!(session.take_signals(), vec![Signal::Rotate]);

        // Vertical I against the right wall cannot turn back.
        session.current = Some(Piece::at(PieceKind::I, 5, 9).rotated());
        assert!(!session.rotate());
        assert!(session.take_signals().is_empty());
    }

    #[test]
    fn test_tick_descends() {
        let mut session = playing(Difficulty::Easy);
        let row = session.current().unwrap().row;

        session.scheduler_mut().advance(1000);
        assert_eq!(session.pump(), 1);
        assert_eq!(session.current().unwrap().row, row + 1);
        // Re-armed relative to the completed tick.
        assert_eq!(session.scheduler().next_due_ms(), Some(2000));
    }

    #[test]
    fn test_tick_not_early() {
        let mut session = playing(Difficulty::Easy);
        session.scheduler_mut().advance(999);
        assert_eq!(session.pump(), 0);
        assert_eq!(session.current().unwrap().row, 0);
    }

    #[test]
    fn test_single_line_easy_scores_40() {
        let mut session = playing(Difficulty::Easy);
        fill_row_except(&mut session.board, 19, &[6, 7, 8, 9]);
        session.current = Some(Piece::at(PieceKind::I, 19, 6));

        let outcome = session.soft_drop();

        assert_eq!(outcome, StepOutcome::Locked { lines: 1 });
        assert_eq!(session.score(), 40);
        assert_eq!(session.lines(), 1);
        assert_eq!(
            session.take_signals(),
            vec![Signal::LineClear { lines: 1 }]
        );
    }

    #[test]
    fn test_two_lines_hard_scores_300() {
        let mut session = playing(Difficulty::Hard);
        fill_row_except(&mut session.board, 18, &[0, 1]);
        fill_row_except(&mut session.board, 19, &[0, 1]);
        session.current = Some(Piece::at(PieceKind::O, 18, 0));

        assert_eq!(session.soft_drop(), StepOutcome::Locked { lines: 2 });
        assert_eq!(session.score(), 300);
    }

    #[test]
    fn test_lock_without_clear_keeps_score_and_promotes_next() {
        let mut session = playing(Difficulty::Medium);
        session.current = Some(Piece::at(PieceKind::O, 18, 0));
        let next = session.next_piece();

        assert_eq!(session.soft_drop(), StepOutcome::Locked { lines: 0 });
        assert_eq!(session.score(), 0);
        assert_eq!(session.current(), Some(next));
        assert_eq!(session.pieces_locked(), 1);
        assert!(session.take_signals().is_empty());
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut session = playing(Difficulty::Easy);
        // Block the spawn rows without completing them.
        fill_row_except(&mut session.board, 0, &[9]);
        fill_row_except(&mut session.board, 1, &[9]);
        session.current = Some(Piece::at(PieceKind::O, 18, 0));

        let outcome = session.soft_drop();

        assert_eq!(outcome, StepOutcome::GameOver { lines: 0 });
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!session.is_active());
        assert_eq!(session.timer(), None);
        assert_eq!(session.scheduler().pending(), 0);
        assert_eq!(session.take_signals(), vec![Signal::GameOver]);

        let report = session.final_score().unwrap();
        assert_eq!(report.player, "tester");
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_stale_tick_after_game_over_is_discarded() {
        let mut session = playing(Difficulty::Easy);
        let handle = session.timer().unwrap();
        fill_row_except(&mut session.board, 0, &[9]);
        session.current = Some(Piece::at(PieceKind::O, 18, 0));
        session.soft_drop();
        assert_eq!(session.phase(), Phase::GameOver);

        let board = session.board().clone();
        assert_eq!(session.on_timer(handle), StepOutcome::Ignored);
        assert_eq!(session.board(), &board);

        session.scheduler_mut().advance(10_000);
        assert_eq!(session.pump(), 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut session = playing(Difficulty::Easy);
        session.current = Some(Piece::at(PieceKind::O, 10, 4));
        let timer = session.timer();

        assert!(!session.restart());
        assert!(!session.restart_with(Difficulty::Hard));
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.current().unwrap().row, 10);
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.timer(), timer);
    }

    #[test]
    fn test_restart_ignores_old_timer() {
        let mut session = playing(Difficulty::Easy);
        let old = session.timer().unwrap();
        session.phase = Phase::GameOver;

        assert!(session.restart());
        let new = session.timer().unwrap();
        assert_ne!(old, new);
        assert_eq!(session.on_timer(old), StepOutcome::Ignored);
        assert_eq!(session.scheduler().pending(), 1);
    }

    #[test]
    fn test_restart_from_game_over_keeps_player_and_difficulty() {
        let mut session = playing(Difficulty::Hard);
        session.phase = Phase::GameOver;
        session.cancel_timer();

        assert!(session.restart());
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.player(), "tester");
        assert_eq!(session.difficulty(), Difficulty::Hard);

        session.phase = Phase::GameOver;
        assert!(session.restart_with(Difficulty::Easy));
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(session.scheduler().next_due_ms(), Some(1000));
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut session = playing(Difficulty::Easy);
        session.phase = Phase::GameOver;
        let before = session.current();

        assert!(!session.move_left());
        assert!(!session.rotate());
        assert_eq!(session.soft_drop(), StepOutcome::Ignored);
        assert_eq!(session.current(), before);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut session = playing(Difficulty::Easy);
        session.current = Some(Piece::at(PieceKind::T, 5, 4));

        assert!(session.apply_action(GameAction::MoveLeft));
        assert!(session.apply_action(GameAction::MoveRight));
        assert!(session.apply_action(GameAction::Rotate));
        assert!(session.apply_action(GameAction::SoftDrop));
        assert_eq!(session.current().unwrap().row, 6);
        assert!(!session.apply_action(GameAction::Restart));
        assert_eq!(session.current().unwrap().row, 6);

        session.phase = Phase::GameOver;
        assert!(session.apply_action(GameAction::Restart));
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let session = playing(Difficulty::Medium);
        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.player, "tester");
        assert_eq!(snap.current, session.current());
        assert_eq!(snap.next, session.next_piece());
        assert_eq!(snap.difficulty, Difficulty::Medium);
        assert!(snap.is_active());
    }
}
