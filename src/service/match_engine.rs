use crate::models::game::*;
use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Points needed to win a set outright.
const SET_TARGET: u32 = 2;
/// A set is decided after this many plays at the latest.
const PLAYS_PER_SET: usize = 3;
/// Sets needed to win the match.
const SETS_TO_WIN: u32 = 2;

/// Verdict on the current set after a play has been appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetVerdict {
    Undecided,
    Won(Player),
    /// Three plays in and still level; the set restarts from scratch.
    Replay,
}

/// Match Engine - holds the authoritative game state and enforces the
/// scoring/phase state machine. All access goes through `get_state` and
/// `submit_move`; callers serialize access behind a mutex.
pub struct MatchEngine {
    turn: Player,
    pending: PendingMoves,
    current_set: SetState,
    sets: Score,
    history: Vec<MatchRecord>,
    phase: GamePhase,
    events: UnboundedSender<StateSnapshot>,
}

impl MatchEngine {
    /// Create a fresh engine. `events` is the engine's only outward path:
    /// a snapshot is pushed on it each time a play resolves.
    pub fn new(events: UnboundedSender<StateSnapshot>) -> Self {
        Self {
            turn: Player::One,
            pending: PendingMoves::default(),
            current_set: SetState::default(),
            sets: Score::default(),
            history: Vec::new(),
            phase: GamePhase::InProgress,
            events,
        }
    }

    // =============================================================================
    // QUERY STATE
    // =============================================================================

    /// Read-only view for one player: whose turn it is, that player's pending
    /// move, and the current phase. Never mutates state.
    pub fn get_state(&self, player: Player) -> PlayerView {
        PlayerView {
            is_turn: self.turn == player,
            last_move: self.pending.get(player),
            game_phase: self.phase,
        }
    }

    #[cfg(test)]
    pub fn match_history(&self) -> &[MatchRecord] {
        &self.history
    }

    // =============================================================================
    // SUBMIT MOVE
    // =============================================================================

    /// Record a move for `player`. When both moves are in, the play resolves,
    /// set and match scores advance, and the observer is notified. The turn
    /// toggles to the other player whether or not the play resolved.
    pub fn submit_move(&mut self, player: Player, mv: Move) {
        // A move after a completed match implicitly starts a new one.
        if self.phase.is_terminal() {
            info!("Move submitted after match completion, starting a new match");
            self.reset_match();
        }

        self.pending.record(player, mv);

        if let Some((move_one, move_two)) = self.pending.take_complete() {
            let snapshot = self.resolve_play(move_one, move_two, player.other());
            self.notify(snapshot);
        }

        self.turn = player.other();
    }

    /// Resolve the completed pair: score the play, advance the set and match
    /// state machines, and build the snapshot for the observer.
    fn resolve_play(&mut self, move_one: Move, move_two: Move, next_player: Player) -> StateSnapshot {
        let play = Play::resolve(move_one, move_two);
        if let PlayWinner::Player(winner) = play.winner {
            self.current_set.points.award(winner);
        }
        self.current_set.plays.push(play.clone());

        info!(
            move_one = %play.move_one,
            move_two = %play.move_two,
            winner = play.winner.code(),
            set_points = %self.current_set.points,
            "Play resolved"
        );

        let mut set_winner = None;
        let mut set_replayed = false;
        match self.set_verdict() {
            SetVerdict::Won(winner) => {
                self.sets.award(winner);
                self.set_phase(GamePhase::SetComplete);
                set_winner = Some(winner);

                if self.sets.get(winner) >= SETS_TO_WIN {
                    // The final set stays in place until the implicit reset on
                    // the next submission, so the match-complete snapshot
                    // carries the winning set's plays and points.
                    self.set_phase(GamePhase::MatchComplete);
                    self.history.push(MatchRecord {
                        timestamp: Utc::now(),
                        winner,
                        sets: self.sets,
                    });
                    info!(
                        winner = %winner,
                        sets = %self.sets,
                        matches_played = self.history.len(),
                        "Match complete"
                    );
                } else {
                    info!(winner = %winner, sets = %self.sets, "Set complete, starting next set");
                    self.current_set = SetState::default();
                    self.set_phase(GamePhase::InProgress);
                }
            }
            SetVerdict::Replay => {
                warn!(
                    plays = PLAYS_PER_SET,
                    points = %self.current_set.points,
                    "Set still level after final play, replaying the set"
                );
                self.current_set = SetState::default();
                set_replayed = true;
            }
            SetVerdict::Undecided => {}
        }

        StateSnapshot {
            play,
            current_set: self.current_set.clone(),
            sets: self.sets,
            game_phase: self.phase,
            next_player,
            set_winner,
            set_replayed,
        }
    }

    /// First to `SET_TARGET` points wins outright; otherwise, once
    /// `PLAYS_PER_SET` plays are in, the leading side takes the set and a
    /// level score forces a replay.
    fn set_verdict(&self) -> SetVerdict {
        let points = self.current_set.points;
        if points.one >= SET_TARGET {
            SetVerdict::Won(Player::One)
        } else if points.two >= SET_TARGET {
            SetVerdict::Won(Player::Two)
        } else if self.current_set.plays.len() >= PLAYS_PER_SET {
            match points.leader() {
                Some(leader) => SetVerdict::Won(leader),
                None => SetVerdict::Replay,
            }
        } else {
            SetVerdict::Undecided
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        debug_assert!(
            self.phase.can_transition_to(to),
            "invalid phase transition {} -> {}",
            self.phase,
            to
        );
        self.phase = to;
    }

    fn reset_match(&mut self) {
        self.sets = Score::default();
        self.current_set = SetState::default();
        self.pending.clear();
        self.set_phase(GamePhase::InProgress);
    }

    /// Hand the snapshot to the observer. Unbounded send, never blocks; a
    /// closed channel only means nobody is watching.
    fn notify(&self, snapshot: StateSnapshot) {
        if self.events.send(snapshot).is_err() {
            debug!("Observer channel closed, snapshot dropped");
        }
    }
}
