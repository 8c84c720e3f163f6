use crate::models::game::{GamePhase, PlayWinner, Player, StateSnapshot};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

/// Presentation seam: the observer drives one of these with every snapshot it
/// consumes. Implementations own all display concerns and never see the
/// engine itself.
pub trait Scoreboard {
    fn render(&mut self, snapshot: &StateSnapshot);
}

/// Default presentation: a structured-log scoreboard.
pub struct LogScoreboard;

impl Scoreboard for LogScoreboard {
    fn render(&mut self, snapshot: &StateSnapshot) {
        let status = match snapshot.game_phase {
            GamePhase::MatchComplete => match snapshot.sets.leader() {
                Some(winner) => format!("Match complete! Player {winner} wins"),
                None => "Match complete".to_string(),
            },
            _ if snapshot.set_replayed => "Set level after the final play, replaying".to_string(),
            _ => match snapshot.set_winner {
                Some(winner) => format!("Set to player {winner}"),
                None => match snapshot.play.winner {
                    PlayWinner::Tie => "Tie!".to_string(),
                    PlayWinner::Player(p) => format!("Point to player {p}"),
                },
            },
        };

        info!(
            move_one = %snapshot.play.move_by(Player::One),
            move_two = %snapshot.play.move_by(Player::Two),
            set_score = %snapshot.current_set.points,
            sets = %snapshot.sets,
            game_phase = %snapshot.game_phase,
            next_player = %snapshot.next_player,
            "{status}"
        );
    }
}

/// State Observer - sole consumer of the engine's snapshot channel. Runs as
/// its own task; the engine is never blocked by rendering. Every resolved
/// play is rendered, in order; `refresh` only rate-limits how quickly
/// consecutive renders are drawn.
pub struct StateObserver<S> {
    events: UnboundedReceiver<StateSnapshot>,
    scoreboard: S,
    refresh: Duration,
}

impl<S: Scoreboard> StateObserver<S> {
    pub fn new(events: UnboundedReceiver<StateSnapshot>, scoreboard: S, refresh: Duration) -> Self {
        Self {
            events,
            scoreboard,
            refresh,
        }
    }

    /// Consume snapshots until the engine side closes. Absence of a new
    /// snapshot is "no change", so the loop simply parks on the channel.
    pub async fn run(mut self) {
        while let Some(snapshot) = self.events.recv().await {
            self.scoreboard.render(&snapshot);
            if !self.refresh.is_zero() {
                tokio::time::sleep(self.refresh).await;
            }
        }
        info!("Engine channel closed, observer stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{Move, Play, Score, SetState};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingScoreboard {
        seen: Arc<Mutex<Vec<u32>>>,
    }

    impl Scoreboard for RecordingScoreboard {
        fn render(&mut self, snapshot: &StateSnapshot) {
            self.seen.lock().unwrap().push(snapshot.play.winner.code());
        }
    }

    fn snapshot(move_one: Move, move_two: Move) -> StateSnapshot {
        StateSnapshot {
            play: Play::resolve(move_one, move_two),
            current_set: SetState::default(),
            sets: Score::default(),
            game_phase: GamePhase::InProgress,
            next_player: Player::One,
            set_winner: None,
            set_replayed: false,
        }
    }

    #[tokio::test]
    async fn test_observer_sees_every_snapshot_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let scoreboard = RecordingScoreboard::default();
        let seen = scoreboard.seen.clone();
        let observer = StateObserver::new(rx, scoreboard, Duration::ZERO);
        let handle = tokio::spawn(observer.run());

        tx.send(snapshot(Move::Rock, Move::Scissors)).unwrap();
        tx.send(snapshot(Move::Paper, Move::Paper)).unwrap();
        tx.send(snapshot(Move::Rock, Move::Paper)).unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 0, 2]);
    }

    #[tokio::test]
    async fn test_observer_stops_when_engine_side_closes() {
        let (tx, rx) = mpsc::unbounded_channel::<StateSnapshot>();
        let observer = StateObserver::new(rx, LogScoreboard, Duration::from_millis(100));
        drop(tx);
        observer.run().await;
    }

    #[test]
    fn test_log_scoreboard_render_does_not_panic_on_match_complete() {
        let mut board = LogScoreboard;
        let mut snap = snapshot(Move::Rock, Move::Scissors);
        snap.game_phase = GamePhase::MatchComplete;
        snap.sets.award(Player::One);
        snap.sets.award(Player::One);
        board.render(&snap);
    }
}
