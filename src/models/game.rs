use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single rock-paper-scissors throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Fixed precedence: rock beats scissors, scissors beats paper, paper beats rock.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(format!("unknown move: {other:?}")),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

/// One of the two match participants. On the wire players are the integers 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl TryFrom<u32> for Player {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(format!("invalid player id: {other}")),
        }
    }
}

impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Outcome of a single play: a point for one side, or a tie (0 on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayWinner {
    Tie,
    Player(Player),
}

impl PlayWinner {
    pub fn code(self) -> u32 {
        match self {
            PlayWinner::Tie => 0,
            PlayWinner::Player(p) => p.id(),
        }
    }
}

impl Serialize for PlayWinner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

/// One resolved exchange between both players. Appended to the current set,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Play {
    pub move_one: Move,
    pub move_two: Move,
    pub winner: PlayWinner,
    pub timestamp: DateTime<Utc>,
}

impl Play {
    pub fn resolve(move_one: Move, move_two: Move) -> Play {
        let winner = if move_one == move_two {
            PlayWinner::Tie
        } else if move_one.beats(move_two) {
            PlayWinner::Player(Player::One)
        } else {
            PlayWinner::Player(Player::Two)
        };
        Play {
            move_one,
            move_two,
            winner,
            timestamp: Utc::now(),
        }
    }

    pub fn move_by(&self, player: Player) -> Move {
        match player {
            Player::One => self.move_one,
            Player::Two => self.move_two,
        }
    }
}

/// Per-player tally, used for both points within a set and sets within a match.
/// Serializes with the player ids as keys, matching the wire shape of the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    #[serde(rename = "1")]
    pub one: u32,
    #[serde(rename = "2")]
    pub two: u32,
}

impl Score {
    pub fn get(self, player: Player) -> u32 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.one += 1,
            Player::Two => self.two += 1,
        }
    }

    /// The side currently ahead, or `None` when level.
    pub fn leader(self) -> Option<Player> {
        match self.one.cmp(&self.two) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.one, self.two)
    }
}

/// The plays and points of the set currently being contested.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetState {
    pub plays: Vec<Play>,
    pub points: Score,
}

/// Summary of a completed match, kept for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub timestamp: DateTime<Utc>,
    pub winner: Player,
    pub sets: Score,
}

/// Match lifecycle phase. Exactly one phase holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    InProgress,
    SetComplete,
    MatchComplete,
}

impl GamePhase {
    /// Check if transition to another phase is valid.
    pub fn can_transition_to(self, to: GamePhase) -> bool {
        match (self, to) {
            // IN_PROGRESS -> SET_COMPLETE on a set win
            (GamePhase::InProgress, GamePhase::SetComplete) => true,
            // IN_PROGRESS -> MATCH_COMPLETE on a set win that also wins the match
            (GamePhase::InProgress, GamePhase::MatchComplete) => true,
            // SET_COMPLETE -> IN_PROGRESS when the next set starts
            (GamePhase::SetComplete, GamePhase::InProgress) => true,
            // SET_COMPLETE -> MATCH_COMPLETE when the set win decided the match
            (GamePhase::SetComplete, GamePhase::MatchComplete) => true,
            // MATCH_COMPLETE -> IN_PROGRESS via the implicit reset on the next move
            (GamePhase::MatchComplete, GamePhase::InProgress) => true,
            _ => false,
        }
    }

    /// A completed match stays terminal until the next submission resets it.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::MatchComplete)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::InProgress => write!(f, "IN_PROGRESS"),
            GamePhase::SetComplete => write!(f, "SET_COMPLETE"),
            GamePhase::MatchComplete => write!(f, "MATCH_COMPLETE"),
        }
    }
}

/// The in-flight move pair for the play currently being collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingMoves {
    one: Option<Move>,
    two: Option<Move>,
}

impl PendingMoves {
    /// A repeated submission by the same player overwrites the earlier move.
    pub fn record(&mut self, player: Player, mv: Move) {
        match player {
            Player::One => self.one = Some(mv),
            Player::Two => self.two = Some(mv),
        }
    }

    pub fn get(self, player: Player) -> Option<Move> {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    /// Take both moves once present, clearing the pair. Returns `None`
    /// while either side is still outstanding.
    pub fn take_complete(&mut self) -> Option<(Move, Move)> {
        match (self.one, self.two) {
            (Some(one), Some(two)) => {
                *self = PendingMoves::default();
                Some((one, two))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = PendingMoves::default();
    }
}

/// What a single player sees when polling `GET /game_state/{player}`.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub is_turn: bool,
    pub last_move: Option<Move>,
    pub game_phase: GamePhase,
}

/// Pushed to the observer whenever a play resolves.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub play: Play,
    pub current_set: SetState,
    pub sets: Score,
    pub game_phase: GamePhase,
    pub next_player: Player,
    /// Set just won by this side, if the play closed out a set.
    pub set_winner: Option<Player>,
    /// The set reached three plays still level and was restarted from 0-0.
    pub set_replayed: bool,
}
