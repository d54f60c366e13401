use std::collections::HashMap;
use tokio::sync::RwLock;

pub const VOTE_PREFIX: &str = "vote_";

pub const ACK_UP: &str = "Thanks for the thumbs up! 👍";
pub const ACK_DOWN: &str = "Thanks for the feedback! 👎";
pub const ACK_INVALID: &str = "Invalid vote data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn tag(self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    pub fn ack(self) -> &'static str {
        match self {
            VoteDirection::Up => ACK_UP,
            VoteDirection::Down => ACK_DOWN,
        }
    }
}

/// A single user's vote on one sent message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vote {
    pub message_id: i64,
    pub user_id: i64,
    pub direction: VoteDirection,
}

/// Decoded `vote_{content_type}_{message_id}_{up|down}` payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteAction {
    pub content_type: String,
    pub message_id: i64,
    pub direction: VoteDirection,
}

/// Whether a callback payload is a vote action.
pub fn is_vote_marker(data: &str) -> bool {
    data.len() > VOTE_PREFIX.len() && data.starts_with(VOTE_PREFIX)
}

/// Split a vote payload into its parts. The content type must not contain
/// `_`; anything after the fourth part is ignored.
///
/// A message id that is not a number rejects the whole payload rather than
/// being recorded under id 0.
pub fn parse_vote_payload(data: &str) -> Option<VoteAction> {
    let parts: Vec<&str> = data.split('_').collect();
    if parts.len() < 4 {
        return None;
    }
    let message_id = parts[2].parse::<i64>().ok()?;
    let direction = if parts[3] == "up" {
        VoteDirection::Up
    } else {
        VoteDirection::Down
    };
    Some(VoteAction {
        content_type: parts[1].to_string(),
        message_id,
        direction,
    })
}

/// Format the callback payload a vote button carries.
pub fn vote_payload(content_type: &str, message_id: i64, direction: VoteDirection) -> String {
    format!("{}{}_{}_{}", VOTE_PREFIX, content_type, message_id, direction.tag())
}

fn vote_key(content_type: &str, message_id: i64) -> String {
    format!("{}_{}", content_type, message_id)
}

/// In-memory vote tallies keyed by content type and message. Nothing is
/// persisted; a restart starts from zero.
#[derive(Default)]
pub struct VoteStore {
    votes: RwLock<HashMap<String, Vec<Vote>>>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote, replacing any earlier vote by the same user on the same
    /// message. Returns the acknowledgement shown to the voter.
    pub async fn record_vote(
        &self,
        content_type: &str,
        message_id: i64,
        user_id: i64,
        direction: VoteDirection,
    ) -> &'static str {
        let key = vote_key(content_type, message_id);
        let mut lock = self.votes.write().await;
        let list = lock.entry(key).or_default();
        list.retain(|v| v.user_id != user_id);
        list.push(Vote {
            message_id,
            user_id,
            direction,
        });
        tracing::debug!(
            "vote: type={} message={} user={} direction={}",
            content_type,
            message_id,
            user_id,
            direction.tag()
        );
        direction.ack()
    }

    /// `(up, down)` counts for one message.
    pub async fn stats(&self, content_type: &str, message_id: i64) -> (usize, usize) {
        let lock = self.votes.read().await;
        let Some(list) = lock.get(&vote_key(content_type, message_id)) else {
            return (0, 0);
        };
        let up = list
            .iter()
            .filter(|v| v.direction == VoteDirection::Up)
            .count();
        (up, list.len() - up)
    }

    /// Decode a raw vote payload and record it.
    pub async fn handle_callback(&self, data: &str, user_id: i64) -> &'static str {
        match parse_vote_payload(data) {
            Some(action) => {
                self.record_vote(
                    &action.content_type,
                    action.message_id,
                    user_id,
                    action.direction,
                )
                .await
            }
            None => ACK_INVALID,
        }
    }
}
