use std::sync::{Mutex, MutexGuard};
use rocket::async_trait;
use uuid::Uuid;
use shared::models::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("referenced poll does not exist")]
    MissingPoll,
    #[error("{0}")]
    Database(String),
}

/// Persistence boundary for polls and votes.
///
/// Polls handed out by the store always carry their current `total_votes`.
/// Implementations enforce at most one vote per `(poll_id, voter_id)` and
/// remove a poll together with its votes atomically.
#[async_trait]
pub trait PollStore: Send + Sync {
    async fn insert_poll(&self, poll: &Poll) -> Result<Poll, StoreError>;

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError>;

    /// Newest first, optionally restricted to one owner.
    async fn list_polls(&self, owner_id: Option<&str>) -> Result<Vec<Poll>, StoreError>;

    /// Returns `false` when no poll with `id` exists.
    async fn update_poll(&self, id: Uuid, question: &str, options: &[String]) -> Result<bool, StoreError>;

    /// Returns `false` when no poll with `id` exists.
    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count_votes_for_option(&self, poll_id: Uuid, option_index: i32) -> Result<i64, StoreError>;

    /// Fails with [`StoreError::MissingPoll`] when the poll is gone by the time of the insert.
    async fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct Tables {
    polls: Vec<Poll>,
    votes: Vec<Vote>,
}

impl Tables {
    fn vote_count(&self, poll_id: Uuid) -> i64 {
        self.votes.iter().filter(|v| v.poll_id == poll_id).count() as i64
    }

    fn with_count(&self, poll: &Poll) -> Poll {
        Poll { total_votes: self.vote_count(poll.id), ..poll.clone() }
    }
}

/// In-process store used for tests and database-less runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Database("store lock poisoned".into()))
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<Poll, StoreError> {
        let mut tables = self.lock()?;
        if tables.polls.iter().any(|p| p.id == poll.id) {
            return Err(StoreError::Database(format!("poll {} already exists", poll.id)));
        }
        let stored = Poll { total_votes: 0, ..poll.clone() };
        tables.polls.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.polls.iter().find(|p| p.id == id).map(|p| tables.with_count(p)))
    }

    async fn list_polls(&self, owner_id: Option<&str>) -> Result<Vec<Poll>, StoreError> {
        let tables = self.lock()?;
        let mut polls: Vec<Poll> = tables.polls.iter()
            .rev()
            .filter(|p| owner_id.map_or(true, |owner| p.owner_id == owner))
            .map(|p| tables.with_count(p))
            .collect();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(polls)
    }

    async fn update_poll(&self, id: Uuid, question: &str, options: &[String]) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        match tables.polls.iter_mut().find(|p| p.id == id) {
            Some(poll) => {
                poll.question = question.to_string();
                poll.options = options.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.polls.len();
        tables.polls.retain(|p| p.id != id);
        if tables.polls.len() == before {
            return Ok(false);
        }
        tables.votes.retain(|v| v.poll_id != id);
        Ok(true)
    }

    async fn count_votes_for_option(&self, poll_id: Uuid, option_index: i32) -> Result<i64, StoreError> {
        let tables = self.lock()?;
        Ok(tables.votes.iter()
            .filter(|v| v.poll_id == poll_id && v.option_index == option_index)
            .count() as i64)
    }

    async fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.polls.iter().any(|p| p.id == vote.poll_id) {
            return Err(StoreError::MissingPoll);
        }
        if tables.votes.iter().any(|v| v.poll_id == vote.poll_id && v.voter_id == vote.voter_id) {
            return Err(StoreError::UniqueViolation);
        }
        tables.votes.push(vote.clone());
        Ok(())
    }
}
