use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;
use shared::models::*;
use shared::validation::{validate_option_index, validate_poll_input};

use crate::auth::CallerContext;
use crate::error::PollError;
use crate::store::{PollStore, StoreError};

/// Poll operations over an injected store. Holds no state of its own.
#[derive(Clone)]
pub struct PollProcessor {
    store: Arc<dyn PollStore>,
}

fn store_failure(op: &'static str) -> impl Fn(StoreError) -> PollError {
    move |e| {
        if let StoreError::Database(msg) = &e {
            error!("Store failure during {}: {}", op, msg);
        }
        PollError::from(e)
    }
}

impl PollProcessor {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn create_poll(
        &self,
        caller: &CallerContext,
        question: &str,
        options: &[String],
    ) -> Result<Poll, PollError> {
        let owner_id = caller.require()?;
        let input = validate_poll_input(question, options)?;

        let poll = Poll {
            id: Uuid::new_v4(),
            question: input.question,
            options: input.options,
            created_at: OffsetDateTime::now_utc(),
            owner_id: owner_id.to_string(),
            total_votes: 0,
        };

        let stored = self.store.insert_poll(&poll).await.map_err(store_failure("create_poll"))?;
        info!("Created poll {} with {} options", stored.id, stored.options.len());
        Ok(stored)
    }

    pub async fn list_polls(&self) -> Result<Vec<Poll>, PollError> {
        self.store.list_polls(None).await.map_err(store_failure("list_polls"))
    }

    pub async fn list_polls_by_owner(&self, caller: &CallerContext) -> Result<Vec<Poll>, PollError> {
        let owner_id = caller.require()?;
        self.store.list_polls(Some(owner_id)).await.map_err(store_failure("list_polls_by_owner"))
    }

    /// `Ok(None)` when the poll does not exist; errors are reserved for store failures.
    pub async fn get_poll(&self, id: Uuid) -> Result<Option<Poll>, PollError> {
        self.store.fetch_poll(id).await.map_err(store_failure("get_poll"))
    }

    async fn require_poll(&self, id: Uuid) -> Result<Poll, PollError> {
        self.get_poll(id).await?.ok_or(PollError::NotFound)
    }

    /// Replaces question and options wholesale. Existing votes are kept even when
    /// their index no longer fits the new option list; results skip those votes.
    pub async fn update_poll(
        &self,
        caller: &CallerContext,
        id: Uuid,
        question: &str,
        options: &[String],
    ) -> Result<(), PollError> {
        caller.require()?;
        let input = validate_poll_input(question, options)?;

        let poll = self.require_poll(id).await?;
        caller.require_owner(&poll.owner_id)?;

        let updated = self.store
            .update_poll(id, &input.question, &input.options)
            .await
            .map_err(store_failure("update_poll"))?;

        if !updated {
            return Err(PollError::NotFound);
        }
        info!("Updated poll {}", id);
        Ok(())
    }

    pub async fn delete_poll(&self, caller: &CallerContext, id: Uuid) -> Result<(), PollError> {
        caller.require()?;
        let poll = self.require_poll(id).await?;
        caller.require_owner(&poll.owner_id)?;

        let deleted = self.store.delete_poll(id).await.map_err(store_failure("delete_poll"))?;
        if !deleted {
            return Err(PollError::NotFound);
        }
        info!("Deleted poll {} and its {} votes", id, poll.total_votes);
        Ok(())
    }

    pub async fn submit_vote(
        &self,
        caller: &CallerContext,
        poll_id: Uuid,
        option_index: i32,
    ) -> Result<(), PollError> {
        let voter_id = caller.require()?;
        let poll = self.require_poll(poll_id).await?;
        validate_option_index(option_index, poll.option_count())?;

        let vote = Vote {
            poll_id,
            voter_id: voter_id.to_string(),
            option_index,
        };
        self.store.insert_vote(&vote).await.map_err(store_failure("submit_vote"))?;

        info!("Recorded vote on poll {} for option {}", poll_id, option_index);
        Ok(())
    }

    pub async fn get_vote_results(&self, poll_id: Uuid) -> Result<Vec<VoteResult>, PollError> {
        let poll = self.require_poll(poll_id).await?;

        let mut counts = Vec::with_capacity(poll.option_count());
        for option_index in 0..poll.option_count() {
            let count = self.store
                .count_votes_for_option(poll_id, option_index as i32)
                .await
                .map_err(store_failure("get_vote_results"))?;
            counts.push(count);
        }

        Ok(shared::tally(&counts))
    }
}
