use crate::error::PollError;
use uuid::Uuid;

pub fn parse_poll_id(id: &str) -> Result<Uuid, PollError> {
    Uuid::parse_str(id).map_err(|_| PollError::InvalidId)
}
