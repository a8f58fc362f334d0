use std::sync::Arc;
use rocket::{State, get, post, put, delete, http::Status, response::status, serde::json::Json};
use rocket::{Build, Rocket, routes, catchers};
use tracing::instrument;
use shared::models::*;

use crate::{
    auth::{CallerContext, SessionVerifier},
    catchers::{bad_request, conflict, forbidden, internal_error, not_found, unauthorized, unprocessable_entity},
    cors::CORS,
    error::PollError,
    processor::PollProcessor,
    store::PollStore,
    utils::parse_poll_id,
};

pub struct AppState {
    pub polls: PollProcessor,
    pub sessions: SessionVerifier,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>, sessions: SessionVerifier) -> Self {
        Self {
            polls: PollProcessor::new(store),
            sessions,
        }
    }
}

/// Assembles the API with its state, catchers and CORS fairing.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .manage(state)
        .mount(
            "/api",
            routes![
                list_polls,
                list_my_polls,
                get_poll,
                create_poll,
                update_poll,
                delete_poll,
                submit_vote,
                get_vote_results,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                forbidden,
                not_found,
                conflict,
                unprocessable_entity,
                internal_error
            ],
        )
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[get("/polls")]
pub async fn list_polls(state: &State<AppState>) -> Result<Json<Vec<Poll>>, PollError> {
    state.polls.list_polls().await.map(Json)
}

#[instrument(skip(state, caller))]
#[get("/polls/mine")]
pub async fn list_my_polls(
    state: &State<AppState>,
    caller: CallerContext,
) -> Result<Json<Vec<Poll>>, PollError> {
    state.polls.list_polls_by_owner(&caller).await.map(Json)
}

#[get("/polls/<id>")]
pub async fn get_poll(state: &State<AppState>, id: &str) -> Result<Json<Poll>, PollError> {
    let uuid = parse_poll_id(id)?;
    state.polls
        .get_poll(uuid)
        .await?
        .map(Json)
        .ok_or(PollError::NotFound)
}

#[instrument(skip(state, caller, request))]
#[post("/polls", format = "json", data = "<request>")]
pub async fn create_poll(
    state: &State<AppState>,
    caller: CallerContext,
    request: Json<PollRequest>,
) -> Result<status::Created<Json<Poll>>, PollError> {
    let request = request.into_inner();
    let poll = state.polls
        .create_poll(&caller, &request.question, &request.options)
        .await?;

    Ok(status::Created::new(format!("/api/polls/{}", poll.id)).body(Json(poll)))
}

#[instrument(skip(state, caller, request), fields(poll_id = %id))]
#[put("/polls/<id>", format = "json", data = "<request>")]
pub async fn update_poll(
    state: &State<AppState>,
    caller: CallerContext,
    id: &str,
    request: Json<PollRequest>,
) -> Result<Status, PollError> {
    let uuid = parse_poll_id(id)?;
    let request = request.into_inner();
    state.polls
        .update_poll(&caller, uuid, &request.question, &request.options)
        .await?;

    Ok(Status::NoContent)
}

#[instrument(skip(state, caller), fields(poll_id = %id))]
#[delete("/polls/<id>")]
pub async fn delete_poll(
    state: &State<AppState>,
    caller: CallerContext,
    id: &str,
) -> Result<Status, PollError> {
    let uuid = parse_poll_id(id)?;
    state.polls.delete_poll(&caller, uuid).await?;
    Ok(Status::NoContent)
}

#[instrument(skip(state, caller, vote), fields(poll_id = %id))]
#[post("/polls/<id>/votes", format = "json", data = "<vote>")]
pub async fn submit_vote(
    state: &State<AppState>,
    caller: CallerContext,
    id: &str,
    vote: Json<VoteRequest>,
) -> Result<Status, PollError> {
    let uuid = parse_poll_id(id)?;
    state.polls
        .submit_vote(&caller, uuid, vote.option_index)
        .await?;

    Ok(Status::NoContent)
}

#[get("/polls/<id>/results")]
pub async fn get_vote_results(
    state: &State<AppState>,
    id: &str,
) -> Result<Json<Vec<VoteResult>>, PollError> {
    let uuid = parse_poll_id(id)?;
    state.polls.get_vote_results(uuid).await.map(Json)
}
