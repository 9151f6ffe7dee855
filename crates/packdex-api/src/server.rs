//! HTTP server implementation using axum.

use std::net::SocketAddr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::state::ApiState;
use crate::types::{
    AcceptQuery, AlbumResponse, CardResponse, NewUserRequest, ProgressResponse, ProposalRequest,
    ProposalResponse, TradeDetailResponse, UserResponse,
};
use packdex_core::{CardId, ProposalId, UserId};

/// Create the axum router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/packs/open/{user_id}", post(open_pack))
        .route("/albums/{user_id}", get(album_overview))
        .route("/albums/{user_id}/progress", get(progress))
        .route("/albums/{user_id}/duplicates", get(duplicates))
        .route("/trades/propose", post(propose_trade))
        .route("/trades/{id}/accept", put(accept_trade))
        .route("/trades/{id}", get(trade_detail).delete(delete_trade))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- users ---

async fn create_user(
    State(state): State<ApiState>,
    Json(req): Json<NewUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let detail = state.users.create(&req.name, &req.email).await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

async fn list_users(State(state): State<ApiState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<UserResponse>> {
    let detail = state.users.detail(UserId::new(id)).await?;
    Ok(Json(detail.into()))
}

async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    Json(req): Json<NewUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let detail = state
        .users
        .update(UserId::new(id), &req.name, &req.email)
        .await?;
    Ok(Json(detail.into()))
}

async fn delete_user(State(state): State<ApiState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.users.delete(UserId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- packs & albums ---

async fn open_pack(
    State(state): State<ApiState>,
    Path(user_id): Path<u64>,
) -> ApiResult<Json<Vec<CardResponse>>> {
    let mut draws = state.draws.lock().await;
    let cards = state
        .packs
        .open_pack(UserId::new(user_id), &mut *draws)
        .await?;
    Ok(Json(cards.into_iter().map(CardResponse::from).collect()))
}

async fn album_overview(
    State(state): State<ApiState>,
    Path(user_id): Path<u64>,
) -> ApiResult<Json<AlbumResponse>> {
    let overview = state.progress.album_overview(UserId::new(user_id)).await?;
    Ok(Json(overview.into()))
}

async fn progress(
    State(state): State<ApiState>,
    Path(user_id): Path<u64>,
) -> ApiResult<Json<ProgressResponse>> {
    let completion = state.progress.completion(UserId::new(user_id)).await?;
    Ok(Json(ProgressResponse { completion }))
}

async fn duplicates(
    State(state): State<ApiState>,
    Path(user_id): Path<u64>,
) -> ApiResult<Json<std::collections::BTreeMap<String, u32>>> {
    let report = state
        .progress
        .duplicate_report(UserId::new(user_id))
        .await?;
    Ok(Json(
        report.into_iter().map(|(k, n)| (k.to_string(), n)).collect(),
    ))
}

// --- trades ---

async fn propose_trade(
    State(state): State<ApiState>,
    Json(req): Json<ProposalRequest>,
) -> ApiResult<(StatusCode, Json<ProposalResponse>)> {
    let proposal = state
        .trades
        .propose(
            UserId::new(req.offer_user_id),
            CardId::new(req.offered_card_id),
            UserId::new(req.receive_user_id),
            CardId::new(req.desired_card_id),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(proposal.into())))
}

async fn accept_trade(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    Query(query): Query<AcceptQuery>,
) -> ApiResult<Json<ProposalResponse>> {
    let proposal = state
        .trades
        .accept(ProposalId::new(id), UserId::new(query.user_id))
        .await?;
    Ok(Json(proposal.into()))
}

async fn trade_detail(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> ApiResult<Json<TradeDetailResponse>> {
    let detail = state.trades.detail(ProposalId::new(id)).await?;
    Ok(Json(detail.into()))
}

async fn delete_trade(State(state): State<ApiState>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    state.trades.delete(ProposalId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bind and serve the API.
pub async fn run_server(state: ApiState, config: ApiConfig) -> std::io::Result<()> {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(port = config.port, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
