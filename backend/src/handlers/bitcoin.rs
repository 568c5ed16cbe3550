//! Bitcoin price handler

use axum::{extract::State, Json};
use shared::BitcoinData;

use crate::error::AppResult;
use crate::AppState;

pub async fn get_bitcoin(State(state): State<AppState>) -> AppResult<Json<BitcoinData>> {
    let data = state.bitcoin.current().await?;
    Ok(Json(data))
}
