use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};

use crate::{error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/public/locations/states",
    responses((status = 200, description = "Federative units, remote or fallback"))
)]
#[axum::debug_handler]
pub async fn list_states(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let states = state.location_service.list_states().await?;
    Ok(Json(states))
}

#[utoipa::path(
    get,
    path = "/api/public/locations/states/{uf}/cities",
    params(("uf" = String, Path, description = "State abbreviation")),
    responses((status = 200, description = "Municipalities of the state"))
)]
#[axum::debug_handler]
pub async fn list_cities(
    State(state): State<AppState>,
    Path(uf): Path<String>,
) -> Result<impl IntoResponse> {
    let cities = state.location_service.list_cities(&uf).await?;
    Ok(Json(cities))
}
