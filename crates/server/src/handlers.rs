use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use ridership_core::view::{self, TableView};
use ridership_core::Selection;
use ridership_report::Figure;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FigureResponse {
    pub figure: Figure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html().to_owned())
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn routes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.dataset().routes().to_vec())
}

pub async fn table(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<TableView>, ApiError> {
    let Json(selection) = payload?;
    debug!(?selection, "updating stop table");
    warn_uneven_percentage(&selection);
    let view = view::table_rows(state.dataset(), &selection)?;
    Ok(Json(view))
}

pub async fn route_map(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<FigureResponse>, ApiError> {
    let Json(selection) = payload?;
    debug!(?selection, "updating route map");
    let view = view::route_map(state.dataset(), &selection);
    Ok(Json(FigureResponse {
        figure: Figure::from_map_view(&view, state.map_settings()),
        notice: view.notice,
    }))
}

pub async fn segment_map(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<FigureResponse>, ApiError> {
    let Json(selection) = payload?;
    debug!(?selection, "updating segment map");
    warn_uneven_percentage(&selection);
    let view = view::segment_map(state.dataset(), &selection)?;
    Ok(Json(FigureResponse {
        figure: Figure::from_map_view(&view, state.map_settings()),
        notice: view.notice,
    }))
}

fn warn_uneven_percentage(selection: &Selection) {
    if selection.routes.is_empty() {
        return;
    }
    if let Some(notice) = selection.percentage.and_then(|p| p.notice()) {
        warn!("{notice}");
    }
}
