use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use bizscout_core::{validate_rating, SearchQuery, SortBy};
use serde::Deserialize;

use crate::{error::WebError, render, state::SharedState};

/// Search location used when the form leaves it blank
const DEFAULT_LOCATION: &str = "Des Moines, IA";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/business/:id", get(business_detail))
        .route("/bookmarks", get(bookmarks))
        .route("/bookmark", post(toggle_bookmark))
        .route("/review", post(add_review))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub location: Option<String>,
    pub sort: Option<SortBy>,
}

/// GET / - search form, plus results when a term was submitted
async fn index(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, WebError> {
    let Some(term) = params.term.filter(|t| !t.trim().is_empty()) else {
        return Ok(Html(render::search_page(None, None, false)));
    };

    let query = SearchQuery {
        term,
        location: params
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        sort: params.sort.unwrap_or_default(),
    };

    let store = state.store.lock().await;
    let outcome = state.service.search(&query, &store).await?;

    Ok(Html(render::search_page(
        Some(&query),
        Some(&outcome.businesses),
        outcome.lookup_failed,
    )))
}

/// GET /business/:id - external record merged with local reviews
async fn business_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let store = state.store.lock().await;
    let detail = state.service.detail(&id, &store).await?;
    Ok(Html(render::detail_page(&detail)))
}

/// GET /bookmarks - everything saved locally
async fn bookmarks(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let store = state.store.lock().await;
    let bookmarks = store.list_bookmarks()?;
    Ok(Html(render::bookmarks_page(&bookmarks)))
}

#[derive(Debug, Deserialize)]
pub struct BookmarkForm {
    pub business_id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
}

/// POST /bookmark - flip the bookmark state, then bounce back to the
/// referring page. Both directions are idempotent at the store level.
async fn toggle_bookmark(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Form(form): Form<BookmarkForm>,
) -> Result<Redirect, WebError> {
    let store = state.store.lock().await;

    if store.is_bookmarked(&form.business_id)? {
        store.remove_bookmark(&form.business_id)?;
    } else {
        store.add_bookmark(
            &form.business_id,
            &form.name,
            &form.location,
            form.rating,
            form.review_count,
        )?;
    }

    Ok(back(&headers))
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub business_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// POST /review - validate the rating, append the review, back to the
/// detail page
async fn add_review(
    State(state): State<SharedState>,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect, WebError> {
    validate_rating(form.rating)?;

    let store = state.store.lock().await;
    store.add_review(&form.business_id, form.rating, &form.comment)?;

    Ok(Redirect::to(&format!("/business/{}", form.business_id)))
}

/// Redirect to the Referer, falling back to the home page
fn back(headers: &HeaderMap) -> Redirect {
    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/");
    Redirect::to(target)
}
