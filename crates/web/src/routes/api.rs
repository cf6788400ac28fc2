//! REST collection under `/api/v4/beer`.
//!
//! Responses use a hypermedia envelope: beers under `_embedded.beers`, links
//! under `_links` and paging totals under `page`. Links are absolute, built
//! from the configured base URL.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use brewery_core::{Beer, BeerInput, BeerSort, Page, PageRequest, Pageable, ValidationMode};

use super::parse_beer_id;
use crate::error::{AppError, Result};
use crate::forms::{BeerPayload, reject_blocking};
use crate::state::AppState;

/// Collection path.
pub const COLLECTION_PATH: &str = "/api/v4/beer";

/// Page size used when the request names none.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size served; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Collection query parameters.
#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Name search parameters. Paged only when `page` or `size` is given.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    pub beer_name: String,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

impl Link {
    fn new(href: String) -> Self {
        Self {
            href,
            templated: false,
        }
    }
}

type Links = BTreeMap<&'static str, Link>;

/// One beer with its links.
#[derive(Debug, Serialize)]
pub struct BeerModel {
    #[serde(flatten)]
    pub beer: Beer,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Paging totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

#[derive(Debug, Serialize)]
pub struct Embedded {
    pub beers: Vec<BeerModel>,
}

/// Collection envelope.
#[derive(Debug, Serialize)]
pub struct CollectionModel {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMetadata>,
}

/// Search resource listing the available queries.
#[derive(Debug, Serialize)]
pub struct SearchModel {
    #[serde(rename = "_links")]
    pub links: Links,
}

fn beer_model(state: &AppState, beer: Beer) -> BeerModel {
    let href = state
        .config()
        .absolute_url(&format!("{COLLECTION_PATH}/{}", beer.id));
    let links = BTreeMap::from([
        ("self", Link::new(href.clone())),
        ("beer", Link::new(href)),
    ]);
    BeerModel { beer, links }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Paging links for a listing at `base`, which may already carry query
/// parameters.
fn page_links(state: &AppState, base: &str, page: &Page<Beer>) -> Links {
    let size = page.size();
    let separator = if base.contains('?') { '&' } else { '?' };
    let href = |n: u32| {
        Link::new(
            state
                .config()
                .absolute_url(&format!("{base}{separator}page={n}&size={size}")),
        )
    };

    let mut links = BTreeMap::from([
        ("first", href(0)),
        ("self", href(page.number())),
        ("last", href(page.total_pages().saturating_sub(1))),
    ]);
    if page.has_previous() {
        links.insert("prev", href(page.number().saturating_sub(1)));
    }
    if page.has_next() {
        links.insert("next", href(page.number().saturating_add(1)));
    }
    links
}

fn page_metadata(page: &Page<Beer>) -> PageMetadata {
    PageMetadata {
        size: page.size(),
        total_elements: page.total_elements(),
        total_pages: page.total_pages(),
        number: page.number(),
    }
}

fn page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest> {
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    Ok(PageRequest::new(page.unwrap_or(0), size)?)
}

fn embed(state: &AppState, page: Page<Beer>) -> Embedded {
    Embedded {
        beers: page
            .into_content()
            .into_iter()
            .map(|beer| beer_model(state, beer))
            .collect(),
    }
}

/// Bind a JSON body, failing on errors outside the server-managed fields.
fn checked_input(payload: BeerPayload, mode: ValidationMode) -> Result<BeerInput> {
    let (input, errors) = payload.check(mode);
    reject_blocking(errors)?;
    Ok(input)
}

/// List one page of beers.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> Result<Json<CollectionModel>> {
    let request = page_request(query.page, query.size)?;
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<BeerSort>)
        .transpose()?;

    let page = state.beers().find_all(request, sort).await?;

    let base = match sort {
        Some(sort) => format!("{COLLECTION_PATH}?sort={}", encode(&sort.to_string())),
        None => COLLECTION_PATH.to_string(),
    };
    let mut links = page_links(&state, &base, &page);
    links.insert(
        "search",
        Link::new(state.config().absolute_url(&format!("{COLLECTION_PATH}/search"))),
    );
    let metadata = page_metadata(&page);

    Ok(Json(CollectionModel {
        embedded: embed(&state, page),
        links,
        page: Some(metadata),
    }))
}

/// Fetch one beer.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<BeerModel>> {
    let beer = find_beer(&state, &id).await?;
    Ok(Json(beer_model(&state, beer)))
}

/// Create a beer from a JSON body.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BeerPayload>,
) -> Result<Response> {
    let input = checked_input(payload, ValidationMode::Create)?;
    let beer = input.into_new_beer(Utc::now())?;
    let saved = state.beers().save(beer).await?;
    tracing::info!(beer_id = %saved.id, beer_name = %saved.beer_name, "Beer created via API");

    let model = beer_model(&state, saved);
    let location = model.links.get("self").map(|l| l.href.clone()).unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(model),
    )
        .into_response())
}

/// Replace every mutable field of a stored beer.
#[instrument(skip(state, payload))]
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BeerPayload>,
) -> Result<Json<BeerModel>> {
    update_with(&state, &id, payload, ValidationMode::Create).await
}

/// Merge the supplied fields into a stored beer.
#[instrument(skip(state, payload))]
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BeerPayload>,
) -> Result<Json<BeerModel>> {
    update_with(&state, &id, payload, ValidationMode::Update).await
}

/// Delete a beer. Answers 204 whether or not it existed.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_beer_id(&id)?;
    state.beers().delete_by_id(id).await?;
    tracing::info!(beer_id = %id, "Beer deleted via API");
    Ok(StatusCode::NO_CONTENT)
}

/// List the search queries.
#[instrument(skip(state))]
pub async fn search_links(State(state): State<AppState>) -> Json<SearchModel> {
    let base = state.config().absolute_url(&format!("{COLLECTION_PATH}/search"));
    Json(SearchModel {
        links: BTreeMap::from([
            (
                "findAllByBeerName",
                Link {
                    href: format!("{base}/findAllByBeerName{{?beerName,page,size}}"),
                    templated: true,
                },
            ),
            ("self", Link::new(base)),
        ]),
    })
}

/// Beers whose name matches exactly.
///
/// Without `page` or `size` every match is returned in one envelope with no
/// `page` block; with either, the matches are paged like the collection.
#[instrument(skip(state))]
pub async fn find_all_by_beer_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<CollectionModel>> {
    let pageable = if query.page.is_none() && query.size.is_none() {
        Pageable::Unpaged
    } else {
        Pageable::Paged(page_request(query.page, query.size)?)
    };

    let page = state
        .beers()
        .find_all_by_name(&query.beer_name, pageable)
        .await?;

    let base = format!(
        "{COLLECTION_PATH}/search/findAllByBeerName?beerName={}",
        encode(&query.beer_name)
    );
    let (links, metadata) = match pageable {
        Pageable::Unpaged => (
            BTreeMap::from([("self", Link::new(state.config().absolute_url(&base)))]),
            None,
        ),
        Pageable::Paged(_) => (page_links(&state, &base, &page), Some(page_metadata(&page))),
    };

    Ok(Json(CollectionModel {
        embedded: embed(&state, page),
        links,
        page: metadata,
    }))
}

async fn find_beer(state: &AppState, raw_id: &str) -> Result<Beer> {
    let id = parse_beer_id(raw_id)?;
    state
        .beers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("beer {id}")))
}

async fn update_with(
    state: &AppState,
    raw_id: &str,
    payload: BeerPayload,
    mode: ValidationMode,
) -> Result<Json<BeerModel>> {
    let mut beer = find_beer(state, raw_id).await?;
    let input = checked_input(payload, mode)?;

    beer.apply(input);
    let saved = state.beers().save(beer).await?;
    tracing::info!(beer_id = %saved.id, beer_name = %saved.beer_name, "Beer updated via API");
    Ok(Json(beer_model(state, saved)))
}
