//! Beer HTML route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use brewery_core::{
    Beer, BeerStyle, Page, PageRequest, PageWindow, SERVER_MANAGED_FIELDS, ValidationErrors,
    ValidationMode, fields,
};

use super::parse_beer_id;
use crate::error::{AppError, Result};
use crate::forms::{BeerForm, log_ignored};
use crate::state::AppState;

/// Page size used when the request names none.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Listing query parameters. Negative values fail to decode.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Beer display data for templates.
#[derive(Debug, Clone)]
pub struct BeerView {
    pub id: String,
    pub beer_name: String,
    pub style_code: &'static str,
    pub style_label: &'static str,
    pub upc: String,
    pub quantity_on_hand: i32,
    pub price: String,
    pub created_date: String,
    pub last_modified_date: String,
}

impl From<&Beer> for BeerView {
    fn from(beer: &Beer) -> Self {
        Self {
            id: beer.id.to_string(),
            beer_name: beer.beer_name.clone(),
            style_code: beer.beer_style.code(),
            style_label: beer.beer_style.label(),
            upc: beer.upc.clone(),
            quantity_on_hand: beer.quantity_on_hand,
            price: format!("${:.2}", beer.price),
            created_date: beer.created_date.format("%Y-%m-%d %H:%M").to_string(),
            last_modified_date: beer.last_modified_date.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// A pagination link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// One-based page number shown to the user
    pub label: u32,
    pub href: String,
    pub current: bool,
}

/// Style choice in the form's select box.
#[derive(Debug, Clone)]
pub struct StyleOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Beer list page template.
#[derive(Template, WebTemplate)]
#[template(path = "beers/index.html")]
pub struct BeersIndexTemplate {
    pub beers: Vec<BeerView>,
    pub current_page: u32,
    /// One-based label of the current page
    pub current_label: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub start_page: u32,
    pub end_page: u32,
    /// Direct links for the page window
    pub window_links: Vec<PageLink>,
    /// Every page, for the jump-to-page list
    pub jump_links: Vec<PageLink>,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
}

/// Beer detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "beers/show.html")]
pub struct BeerShowTemplate {
    pub beer: BeerView,
}

/// Create/edit form template (`beerForm`).
#[derive(Template, WebTemplate)]
#[template(path = "beers/form.html")]
pub struct BeerFormTemplate {
    pub title: String,
    pub action: String,
    pub form: BeerForm,
    pub styles: Vec<StyleOption>,
    pub errors: ValidationErrors,
}

impl BeerFormTemplate {
    fn new(title: &str, action: String, form: BeerForm, errors: ValidationErrors) -> Self {
        let styles = BeerStyle::ALL
            .into_iter()
            .map(|style| StyleOption {
                code: style.code(),
                label: style.label(),
                selected: form
                    .value(fields::BEER_STYLE)
                    .eq_ignore_ascii_case(style.code()),
            })
            .collect();

        Self {
            title: title.to_string(),
            action,
            form,
            styles,
            errors,
        }
    }

    fn create(form: BeerForm, errors: ValidationErrors) -> Self {
        Self::new("New Beer", "/beer/edit/".to_string(), form, errors)
    }

    fn update(id: &str, form: BeerForm, errors: ValidationErrors) -> Self {
        Self::new("Edit Beer", format!("/beer/edit/{id}"), form, errors)
    }

    /// Error message for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.message_for(field)
    }
}

fn page_href(page: u32, size: u32) -> String {
    format!("/beers?page={page}&size={size}")
}

impl BeersIndexTemplate {
    fn build(page: &Page<Beer>) -> Self {
        let size = page.size();
        let current_page = page.number();
        let window = PageWindow::compute(page.total_pages(), current_page);

        let window_links = window
            .visible_pages()
            .filter(|_| page.total_pages() > 0)
            .map(|n| PageLink {
                label: n + 1,
                href: page_href(n, size),
                current: n == current_page,
            })
            .collect();

        let jump_links = window
            .page_numbers
            .iter()
            .map(|&label| PageLink {
                label,
                href: page_href(label - 1, size),
                current: label - 1 == current_page,
            })
            .collect();

        Self {
            beers: page.content().iter().map(BeerView::from).collect(),
            current_page,
            current_label: current_page.saturating_add(1),
            total_pages: page.total_pages(),
            total_items: page.total_elements(),
            start_page: window.start_page,
            end_page: window.end_page,
            window_links,
            jump_links,
            previous_href: page
                .has_previous()
                .then(|| page_href(current_page.saturating_sub(1), size)),
            next_href: page
                .has_next()
                .then(|| page_href(current_page.saturating_add(1), size)),
        }
    }
}

/// Display one page of beers.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<BeersIndexTemplate> {
    let request = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;
    let page = state.beers().find_all(request, None).await?;
    Ok(BeersIndexTemplate::build(&page))
}

/// Display one beer.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<BeerShowTemplate> {
    let beer = find_beer(&state, &id).await?;
    Ok(BeerShowTemplate {
        beer: BeerView::from(&beer),
    })
}

/// Display the empty creation form.
#[instrument]
pub async fn new() -> BeerFormTemplate {
    BeerFormTemplate::create(BeerForm::default(), ValidationErrors::new())
}

/// Create a beer from the submitted form.
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<BeerForm>) -> Result<Response> {
    let (input, errors) = form.check(ValidationMode::Create);
    if errors.has_errors_outside(&SERVER_MANAGED_FIELDS) {
        return Ok(BeerFormTemplate::create(form, errors).into_response());
    }
    log_ignored(&errors);

    let beer = match input.into_new_beer(Utc::now()) {
        Ok(beer) => beer,
        Err(errors) => return Ok(BeerFormTemplate::create(form, errors).into_response()),
    };

    let saved = state.beers().save(beer).await?;
    tracing::info!(beer_id = %saved.id, beer_name = %saved.beer_name, "Beer created");

    Ok(Redirect::to("/beers").into_response())
}

/// Display the edit form for a stored beer.
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Result<BeerFormTemplate> {
    let beer = find_beer(&state, &id).await?;
    Ok(BeerFormTemplate::update(
        &beer.id.to_string(),
        BeerForm::from_beer(&beer),
        ValidationErrors::new(),
    ))
}

/// Apply the submitted form to a stored beer.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BeerForm>,
) -> Result<Response> {
    let mut beer = find_beer(&state, &id).await?;

    let (input, errors) = form.check(ValidationMode::Update);
    if errors.has_errors_outside(&SERVER_MANAGED_FIELDS) {
        return Ok(BeerFormTemplate::update(&beer.id.to_string(), form, errors).into_response());
    }
    log_ignored(&errors);

    beer.apply(input);
    let saved = state.beers().save(beer).await?;
    tracing::info!(beer_id = %saved.id, beer_name = %saved.beer_name, "Beer updated");

    Ok(Redirect::to("/beers").into_response())
}

/// Delete a beer. Deleting an absent beer is not an error.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    let id = parse_beer_id(&id)?;
    state.beers().delete_by_id(id).await?;
    tracing::info!(beer_id = %id, "Beer deleted");
    Ok(Redirect::to("/beers"))
}

async fn find_beer(state: &AppState, raw_id: &str) -> Result<Beer> {
    let id = parse_beer_id(raw_id)?;
    state
        .beers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("beer {id}")))
}
