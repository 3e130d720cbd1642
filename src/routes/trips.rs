use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    catalog::{self, MAX_SEARCH_RESULTS},
    error::{AppError, DraftError},
    models::{
        dates::{format_input_date, format_timestamp, parse_calendar_date},
        draft::TripDraft,
        trip::Destination,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trips_list).post(trip_create))
        .route("/new", get(trip_new_form))
        .route("/:id", get(trip_detail))
        .route("/:id/delete", post(trip_delete))
}

struct TripCard {
    id: String,
    name: String,
    destinations: String,
    dates: String,
}

#[derive(Template)]
#[template(path = "trips/list.html")]
struct TripsListTemplate {
    trips: Vec<TripCard>,
}

async fn trips_list(State(state): State<AppState>) -> impl IntoResponse {
    let trips = state
        .trips
        .sorted_trips()
        .into_iter()
        .map(|trip| TripCard {
            destinations: trip.destination_names(),
            dates: trip.dates_display(),
            id: trip.id,
            name: trip.name,
        })
        .collect();
    AskamaTemplateResponse::into_response(TripsListTemplate { trips })
}

struct DestinationChoice {
    label: String,
    href: String,
}

#[derive(Template)]
#[template(path = "trips/new.html")]
struct TripNewTemplate {
    query: String,
    selected: String,
    results: Vec<DestinationChoice>,
    chosen: Vec<DestinationChoice>,
    show_error: bool,
    error_message: String,
    name: String,
    start_date: String,
    end_date: String,
    summary: String,
}

#[derive(Deserialize)]
struct NewTripQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    selected: String,
}

async fn trip_new_form(Query(query): Query<NewTripQuery>) -> Response {
    let draft = draft_with_selection(&query.selected);
    render_new_form(&draft, &query.q, None)
}

#[derive(Deserialize)]
struct TripForm {
    #[serde(default)]
    selected: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    summary: String,
}

async fn trip_create(State(state): State<AppState>, Form(form): Form<TripForm>) -> Response {
    let mut draft = draft_with_selection(&form.selected);
    draft.name = form.name;
    draft.summary = form.summary;

    let built = apply_dates(&mut draft, &form.start_date, &form.end_date)
        .and_then(|()| draft.build(Utc::now()));
    match built {
        Ok(trip) => {
            state.trips.add(trip).await;
            Redirect::to("/trips").into_response()
        }
        Err(err) => render_new_form(&draft, "", Some(err.to_string())),
    }
}

#[derive(Template)]
#[template(path = "trips/detail.html")]
struct TripDetailTemplate {
    id: String,
    name: String,
    destinations: Vec<String>,
    dates: String,
    has_summary: bool,
    summary: String,
    created_at: String,
}

async fn trip_detail(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let trip = state.trips.find(&trip_id).ok_or(AppError::NotFound)?;

    Ok(AskamaTemplateResponse::into_response(TripDetailTemplate {
        destinations: trip.destinations.iter().map(Destination::label).collect(),
        dates: trip.dates_display(),
        has_summary: trip.has_summary(),
        summary: trip.summary_display().to_string(),
        created_at: format_timestamp(trip.created_at),
        id: trip.id,
        name: trip.name,
    }))
}

async fn trip_delete(State(state): State<AppState>, Path(trip_id): Path<String>) -> Redirect {
    state.trips.delete(&trip_id).await;
    Redirect::to("/trips")
}

fn draft_with_selection(selected: &str) -> TripDraft {
    let mut draft = TripDraft::new();
    for id in selected.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if let Some(destination) = catalog::find_destination(id) {
            draft.add_destination(destination);
        }
    }
    draft
}

fn selection_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(",")
}

fn apply_dates(draft: &mut TripDraft, start: &str, end: &str) -> Result<(), DraftError> {
    if let Some(start) = parse_input_date(start, "start")? {
        draft.set_start_date(start);
    }
    if let Some(end) = parse_input_date(end, "end")? {
        draft.set_end_date(end);
    }
    Ok(())
}

fn parse_input_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_calendar_date(raw)
        .map(Some)
        .ok_or_else(|| DraftError::InvalidDate {
            field,
            raw: raw.to_string(),
        })
}

fn render_new_form(draft: &TripDraft, query: &str, error: Option<String>) -> Response {
    let chosen_ids: Vec<&str> = draft.destinations().iter().map(|d| d.id.as_str()).collect();

    let results = catalog::search(query, draft.destinations())
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|d| DestinationChoice {
            href: format!(
                "/trips/new?selected={}",
                selection_ids(chosen_ids.iter().copied().chain([d.id.as_str()]))
            ),
            label: d.label(),
        })
        .collect();

    let chosen = draft
        .destinations()
        .iter()
        .map(|d| DestinationChoice {
            href: format!(
                "/trips/new?selected={}",
                selection_ids(chosen_ids.iter().copied().filter(|id| *id != d.id))
            ),
            label: d.name.clone(),
        })
        .collect();

    let template = TripNewTemplate {
        query: query.to_string(),
        selected: selection_ids(chosen_ids.iter().copied()),
        results,
        chosen,
        show_error: error.is_some(),
        error_message: error.clone().unwrap_or_default(),
        name: draft.name.clone(),
        start_date: draft.start_date().map(format_input_date).unwrap_or_default(),
        end_date: draft.end_date().map(format_input_date).unwrap_or_default(),
        summary: draft.summary.clone(),
    };

    if error.is_some() {
        (
            StatusCode::BAD_REQUEST,
            AskamaTemplateResponse::into_response(template),
        )
            .into_response()
    } else {
        AskamaTemplateResponse::into_response(template)
    }
}
