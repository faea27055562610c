use crate::errors::AppError;
use crate::models::{
    date_key, parse_date, DatesResponse, DayEntry, PromptsResponse, RecordRequest, RecordResponse,
};
use crate::prompts::{prompt_list, PROMPTS};
use crate::review::{build_review, review_entry, ReviewedEntry};
use crate::state::AppState;
use crate::storage::{LogStore, Recovery};
use crate::ui::{
    render_introspection, render_plan, render_review, IntrospectionView, Notice, NoticeKind,
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct IntrospectionQuery {
    pub saved: Option<String>,
    /// Set by the save redirect when the journal had to be reset first.
    pub recovered: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub date: Option<String>,
}

pub async fn plan() -> Result<Html<String>, AppError> {
    let html = render_plan()?;
    Ok(Html(html))
}

pub async fn introspection_form(
    State(state): State<AppState>,
    Query(query): Query<IntrospectionQuery>,
) -> Result<Html<String>, AppError> {
    let date = date_key(today());
    let mut view = IntrospectionView::new(date.clone(), PROMPTS, &[]);

    let saved = query.saved.as_deref().and_then(parse_date);
    if let Some(saved) = saved {
        view = view.with_notice(Notice::new(
            NoticeKind::Success,
            format!("Introspection for {} saved successfully!", date_key(saved)),
        ));
        if query.recovered.is_some() {
            view = view.with_notice(Notice::new(NoticeKind::Warning, RESET_ON_SAVE));
        }
    }

    match state.store.load().await {
        Ok(loaded) => {
            if let Some(recovery) = &loaded.recovery {
                view = view.with_notice(Notice::new(NoticeKind::Warning, recovery.message()));
            }
            if saved.is_none() && loaded.journal.entry(&date).is_some() {
                view = view.with_notice(Notice::new(
                    NoticeKind::Info,
                    format!("An entry for {date} already exists. Saving again replaces it."),
                ));
            }
        }
        Err(err) => {
            view = view.with_notice(Notice::new(
                NoticeKind::Error,
                format!("Could not read saved entries: {}", err.message),
            ));
        }
    }

    let html = render_introspection(&view)?;
    Ok(Html(html))
}

const RESET_ON_SAVE: &str =
    "The journal file was unreadable and has been reset; earlier entries were discarded.";

/// Form submit. On success redirects back to a blank form; on failure the
/// form comes back with the submitted answers still in it.
pub async fn introspection_submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let date = form_value(&fields, "date")
        .and_then(parse_date)
        .unwrap_or_else(today);
    let draft = draft_answers(&fields, PROMPTS.len());

    match record_answers(&state.store, date, draft.clone()).await {
        Ok((_, recovery)) => {
            let mut location = format!("/introspection?saved={}", date_key(date));
            if recovery.is_some() {
                location.push_str("&recovered=1");
            }
            Redirect::to(&location).into_response()
        }
        Err(err) => {
            let view = IntrospectionView::new(date_key(date), PROMPTS, &draft).with_notice(
                Notice::new(
                    NoticeKind::Error,
                    format!("Could not save introspection: {}", err.message),
                ),
            );
            match render_introspection(&view) {
                Ok(html) => (err.status, Html(html)).into_response(),
                Err(render_err) => AppError::from(render_err).into_response(),
            }
        }
    }
}

pub async fn review(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Result<Html<String>, AppError> {
    let loaded = state.store.load().await?;
    let mut notices = Vec::new();
    if let Some(recovery) = &loaded.recovery {
        notices.push(Notice::new(NoticeKind::Warning, recovery.message()));
    }

    let page = build_review(&loaded.journal, query.date.as_deref());
    if loaded.journal.is_empty() {
        notices.push(Notice::new(NoticeKind::Info, "No introspection entries saved yet."));
    } else if page.entry.is_none() {
        notices.push(Notice::new(NoticeKind::Warning, "No entry found for the selected date."));
    }

    let html = render_review(&page, &notices)?;
    Ok(Html(html))
}

pub async fn get_prompts() -> Json<PromptsResponse> {
    Json(PromptsResponse {
        prompts: prompt_list(),
    })
}

pub async fn list_entries(State(state): State<AppState>) -> Result<Json<DatesResponse>, AppError> {
    let loaded = state.store.load().await?;
    Ok(Json(DatesResponse {
        dates: loaded.journal.dates_desc(),
        recovered: loaded.recovery.map(|recovery| recovery.message()),
    }))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ReviewedEntry>, AppError> {
    let date = parse_date(&date)
        .map(date_key)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;
    let loaded = state.store.load().await?;
    let entry = loaded
        .journal
        .entry(&date)
        .ok_or_else(|| AppError::not_found(format!("no entry for {date}")))?;
    Ok(Json(review_entry(&date, entry)))
}

pub async fn post_entry(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let date = match payload.date.as_deref() {
        Some(value) => {
            parse_date(value).ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?
        }
        None => today(),
    };
    if payload.answers.len() > PROMPTS.len() {
        return Err(AppError::bad_request(format!(
            "expected at most {} answers, got {}",
            PROMPTS.len(),
            payload.answers.len()
        )));
    }

    let (entry, recovery) = record_answers(&state.store, date, payload.answers).await?;
    Ok(Json(RecordResponse {
        entry: review_entry(&date_key(date), &entry),
        recovered: recovery.map(|recovery| recovery.message()),
    }))
}

/// Load, replace one day, save. The recovery, if the load needed one, is
/// handed back so the caller can tell the user their old entries are gone.
async fn record_answers(
    store: &LogStore,
    date: NaiveDate,
    answers: Vec<String>,
) -> Result<(DayEntry, Option<Recovery>), AppError> {
    let entry = DayEntry::from_answers(PROMPTS, answers);
    let loaded = store.load().await?;
    let journal = loaded.journal.record_day(date, entry.clone());
    store.save(&journal).await?;
    info!(date = %date_key(date), reset = loaded.recovery.is_some(), "recorded introspection");
    Ok((entry, loaded.recovery))
}

fn form_value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Answers from `q0`, `q1`, ... fields, positional against the prompt list.
fn draft_answers(fields: &[(String, String)], count: usize) -> Vec<String> {
    (0..count)
        .map(|idx| {
            form_value(fields, &format!("q{idx}"))
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
