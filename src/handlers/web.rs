// src/handlers/web.rs
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::error::SiteError;
use crate::models::Locale;
use crate::pages::{self, PageDef, NOT_FOUND_PAGE};
use crate::services::locale::{self, LOCALE_HINT_HEADER};
use crate::services::renderer::prepend_locale;
use crate::templates;
use crate::AppState;

fn header_hint(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(LOCALE_HINT_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// `GET /`: send the visitor to their locale's home page.
pub async fn root(headers: HeaderMap) -> Result<Redirect, SiteError> {
    let locale = locale::resolve(None, header_hint(&headers));
    Ok(Redirect::temporary(&prepend_locale("/", locale)?))
}

/// `GET /:locale`. Also catches single-segment page paths typed without a
/// locale, which are redirected to their prefixed form.
pub async fn locale_home(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let hint = header_hint(&headers);

    if !locale::is_canonical(&segment) {
        if let Some(def) = pages::find_by_path(&format!("/{}", segment)) {
            return bare_path_redirect(def, hint);
        }
    }

    let locale = locale::resolve(Some(&segment), hint);
    let def = pages::find_by_path("/").ok_or_else(|| SiteError::UnknownPage("home".to_string()))?;
    render_page(&state, def, locale).await
}

/// `GET /:locale/*path`. A trailing slash is stripped by redirect before
/// any page lookup so each page has a single URL.
pub async fn locale_page(
    State(state): State<Arc<AppState>>,
    Path((segment, path)): Path<(String, String)>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let hint = header_hint(&headers);

    if path.ends_with('/') {
        return match trailing_slash_redirect(uri.path()) {
            Some(redirect) => Ok(redirect),
            None => render_not_found(&state, locale::resolve(Some(&segment), hint)).await,
        };
    }

    if !locale::is_canonical(&segment) {
        if let Some(def) = pages::find_by_path(&format!("/{}/{}", segment, path)) {
            return bare_path_redirect(def, hint);
        }
    }

    let locale = locale::resolve(Some(&segment), hint);
    match pages::find_by_path(&format!("/{}", path)) {
        Some(def) => render_page(&state, def, locale).await,
        None => {
            tracing::debug!("No page at /{}/{}", segment, path);
            render_not_found(&state, locale).await
        }
    }
}

/// Router fallback. A trailing slash is stripped by redirect, anything else
/// gets the 404 page in the locale its first segment implies.
pub async fn fallback(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    if let Some(redirect) = trailing_slash_redirect(uri.path()) {
        return Ok(redirect);
    }

    let trimmed = uri.path().trim_end_matches('/');
    let first = trimmed.trim_start_matches('/').split('/').next().filter(|s| !s.is_empty());
    let locale = locale::resolve(first, header_hint(&headers));
    render_not_found(&state, locale).await
}

/// Permanent redirect from `/a/b/` to `/a/b`. Targets that a browser would
/// read as protocol-relative (`//host`, `/\host`) get no redirect.
fn trailing_slash_redirect(path: &str) -> Option<Response> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.len() <= 1 || trimmed.len() == path.len() {
        return None;
    }
    if matches!(trimmed.as_bytes()[1], b'/' | b'\\') {
        tracing::debug!("Refusing redirect for suspicious path {}", path);
        return None;
    }
    Some(Redirect::permanent(trimmed).into_response())
}

fn bare_path_redirect(def: &PageDef, hint: Option<&str>) -> Result<Response, SiteError> {
    let locale = locale::resolve(None, hint);
    let target = prepend_locale(def.path, locale)?;
    tracing::debug!("Redirecting bare path {} to {}", def.path, target);
    Ok(Redirect::temporary(&target).into_response())
}

async fn render_page(state: &AppState, def: &PageDef, locale: Locale) -> Result<Response, SiteError> {
    let html = state
        .cache
        .get_or_render(locale, def.id, || async {
            let page = state.renderer.render_def(def, locale)?;
            templates::page::render(&page, state.renderer.layout(locale)?)
        })
        .await?;
    Ok(Html(html.to_string()).into_response())
}

async fn render_not_found(state: &AppState, locale: Locale) -> Result<Response, SiteError> {
    let html = state
        .cache
        .get_or_render(locale, NOT_FOUND_PAGE, || async {
            templates::not_found::render(
                locale,
                state.renderer.layout(locale)?,
                state.renderer.not_found(locale)?,
            )
        })
        .await?;
    Ok((StatusCode::NOT_FOUND, Html(html.to_string())).into_response())
}
