use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use serde::Serialize;

use crate::{assets, errors::HttpError, state::HttpState};

const JSON_CONTENT_TYPE: &str = "application/json";

fn json_response<T: Serialize>(value: &T) -> Result<Response, HttpError> {
    let body = serde_json::to_vec(value).map_err(|err| HttpError::internal(err.to_string()))?;
    let mut response = Response::new(Body::from(body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(response)
}

pub async fn context(State(state): State<HttpState>) -> Result<Response, HttpError> {
    let context = state.context.clone();
    let response = tokio::task::spawn_blocking(move || app_api::context_snapshot(&context))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))?;
    json_response(&response)
}

pub async fn handoff(State(state): State<HttpState>) -> Result<Response, HttpError> {
    let context = state.context.clone();
    let response = tokio::task::spawn_blocking(move || app_api::handoff_document(&context))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))??;
    json_response(&response)
}

pub async fn ui_fallback(req: Request<Body>) -> Result<Response, HttpError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(HttpError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed",
        ));
    }

    if let Some(asset) = assets::asset(req.uri().path()) {
        return Ok(asset_response(asset));
    }

    let index = assets::index_asset()
        .ok_or_else(|| HttpError::internal("missing index.html"))?;
    Ok(asset_response(index))
}

fn asset_response(asset: &'static assets::EmbeddedAsset) -> Response {
    let mut response = Response::new(Body::from(asset.bytes));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(asset.mime));
    response
}
