//! HTTP endpoint server using Axum.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::error::ApiError;
use crate::metrics::Metrics;
use crate::models::candle::{AssetClass, Interval};
use crate::services::ai::{AiInput, AiProvider};
use crate::services::market_data::MarketService;

#[derive(Clone)]
pub struct AppState {
    pub market: Arc<MarketService>,
    pub ai: Arc<dyn AiProvider>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "marketlens-api"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics.
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct MarketQuery {
    symbol: Option<String>,
    asset: Option<String>,
    interval: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SyncQuery {
    symbol: Option<String>,
    asset: Option<String>,
    intervals: Option<String>,
}

struct ParsedQuery {
    symbol: String,
    asset_class: AssetClass,
    interval: Interval,
}

fn parse_market_query(params: &MarketQuery) -> Result<ParsedQuery, ApiError> {
    let symbol = params
        .symbol
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("symbol required".to_string()))?
        .to_string();

    let asset_class = match params.asset.as_deref() {
        None => AssetClass::Stock,
        Some(raw) => AssetClass::from_str(raw).map_err(ApiError::BadRequest)?,
    };
    let interval = match params.interval.as_deref() {
        None => Interval::H1,
        Some(raw) => Interval::from_str(raw).map_err(ApiError::BadRequest)?,
    };

    Ok(ParsedQuery {
        symbol,
        asset_class,
        interval,
    })
}

/// Raw candles for the chart frontend.
async fn get_kline(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = parse_market_query(&params)?;
    let snapshot = state
        .market
        .snapshot(&query.symbol, query.asset_class, query.interval)
        .await?;

    Ok(Json(json!({
        "symbol": snapshot.symbol,
        "assetClass": snapshot.asset_class,
        "interval": snapshot.interval,
        "timezone": snapshot.timezone,
        "currency": snapshot.currency,
        "candles": snapshot.candles,
    })))
}

/// Full indicator bundle for one interval.
async fn get_indicators(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = parse_market_query(&params)?;
    let snapshot = state
        .market
        .snapshot(&query.symbol, query.asset_class, query.interval)
        .await?;

    Ok(Json(json!({
        "symbol": snapshot.symbol,
        "assetClass": snapshot.asset_class,
        "interval": snapshot.interval,
        "indicators": snapshot.indicators,
    })))
}

/// Rule table evaluation for one interval.
async fn get_rules(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = parse_market_query(&params)?;
    let snapshot = state
        .market
        .snapshot(&query.symbol, query.asset_class, query.interval)
        .await?;

    Ok(Json(json!({
        "symbol": snapshot.symbol,
        "assetClass": snapshot.asset_class,
        "interval": snapshot.interval,
        "rules": snapshot.rules,
    })))
}

/// Multi-interval rule evaluation plus timeframe agreement.
async fn get_sync(
    State(state): State<AppState>,
    Query(params): Query<SyncQuery>,
) -> Result<Json<Value>, ApiError> {
    let symbol = params
        .symbol
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("symbol required".to_string()))?;
    let asset_class = match params.asset.as_deref() {
        None => AssetClass::Stock,
        Some(raw) => AssetClass::from_str(raw).map_err(ApiError::BadRequest)?,
    };

    let intervals: Vec<Interval> = match params.intervals.as_deref() {
        None => vec![Interval::H1, Interval::D1],
        Some(raw) => raw
            .split(',')
            .map(|s| Interval::from_str(s.trim()).map_err(ApiError::BadRequest))
            .collect::<Result<_, _>>()?,
    };

    let result = state
        .market
        .multi_interval_rules(symbol, asset_class, &intervals)
        .await?;

    Ok(Json(json!({
        "symbol": symbol,
        "assetClass": asset_class,
        "by_interval": result.by_interval,
        "timeframe_sync": result.timeframe_sync,
    })))
}

/// AI structural commentary over the summarized indicator/rule state.
async fn get_ai_analysis(
    State(state): State<AppState>,
    Query(params): Query<MarketQuery>,
) -> Result<Json<Value>, ApiError> {
    let query = parse_market_query(&params)?;
    let snapshot = state
        .market
        .snapshot(&query.symbol, query.asset_class, query.interval)
        .await?;

    let input = AiInput::new(
        &snapshot.symbol,
        snapshot.asset_class,
        snapshot.interval,
        snapshot.indicators.latest.clone(),
        snapshot.rules.clone(),
    );
    let analysis = state
        .ai
        .analyze(&input)
        .await
        .map_err(|e| ApiError::Ai(e.to_string()))?;

    Ok(Json(json!({
        "symbol": snapshot.symbol,
        "assetClass": snapshot.asset_class,
        "interval": snapshot.interval,
        "provider": state.ai.name(),
        "analysis": analysis,
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/market/kline", get(get_kline))
        .route("/api/market/indicators", get(get_indicators))
        .route("/api/analysis/rules", get(get_rules))
        .route("/api/analysis/sync", get(get_sync))
        .route("/api/analysis/ai", get(get_ai_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
