use crate::error::Error;
use crate::metrics;
use crate::oracle::Oracle;
use crate::validation::USAGE_HINT;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

const INTERNAL_ERROR_MESSAGE: &str = "Failed to generate prophecy. The quantum timeline is unstable.";

#[derive(Debug, Deserialize)]
pub struct OracleQuery {
    pub ticker: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Status code and body for a failed oracle request.
pub fn error_response(err: &Error) -> (StatusCode, ErrorBody) {
    match err {
        Error::InvalidInput(message) => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: message.clone(),
                hint: Some(USAGE_HINT.to_string()),
            },
        ),
        Error::NotFound { message, hint } => (
            StatusCode::NOT_FOUND,
            ErrorBody {
                error: message.clone(),
                hint: hint.clone(),
            },
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                hint: None,
            },
        ),
    }
}

fn with_oracle(oracle: Arc<Oracle>) -> impl Filter<Extract = (Arc<Oracle>,), Error = Infallible> + Clone {
    warp::any().map(move || oracle.clone())
}

pub fn routes(oracle: Arc<Oracle>) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let oracle_route = warp::path!("api" / "oracle")
        .and(warp::get())
        .and(warp::query::<OracleQuery>())
        .and(with_oracle(oracle.clone()))
        .and_then(get_prediction);

    let sectors_route = warp::path!("api" / "sectors")
        .and(warp::get())
        .and(with_oracle(oracle))
        .and_then(get_sectors);

    let health_route = warp::path!("health").and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    let metrics_route = warp::path!("metrics").and(warp::get()).map(get_metrics);

    oracle_route
        .or(sectors_route)
        .or(health_route)
        .or(metrics_route)
        .with(warp::cors().allow_any_origin().allow_methods(vec!["GET"]))
        .with(warp::log("market_oracle::web"))
}

async fn get_prediction(query: OracleQuery, oracle: Arc<Oracle>) -> Result<impl Reply, Infallible> {
    let ticker = query.ticker.unwrap_or_default();

    let reply = match oracle.predict(&ticker).await {
        Ok(report) => {
            info!("Served prophecy for {}", report.ticker);
            warp::reply::with_status(warp::reply::json(&report), StatusCode::OK)
        }
        Err(e) => {
            let (status, body) = error_response(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!("Oracle request for {:?} failed: {}", ticker, e);
            } else {
                info!("Rejected oracle request for {:?}: {}", ticker, e);
            }
            warp::reply::with_status(warp::reply::json(&body), status)
        }
    };
    Ok(reply)
}

async fn get_sectors(oracle: Arc<Oracle>) -> Result<impl Reply, Infallible> {
    let overview = oracle.sector_overview().await;
    Ok(warp::reply::json(&overview))
}

fn get_metrics() -> impl Reply {
    let (body, status) = match metrics::encode() {
        Ok(body) => (body, StatusCode::OK),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            ("Failed to encode metrics".to_string(), StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    warp::reply::with_header(
        warp::reply::with_status(body, status),
        "content-type",
        "text/plain; version=0.0.4",
    )
}
