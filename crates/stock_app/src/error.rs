use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stock_engine::{MonitorError, RegistryError, ScrapeError};
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Monitor(#[from] MonitorError),
    #[error("{0}")]
    NoScraper(#[from] RegistryError),
    #[error("{0}")]
    Scrape(#[from] ScrapeError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Monitor(MonitorError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
            AppError::Monitor(MonitorError::AlreadyMonitored(_)) => StatusCode::CONFLICT,
            AppError::Monitor(MonitorError::NotMonitored(_)) => StatusCode::NOT_FOUND,
            AppError::Monitor(MonitorError::RuntimeUnavailable) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NoScraper(_) => StatusCode::NOT_FOUND,
            AppError::Scrape(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use axum::http::StatusCode;
    use stock_engine::{MonitorError, RegistryError, ScrapeError};

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (AppError::from(MonitorError::InvalidUrl("x".into())), StatusCode::BAD_REQUEST),
            (AppError::from(MonitorError::AlreadyMonitored("x".into())), StatusCode::CONFLICT),
            (AppError::from(MonitorError::NotMonitored("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(RegistryError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (
                AppError::from(ScrapeError::EmptyStatus { url: "x".into() }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }
}
