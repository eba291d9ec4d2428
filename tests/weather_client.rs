//! Tests for the OpenWeather client against a local stub server

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use trafficai::TrafficAiError;
use trafficai::config::WeatherConfig;
use trafficai::weather::{OpenWeatherClient, WeatherProvider, WeatherReading};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base_url: String) -> WeatherConfig {
    WeatherConfig {
        api_key: Some("secret-key-123".to_string()),
        base_url,
        city: "Ahmedabad".to_string(),
        country_code: "IN".to_string(),
        timeout_seconds: 5,
    }
}

async fn client_against(router: Router) -> OpenWeatherClient {
    let base_url = serve(router).await;
    OpenWeatherClient::new(&config(base_url)).unwrap()
}

#[tokio::test]
async fn server_error_status_yields_fetch_error() {
    let router = Router::new().route(
        "/data/2.5/weather",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
    );

    let client = client_against(router).await;
    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, TrafficAiError::Fetch { .. }));
    assert!(err.to_string().contains("500"), "got: {err}");
}

#[tokio::test]
async fn unauthorized_status_yields_fetch_error() {
    let router = Router::new().route(
        "/data/2.5/weather",
        get(|| async { (StatusCode::UNAUTHORIZED, r#"{"cod":401,"message":"Invalid API key"}"#) }),
    );

    let client = client_against(router).await;
    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, TrafficAiError::Fetch { .. }));
    assert!(err.to_string().contains("401"), "got: {err}");
}

#[tokio::test]
async fn malformed_body_yields_fetch_error() {
    let router = Router::new().route("/data/2.5/weather", get(|| async { "not json" }));

    let client = client_against(router).await;
    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, TrafficAiError::Fetch { .. }));
}

#[tokio::test]
async fn success_body_parses_into_reading() {
    let router = Router::new().route(
        "/data/2.5/weather",
        get(|| async { r#"{"main": {"temp": 29.5}, "clouds": {"all": 40}, "rain": {"1h": 1.2}}"# }),
    );

    let client = client_against(router).await;
    let reading = client.fetch().await.unwrap();

    assert_eq!(
        reading,
        WeatherReading {
            temperature: 29.5,
            rain_1h: 1.2,
            snow_1h: 0.0,
            cloud_cover_pct: 40,
        }
    );
}
