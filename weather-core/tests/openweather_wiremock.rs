//! HTTP-level tests for the OpenWeather client against a mock server.

use weather_core::{
    Coordinates, Dashboard, Metric, Status, WeatherError, WeatherProvider, compare_cities,
    provider::openweather::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 13.41, "lat": 52.52},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 6.3, "feels_like": 3.9, "pressure": 1018, "humidity": 76},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 250},
        "clouds": {"all": 75},
        "dt": 1736078400,
        "sys": {"country": "DE", "sunrise": 1736061300, "sunset": 1736090100},
        "timezone": 3600,
        "name": "Berlin"
    })
}

fn forecast_body() -> serde_json::Value {
    let list: Vec<_> = (0..40)
        .map(|i| {
            serde_json::json!({
                "dt": 1736035200 + i * 10800,
                "main": {"temp": 2.0 + (i % 8) as f64, "humidity": 80},
                "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": "04n"}],
                "wind": {"speed": 4.1, "deg": 240}
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": 40,
        "list": list,
        "city": {"name": "Berlin", "country": "DE", "timezone": 3600}
    })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), server.uri())
}

#[tokio::test]
async fn fetch_current_sends_city_key_and_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Berlin"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server).fetch_current("Berlin").await.unwrap();

    assert_eq!(current.city, "Berlin");
    assert_eq!(current.country, "DE");
    assert_eq!(current.condition, "Clouds");
    assert_eq!(current.utc_offset_secs, 3600);
    assert_eq!(current.coord, Coordinates { lat: 52.52, lon: 13.41 });
}

#[tokio::test]
async fn fetch_current_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = provider(&server).fetch_current("Nowhere").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn fetch_forecast_queries_by_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.41"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = provider(&server)
        .fetch_forecast(Coordinates { lat: 52.52, lon: 13.41 })
        .await
        .unwrap();

    assert_eq!(forecast.samples.len(), 40);
    assert_eq!(forecast.utc_offset_secs, 3600);
    assert_eq!(forecast.samples[0].description, "overcast clouds");
}

#[tokio::test]
async fn fetch_forecast_failure_says_not_available() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server)
        .fetch_forecast(Coordinates { lat: 0.0, lon: 0.0 })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Forecast data not available");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_current("Berlin").await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Nothing listens on the tcpmux port.
    let provider =
        OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), "http://127.0.0.1:1".to_string());
    let err = provider.fetch_current("Berlin").await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)));
}

#[tokio::test]
async fn failed_lookup_never_requests_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(Box::new(provider(&server)), "https://icons.test", 800.0);
    let err = dashboard.search("Atlantis").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(dashboard.view().page.status, Status::Error(_)));
    server.verify().await;
}

#[tokio::test]
async fn full_search_renders_days_in_city_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(Box::new(provider(&server)), "https://icons.test", 640.0);
    dashboard.search("Berlin").await.unwrap();

    let view = dashboard.view();
    assert_eq!(view.page.status, Status::Ready);
    assert_eq!(view.page.forecast.len(), 5);
    assert_eq!(view.page.forecast[0].date, "Sun, Jan 5");
    assert_eq!(view.page.current.unwrap().sunrise, "08:15 AM");
    assert!(view.trend.to_svg().contains("Max Temp"));
}

#[tokio::test]
async fn compare_fetches_each_city_and_skips_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    let comparison = compare_cities(&provider(&server), &["Atlantis", "Berlin"]).await;

    assert_eq!(comparison.readings.len(), 1);
    let berlin = &comparison.readings[0];
    assert_eq!(berlin.city, "Berlin");
    assert_eq!(berlin.temperature_c, 6.3);
    assert_eq!(berlin.pressure_hpa, 1018);
    assert_eq!(berlin.description, "broken clouds");
    assert_eq!(comparison.failures.len(), 1);
    assert_eq!(comparison.failures[0].0, "Atlantis");
    assert_eq!(comparison.average(Metric::Humidity), Some(76.0));
    server.verify().await;
}
