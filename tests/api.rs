//! HTTP API tests driving the router without binding a socket.

use agroplan::config::{
    CatalogConfig, Config, ObservabilityConfig, PlannerConfig, ServerConfig,
};
use agroplan_catalog::Catalog;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        planner: PlannerConfig::default(),
        observability: ObservabilityConfig::default(),
        catalog: CatalogConfig::default(),
    }
}

fn create_test_app() -> anyhow::Result<Router> {
    let catalog = Catalog::load_embedded()?;
    Ok(agroplan::create_app(create_test_config(), catalog))
}

async fn send(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)?
    };
    Ok((status, value))
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

fn post_plan(body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri("/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let (status, body) = send(create_test_app()?, get("/health")?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() -> anyhow::Result<()> {
    let (status, body) = send(create_test_app()?, get("/nope")?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_crops_lists_every_catalog_crop() -> anyhow::Result<()> {
    let (status, body) = send(create_test_app()?, get("/crops")?).await?;

    assert_eq!(status, StatusCode::OK);
    let crops = body.as_array().expect("array of crops");
    assert_eq!(crops.len(), 12);

    let tomato = crops
        .iter()
        .find(|c| c["crop"] == "Tomato")
        .expect("tomato listed");
    assert_eq!(tomato["name"], "томатів");
    assert_eq!(
        tomato["problems"],
        json!(["weeds", "diseases", "pests", "integrated"])
    );
    Ok(())
}

#[tokio::test]
async fn test_products_filtered_by_control() -> anyhow::Result<()> {
    let (status, body) = send(
        create_test_app()?,
        get("/crops/tomato/products?plot=field&problem=diseases&filter=phytophthora,rots")?,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plotType"], "field");
    let fungicides = body["fungicides"].as_array().expect("fungicides");
    assert!(!fungicides.is_empty());
    for f in fungicides {
        assert_eq!(f["controls"]["phytophthora"], true);
        assert_eq!(f["controls"]["rots"], true);
    }
    assert!(body.get("insecticides").is_none());
    Ok(())
}

#[tokio::test]
async fn test_products_home_plot_hides_field_only_products() -> anyhow::Result<()> {
    let (status, body) = send(
        create_test_app()?,
        get("/crops/tomato/products?problem=diseases")?,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plotType"], "home");
    let names: Vec<&str> = body["fungicides"]
        .as_array()
        .expect("fungicides")
        .iter()
        .filter_map(|f| f["productName"].as_str())
        .collect();
    assert!(!names.contains(&"Зорвек Інкантія"));
    Ok(())
}

#[tokio::test]
async fn test_products_unknown_crop_is_not_found() -> anyhow::Result<()> {
    let (status, body) = send(
        create_test_app()?,
        get("/crops/banana/products?problem=pests")?,
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap_or_default().contains("banana"));
    Ok(())
}

#[tokio::test]
async fn test_products_missing_problem_is_bad_request() -> anyhow::Result<()> {
    let response = create_test_app()?
        .oneshot(get("/crops/tomato/products")?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_products_unknown_filter_is_rejected() -> anyhow::Result<()> {
    let (status, body) = send(
        create_test_app()?,
        get("/crops/tomato/products?problem=pests&filter=phytophthora")?,
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap_or_default().contains("phytophthora"));
    Ok(())
}

#[tokio::test]
async fn test_plan_is_reproducible_with_seed() -> anyhow::Result<()> {
    let request = json!({
        "crop": "Tomato",
        "seasonLengthDays": 90,
        "plotType": "field",
        "seed": 7
    });

    let (status, first) = send(create_test_app()?, post_plan(request.clone())?).await?;
    let (_, second) = send(create_test_app()?, post_plan(request)?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first["seed"], 7);
    assert_eq!(first["seasonLengthDays"], 90);
    assert_eq!(first["title"], "Інтегрована система захисту томатів");

    let rows = first["treatments"].as_array().expect("rows");
    assert_eq!(rows.len(), 10);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["treatmentNumber"], index + 1);
        let products = row["products"].as_array().expect("products");
        assert!(products.len() <= 4);
        assert!(row["uncoveredTargets"].is_array());
    }
    Ok(())
}

#[tokio::test]
async fn test_plan_short_season_returns_message() -> anyhow::Result<()> {
    let (status, body) = send(
        create_test_app()?,
        post_plan(json!({"crop": "Cabbage", "seasonLengthDays": 21, "plotType": "home"}))?,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["treatments"], json!([]));
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_plan_season_out_of_range_is_rejected() -> anyhow::Result<()> {
    for days in [10, 400] {
        let (status, body) = send(
            create_test_app()?,
            post_plan(json!({"crop": "Tomato", "seasonLengthDays": days, "plotType": "home"}))?,
        )
        .await?;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap_or_default().contains("Season length"));
    }
    Ok(())
}

#[tokio::test]
async fn test_plan_malformed_body_is_rejected() -> anyhow::Result<()> {
    let response = create_test_app()?
        .oneshot(post_plan(json!({"crop": "Banana", "seasonLengthDays": 90}))?)
        .await?;

    assert!(response.status().is_client_error());
    Ok(())
}
