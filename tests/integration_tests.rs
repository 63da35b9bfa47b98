use anyhow::Result;
use httpmock::prelude::*;
use quake_map::feed::kind::{FeedMagnitude, FeedPeriod};
use quake_map::{CliConfig, LocalStorage, MapEngine, QuakePipeline, TomlConfig};
use tempfile::TempDir;

fn cli_config(feed_url: String, output_path: String) -> CliConfig {
    CliConfig {
        feed_url: Some(feed_url),
        magnitude: FeedMagnitude::All,
        period: FeedPeriod::Week,
        output_path,
        formats: vec!["html".to_string(), "csv".to_string(), "json".to_string()],
        min_magnitude: None,
        timeout_seconds: Some(5),
        strict: false,
        base_layer: None,
        title: "Integration Quakes".to_string(),
        config: None,
        verbose: false,
        json_logs: false,
    }
}

fn feature(lon: f64, lat: f64, depth: f64, mag: f64, place: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "properties": {"mag": mag, "place": place, "time": 1704067200000i64},
        "geometry": {"type": "Point", "coordinates": [lon, lat, depth]}
    })
}

fn read_map_json(output_path: &str) -> Result<serde_json::Value> {
    let data = std::fs::read(std::path::Path::new(output_path).join("map.json"))?;
    Ok(serde_json::from_slice(&data)?)
}

#[tokio::test]
async fn test_end_to_end_single_deep_quake() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Setup mock feed server
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/summary/all_week.geojson");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "type": "FeatureCollection",
                "features": [feature(139.7, 35.6, 95.0, 5.0, "Test Zone")]
            }));
    });

    let config = cli_config(server.url("/summary/all_week.geojson"), output_path.clone());
    // Run the full pipeline
    let pipeline = QuakePipeline::new(LocalStorage::new(output_path.clone()), config)?;
    let result = MapEngine::new(pipeline).run().await?;

    // Verify results
    api_mock.assert();
    assert!(result.ends_with("quake_map.html"));

    let html = std::fs::read_to_string(temp_dir.path().join("quake_map.html"))?;
    assert!(html.contains("<title>Integration Quakes</title>"));
    assert!(html.contains("<div id=\"map\"></div>"));

    // One red marker with the popup details
    let map = read_map_json(&output_path)?;
    let markers = map["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["position"], serde_json::json!([35.6, 139.7]));
    assert_eq!(markers[0]["radius"], 10.0);
    assert_eq!(markers[0]["fill_color"], "red");
    let popup = markers[0]["popup"].as_str().unwrap();
    assert!(popup.contains('5'));
    assert!(popup.contains("Test Zone"));
    assert!(popup.contains("95"));

    assert_eq!(map["active_layer"], 0);
    assert_eq!(map["base_layers"][0]["name"], "Street View");
    assert_eq!(map["legend"]["entries"].as_array().unwrap().len(), 6);

    let csv = std::fs::read_to_string(temp_dir.path().join("earthquakes.csv"))?;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("2024-01-01T00:00:00+00:00"));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_empty_feed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Setup mock feed server
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"type": "FeatureCollection", "features": []}));
    });

    let config = cli_config(server.url("/feed"), output_path.clone());
    // Run the full pipeline
    let pipeline = QuakePipeline::new(LocalStorage::new(output_path.clone()), config)?;
    MapEngine::new(pipeline).run().await?;

    // Verify results
    api_mock.assert();
    let map = read_map_json(&output_path)?;
    assert!(map["markers"].as_array().unwrap().is_empty());
    assert_eq!(map["legend"]["entries"].as_array().unwrap().len(), 6);

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_feed_failure_still_renders_map() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Setup mock feed server
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(500);
    });

    let config = cli_config(server.url("/feed"), output_path.clone());
    // Run the full pipeline
    let pipeline = QuakePipeline::new(LocalStorage::new(output_path.clone()), config)?;
    let result = MapEngine::new(pipeline).run().await;

    // Page still rendered, no markers
    assert!(result.is_ok());
    api_mock.assert();
    assert!(temp_dir.path().join("quake_map.html").exists());
    let map = read_map_json(&output_path)?;
    assert!(map["markers"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_strict_mode_fails_and_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Setup mock feed server
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(502);
    });

    let mut config = cli_config(server.url("/feed"), output_path.clone());
    config.strict = true;
    // Run the full pipeline
    let pipeline = QuakePipeline::new(LocalStorage::new(output_path.clone()), config)?;
    let result = MapEngine::new(pipeline).run().await;

    // Verify nothing was written
    assert!(result.is_err());
    assert!(!temp_dir.path().join("quake_map.html").exists());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_skips_malformed_features() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    // Setup mock feed server
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(200).json_body(serde_json::json!({
            "features": [
                feature(-70.0, -33.0, 110.0, 6.3, "Chile"),
                {"properties": {"mag": 3.0, "place": "broken"}, "geometry": null},
                feature(-155.3, 19.4, 2.0, 2.1, "Hawaii")
            ]
        }));
    });

    let config = cli_config(server.url("/feed"), output_path.clone());
    // Run the full pipeline
    let pipeline = QuakePipeline::new(LocalStorage::new(output_path.clone()), config)?;
    MapEngine::new(pipeline).run().await?;

    // Verify results keep feed order
    let map = read_map_json(&output_path)?;
    let colors: Vec<&str> = map["markers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["fill_color"].as_str().unwrap())
        .collect();
    assert_eq!(colors, vec!["red", "green"]);

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().join("maps");

    // Setup mock feed server
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(200).json_body(serde_json::json!({
            "features": [
                feature(1.0, 1.0, 55.0, 1.5, "small"),
                feature(2.0, 2.0, 75.0, 4.8, "large")
            ]
        }));
    });

    // Point the config file at the mock server
    let toml_content = format!(
        r#"
[source]
url = "{}"
min_magnitude = 2.0

[map]
base_layer = "Satellite View"

[output]
path = "{}"
formats = ["json"]
"#,
        server.url("/feed"),
        output_path.display()
    );
    let config = TomlConfig::from_toml_str(&toml_content)?;
    let pipeline = QuakePipeline::new(
        LocalStorage::new(output_path.to_str().unwrap().to_string()),
        config,
    )?;
    let result = MapEngine::new(pipeline).run().await?;

    // Verify results
    assert!(result.ends_with("map.json"));
    assert!(!output_path.join("quake_map.html").exists());

    let map = read_map_json(output_path.to_str().unwrap())?;
    let markers = map["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["fill_color"], "orangered");
    assert_eq!(map["active_layer"], 1);

    Ok(())
}
