use anyhow::Result;
use market_finder::app::{report, search};
use market_finder::core::finder::MarketFinder;
use market_finder::core::loader::load_markets;
use market_finder::core::{ConfigProvider, QueryOutcome};
use market_finder::{CachedStorage, FinderError, LocalStorage, TomlConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ZIP_TABLE: &str = "zip,lat,lng,city,state_id\n\
    94107,37.7749,-122.4194,San Francisco,CA\n\
    94612,37.8044,-122.2712,Oakland,CA\n\
    10001,40.7506,-73.9972,New York,NY\n\
    99999,,,Nowhere,XX\n";

/// Market table bytes in Windows-1252: 0xE9 is e-acute, 0x92 a right single quote.
fn market_table() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(
        b"listing_name,location_address,location_x,location_y,location_desc,orgnization\n",
    );
    bytes.extend_from_slice(b"Union Square Greenmarket,\"\"\"E 17th St & Union Sq W\"\"\",-73.9903,40.7368,Year-round,GrowNYC\n");
    bytes.extend_from_slice(b"Ferry Plaza Farmers Market,1 Ferry Building,-122.3937,37.7955,Saturdays 8-2,CUESA\n");
    bytes.extend_from_slice(b"Caf\xe9 Corner Market,\"\"\"123 Main St\"\"\",-122.4190,37.7750,Farmer\x92s stalls,\n");
    bytes.extend_from_slice(b"No Coordinates,somewhere,,,missing,\n");
    bytes.extend_from_slice(b"Bad Latitude,somewhere,-122.41,abc,typo,\n");
    bytes.extend_from_slice(b"Trailing Comma Market,\"  2 Pier Rd  \",\" -122.4000, \",\"37.7800,\",Sundays,\n");
    bytes.extend_from_slice(b"Oakland Grand Lake,Grand Ave & Lake Park Ave,-122.2480,37.8105,Saturdays,\n");
    bytes.extend_from_slice(b"San Jose Downtown,San Pedro Square,-121.8863,37.3382,Fridays,\n");
    bytes
}

fn write_fixtures(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir.join("data"))?;
    fs::write(dir.join("data/uszips.csv"), ZIP_TABLE)?;
    fs::write(dir.join("data/markets.csv"), market_table())?;
    Ok(())
}

fn default_config() -> Result<TomlConfig> {
    Ok(TomlConfig::from_toml_str("")?)
}

#[test]
fn test_end_to_end_search_from_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);
    let outcome = finder.find("94107")?;

    let QueryOutcome::Found(result) = outcome else {
        panic!("94107 should resolve");
    };

    let names: Vec<&str> = result
        .matches
        .iter()
        .map(|m| m.market.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Caf\u{e9} Corner Market",
            "Trailing Comma Market",
            "Ferry Plaza Farmers Market",
            "Oakland Grand Lake",
        ]
    );

    let distances: Vec<f64> = result.matches.iter().map(|m| m.distance_miles).collect();
    assert_eq!(distances[0], 0.0);
    assert_eq!(distances[2], 2.0);
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(distances.iter().all(|d| *d <= 25.0));

    let cafe = &result.matches[0].market;
    assert_eq!(cafe.address, "123 Main St");
    assert_eq!(cafe.description, "Farmer\u{2019}s stalls");

    let trailing = &result.matches[1].market;
    assert_eq!(trailing.address, "2 Pier Rd");
    assert_eq!(trailing.coordinate.lat, 37.78);
    assert_eq!(trailing.coordinate.lon, -122.4);

    assert_eq!(result.skipped.len(), 2);
    assert_eq!(result.skipped[0].raw[0], "No Coordinates");
    assert_eq!(result.skipped[1].raw[0], "Bad Latitude");

    Ok(())
}

#[test]
fn test_new_york_query_excludes_west_coast() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);
    let outcome = finder.find("10001")?;

    assert_eq!(outcome.matches().len(), 1);
    assert_eq!(outcome.matches()[0].market.name, "Union Square Greenmarket");
    assert_eq!(outcome.matches()[0].market.address, "E 17th St & Union Sq W");
    Ok(())
}

#[test]
fn test_unknown_zip_is_reported_not_raised() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);
    let outcome = finder.find("00000")?;

    assert!(outcome.is_not_found());
    assert!(outcome.matches().is_empty());
    assert_eq!(outcome.user_message(), Some(market_finder::ZIP_NOT_FOUND_MESSAGE));
    Ok(())
}

#[test]
fn test_zero_byte_zip_table_is_not_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;
    fs::write(temp_dir.path().join("data/uszips.csv"), b"")?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);
    let outcome = finder.find("94107")?;

    assert!(outcome.is_not_found());
    assert_eq!(report::render_text(&outcome), "94107: ZIP code not found.\n");
    Ok(())
}

#[test]
fn test_zip_row_without_coordinates_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);
    let err = finder.find("99999").unwrap_err();

    assert!(matches!(err, FinderError::MalformedZipRow { ref zip, line: 5, .. } if zip == "99999"));
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[test]
fn test_missing_market_file_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::create_dir_all(temp_dir.path().join("data"))?;
    fs::write(temp_dir.path().join("data/uszips.csv"), ZIP_TABLE)?;

    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), default_config()?);

    // An unknown ZIP never needs the market table.
    assert!(finder.find("00000")?.is_not_found());

    let err = finder.find("94107").unwrap_err();
    assert!(matches!(err, FinderError::MissingReferenceFile { .. }));
    Ok(())
}

#[test]
fn test_market_table_read_as_utf8_garbles_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let config = TomlConfig::from_toml_str(
        "[market_table]\npath = \"data/markets.csv\"\nencoding = \"utf-8\"\n",
    )?;
    let finder = MarketFinder::new(LocalStorage::new(temp_dir.path()), config);
    let outcome = finder.find("94107")?;

    let names: Vec<&str> = outcome.matches().iter().map(|m| m.market.name.as_str()).collect();
    assert!(names.contains(&"Caf\u{fffd} Corner Market"));
    Ok(())
}

#[test]
fn test_toml_config_with_custom_columns_and_radius() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("zips.csv"),
        "postal,latitude,longitude\n94107,37.7749,-122.4194\n",
    )?;
    fs::write(
        temp_dir.path().join("markets.csv"),
        "title,street,lat,lon,notes\nNear,a,37.7750,-122.4190,n\nFerry,b,37.7955,-122.3937,f\n",
    )?;

    std::env::set_var("MARKET_FINDER_IT_DIR", temp_dir.path());
    let config = TomlConfig::from_toml_str(
        r#"
[finder]
radius_miles = 1.0
base_dir = "${MARKET_FINDER_IT_DIR}"

[zip_table]
path = "zips.csv"
encoding = "utf-8"

[zip_table.columns]
zip = "postal"
lat = "latitude"
lon = "longitude"

[market_table]
path = "markets.csv"
encoding = "windows-1252"

[market_table.columns]
name = "title"
address = "street"
lat = "lat"
lon = "lon"
description = "notes"
"#,
    )?;
    std::env::remove_var("MARKET_FINDER_IT_DIR");

    assert_eq!(config.radius_miles(), 1.0);
    let storage = LocalStorage::new(config.base_dir());
    let outcomes = search(storage, config, &["94107".to_string()], false)?;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].matches().len(), 1);
    assert_eq!(outcomes[0].matches()[0].market.name, "Near");
    Ok(())
}

#[test]
fn test_cached_batch_reads_tables_once() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let finder = MarketFinder::new(
        CachedStorage::new(LocalStorage::new(temp_dir.path())),
        default_config()?,
    );
    let first = finder.find_all(&["94107", "10001"])?;
    assert_eq!(first[0].matches().len(), 4);

    // Removing the files does not affect cached queries.
    fs::remove_file(temp_dir.path().join("data/markets.csv"))?;
    let again = finder.find("94107")?;
    assert_eq!(again.matches().len(), 4);

    finder.storage().clear();
    assert!(finder.find("94107").is_err());
    Ok(())
}

#[test]
fn test_json_report_round_trips_through_serde() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(temp_dir.path())?;

    let storage = LocalStorage::new(temp_dir.path());
    let zips = vec!["94612".to_string(), "00000".to_string()];
    let outcomes = search(storage, default_config()?, &zips, true)?;

    let json = report::render_json(&outcomes)?;
    let parsed: Vec<QueryOutcome> = serde_json::from_str(&json)?;
    assert_eq!(parsed, outcomes);
    assert_eq!(parsed[0].matches()[0].market.name, "Oakland Grand Lake");
    assert!(parsed[1].is_not_found());
    Ok(())
}

#[test]
fn test_loader_reports_skips_without_console() {
    let text = "listing_name,location_address,location_x,location_y,location_desc\n\
        Good,addr,-1.0,1.0,d\n\
        Bad,addr,-1.0,abc,d\n";
    let load = load_markets(text, &Default::default()).unwrap();
    assert_eq!(load.markets.len(), 1);
    assert_eq!(load.skipped.len(), 1);
    assert_eq!(load.skipped[0].line, 3);
    assert_eq!(load.skipped[0].reason.to_string(), "invalid location_y value 'abc'");
}
