// ═══════════════════════════════════════════════════════════════════
// Model Tests: wire decoding, query enums, settings, routes
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::coin::{CoinRecord, CoinsResponse};
use coin_dashboard_core::models::file::{FileRecord, SaveFileRequest, SelectedFile};
use coin_dashboard_core::models::history::{HistoryPoint, HistoryResponse};
use coin_dashboard_core::models::query::{CoinFilter, CoinSort};
use coin_dashboard_core::models::settings::{
    Settings, ENV_API_URL, ENV_UPLOAD_FOLDER, ENV_UPLOAD_PRESET, REFRESH_INTERVAL_SECS,
};
use coin_dashboard_core::router::Route;

const COINS_JSON: &str = r#"{
  "current": [
    {
      "id": "bitcoin",
      "name": "Bitcoin",
      "symbol": "btc",
      "current_price": 67012.5,
      "market_cap": 1320442118012,
      "price_change_percentage_24h": -1.2734,
      "image": "https://assets.example/bitcoin.png",
      "last_updated": "2025-01-15T10:30:00.000Z",
      "total_volume": 123
    }
  ]
}"#;

// ── CoinRecord ──────────────────────────────────────────────────────

mod coin_record {
    use super::*;

    #[test]
    fn decodes_snapshot_envelope() {
        let parsed: CoinsResponse = serde_json::from_str(COINS_JSON).unwrap();
        assert_eq!(parsed.current.len(), 1);
        let btc = &parsed.current[0];
        assert_eq!(btc.id, "bitcoin");
        assert_eq!(btc.symbol, "btc");
        assert_eq!(btc.current_price, 67012.5);
        assert_eq!(btc.market_cap, 1_320_442_118_012.0);
        assert_eq!(
            btc.last_updated,
            Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn empty_snapshot_decodes() {
        let parsed: CoinsResponse = serde_json::from_str(r#"{"current": []}"#).unwrap();
        assert!(parsed.current.is_empty());
    }

    #[test]
    fn missing_price_is_a_decode_error() {
        let json = r#"{"id":"x","name":"X","symbol":"x","market_cap":1,
            "price_change_percentage_24h":0,"last_updated":"2025-01-15T10:30:00Z"}"#;
        assert!(serde_json::from_str::<CoinRecord>(json).is_err());
    }

    #[test]
    fn missing_envelope_is_a_decode_error() {
        assert!(serde_json::from_str::<CoinsResponse>("[]").is_err());
    }

    #[test]
    fn gainer_threshold() {
        let mut coin: CoinsResponse = serde_json::from_str(COINS_JSON).unwrap();
        let btc = &mut coin.current[0];
        assert!(!btc.is_gainer());
        btc.price_change_percentage_24h = 0.0;
        assert!(btc.is_gainer());
    }

    #[test]
    fn matches_name_or_symbol() {
        let parsed: CoinsResponse = serde_json::from_str(COINS_JSON).unwrap();
        let btc = &parsed.current[0];
        assert!(btc.matches_lowercase("bit"));
        assert!(btc.matches_lowercase("btc"));
        assert!(btc.matches_lowercase(""));
        assert!(!btc.matches_lowercase("eth"));
    }
}

// ── HistoryPoint ────────────────────────────────────────────────────

mod history_point {
    use super::*;

    #[test]
    fn decodes_snapshot_shaped_samples() {
        let json = r#"[{"id":"bitcoin","current_price":100.5,"last_updated":"2025-01-15T10:30:00Z"}]"#;
        let points: Vec<HistoryPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].current_price, 100.5);
        assert!(points[0].last_updated.is_some());
    }

    #[test]
    fn missing_fields_fall_back() {
        let points: Vec<HistoryPoint> = serde_json::from_str("[{}]").unwrap();
        assert_eq!(points[0].last_updated, None);
        assert_eq!(points[0].current_price, 0.0);
    }

    #[test]
    fn null_price_is_plotted_as_zero() {
        let json = r#"[
            {"last_updated":"2024-05-01T10:00:00Z","current_price":null},
            {"last_updated":"2024-05-01T10:30:00Z","current_price":101.5}
        ]"#;
        let points: Vec<HistoryPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].current_price, 0.0);
        assert!(points[0].last_updated.is_some());
        assert_eq!(points[1].current_price, 101.5);
    }

    #[test]
    fn null_timestamp_is_kept_as_missing() {
        let json = r#"[{"last_updated":null,"current_price":3.0}]"#;
        let points: Vec<HistoryPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points[0].last_updated, None);
        assert_eq!(points[0].current_price, 3.0);
    }

    #[test]
    fn null_entry_becomes_empty_sample() {
        let json = r#"[null, {"last_updated":"2024-05-01T10:30:00Z","current_price":101.5}]"#;
        let HistoryResponse(points) = serde_json::from_str(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], HistoryPoint::default());
        assert_eq!(points[1].current_price, 101.5);
    }

    #[test]
    fn non_array_is_a_decode_error() {
        assert!(serde_json::from_str::<Vec<HistoryPoint>>(r#"{"error":"x"}"#).is_err());
        assert!(serde_json::from_str::<HistoryResponse>(r#"{"error":"x"}"#).is_err());
    }
}

// ── File records ────────────────────────────────────────────────────

mod files {
    use super::*;

    #[test]
    fn decodes_mongo_style_id() {
        let json = r#"[{"_id":"65a1","name":"logs.zip","url":"https://cdn/logs.zip","__v":0}]"#;
        let files: Vec<FileRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(files[0].id, "65a1");
        assert_eq!(files[0].name, "logs.zip");
    }

    #[test]
    fn accepts_plain_id() {
        let json = r#"{"id":"7","name":"a.rar","url":"u"}"#;
        let file: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, "7");
    }

    #[test]
    fn save_request_body_shape() {
        let body = SaveFileRequest {
            name: "a.zip".into(),
            url: "https://cdn/a.zip".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "a.zip", "url": "https://cdn/a.zip"})
        );
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(SelectedFile::new("backup.ZIP", vec![]).has_allowed_extension());
        assert!(SelectedFile::new("backup.Rar", vec![]).has_allowed_extension());
        assert!(!SelectedFile::new("archive.txt", vec![]).has_allowed_extension());
        assert!(!SelectedFile::new("zip", vec![]).has_allowed_extension());
        assert!(!SelectedFile::new("backup.zip.exe", vec![]).has_allowed_extension());
    }

    #[test]
    fn debug_hides_bytes() {
        let file = SelectedFile::new("a.zip", vec![1, 2, 3]);
        let dbg = format!("{file:?}");
        assert!(dbg.contains("a.zip"));
        assert!(dbg.contains("size: 3"));
    }
}

// ── Filter / sort selections ────────────────────────────────────────

mod query {
    use super::*;

    #[test]
    fn filter_parses_option_values() {
        assert_eq!("".parse::<CoinFilter>().unwrap(), CoinFilter::All);
        assert_eq!("all".parse::<CoinFilter>().unwrap(), CoinFilter::All);
        assert_eq!("gainers".parse::<CoinFilter>().unwrap(), CoinFilter::Gainers);
        assert_eq!("LOSERS".parse::<CoinFilter>().unwrap(), CoinFilter::Losers);
        assert!(matches!(
            "winners".parse::<CoinFilter>(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn filter_as_str_round_trips() {
        for filter in CoinFilter::ALL {
            assert_eq!(filter.as_str().parse::<CoinFilter>().unwrap(), filter);
        }
    }

    #[test]
    fn sort_parses_option_values() {
        assert_eq!("".parse::<CoinSort>().unwrap(), CoinSort::None);
        assert_eq!("price-desc".parse::<CoinSort>().unwrap(), CoinSort::PriceDesc);
        assert_eq!("price-asc".parse::<CoinSort>().unwrap(), CoinSort::PriceAsc);
        assert_eq!("marketcap".parse::<CoinSort>().unwrap(), CoinSort::MarketCap);
        assert_eq!("percent-desc".parse::<CoinSort>().unwrap(), CoinSort::PercentDesc);
        assert!("volume".parse::<CoinSort>().is_err());
    }

    #[test]
    fn next_cycles_through_all() {
        assert_eq!(CoinFilter::All.next(), CoinFilter::Gainers);
        assert_eq!(CoinFilter::Losers.next(), CoinFilter::All);
        let mut sort = CoinSort::None;
        for _ in 0..CoinSort::ALL.len() {
            sort = sort.next();
        }
        assert_eq!(sort, CoinSort::None);
    }

    #[test]
    fn display_labels() {
        assert_eq!(CoinFilter::Gainers.to_string(), "Gainers");
        assert_eq!(CoinSort::PriceDesc.to_string(), "Price: High → Low");
        assert_eq!(CoinSort::None.to_string(), "Sort By");
    }
}

// ── Settings ────────────────────────────────────────────────────────

mod settings {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_api_url() {
        let settings =
            Settings::from_lookup(lookup(&[(ENV_API_URL, "http://localhost:5000/api/")])).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:5000/api");
        assert_eq!(settings.refresh_interval_secs, REFRESH_INTERVAL_SECS);
        assert_eq!(settings.refresh_interval_secs, 1800);
        assert_eq!(settings.storage.upload_preset, "customer_profile");
        assert_eq!(settings.storage.folder, "compressed_files");
    }

    #[test]
    fn overrides_storage_fields() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.example"),
            (ENV_UPLOAD_PRESET, "archives"),
            (ENV_UPLOAD_FOLDER, "uploads"),
        ]))
        .unwrap();
        assert_eq!(settings.storage.upload_preset, "archives");
        assert_eq!(settings.storage.folder, "uploads");
    }

    #[test]
    fn rejects_non_http_url() {
        let err = Settings::from_lookup(lookup(&[(ENV_API_URL, "localhost:5000")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let result = Settings::from_lookup(lookup(&[(ENV_API_URL, "https://api.example"), (ENV_UPLOAD_FOLDER, "  ")]));
        assert_eq!(result.unwrap().storage.folder, "compressed_files");
    }

    #[test]
    fn blank_runtime_value_falls_back_to_build_value() {
        let runtime = lookup(&[(ENV_API_URL, ""), (ENV_UPLOAD_PRESET, "   ")]);
        let baked = lookup(&[
            (ENV_API_URL, "https://baked.example/api"),
            (ENV_UPLOAD_PRESET, "baked_preset"),
        ]);
        let settings = Settings::from_layers(runtime, baked).unwrap();
        assert_eq!(settings.api_base_url, "https://baked.example/api");
        assert_eq!(settings.storage.upload_preset, "baked_preset");
        assert_eq!(settings.storage.folder, "compressed_files");
    }

    #[test]
    fn runtime_value_wins_over_build_value() {
        let runtime = lookup(&[(ENV_API_URL, "http://localhost:5000/api")]);
        let baked = lookup(&[(ENV_API_URL, "https://baked.example/api")]);
        let settings = Settings::from_layers(runtime, baked).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn blank_in_both_layers_is_a_config_error() {
        let err = Settings::from_layers(lookup(&[(ENV_API_URL, " ")]), lookup(&[(ENV_API_URL, "")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn durations() {
        let settings = Settings::new("http://x");
        assert_eq!(settings.refresh_interval().as_secs(), 1800);
        assert_eq!(settings.request_timeout().as_secs(), 30);
    }
}

// ── Routes ──────────────────────────────────────────────────────────

mod routes {
    use super::*;

    #[test]
    fn root_is_home() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/?tab=1"), Route::Home);
    }

    #[test]
    fn coin_detail() {
        assert_eq!(Route::parse("/coin/bitcoin"), Route::coin("bitcoin"));
        assert_eq!(Route::parse("/coin/bitcoin/"), Route::coin("bitcoin"));
        assert_eq!(Route::parse("coin/ethereum"), Route::coin("ethereum"));
    }

    #[test]
    fn unknown_paths() {
        assert!(matches!(Route::parse("/coin/"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/coin/a/b"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/files"), Route::NotFound { .. }));
    }

    #[test]
    fn path_rendering() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::coin("solana").to_string(), "/coin/solana");
        assert_eq!(Route::parse(&Route::coin("xrp").path()), Route::coin("xrp"));
    }
}
