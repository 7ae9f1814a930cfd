//! Focused unit tests covering CLI configuration and rendering.

use std::time::Duration;

use camino::Utf8PathBuf;
use powder_core::{Continent, PriorityProfile, ResortAttribute, ResortNode};
use rstest::rstest;

use super::helpers::ResortFiles;
use super::*;
use crate::config::{DEFAULT_CACHE, DEFAULT_RESORTS, DataArgs, DataConfig};
use crate::recommend::{RecommendArgs, RecommendConfig, config_from_layers_for_test, parse_priority};
use crate::render::{write_details, write_ranking};

fn recommend_args(continent: Option<&str>) -> RecommendArgs {
    RecommendArgs {
        continent: continent.map(str::to_owned),
        ..RecommendArgs::default()
    }
}

#[rstest]
#[case("apres_ski=0.5", ResortAttribute::ApresSki, 0.5)]
#[case("Snow reliability = 1", ResortAttribute::SnowReliability, 1.0)]
#[case("cleanliness=0", ResortAttribute::Cleanliness, 0.0)]
fn parses_priority_pairs(
    #[case] raw: &str,
    #[case] attribute: ResortAttribute,
    #[case] weight: f64,
) {
    assert_eq!(
        parse_priority(raw).expect("valid priority"),
        (attribute, weight)
    );
}

#[rstest]
#[case("apres_ski")]
#[case("apres_ski=lots")]
#[case("apres_ski=1.5")]
#[case("apres_ski=-0.1")]
fn rejects_malformed_priorities(#[case] raw: &str) {
    match parse_priority(raw) {
        Err(CliError::InvalidPriority { raw: reported }) => assert_eq!(reported, raw),
        other => panic!("expected InvalidPriority, found {other:?}"),
    }
}

#[rstest]
fn rejects_unknown_priority_attributes() {
    match parse_priority("stars=1") {
        Err(CliError::UnknownAttribute(err)) => assert_eq!(err.0, "stars"),
        other => panic!("expected UnknownAttribute, found {other:?}"),
    }
}

#[rstest]
fn converting_without_continent_errors() {
    let err = RecommendConfig::try_from(recommend_args(None)).expect_err("continent required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CONTINENT);
            assert_eq!(env, ENV_RECOMMEND_CONTINENT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_with_unknown_continent_errors() {
    let err = RecommendConfig::try_from(recommend_args(Some("atlantis")))
        .expect_err("unknown continent");
    assert!(matches!(err, CliError::InvalidContinent { .. }));
    assert_eq!(
        err.to_string(),
        "invalid --continent: unknown continent 'atlantis'"
    );
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
fn converting_with_invalid_distance_errors(#[case] distance: f64) {
    let args = RecommendArgs {
        max_distance: Some(distance),
        ..recommend_args(Some("europe"))
    };
    let err = RecommendConfig::try_from(args).expect_err("invalid distance");
    assert!(matches!(err, CliError::InvalidDistance { .. }));
}

#[rstest]
fn converting_applies_defaults() {
    let config = RecommendConfig::try_from(recommend_args(Some("North America")))
        .expect("config should build");
    let expected_profile: PriorityProfile = ResortAttribute::RATINGS
        .into_iter()
        .map(|attribute| (attribute, 1.0))
        .collect();

    assert_eq!(config.continent, Continent::NorthAmerica);
    assert_eq!(config.profile, expected_profile);
    assert_eq!(config.max_distance_km, 0.0);
    assert_eq!(config.top, 5);
    assert_eq!(config.data.resorts, Utf8PathBuf::from(DEFAULT_RESORTS));
    assert_eq!(config.data.cache, Utf8PathBuf::from(DEFAULT_CACHE));
    assert_eq!(config.data.cache_max_age, None);
    assert!(config.data.snow.is_none());
}

#[rstest]
fn explicit_priorities_keep_their_order() {
    let args = RecommendArgs {
        priority: vec!["cleanliness=0.2".to_owned(), "apres_ski=0.9".to_owned()],
        ..recommend_args(Some("europe"))
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    let order: Vec<_> = config.profile.iter().collect();
    assert_eq!(
        order,
        [
            (ResortAttribute::Cleanliness, 0.2),
            (ResortAttribute::ApresSki, 0.9)
        ]
    );
}

#[rstest]
fn repeated_priorities_are_rejected() {
    let args = RecommendArgs {
        priority: vec!["apres_ski=1".to_owned(), "apres ski=0.5".to_owned()],
        ..recommend_args(Some("europe"))
    };
    match RecommendConfig::try_from(args) {
        Err(CliError::DuplicatePriority { attribute }) => {
            assert_eq!(attribute, ResortAttribute::ApresSki);
        }
        other => panic!("expected DuplicatePriority, found {other:?}"),
    }
}

#[rstest]
fn snow_settings_follow_the_api_key() {
    let config = DataConfig::from(DataArgs {
        cache_max_age_hours: Some(72),
        snow_api_key: Some("secret".to_owned()),
        snow_base_url: Some("http://localhost:8080".to_owned()),
        snow_timeout_secs: Some(5),
        ..DataArgs::default()
    });
    let snow = config.snow.expect("api key enables the snow service");
    assert_eq!(snow.api_key, "secret");
    assert_eq!(snow.base_url, "http://localhost:8080");
    assert_eq!(snow.timeout, Duration::from_secs(5));
    assert_eq!(config.cache_max_age, Some(Duration::from_secs(72 * 3600)));
}

#[rstest]
fn blank_api_key_means_offline() {
    let config = DataConfig::from(DataArgs {
        snow_api_key: Some("  ".to_owned()),
        ..DataArgs::default()
    });
    assert!(config.snow.is_none());
}

#[rstest]
fn validate_sources_reports_missing_table() {
    let files = ResortFiles::new();
    let config = DataConfig::from(DataArgs {
        resorts: Some(files.missing()),
        ..DataArgs::default()
    });
    match config.validate_sources().expect_err("missing table") {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_RESORTS);
            assert_eq!(path, files.missing());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let files = ResortFiles::new();
    let config = DataConfig::from(DataArgs {
        resorts: Some(files.root().clone()),
        ..DataArgs::default()
    });
    assert!(matches!(
        config.validate_sources(),
        Err(CliError::SourcePathNotFile { .. })
    ));
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "continent": "asia",
            "top": 3,
            "resorts": "from-file.csv",
        }),
        None,
    );
    composer.push_environment(json!({
        "continent": "europe",
        "max_distance": 50.0,
    }));
    composer.push_cli(json!({
        "top": 10,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.continent, Continent::Europe);
    assert_eq!(config.top, 10);
    assert_eq!(config.max_distance_km, 50.0);
    assert_eq!(config.data.resorts, Utf8PathBuf::from("from-file.csv"));
}

#[rstest]
fn merge_layers_reports_invalid_values() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "top": "many" }));

    match config_from_layers_for_test(composer.layers()) {
        Err(CliError::Configuration(_)) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn ranking_lists_positions_and_scores() {
    let mut first = ResortNode::new("Verbier");
    first.set_score(4.357);
    let mut second = ResortNode::new("Zermatt");
    second.set_score(3.8);

    let mut output = Vec::new();
    write_ranking(&mut output, &[&first, &second]).expect("write ranking");
    assert_eq!(
        String::from_utf8(output).expect("utf-8"),
        "Top 2 resorts:\n1. Verbier - Score: 4.36\n2. Zermatt - Score: 3.80\n"
    );
}

#[rstest]
fn empty_ranking_says_so() {
    let mut output = Vec::new();
    write_ranking(&mut output, &[]).expect("write ranking");
    assert!(
        String::from_utf8(output)
            .expect("utf-8")
            .starts_with("No resort scored above zero.")
    );
}

#[rstest]
fn details_show_known_fields_only() {
    let mut node = ResortNode::new("Zermatt")
        .with_location(46.02, 7.75)
        .with_attribute(ResortAttribute::SnowReliability, 5.0);
    node.continent = Some(Continent::Europe);
    node.country = Some("Switzerland".to_owned());
    node.url = "https://zermatt.example".to_owned();
    node.current_snow_depth = Some(60);
    node.normalized_snow_depth = Some(2.5);

    let mut output = Vec::new();
    write_details(&mut output, &node).expect("write details");
    let text = String::from_utf8(output).expect("utf-8");

    assert!(text.starts_with("Zermatt\n"));
    assert!(text.contains("  Continent: Europe\n"));
    assert!(text.contains("  Country: Switzerland\n"));
    assert!(text.contains("  Website: https://zermatt.example\n"));
    assert!(text.contains("  Snow reliability: 5.00\n"));
    assert!(text.contains("  Snow depth: 60 (normalised 2.50)\n"));
    assert!(text.ends_with("  Score: 0.00\n"));
    assert!(!text.contains("Après-ski"));
    assert!(!text.contains("Stars"));
}
