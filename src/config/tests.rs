use super::builder::default_config_content;
use super::validation::validate_config;
use super::*;
use crate::constants::test_constants::*;
use crate::hijri::CalendarVariant;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn create_test_config(latitude: f64, longitude: f64) -> Config {
    Config {
        latitude: Some(latitude),
        longitude: Some(longitude),
        method: Some(CalculationMethod::MuslimWorldLeague),
        madhab: Some(Madhab::Shafii),
        ..Config::default()
    }
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah").join("salah.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // First load should create default config
    let result = Config::load();

    // Restore original
    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    if let Err(e) = &result {
        eprintln!("Config::load() failed: {:?}", e);
    }
    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.latitude, Some(DEFAULT_LATITUDE));
    assert_eq!(config.method, Some(DEFAULT_METHOD));
}

#[test]
fn test_default_config_file_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("nested").join("salah.toml");

    create_default_config(&config_path).unwrap();
    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("#[Location]"));
    assert!(content.contains("#[Calculation]"));
    assert!(content.contains("[adjustments]"));

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.coordinate().unwrap().latitude(), DEFAULT_LATITUDE);
    assert_eq!(config.calendar(), DEFAULT_CALENDAR);
    assert!(config.adjustments.unwrap().is_zero());
}

#[test]
fn test_default_content_without_coordinates() {
    let content = default_config_content(false);
    assert!(!content.contains("latitude"));
    let config: Config = toml::from_str(&content).unwrap();
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_toml_parsing() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    let content = r#"
latitude = 24.8607
longitude = 67.0011
method = "karachi"
madhab = "hanafi"
high_latitude_rule = "seventh_of_the_night"
calendar = "civil"
hijri_offset_days = -1
timezone = "Asia/Karachi"

[adjustments]
fajr = 2
isha = -3

[[custom_events]]
name = "Anniversary"
day = 14
month = 3
year = 1440
recurring = true
"#;
    fs::write(&config_path, content).unwrap();

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.latitude, Some(KARACHI.0));
    assert_eq!(config.method(), CalculationMethod::Karachi);
    assert_eq!(config.madhab(), Madhab::Hanafi);
    assert_eq!(config.calendar(), CalendarVariant::Civil);
    assert_eq!(config.hijri_offset_days(), -1);
    assert_eq!(config.timezone().unwrap(), Some(chrono_tz::Asia::Karachi));

    let params = config.calculation_parameters();
    assert_eq!(
        params.effective_high_latitude_rule(),
        HighLatitudeRule::SeventhOfTheNight
    );
    assert_eq!(params.adjustments.fajr, 2);
    assert_eq!(params.adjustments.isha, -3);
    assert_eq!(params.adjustments.dhuhr, 0);

    let events = config.custom_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date.month, HijriMonth::RabiAlAwwal);
    assert!(events[0].recurring);

    let options = config.projection_options().unwrap();
    assert_eq!(options.calendar, CalendarVariant::Civil);
    assert_eq!(options.hijri_offset_days, -1);
}

#[test]
fn test_missing_fields_take_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(&config_path, "latitude = 51.5074\nlongitude = -0.1278\n").unwrap();

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.method, Some(DEFAULT_METHOD));
    assert_eq!(config.madhab, Some(DEFAULT_MADHAB));
    assert_eq!(config.calendar, Some(DEFAULT_CALENDAR));
    assert_eq!(config.hijri_offset_days, Some(DEFAULT_HIJRI_OFFSET_DAYS));
    assert!(config.high_latitude_rule.is_none());
    assert!(config.custom_events.is_empty());
}

#[test]
fn test_config_malformed_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(&config_path, "latitude = [not valid").unwrap();

    assert!(load_from_path(&config_path).is_err());
}

#[test]
fn test_unknown_method_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(&config_path, "method = \"made_up\"\n").unwrap();

    let error = load_from_path(&config_path).unwrap_err();
    assert!(format!("{error:#}").contains("made_up"));
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    assert!(load_from_path(&temp_dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_config_validation_basic() {
    assert!(validate_config(&create_test_config(MECCA.0, MECCA.1)).is_ok());
    assert!(validate_config(&Config::default()).is_ok());
}

#[test]
fn test_config_validation_coordinates() {
    assert!(validate_config(&create_test_config(90.0, 180.0)).is_ok());
    assert!(validate_config(&create_test_config(-90.0, -180.0)).is_ok());
    assert!(validate_config(&create_test_config(90.5, 0.0)).is_err());
    assert!(validate_config(&create_test_config(0.0, -180.5)).is_err());
    assert!(validate_config(&create_test_config(f64::NAN, 0.0)).is_err());
}

#[test]
fn test_config_validation_hijri_offset() {
    let mut config = create_test_config(MECCA.0, MECCA.1);
    config.hijri_offset_days = Some(MAXIMUM_HIJRI_OFFSET_DAYS);
    assert!(validate_config(&config).is_ok());
    config.hijri_offset_days = Some(MINIMUM_HIJRI_OFFSET_DAYS - 1);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_adjustments() {
    let mut config = create_test_config(MECCA.0, MECCA.1);
    config.adjustments = Some(PrayerAdjustments {
        maghrib: MAXIMUM_ADJUSTMENT_MINUTES,
        ..PrayerAdjustments::default()
    });
    assert!(validate_config(&config).is_ok());

    config.adjustments = Some(PrayerAdjustments {
        sunrise: -(MAXIMUM_ADJUSTMENT_MINUTES + 1),
        ..PrayerAdjustments::default()
    });
    let error = validate_config(&config).unwrap_err();
    assert!(error.to_string().contains("adjustments.sunrise"));

    config.adjustments = Some(PrayerAdjustments {
        fajr: i32::MIN,
        ..PrayerAdjustments::default()
    });
    let error = validate_config(&config).unwrap_err();
    assert!(error.to_string().contains("adjustments.fajr"));
}

#[test]
fn test_extreme_adjustment_from_toml_is_rejected() {
    let config: Config = toml::from_str("[adjustments]\nfajr = -2147483648\n").unwrap();
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_timezone() {
    let mut config = create_test_config(MECCA.0, MECCA.1);
    config.timezone = Some("Asia/Riyadh".to_string());
    assert!(validate_config(&config).is_ok());
    config.timezone = Some("Mars/Olympus_Mons".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_custom_events() {
    let mut config = create_test_config(MECCA.0, MECCA.1);
    config.custom_events = vec![ConfigEvent {
        name: "Bad month".to_string(),
        day: 1,
        month: 13,
        year: 1445,
        recurring: false,
    }];
    assert!(validate_config(&config).is_err());

    config.custom_events[0].month = 12;
    config.custom_events[0].day = 31;
    assert!(validate_config(&config).is_err());

    config.custom_events[0].day = 30;
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_incompatible_madhab_only_warns() {
    let mut config = create_test_config(MECCA.0, MECCA.1);
    config.method = Some(CalculationMethod::Tehran);
    config.madhab = Some(Madhab::Hanafi);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_geo_toml_overrides_main_config() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    let geo_path = temp_dir.path().join("geo.toml");

    fs::write(
        &config_path,
        format!("latitude = {}\nlongitude = {}\n", MECCA.0, MECCA.1),
    )
    .unwrap();
    fs::write(
        &geo_path,
        format!("latitude = {}\nlongitude = {}\n", LONDON.0, LONDON.1),
    )
    .unwrap();

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.latitude, Some(LONDON.0));
    assert_eq!(config.longitude, Some(LONDON.1));
}

#[test]
fn test_invalid_geo_toml_coordinates_fail_validation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(&config_path, "method = \"egyptian\"\n").unwrap();
    fs::write(temp_dir.path().join("geo.toml"), "latitude = 123.0\n").unwrap();

    assert!(load_from_path(&config_path).is_err());
}

#[test]
fn test_malformed_geo_toml_fallback() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(
        &config_path,
        format!("latitude = {}\nlongitude = {}\n", NEW_YORK.0, NEW_YORK.1),
    )
    .unwrap();
    fs::write(temp_dir.path().join("geo.toml"), "latitude = oops").unwrap();

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.latitude, Some(NEW_YORK.0));
}

#[test]
fn test_geo_toml_exists_before_config_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("salah.toml");
    fs::write(
        temp_dir.path().join("geo.toml"),
        format!("latitude = {}\nlongitude = {}\n", KARACHI.0, KARACHI.1),
    )
    .unwrap();

    create_default_config(&config_path).unwrap();
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(!content.contains("latitude"));

    let config = load_from_path(&config_path).unwrap();
    assert_eq!(config.latitude, Some(KARACHI.0));
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Latitude boundaries are inclusive
        #[test]
        fn test_latitude_boundaries(
            latitude in prop_oneof![
                Just(-90.0),
                Just(90.0),
                Just(-91.0),
                Just(91.0),
                (-90.0..=90.0),
            ],
            longitude in -180.0..=180.0,
        ) {
            let config = create_test_config(latitude, longitude);
            if (-90.0..=90.0).contains(&latitude) {
                prop_assert!(validate_config(&config).is_ok(),
                    "Latitude {} should be valid", latitude);
            } else {
                prop_assert!(validate_config(&config).is_err(),
                    "Latitude {} should fail validation", latitude);
            }
        }

        /// Any method with any madhab validates
        #[test]
        fn test_all_method_madhab_pairs_validate(
            method in proptest::sample::select(CalculationMethod::ALL.to_vec()),
            madhab in proptest::sample::select(Madhab::ALL.to_vec()),
        ) {
            let mut config = create_test_config(MECCA.0, MECCA.1);
            config.method = Some(method);
            config.madhab = Some(madhab);
            prop_assert!(validate_config(&config).is_ok());
        }
    }
}
