use chrono::{NaiveDate, Timelike};
use salah::constants::test_constants::*;
use salah::hijri::CalendarVariant;
use salah::projection::{
    LONG_TERM_BANNER, MEDIUM_TERM_BANNER, ProjectionOptions, project_with,
};
use salah::{
    CalculationMethod, CalculationParameters, DisclaimerLevel, GeoCoordinate, HighLatitudeRule,
    HijriMonth, Madhab, PrayerError, PrecisionLevel, compute_prayer_times, compute_qibla,
    project_future_prayer_times, to_hijri,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn coordinate((lat, lon): (f64, f64)) -> GeoCoordinate {
    GeoCoordinate::new(lat, lon).unwrap()
}

#[test]
fn test_mecca_daily_schedule() {
    let times = compute_prayer_times(
        coordinate(MECCA),
        date(2024, 6, 1),
        CalculationMethod::UmmAlQura,
        Madhab::Shafii,
    )
    .unwrap();

    // UTC hours; Mecca is UTC+3
    assert_eq!(times.fajr.hour(), 1);
    assert_eq!(times.dhuhr.hour(), 9);
    assert_eq!(times.maghrib.hour(), 15);
    assert_eq!((times.isha - times.maghrib).num_minutes(), 90);
    assert!(times.high_latitude_fallback.is_none());
    assert_eq!(times.fajr.second(), 0);
}

#[test]
fn test_high_latitude_summer_uses_fallback() {
    let times = compute_prayer_times(
        coordinate(REYKJAVIK_LIKE),
        date(2024, 6, 20),
        CalculationMethod::MuslimWorldLeague,
        Madhab::Shafii,
    )
    .unwrap();

    assert_eq!(
        times.high_latitude_fallback,
        Some(HighLatitudeRule::TwilightAngle)
    );
    assert!(times.fajr < times.sunrise);
    assert!(times.maghrib < times.isha);
}

#[test]
fn test_polar_day_is_unsolvable() {
    let err = compute_prayer_times(
        coordinate(SVALBARD),
        date(2024, 6, 21),
        CalculationMethod::MuslimWorldLeague,
        Madhab::Shafii,
    )
    .unwrap_err();
    assert!(matches!(err, PrayerError::UnsolvableAtLatitude { .. }));
    assert!(
        err.to_string()
            .contains("cannot be calculated reliably at this latitude")
    );
}

#[test]
fn test_invalid_location_is_rejected() {
    assert!(matches!(
        GeoCoordinate::new(91.0, 0.0),
        Err(PrayerError::InvalidLocation { .. })
    ));
    assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_qibla_from_new_york_and_london() {
    let ny = compute_qibla(coordinate(NEW_YORK));
    assert!((ny.bearing_degrees - 58.5).abs() < 1.0);

    let london = compute_qibla(coordinate(LONDON));
    assert!((london.bearing_degrees - 118.9).abs() < 1.0);
    assert!((london.distance_km - 4790.0).abs() < 50.0);
}

#[test]
fn test_ramadan_1445_under_umm_al_qura() {
    let hijri = to_hijri(date(2024, 3, 11), CalendarVariant::UmmAlQura);
    assert_eq!(hijri.month, HijriMonth::Ramadan);
    assert_eq!(hijri.day, 1);
    assert_eq!(hijri.year, 1445);
}

#[test]
fn test_projection_today_is_exact() {
    let today = date(2024, 6, 1);
    let result = project_future_prayer_times(
        coordinate(MECCA),
        today,
        CalculationMethod::UmmAlQura,
        Madhab::Shafii,
        today,
    )
    .unwrap();
    assert_eq!(result.disclaimer, DisclaimerLevel::Today);
    assert_eq!(result.precision, PrecisionLevel::Exact);
    assert!(result.banner().is_none());
    assert_eq!(result.timezone, chrono_tz::Asia::Riyadh);
}

#[test]
fn test_projection_three_years_out_uses_window() {
    let today = date(2024, 1, 15);
    let target = date(2027, 1, 15);
    let result = project_future_prayer_times(
        coordinate(LONDON),
        target,
        CalculationMethod::MuslimWorldLeague,
        Madhab::Shafii,
        today,
    )
    .unwrap();

    assert_eq!(result.disclaimer, DisclaimerLevel::MediumTerm);
    assert_eq!(result.precision, PrecisionLevel::Window { minutes: 30 });
    assert_eq!(result.banner(), Some(MEDIUM_TERM_BANNER));

    for (_, text) in result.formatted() {
        assert!(text.starts_with('[') && text.ends_with(']'), "{text}");
    }
}

#[test]
fn test_projection_far_future_uses_time_of_day() {
    let params = CalculationParameters::new(CalculationMethod::Karachi, Madhab::Hanafi);
    let options = ProjectionOptions {
        calendar: CalendarVariant::Civil,
        hijri_offset_days: 0,
        timezone: Some(chrono_tz::Asia::Karachi),
    };
    let result = project_with(
        coordinate(KARACHI),
        date(2035, 6, 1),
        &params,
        &options,
        date(2024, 6, 1),
    )
    .unwrap();

    assert_eq!(result.disclaimer, DisclaimerLevel::LongTerm);
    assert_eq!(result.banner(), Some(LONG_TERM_BANNER));
    let formatted = result.formatted();
    assert_eq!(formatted.len(), 5);
    assert!(formatted.iter().all(|(_, text)| !text.contains(':')));
}

#[test]
fn test_projection_json_shape() {
    let today = date(2024, 6, 1);
    let result = project_future_prayer_times(
        coordinate(MECCA),
        date(2025, 3, 1),
        CalculationMethod::UmmAlQura,
        Madhab::Shafii,
        today,
    )
    .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["timezone"], "Asia/Riyadh");
    assert_eq!(json["disclaimer"], "short_term");
    assert_eq!(json["precision"]["kind"], "exact");
    assert!(json["times"]["fajr"].is_string());
}
