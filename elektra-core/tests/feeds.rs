use approx::assert_abs_diff_eq;
use elektra_core::models::{CreatePricesRequest, Frequency, PriceRow, ScrubPricesRequest, Special};
use elektra_core::{Elektra, ElektraError, InsufficientDataError};
use rstest::*;
use rstest_reuse::{self, *};
use time::Date;
use time::macros::date;

use markets::windowed_isos;

/// A synthetic settle: 40, plus a tenth of the day of month, plus a tenth of the hour-ending
fn settle(day: Date, hour_ending: u8) -> f64 {
    40.0 + f64::from(day.day()) / 10.0 + f64::from(hour_ending) / 10.0
}

/// A complete hourly feed for the days of `frequency` starting at `start`.
///
/// The feed always carries 24 hour-endings; on a fall-back day HE2 appears
/// twice, the second copy priced 100 higher.
fn feed(elektra: &Elektra, frequency: Frequency, start: Date) -> Vec<PriceRow> {
    frequency
        .day_range(start)
        .flat_map(|day| {
            let mut rows: Vec<_> = (1..=24)
                .map(|he| PriceRow::new(day, he, settle(day, he)))
                .collect();
            if elektra.is_dst_transition(day).long_day {
                rows.push(PriceRow::new(day, 2, settle(day, 2) + 100.0));
            }
            rows
        })
        .collect()
}

#[fixture]
fn elektra() -> Elektra {
    Elektra::default()
}

fn request(iso: &str, block: &str, frequency: &str, flow_date: Date, data: Vec<PriceRow>) -> CreatePricesRequest {
    CreatePricesRequest {
        flow_date,
        ticker: "M.P4F8".to_owned(),
        node: "INDIANA.HUB".to_owned(),
        iso: iso.to_owned(),
        block: block.to_owned(),
        frequency: frequency.to_owned(),
        data,
    }
}

fn scrub(elektra: &Elektra, iso: &str, flow_date: Date) -> ScrubPricesRequest {
    ScrubPricesRequest {
        flow_date,
        ticker: "M.P4F8".to_owned(),
        node: "INDIANA.HUB".to_owned(),
        iso: iso.to_owned(),
        data: feed(elektra, Frequency::Daily, flow_date),
    }
}

#[apply(windowed_isos)]
fn weekday_blocks(elektra: Elektra, #[case] iso: &str) {
    let day = date!(2020 - 10 - 16);
    let data = feed(&elektra, Frequency::Daily, day);
    let (first, last) = elektra.get_iso_details(iso).unwrap();

    let atc = elektra
        .create_prices(&request(iso, "7x24", "daily", day, data.clone()))
        .unwrap();
    assert_abs_diff_eq!(atc, 40.0 + 1.6 + 1.25, epsilon = 1e-9);

    let peak = elektra
        .create_prices(&request(iso, "5x16", "daily", day, data))
        .unwrap();
    let mid_peak = f64::from(first + last) / 2.0;
    assert_abs_diff_eq!(peak, settle(day, 0) + mid_peak / 10.0, epsilon = 1e-9);
}

#[apply(windowed_isos)]
fn weekend_peak(elektra: Elektra, #[case] iso: &str) {
    let day = date!(2020 - 10 - 17);
    let data = feed(&elektra, Frequency::Daily, day);
    let (first, last) = elektra.get_iso_details(iso).unwrap();

    let price = elektra
        .create_prices(&request(iso, "2x16", "daily", day, data.clone()))
        .unwrap();
    let mid_peak = f64::from(first + last) / 2.0;
    assert_abs_diff_eq!(price, settle(day, 0) + mid_peak / 10.0, epsilon = 1e-9);

    let err = elektra
        .create_prices(&request(iso, "5x16", "daily", day, data))
        .unwrap_err();
    assert!(matches!(err, ElektraError::NoRelevantHoursToday { .. }));
}

#[apply(windowed_isos)]
fn holiday_has_no_peak_price(elektra: Elektra, #[case] iso: &str) {
    let day = date!(2023 - 12 - 25);
    let data = feed(&elektra, Frequency::Daily, day);

    let err = elektra
        .create_prices(&request(iso, "5x16", "daily", day, data.clone()))
        .unwrap_err();
    assert_eq!(err.kind(), "NoRelevantHoursTodayError");
    assert!(err.is_client_error());

    // the same day is a full day of 2x16
    assert!(elektra.create_prices(&request(iso, "2x16", "daily", day, data)).is_ok());
}

#[apply(windowed_isos)]
fn short_day_scrub(elektra: Elektra, #[case] iso: &str) {
    let day = date!(2022 - 03 - 13);
    let hours = elektra.scrub_hourly_prices(&scrub(&elektra, iso, day)).unwrap();
    assert_eq!(hours.len(), 23);
    assert!(hours.iter().all(|hour| hour.hour_ending != 3));
}

#[apply(windowed_isos)]
fn long_day_scrub(elektra: Elektra, #[case] iso: &str) {
    let day = date!(2022 - 11 - 06);
    let hours = elektra.scrub_hourly_prices(&scrub(&elektra, iso, day)).unwrap();
    assert_eq!(hours.len(), 25);

    let long: Vec<_> = hours
        .iter()
        .filter(|hour| hour.special == Some(Special::Long))
        .map(|hour| (hour.hour_ending, hour.value))
        .collect();
    assert_eq!(
        long,
        vec![(2, Some(settle(day, 2))), (25, Some(settle(day, 2) + 100.0))]
    );
    assert_eq!(hours.last().map(|hour| hour.hour_ending), Some(25));
}

#[rstest]
fn monthly_atc_counts_every_row(elektra: Elektra) {
    // November 2022 has a fall-back day and Thanksgiving
    let data = feed(&elektra, Frequency::Monthly, date!(2022 - 11 - 01));
    assert_eq!(data.len(), 30 * 24 + 1);
    let expected = data.iter().map(|row| row.price).sum::<f64>() / data.len() as f64;

    let price = elektra
        .create_prices(&request("pjm", "7x24", "monthly", date!(2022 - 11 - 15), data))
        .unwrap();
    assert_abs_diff_eq!(price, expected, epsilon = 1e-9);
}

#[rstest]
fn monthly_needs_the_whole_month(elektra: Elektra) {
    let mut data = feed(&elektra, Frequency::Monthly, date!(2022 - 11 - 01));
    data.retain(|row| !(row.flow_date == date!(2022 - 11 - 30) && row.hour_ending == 24));

    let err = elektra
        .create_prices(&request("pjm", "7x24", "monthly", date!(2022 - 11 - 15), data))
        .unwrap_err();
    let ElektraError::InsufficientData(InsufficientDataError::RowCount {
        date, hour_ending, ..
    }) = &err
    else {
        panic!("expected a row count failure, got {err}");
    };
    assert_eq!((*date, *hour_ending), (date!(2022 - 11 - 30), 24));
}

#[rstest]
fn request_from_json(elektra: Elektra) {
    let rows: Vec<_> = (1..=24)
        .map(|he| format!(r#"{{"flow_date": "2020-10-17", "hour_ending": {he}, "price": {he}}}"#))
        .collect();
    let raw = format!(
        r#"{{
            "flow_date": "2020-10-17",
            "ticker": "M.P4F8",
            "node": "INDIANA.HUB",
            "iso": "MISO",
            "block": "Wrap",
            "frequency": "Daily",
            "data": [{}]
        }}"#,
        rows.join(",")
    );

    let request: CreatePricesRequest = serde_json::from_str(&raw).unwrap();
    // a Saturday: every hour is Wrap
    assert_abs_diff_eq!(elektra.create_prices(&request).unwrap(), 12.5);
}
