use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tidemark_core::{PriceSample, PriceSeries, Resolution};

pub fn by_symbol(s: &str, resolution: Resolution) -> Option<PriceSeries> {
    match (s, resolution) {
        ("AAPL", Resolution::Fine) => Some(fine(&[
            ("2024-06-03T13:30:00Z", "190.00"),
            ("2024-06-03T14:00:00Z", "190.50"),
            ("2024-06-03T14:30:00Z", "191.00"),
            ("2024-06-03T15:00:00Z", "191.20"),
            ("2024-06-03T16:00:00Z", "190.80"),
            ("2024-06-03T18:00:00Z", "192.40"),
            ("2024-06-03T18:30:00Z", "192.00"),
            ("2024-06-03T19:59:00Z", "193.00"),
            ("2024-06-04T13:30:00Z", "193.50"),
            ("2024-06-10T13:30:00Z", "195.00"),
            ("2024-06-10T19:59:00Z", "196.00"),
        ])),
        ("AAPL", Resolution::Coarse) => Some(daily(&[
            ("2024-05-31", "189.00"),
            ("2024-06-03", "193.00"),
            ("2024-06-04", "194.00"),
            ("2024-06-05", "195.50"),
            ("2024-06-06", "194.50"),
            ("2024-06-07", "196.00"),
            ("2024-06-10", "196.00"),
            ("2024-06-11", "198.00"),
        ])),
        ("MSFT", Resolution::Coarse) => Some(daily(&[
            ("2024-06-03", "410.00"),
            ("2024-06-04", "412.00"),
            ("2024-06-05", "420.00"),
            ("2024-06-10", "425.00"),
        ])),
        ("TSLA", Resolution::Fine) => Some(fine(&[
            ("2024-06-05T13:30:00Z", "175.00"),
            ("2024-06-05T14:30:00Z", "176.00"),
        ])),
        ("TSLA", Resolution::Coarse) => Some(daily(&[
            ("2024-06-03", "178.00"),
            ("2024-06-04", "174.00"),
            ("2024-06-05", "176.00"),
            ("2024-06-10", "173.00"),
        ])),
        _ => None,
    }
}

fn px(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn fine(rows: &[(&str, &str)]) -> PriceSeries {
    let samples = rows
        .iter()
        .map(|&(ts, p)| {
            let ts = DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc);
            PriceSample::new(ts, px(p))
        })
        .collect();
    PriceSeries::new(Resolution::Fine, samples).unwrap()
}

fn daily(rows: &[(&str, &str)]) -> PriceSeries {
    let samples = rows
        .iter()
        .map(|&(date, p)| {
            let ts = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc();
            PriceSample::new(ts, px(p))
        })
        .collect();
    PriceSeries::new(Resolution::Coarse, samples).unwrap()
}
