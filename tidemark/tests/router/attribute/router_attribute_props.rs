use proptest::prelude::*;
use tidemark::{Resolution, fine_horizons};

use crate::helpers::{AAPL, dt, fixture_engine};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Any instant inside the fixture's intraday coverage is attributed entirely
    // from the fine tier.
    #[test]
    fn covered_instants_use_a_single_fine_tier(offset_min in 0i64..(7 * 24 * 60 + 6 * 60)) {
        let base = dt(2024, 6, 3, 13, 30) + chrono::TimeDelta::minutes(offset_min);
        let rt = tokio::runtime::Runtime::new().unwrap();
        let out = rt.block_on(fixture_engine().attribute(AAPL, base)).unwrap();

        prop_assert_eq!(out.tier, Some(Resolution::Fine));
        let allowed: Vec<String> = fine_horizons().into_iter().map(|h| h.label).collect();
        prop_assert!(out.entries.keys().all(|k| allowed.contains(k)));
        prop_assert!(out.get("1h").is_some());
        prop_assert!(out.base.unwrap().ts >= base);
    }
}
