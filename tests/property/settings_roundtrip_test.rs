//! Property-based tests for settings serialization.
//!
//! Settings travel as camelCase JSON to and from the backend and inside backup
//! files; any settings value must survive the trip, and a full-settings update
//! must reproduce the settings it came from.

use navpanel::types::search_engine::SearchEngine;
use navpanel::types::settings::{
    AppSettings, BackgroundKind, BackgroundSettings, CardSize, CardStyle, LayoutSettings,
    PartialSettings, SearchSettings, Theme,
};
use proptest::prelude::*;

fn arb_engine() -> impl Strategy<Value = SearchEngine> {
    ("[a-z]{1,8}", "[A-Za-z ]{1,12}", prop::option::of("[a-z]{3,10}")).prop_map(
        |(id, name, placeholder)| SearchEngine {
            url: format!("https://{}.example/search?q={{}}", id),
            id,
            name,
            placeholder,
            ..Default::default()
        },
    )
}

fn arb_settings() -> impl Strategy<Value = AppSettings> {
    (
        prop_oneof![Just(Theme::Light), Just(Theme::Dark)],
        (
            1u32..12,
            prop_oneof![Just(CardSize::Small), Just(CardSize::Medium), Just(CardSize::Large)],
            any::<bool>(),
            0u32..64,
        ),
        (
            prop_oneof![
                Just(BackgroundKind::Color),
                Just(BackgroundKind::Gradient),
                Just(BackgroundKind::Image)
            ],
            "[#a-f0-9]{0,12}",
        ),
        (0u32..32, 0u8..=10, any::<bool>()),
        (any::<bool>(), prop::collection::vec(arb_engine(), 0..4), "[a-z]{1,8}", any::<bool>()),
    )
        .prop_map(|(theme, layout, background, card, search)| AppSettings {
            theme,
            layout: LayoutSettings {
                columns: layout.0,
                card_size: layout.1,
                show_labels: layout.2,
                gap: layout.3,
            },
            background: BackgroundSettings {
                kind: background.0,
                value: background.1,
            },
            card_style: CardStyle {
                border_radius: card.0,
                opacity: f64::from(card.1) / 10.0,
                shadow: card.2,
            },
            search: SearchSettings {
                enabled: search.0,
                engines: search.1,
                default_engine_id: search.2,
                open_in_new_tab: search.3,
            },
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        prop_assert!(json.contains("\"cardStyle\""));
        prop_assert!(json.contains("\"defaultEngineId\""));
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn partial_settings_json_roundtrip(settings in arb_settings()) {
        let partial = PartialSettings::from(&settings);
        let json = serde_json::to_value(&partial).unwrap();
        let back: PartialSettings = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, partial);
    }

    #[test]
    fn full_update_reproduces_settings(settings in arb_settings()) {
        let mut target = AppSettings::default();
        let complete = target.apply_update(&PartialSettings::from(&settings));
        prop_assert_eq!(complete, !settings.search.engines.is_empty());
        if complete {
            prop_assert_eq!(target, settings);
        }
    }
}
