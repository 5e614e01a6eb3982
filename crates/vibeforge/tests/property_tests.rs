#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use proptest::prelude::*;
use vibeforge::builtin;
use vibeforge::{
    ColorKey, ColorLocks, ColorSet, ContrastTarget, FontStyle, FullPalette, Hex, RepairTuning,
    TextStyle, TextTransform, TrendHints, TypeSize, TypographyTokens, WeightPair,
    check_palette_contrast, contrast_ratio, count_violations, derive_full_palette,
    fix_contrast_to_target, fix_palette_contrast, generate_base_palette, hsl_to_hex,
    optimize_typography,
};

fn hex_strategy() -> impl Strategy<Value = Hex> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Hex::from_rgb(r, g, b))
}

fn vibe_id_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(
        builtin::presets()
            .into_iter()
            .map(|v| v.id)
            .collect::<Vec<_>>(),
    )
}

fn size_strategy() -> impl Strategy<Value = TypeSize> {
    prop::sample::select(TypeSize::ALL.to_vec())
}

fn style_strategy() -> impl Strategy<Value = TextStyle> {
    (
        size_strategy(),
        0u16..1200,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(size, weight, italic, upper)| TextStyle {
            size,
            weight,
            style: if italic { FontStyle::Italic } else { FontStyle::Normal },
            transform: if upper {
                TextTransform::Uppercase
            } else {
                TextTransform::None
            },
        })
}

fn tokens_strategy() -> impl Strategy<Value = TypographyTokens> {
    (style_strategy(), style_strategy(), style_strategy(), style_strategy()).prop_map(
        |(heading, subheading, body, accent)| TypographyTokens {
            heading,
            subheading,
            body,
            accent,
        },
    )
}

fn color_set_strategy() -> impl Strategy<Value = ColorSet> {
    (
        hex_strategy(),
        hex_strategy(),
        hex_strategy(),
        hex_strategy(),
        hex_strategy(),
    )
        .prop_map(|(primary, secondary, accent, background, text)| ColorSet {
            primary,
            secondary,
            accent,
            background,
            text,
        })
}

fn trend_hints_strategy() -> impl Strategy<Value = Option<TrendHints>> {
    prop::option::of((0u16..1200, 0u16..1200).prop_map(|(heading, body)| TrendHints {
        recommended_weights: Some(WeightPair { heading, body }),
    }))
}

fn target_strategy() -> impl Strategy<Value = ContrastTarget> {
    prop::sample::select(vec![ContrastTarget::Aa, ContrastTarget::Aaa])
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// =============================================================================
// Color space
// =============================================================================

proptest! {
    #[test]
    fn hex_round_trips_through_hsl(color in hex_strategy()) {
        prop_assert_eq!(color.to_hsl().to_hex(), color);
    }

    #[test]
    fn hsl_components_stay_in_range(color in hex_strategy()) {
        let hsl = color.to_hsl();
        prop_assert!((0.0..360.0).contains(&hsl.h));
        prop_assert!((0.0..=100.0).contains(&hsl.s));
        prop_assert!((0.0..=100.0).contains(&hsl.l));
    }

    #[test]
    fn hex_text_parses_back(color in hex_strategy()) {
        let text = color.to_string();
        prop_assert_eq!(Hex::parse(&text), Ok(color));
        prop_assert_eq!(Hex::parse(&text[1..].to_uppercase()), Ok(color));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Hex output is 8 bits per channel. Near black or white and at low
    // saturation the chroma spans only a few steps, so saturation and hue
    // cannot come back within a point; the domain stays where they can.
    // Hue gets 2 degrees because at s=40, l=25 one channel step is over a
    // degree of hue.
    #[test]
    fn hsl_round_trips_within_tolerance(
        h in 0.0f64..360.0,
        s in 40.0f64..=100.0,
        l in 25.0f64..=75.0,
    ) {
        let back = hsl_to_hex(h, s, l).to_hsl();
        prop_assert!((back.s - s).abs() <= 1.0, "s {} -> {}", s, back.s);
        prop_assert!((back.l - l).abs() <= 1.0, "l {} -> {}", l, back.l);
        prop_assert!(hue_distance(back.h, h) <= 2.0, "h {} -> {}", h, back.h);
    }
}

// =============================================================================
// Contrast ratio
// =============================================================================

proptest! {
    #[test]
    fn contrast_is_symmetric(a in hex_strategy(), b in hex_strategy()) {
        prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_is_bounded(a in hex_strategy(), b in hex_strategy()) {
        let ratio = contrast_ratio(a, b);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio), "ratio {}", ratio);
    }

    #[test]
    fn contrast_with_self_is_one(a in hex_strategy()) {
        prop_assert!((contrast_ratio(a, a) - 1.0).abs() < 1e-12);
    }
}

// =============================================================================
// Base palette
// =============================================================================

proptest! {
    #[test]
    fn base_palette_is_deterministic(id in vibe_id_strategy(), seed in 0.0f64..10.0) {
        let vibe = builtin::preset(&id).expect("builtin");
        let a = generate_base_palette(&vibe, seed, None, &ColorLocks::NONE);
        let b = generate_base_palette(&vibe, seed, None, &ColorLocks::NONE);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn locked_keys_keep_previous_values(
        id in vibe_id_strategy(),
        seed in 0.0f64..10.0,
        prev in color_set_strategy(),
        mask in prop::array::uniform5(any::<bool>()),
    ) {
        let vibe = builtin::preset(&id).expect("builtin");
        let locks = ColorKey::ALL
            .iter()
            .zip(mask)
            .filter(|(_, locked)| *locked)
            .fold(ColorLocks::NONE, |locks, (key, _)| locks.lock(*key));
        let unlocked = generate_base_palette(&vibe, seed, None, &ColorLocks::NONE);
        let colors = generate_base_palette(&vibe, seed, Some(&prev), &locks);
        for key in ColorKey::ALL {
            if locks.is_locked(key) {
                prop_assert_eq!(colors.get(key), prev.get(key), "{} should be locked", key);
            } else {
                prop_assert_eq!(colors.get(key), unlocked.get(key), "{} should be fresh", key);
            }
        }
    }

    #[test]
    fn primary_stays_in_vibe_ranges(id in vibe_id_strategy(), seed in 0.0f64..10.0) {
        let vibe = builtin::preset(&id).expect("builtin");
        let primary = generate_base_palette(&vibe, seed, None, &ColorLocks::NONE)
            .primary
            .to_hsl();
        let (lo, hi) = vibe.primary_light_range;
        prop_assert!(primary.l >= lo - 1.0 && primary.l <= hi + 1.0, "l {}", primary.l);
    }
}

// =============================================================================
// Contrast repair
// =============================================================================

proptest! {
    #[test]
    fn repair_meets_target_or_improves(text in hex_strategy(), background in hex_strategy()) {
        let colors = ColorSet {
            primary: Hex::BLACK,
            secondary: Hex::BLACK,
            accent: Hex::BLACK,
            background,
            text,
        };
        let before = contrast_ratio(text, background);
        let fixed = fix_contrast_to_target(&colors, ContrastTarget::Aa);
        let after = contrast_ratio(fixed.text, background);
        prop_assert!(after >= 4.5 || after >= before, "before {} after {}", before, after);
        prop_assert_eq!(fixed.background, background);
    }

    #[test]
    fn repair_keeps_compliant_text(
        (tr, tg, tb) in (0u8..=40, 0u8..=40, 0u8..=40),
        (br, bg, bb) in (200u8..=255, 200u8..=255, 200u8..=255),
    ) {
        let text = Hex::from_rgb(tr, tg, tb);
        let background = Hex::from_rgb(br, bg, bb);
        prop_assert!(contrast_ratio(text, background) >= 7.0);
        let colors = ColorSet {
            primary: Hex::BLACK,
            secondary: Hex::BLACK,
            accent: Hex::BLACK,
            background,
            text,
        };
        prop_assert_eq!(fix_contrast_to_target(&colors, ContrastTarget::Aaa).text, text);
    }
}

proptest! {
    #[test]
    fn palette_repair_never_lowers_a_ratio(
        colors in color_set_strategy(),
        surface in hex_strategy(),
        surface_alt in hex_strategy(),
        text_muted in hex_strategy(),
        target in target_strategy(),
    ) {
        let palette = FullPalette {
            surface,
            surface_alt,
            text_muted,
            ..derive_full_palette(&colors)
        };
        let before = check_palette_contrast(&palette);
        let fixed = fix_palette_contrast(&palette, target, &RepairTuning::default());
        let after = check_palette_contrast(&fixed);
        for (was, now) in before.iter().zip(&after) {
            prop_assert!(
                now.ratio >= was.ratio,
                "{}: {} -> {}", now.label, was.ratio, now.ratio
            );
        }
        prop_assert!(count_violations(&after).aa <= count_violations(&before).aa);
    }

    #[test]
    fn derived_palette_repair_never_lowers_a_ratio(
        colors in color_set_strategy(),
        target in target_strategy(),
    ) {
        let palette = derive_full_palette(&colors);
        let before = check_palette_contrast(&palette);
        let after = check_palette_contrast(
            &fix_palette_contrast(&palette, target, &RepairTuning::default()),
        );
        for (was, now) in before.iter().zip(&after) {
            prop_assert!(now.ratio >= was.ratio, "{}", now.label);
        }
    }
}

// =============================================================================
// Typography
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn typography_hierarchy_always_holds(
        current in tokens_strategy(),
        id in vibe_id_strategy(),
        colors in color_set_strategy(),
        hints in trend_hints_strategy(),
        seed in 0.0f64..10.0,
    ) {
        let vibe = builtin::preset(&id).expect("builtin");
        let out = optimize_typography(&current, &vibe, &colors, hints.as_ref(), seed);
        prop_assert!(out.heading.size.index() >= out.body.size.index() + 2, "{:?}", out);
        prop_assert!(out.heading.weight >= out.body.weight + 200, "{:?}", out);
        prop_assert!(out.accent.weight <= out.heading.weight, "{:?}", out);
        prop_assert_eq!(out.subheading.size.index() + 1, out.heading.size.index());
        prop_assert!(out.hierarchy_holds());
    }

    #[test]
    fn typography_is_replayable(
        current in tokens_strategy(),
        id in vibe_id_strategy(),
        colors in color_set_strategy(),
        seed in 0.0f64..10.0,
    ) {
        let vibe = builtin::preset(&id).expect("builtin");
        prop_assert_eq!(
            optimize_typography(&current, &vibe, &colors, None, seed),
            optimize_typography(&current, &vibe, &colors, None, seed)
        );
    }
}
