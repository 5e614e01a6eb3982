use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vibeforge::builtin;
use vibeforge::{
    Capabilities, ColorLocks, ColorSet, ContrastTarget, DesignRequest, HarmonyOptions,
    HarmonyType, Hex, PaletteMode, RepairTuning, TypographyTokens, check_palette_contrast,
    contrast_ratio, derive_full_palette, fix_contrast_to_target, fix_palette_contrast,
    generate_base_palette, generate_design, generate_harmony, optimize_typography,
};

const SEED: f64 = 0.4217;

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("vibeforge/color");

    group.bench_function("Hex::parse", |b| {
        b.iter(|| black_box(Hex::parse(black_box("#3a7bd5"))));
    });

    group.bench_function("Hex::parse_short", |b| {
        b.iter(|| black_box(Hex::parse(black_box("f80"))));
    });

    let color = Hex::from_rgb(0x3a, 0x7b, 0xd5);
    group.bench_function("Hex::to_hsl", |b| {
        b.iter(|| black_box(black_box(color).to_hsl()));
    });

    group.bench_function("contrast_ratio", |b| {
        b.iter(|| black_box(contrast_ratio(black_box(color), black_box(Hex::WHITE))));
    });

    group.finish();
}

fn bench_palettes(c: &mut Criterion) {
    let mut group = c.benchmark_group("vibeforge/palettes");
    let vibe = builtin::preset("corporate").unwrap();

    group.bench_function("generate_base_palette", |b| {
        b.iter(|| {
            black_box(generate_base_palette(
                &vibe,
                black_box(SEED),
                None,
                &ColorLocks::NONE,
            ))
        });
    });

    let options = HarmonyOptions::default();
    for harmony in HarmonyType::ALL {
        group.bench_function(format!("generate_harmony/{harmony}"), |b| {
            b.iter(|| {
                black_box(generate_harmony(
                    black_box(215.0),
                    65.0,
                    45.0,
                    harmony,
                    SEED,
                    &options,
                ))
            });
        });
    }

    let colors = generate_base_palette(&vibe, SEED, None, &ColorLocks::NONE);
    group.bench_function("derive_full_palette", |b| {
        b.iter(|| black_box(derive_full_palette(black_box(&colors))));
    });

    group.finish();
}

fn bench_contrast(c: &mut Criterion) {
    let mut group = c.benchmark_group("vibeforge/contrast");
    let vibe = builtin::preset("retro").unwrap();
    let palette = derive_full_palette(&generate_base_palette(&vibe, SEED, None, &ColorLocks::NONE));

    group.bench_function("check_palette_contrast", |b| {
        b.iter(|| black_box(check_palette_contrast(black_box(&palette))));
    });

    let low = ColorSet {
        text: Hex::parse("#111111").unwrap(),
        background: Hex::parse("#222222").unwrap(),
        ..palette.base()
    };
    group.bench_function("fix_contrast_to_target/aa", |b| {
        b.iter(|| black_box(fix_contrast_to_target(black_box(&low), ContrastTarget::Aa)));
    });

    group.bench_function("fix_contrast_to_target/aaa", |b| {
        b.iter(|| black_box(fix_contrast_to_target(black_box(&low), ContrastTarget::Aaa)));
    });

    let tuning = RepairTuning::default();
    group.bench_function("fix_palette_contrast", |b| {
        b.iter(|| {
            black_box(fix_palette_contrast(
                black_box(&palette),
                ContrastTarget::Aaa,
                &tuning,
            ))
        });
    });

    group.finish();
}

fn bench_typography(c: &mut Criterion) {
    let mut group = c.benchmark_group("vibeforge/typography");
    let vibe = builtin::preset("luxury").unwrap();
    let colors = generate_base_palette(&vibe, SEED, None, &ColorLocks::NONE);
    let current = TypographyTokens::default();

    group.bench_function("optimize_typography", |b| {
        b.iter(|| {
            black_box(optimize_typography(
                black_box(&current),
                &vibe,
                &colors,
                None,
                SEED,
            ))
        });
    });

    group.finish();
}

fn bench_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("vibeforge/design");
    let vibe = builtin::preset("cyberpunk").unwrap();

    let basic = DesignRequest::new(vibe.clone(), SEED).with_contrast_target(ContrastTarget::Aa);
    group.bench_function("generate_design/basic", |b| {
        b.iter(|| black_box(generate_design(black_box(&basic), &Capabilities::BASIC)));
    });

    let full = DesignRequest::new(vibe, SEED)
        .with_mode(PaletteMode::Harmony(HarmonyType::Triadic))
        .with_contrast_target(ContrastTarget::Aaa);
    group.bench_function("generate_design/all", |b| {
        b.iter(|| black_box(generate_design(black_box(&full), &Capabilities::ALL)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_color,
    bench_palettes,
    bench_contrast,
    bench_typography,
    bench_design
);
criterion_main!(benches);
