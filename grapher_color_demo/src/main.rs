// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color scale and stacking demos for `grapher_color`, printed as plain text.

use std::error::Error;
use std::fmt::Write as _;

use grapher_color::{
    BinningStrategy, ColorScale, ColorScaleBin, ColorScaleConfig, ColorScaleSpec,
    ColumnColorScale, CoreValue, NumberAbbreviation, NumberFormat, ValueColumn, legend_items,
    to_hex,
};
use grapher_transforms::{EntityTable, StackedBarTransform, StackedBars};
use peniko::Color;

fn main() -> Result<(), Box<dyn Error>> {
    let sections = [
        strategies_demo(),
        manual_demo(),
        categorical_demo(),
        dsl_demo(),
        stacked_demo()?,
    ];
    for (title, body) in sections {
        println!("== {title} ==");
        println!("{body}");
    }
    Ok(())
}

fn gdp_per_capita() -> ValueColumn {
    let values = [
        820.0, 1_150.0, 1_900.0, 2_400.0, 3_100.0, 4_800.0, 6_200.0, 9_500.0, 12_000.0, 15_500.0,
        23_000.0, 31_000.0, 38_000.0, 46_000.0, 52_000.0, 61_000.0, 118_000.0,
    ];
    ValueColumn::from_values(values).with_format(
        NumberFormat::default()
            .with_unit("$")
            .with_abbreviation(NumberAbbreviation::Short)
            .with_decimal_places(1),
    )
}

fn describe(scale: &ColorScale) -> String {
    let mut out = String::new();
    for bin in scale.legend_bins() {
        let kind = match bin {
            ColorScaleBin::Numeric(b) if b.is_open_left => "numeric, open left",
            ColorScaleBin::Numeric(b) if b.is_open_right => "numeric, open right",
            ColorScaleBin::Numeric(_) => "numeric",
            ColorScaleBin::Categorical(b) if b.is_hidden => "categorical, hidden",
            ColorScaleBin::Categorical(_) => "categorical",
        };
        let _ = writeln!(out, "  {}  {:<24} ({kind})", to_hex(bin.color()), bin.text());
    }
    let visible = legend_items(scale).len();
    let _ = writeln!(out, "  {visible} legend items");
    out
}

fn strategies_demo() -> (&'static str, String) {
    let column = gdp_per_capita();
    let mut out = String::new();
    for strategy in [
        BinningStrategy::EqualInterval,
        BinningStrategy::Quantiles,
        BinningStrategy::Ckmeans,
    ] {
        let config = ColorScaleConfig::default()
            .with_strategy(strategy)
            .with_scheme("YlGn");
        let scale = ColorScaleSpec::new(&config).instantiate(&column);
        let _ = writeln!(out, "{strategy}: maximums {:?}", scale.bucket_maximums());
        out.push_str(&describe(&scale));
    }
    ("Binning strategies", out)
}

fn manual_demo() -> (&'static str, String) {
    let column = ValueColumn::from_values([0.9, 1.1, 2.1, 3.1]);
    let config = ColorScaleConfig::default()
        .with_manual_bins([1.0, 2.0, 3.0])
        .with_numeric_colors([Some("#182f4d"), Some("#3b4c61"), Some("#5875a6")]);
    let scale = ColorScaleSpec::new(&config).instantiate(&column);
    let mut out = describe(&scale);
    for v in [0.9, 1.1, 2.1, 3.1] {
        let color = scale.get_color(Some(v.into())).map(to_hex);
        let _ = writeln!(out, "  {v} -> {}", color.as_deref().unwrap_or("none"));
    }
    ("Manual bins", out)
}

fn categorical_demo() -> (&'static str, String) {
    let column = ValueColumn::from_values(
        ["Africa", "Asia", "Europe", "North America", "Oceania"].map(CoreValue::from),
    );
    let mut config = ColorScaleConfig::default()
        .with_scheme("Set1")
        .with_category_color("Asia", "darkorange");
    config.custom_hidden_categories.insert("Oceania".into());
    let scale = ColorScaleSpec::new(&config)
        .with_no_data_bin(true)
        .with_default_no_data_color(Color::from_rgb8(0xcc, 0xcc, 0xcc))
        .instantiate(&column);
    ("Categorical bins", describe(&scale))
}

fn dsl_demo() -> (&'static str, String) {
    let stored = ColumnColorScale {
        color_scale_scheme: Some("Blues".into()),
        color_scale_binning_strategy: Some(BinningStrategy::Manual),
        color_scale_numeric_min_value: Some(0.0),
        color_scale_numeric_bins: Some("5000,,Low income;20000;60000,#08306b,High, very".into()),
        ..ColumnColorScale::default()
    };
    let config = ColorScaleConfig::from_dsl(&stored).unwrap_or_default();
    let scale = ColorScaleSpec::new(&config).instantiate(&gdp_per_capita());

    let mut out = String::new();
    let _ = writeln!(out, "  stored: {:?}", config.to_dsl());
    out.push_str(&describe(&scale));
    ("Column encoding", out)
}

fn stacked_demo() -> Result<(&'static str, String), Box<dyn Error>> {
    let mut table = EntityTable::new(["coal", "gas"]);
    let rows = [
        ("France", "coal", 2000, 12.0),
        ("France", "gas", 2000, 30.0),
        ("France", "coal", 2001, 9.0),
        ("France", "gas", 2002, 41.0),
        ("Germany", "coal", 2000, 80.0),
        ("Germany", "coal", 2001, 77.5),
        ("Germany", "gas", 2001, 55.0),
        ("Germany", "gas", 2002, 60.0),
        ("Germany", "gas", 2003, 0.0),
    ];
    for (entity, dimension, time, value) in rows {
        table.push(entity, dimension, time, Some(value.into()))?;
    }

    let transform = StackedBarTransform::new(["France", "Germany"], 2000..=2003);
    let mut out = String::new();
    match transform.stacked_series(&table) {
        Ok(bars) => print_bars(&mut out, &bars),
        Err(err) => {
            let _ = writeln!(out, "  {err}");
        }
    }
    Ok(("Stacked bars", out))
}

fn print_bars(out: &mut String, bars: &StackedBars) {
    let _ = writeln!(
        out,
        "  x domain {:?}, y domain {:?}",
        bars.x_domain(),
        bars.y_domain()
    );
    for series in &bars.series {
        let _ = write!(out, "  {:<18} {}", series.label, to_hex(series.color));
        for v in &series.values {
            let fake = if v.is_fake { "*" } else { "" };
            let _ = write!(out, "  {}:{}+{}{fake}", v.x, v.y, v.y_offset);
        }
        out.push('\n');
    }
    for item in bars.legend_items() {
        let _ = writeln!(out, "  legend: {} {}", to_hex(item.color), item.label);
    }
}
