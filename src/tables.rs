use std::collections::BTreeMap;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use enumset::EnumSet;
use rust_decimal::Decimal;

use ure::{
    core::{
        installation::InstallationType,
        region::{MunicipalityStatistics, RegionalData},
        tariff::{TariffStructure, TariffSummary},
    },
    quantity::money::format_currency,
    statistics::{
        growth::CapacityGrowthAnalysis,
        period::PeriodAverage,
        summary::Summary,
        trend::{PriceAnalysis, PriceTrend},
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

pub fn build_price_analysis_table(analysis: &PriceAnalysis) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Period", "Energy", "Average", "Min", "Max", "Volatility", "Trend"]);
    let optional =
        |price: Option<f64>| price.map_or_else(|| "-".to_string(), |price| format!("{price:.2}"));
    table.add_row(vec![
        Cell::new(analysis.period),
        Cell::new(analysis.energy_type),
        right(format!("{:.2}", analysis.average_price)).add_attribute(Attribute::Bold),
        right(optional(analysis.min_price)).add_attribute(Attribute::Dim),
        right(optional(analysis.max_price)).add_attribute(Attribute::Dim),
        right(format!("{:.2}", analysis.volatility)),
        Cell::new(analysis.price_trend).fg(match analysis.price_trend {
            PriceTrend::Increasing => Color::Red,
            PriceTrend::Decreasing => Color::Green,
            PriceTrend::Stable => Color::Reset,
        }),
    ]);
    table
}

pub fn build_period_averages_table(averages: &[PeriodAverage]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Period", "Average", "Observations"]);
    for average in averages {
        table.add_row(vec![
            Cell::new(average.key),
            right(average.average_price.round_dp(2)),
            right(average.count).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_tariff_catalogue_table(tariffs: &[TariffSummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name"]);
    for tariff in tariffs {
        table.add_row(vec![
            Cell::new(&tariff.tariff_id).add_attribute(Attribute::Bold),
            Cell::new(&tariff.name),
        ]);
    }
    table
}

/// Ranked tariffs, the cheapest one highlighted.
pub fn build_tariff_ranking_table(ranked: &[(TariffStructure, Decimal)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Base", "Energy", "Network", "Total"]);
    for (index, (tariff, total_cost)) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(tariff.tariff_id()).add_attribute(Attribute::Bold),
            Cell::new(tariff.name()),
            right(format_currency(tariff.base_price(), tariff.currency())),
            right(tariff.energy_price()).add_attribute(Attribute::Dim),
            right(format_currency(tariff.network_fee(), tariff.currency())),
            right(format_currency(*total_cost, tariff.currency()))
                .fg(if index == 0 { Color::Green } else { Color::Reset }),
        ]);
    }
    table
}

pub fn build_regions_table(regions: &BTreeMap<String, RegionalData>) -> Table {
    let mut table = new_table();
    let mut header = vec![
        Cell::new("Voivodeship"),
        Cell::new("Installations"),
        Cell::new("Capacity"),
        Cell::new("Average"),
    ];
    header.extend(EnumSet::<InstallationType>::all().iter().map(Cell::new));
    table.set_header(header);
    for region in regions.values() {
        let mut row = vec![
            Cell::new(&region.voivodeship),
            right(region.installation_count),
            right(region.total_capacity).add_attribute(Attribute::Bold),
            right(
                region.average_installation_size().map_or_else(String::new, |size| size.to_string()),
            )
            .add_attribute(Attribute::Dim),
        ];
        row.extend(region.type_distribution.values().map(|count| {
            right(count).fg(if *count == 0 { Color::DarkGrey } else { Color::Reset })
        }));
        table.add_row(row);
    }
    table
}

pub fn build_municipalities_table(municipalities: &[MunicipalityStatistics]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Municipality", "Voivodeship", "Installations", "Capacity"]);
    for (rank, statistics) in municipalities.iter().enumerate() {
        table.add_row(vec![
            right(rank + 1).add_attribute(Attribute::Dim),
            Cell::new(&statistics.municipality).add_attribute(Attribute::Bold),
            Cell::new(&statistics.voivodeship),
            right(statistics.installation_count),
            right(statistics.total_capacity),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Type", "Installations", "Capacity"]);
    for (installation_type, type_summary) in &summary.by_type {
        table.add_row(vec![
            Cell::new(installation_type),
            right(type_summary.count),
            right(type_summary.capacity),
        ]);
    }
    table.add_row(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        right(summary.total_installations).add_attribute(Attribute::Bold),
        right(summary.total_capacity).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_growth_table(growth: &CapacityGrowthAnalysis) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Voivodeship", "Added capacity"]);
    for (voivodeship, capacity) in &growth.regional_breakdown {
        table.add_row(vec![Cell::new(voivodeship), right(capacity)]);
    }
    table.add_row(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        right(growth.capacity_added).add_attribute(Attribute::Bold),
    ]);
    table
}
