#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the property ad cleaning pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use property_map_analytics::aggregate::aggregate_by_district;
use property_map_analytics::quartiles::bin_quartiles;
use property_map_analytics_models::QuartileSummary;
use property_map_geography::enrich::{DistrictStats, enrich_features};
use property_map_geography_models::ZoneMap;
use property_map_ingest::{boundaries, tabular};
use property_map_pipeline::composer::{self, PipelineConfig};

#[derive(Parser)]
#[command(name = "property_map", about = "Property ad cleaning and map enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the ad dataset and enrich the district boundary map
    Process {
        /// Path to the raw ads CSV file
        #[arg(long)]
        ads: PathBuf,
        /// Path to the district boundaries GeoJSON file
        #[arg(long)]
        districts: PathBuf,
        /// Directory the output files are written to
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Feature property holding the raw district name
        #[arg(long, default_value = "NAME_1")]
        district_property: String,
        /// Path to a TOML stage-chain file (defaults to the built-in chain)
        #[arg(long)]
        pipeline: Option<PathBuf>,
        /// Keep only the first N cleaned rows (for testing)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the stages of the effective cleaning chain, in order
    Stages {
        /// Path to a TOML stage-chain file (defaults to the built-in chain)
        #[arg(long)]
        pipeline: Option<PathBuf>,
    },
}

fn load_config(pipeline: Option<PathBuf>) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    Ok(match pipeline {
        Some(path) => PipelineConfig::from_toml(&fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stages { pipeline } => {
            for stage in load_config(pipeline)?.stages {
                println!("{stage}");
            }
        }
        Commands::Process {
            ads,
            districts,
            out_dir,
            district_property,
            pipeline,
            limit,
        } => {
            let start = Instant::now();

            let config = load_config(pipeline)?;
            let zone_map = ZoneMap::portugal();

            let raw = tabular::read_csv_file(&ads)?;
            let mut cleaned = composer::run(&raw, &config, &zone_map)?;
            if let Some(n) = limit {
                log::info!("limiting output to the first {n} rows");
                cleaned = cleaned.head(n);
            }

            let aggregates = aggregate_by_district(&cleaned)?;

            #[allow(clippy::cast_precision_loss)]
            let count_series: BTreeMap<String, f64> = aggregates
                .iter()
                .map(|(d, a)| (d.clone(), a.count as f64))
                .collect();
            let area_series: BTreeMap<String, f64> = aggregates
                .iter()
                .map(|(d, a)| (d.clone(), a.area_mean))
                .collect();
            let price_series: BTreeMap<String, f64> = aggregates
                .iter()
                .map(|(d, a)| (d.clone(), a.price_per_square_meter_mean))
                .collect();

            let count_bins = bin_quartiles(&count_series)?;
            let area_bins = bin_quartiles(&area_series)?;
            let price_bins = bin_quartiles(&price_series)?;

            let summary = QuartileSummary {
                count: count_bins.edges,
                area_mean: area_bins.edges,
                price_per_square_meter: price_bins.edges,
            };
            let stats = DistrictStats {
                aggregates,
                count_quartiles: count_bins.labels,
                area_quartiles: area_bins.labels,
                price_quartiles: price_bins.labels,
            };

            let mut collection = boundaries::read_feature_collection_file(&districts)?;
            enrich_features(&mut collection, &district_property, &zone_map, &stats);

            fs::create_dir_all(&out_dir)?;
            tabular::write_csv_file(&cleaned, &out_dir.join("final_dataset.csv"))?;
            tabular::write_json_file(&cleaned, &out_dir.join("final_dataset.json"))?;
            boundaries::write_feature_collection_file(
                collection,
                &out_dir.join("districts_enriched.geojson"),
            )?;
            boundaries::write_quartile_summary_file(&summary, &out_dir.join("quartiles.json"))?;

            log::info!(
                "processing complete: {} cleaned rows in {:.1}s",
                cleaned.len(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
