// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for capability inspection
//!
//! This module provides command-line functionality for:
//! - Listing the known image formats
//! - Probing a driver fixture

use std::path::Path;
use vaapi_display::backends::fixture::FixtureBackend;
use vaapi_display::formats::FourCC;
use vaapi_display::{Capabilities, DiscoveryConfig, Display, DisplayError, ImageFormat};

/// Resolve a format given by name (`"BGRx"`, `"IYUV"`) or by fourcc
fn find_format(query: &str) -> Option<ImageFormat> {
    ImageFormat::from_name(query)
        .or_else(|| FourCC::parse(query).and_then(ImageFormat::from_fourcc))
}

/// Print the format registry, or a single entry of it
pub fn list_formats(query: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let formats: Vec<ImageFormat> = match query {
        Some(query) => match find_format(query) {
            Some(format) => vec![format],
            None => return Err(format!("Unknown image format: {}", query).into()),
        },
        None => ImageFormat::ALL.to_vec(),
    };

    println!("Known image formats:");
    println!();
    for format in formats {
        println!(
            "  [{:>2}] {:<6} fourcc={} family={}",
            format.score(),
            format.gst_format_name(),
            format.fourcc(),
            format.family()
        );
        for caps in format.caps() {
            println!("       {}", caps.to_caps_string());
        }
    }
    Ok(())
}

/// Run discovery through a fixture and print what it found
pub fn probe(fixture: &Path, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => DiscoveryConfig::from_json_file(path)?,
        None => DiscoveryConfig::default(),
    };

    let backend = FixtureBackend::from_path(fixture);
    match Display::open_with_config(Box::new(backend), &config) {
        Ok(display) => {
            print_capabilities(&display.capabilities());
            Ok(())
        }
        Err(DisplayError::Discovery {
            stage,
            status,
            partial,
        }) => {
            println!("Discovery failed at {}: {}", stage, status);
            println!();
            println!("Populated before the failure:");
            print_capabilities(&partial);
            Err(Box::new(DisplayError::Discovery {
                stage,
                status,
                partial,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_capabilities(caps: &Capabilities) {
    match caps.api_version() {
        Some(version) => println!("VA-API version: {}", version),
        None => println!("VA-API version: unknown"),
    }
    if let Some(vendor) = caps.vendor() {
        println!("Driver: {}", vendor);
    }
    println!();

    println!("Profiles ({}):", caps.profiles().len());
    for profile in caps.profiles() {
        println!("  {}", profile);
    }
    println!();

    println!("Image formats ({}):", caps.image_formats().len());
    for descriptor in caps.image_caps().iter() {
        println!("  {}", descriptor.to_caps_string());
    }
    println!();

    println!("Subpicture formats ({}):", caps.subpicture_formats().len());
    for descriptor in caps.subpicture_caps().iter() {
        println!("  {}", descriptor.to_caps_string());
    }
}
