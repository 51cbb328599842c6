//! `s57tiler-core` turns IHO S-57 electronic nautical charts into web map friendly data.
//!
//! This crate includes:
//! - **Chart access**: opening a chart through the GDAL S-57 driver with typed driver options.
//! - **GeoJSON building**: converting GDAL features to GeoJSON in WGS84 lon/lat.
//! - **Enrichment**: derived properties (minimum zoom, sounding labels, light symbols).
//! - **Export**: writing one GeoJSON file per layer and an index, plus optional MBTiles via
//!   tippecanoe.
//! - **Styles**: Mapbox GL styles and a TileServer-GL configuration for serving the tiles.

pub mod builder;
pub mod chart;
pub mod enrich;
pub mod error;
pub mod export;
pub mod mbtiles;
pub mod options;
pub mod output;
pub mod style;
pub mod types;
pub mod zoom;
