//! S-52 colour tokens used by the chart styles.

/// Background colour painted below every chart layer.
pub const BACKGROUND: &str = "#000";

/// Fill colour of pontoons and hulks.
pub const STRUCTURE_FILL: &str = "#B7911F";

/// The subset of the S-52 colour table the styles paint with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Chart white, used for the open sea and label halos
    pub chwht: &'static str,
    /// Coastline and outline colour
    pub cstln: &'static str,
    /// Intertidal (drying) depth area
    pub depit: &'static str,
    /// Very shallow depth area
    pub depvs: &'static str,
    /// Medium depth area
    pub depmd: &'static str,
    /// Land area
    pub landa: &'static str,
    /// Soundings deeper than the safety depth
    pub sndg1: &'static str,
    /// Soundings at or above the safety depth
    pub sndg2: &'static str,
}

pub(crate) const DAY_BRIGHT: Palette = Palette {
    chwht: "#FFFFFF",
    cstln: "#525A5C",
    depit: "#83B295",
    depvs: "#73B6EF",
    depmd: "#BAD5E1",
    landa: "#C9B97A",
    sndg1: "#7D898C",
    sndg2: "#070707",
};

pub(crate) const DUSK: Palette = Palette {
    chwht: "#5B6A6E",
    cstln: "#35393B",
    depit: "#3F5648",
    depvs: "#38597A",
    depmd: "#4D5E66",
    landa: "#5E5638",
    sndg1: "#576063",
    sndg2: "#C3CBCD",
};

pub(crate) const NIGHT: Palette = Palette {
    chwht: "#161B1C",
    cstln: "#2A2E2F",
    depit: "#131A15",
    depvs: "#0B1620",
    depmd: "#161C1F",
    landa: "#1C190F",
    sndg1: "#2E3233",
    sndg2: "#596264",
};
