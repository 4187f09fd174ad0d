//! Tracked economies and indicators
//!
//! The fixed country and indicator sets shared by every data source,
//! together with the OECD code mappings and upstream URL builders.
//! Output order of the combined document follows the order of the
//! `ALL` arrays below.

use std::fmt;

/// Dashboard country code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Country {
    US,
    CN,
    EU,
    JP,
    IN,
    GB,
}

impl Country {
    /// All tracked economies, in output order
    pub const ALL: [Country; 6] = [
        Country::US,
        Country::CN,
        Country::EU,
        Country::JP,
        Country::IN,
        Country::GB,
    ];

    /// Two-letter dashboard code
    pub fn code(&self) -> &'static str {
        match self {
            Country::US => "US",
            Country::CN => "CN",
            Country::EU => "EU",
            Country::JP => "JP",
            Country::IN => "IN",
            Country::GB => "GB",
        }
    }

    /// OECD reference area (ISO alpha-3). Germany stands in for the EU.
    pub fn oecd_area(&self) -> &'static str {
        match self {
            Country::US => "USA",
            Country::CN => "CHN",
            Country::EU => "DEU",
            Country::JP => "JPN",
            Country::IN => "IND",
            Country::GB => "GBR",
        }
    }

    /// Resolve a dashboard code (case-sensitive, callers uppercase first)
    pub fn from_code(code: &str) -> Option<Country> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Resolve an OECD reference area; unmapped areas yield `None`
    pub fn from_oecd_area(area: &str) -> Option<Country> {
        Self::ALL.into_iter().find(|c| c.oecd_area() == area)
    }

    /// Position in [`Country::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Economic indicator, keyed by its World Bank ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Indicator {
    /// Real GDP growth, annual %
    GdpGrowth,
    /// Consumer price inflation, annual %
    Inflation,
    /// Unemployment, % of labour force
    Unemployment,
    /// Current account balance, % of GDP
    CurrentAccount,
    /// General government debt, % of GDP
    GovernmentDebt,
}

impl Indicator {
    /// All tracked indicators, in output order
    pub const ALL: [Indicator; 5] = [
        Indicator::GdpGrowth,
        Indicator::Inflation,
        Indicator::Unemployment,
        Indicator::CurrentAccount,
        Indicator::GovernmentDebt,
    ];

    /// World Bank indicator ID, the canonical key in the output
    pub fn wb_id(&self) -> &'static str {
        match self {
            Indicator::GdpGrowth => "NY.GDP.MKTP.KD.ZG",
            Indicator::Inflation => "FP.CPI.TOTL.ZG",
            Indicator::Unemployment => "SL.UEM.TOTL.ZS",
            Indicator::CurrentAccount => "BN.CAB.XOKA.GD.ZS",
            Indicator::GovernmentDebt => "GC.DOD.TOTL.GD.ZS",
        }
    }

    /// OECD Economic Outlook measure code
    pub fn oecd_measure(&self) -> &'static str {
        match self {
            Indicator::GdpGrowth => "GDPV_ANNPCT",
            // Index level; the adapter derives the YoY change
            Indicator::Inflation => "CPI",
            Indicator::Unemployment => "UNR",
            Indicator::CurrentAccount => "CBGDPR",
            Indicator::GovernmentDebt => "GGFLQ",
        }
    }

    /// Position in [`Indicator::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wb_id())
    }
}

/// Default OECD SDMX REST root
pub const OECD_DEFAULT_BASE_URL: &str = "https://sdmx.oecd.org/public/rest/data";

/// OECD Economic Outlook dataflow
pub const OECD_DATAFLOW: &str = "OECD.ECO.MAD,DSD_EO@DF_EO";

/// First period requested from OECD
pub const OECD_START_PERIOD: &str = "2022";

/// Default World Bank API root
pub const WORLDBANK_DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";

/// Number of most recent values requested per country
pub const WORLDBANK_MRV: u32 = 5;

/// Page size for World Bank requests (6 countries x 5 values fits one page)
pub const WORLDBANK_PER_PAGE: u32 = 50;

/// Build the OECD Economic Outlook query URL under `base_url`
///
/// Produces `<base>/OECD.ECO.MAD,DSD_EO@DF_EO/USA+CHN+...GDPV_ANNPCT+CPI+....A?startPeriod=2022&format=jsondata`
pub fn oecd_data_url(base_url: &str) -> String {
    let areas: Vec<&str> = Country::ALL.iter().map(|c| c.oecd_area()).collect();
    let measures: Vec<&str> = Indicator::ALL.iter().map(|i| i.oecd_measure()).collect();

    format!(
        "{}/{}/{}.{}.A?startPeriod={}&format=jsondata",
        base_url.trim_end_matches('/'),
        OECD_DATAFLOW,
        areas.join("+"),
        measures.join("+"),
        OECD_START_PERIOD,
    )
}

/// Build the World Bank URL for one indicator under `base_url`
pub fn worldbank_indicator_url(base_url: &str, indicator: Indicator) -> String {
    let countries: Vec<&str> = Country::ALL.iter().map(|c| c.code()).collect();

    format!(
        "{}/country/{}/indicator/{}?format=json&mrv={}&per_page={}",
        base_url.trim_end_matches('/'),
        countries.join(";"),
        indicator.wb_id(),
        WORLDBANK_MRV,
        WORLDBANK_PER_PAGE,
    )
}
