use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Booking,
    Pendapatan,
    Armada,
    Supir,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Pendapatan => "pendapatan",
            Self::Armada => "armada",
            Self::Supir => "supir",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(Self::Booking),
            "pendapatan" => Ok(Self::Pendapatan),
            "armada" => Ok(Self::Armada),
            "supir" => Ok(Self::Supir),
            other => Err(format!("Jenis laporan tidak dikenal: {other}")),
        }
    }
}

/// Filters of the report page, as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Summary cards plus table rows. Row shape depends on the report kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub summary: Map<String, Value>,
    #[serde(default)]
    pub rows: Vec<Value>,
}
