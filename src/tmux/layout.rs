use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Preset pane arrangement passed to `select-layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    EvenHorizontal,
    EvenVertical,
    MainHorizontal,
    MainVertical,
    Tiled,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::EvenHorizontal => "even-horizontal",
            Layout::EvenVertical => "even-vertical",
            Layout::MainHorizontal => "main-horizontal",
            Layout::MainVertical => "main-vertical",
            Layout::Tiled => "tiled",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even-horizontal" => Ok(Layout::EvenHorizontal),
            "even-vertical" => Ok(Layout::EvenVertical),
            "main-horizontal" => Ok(Layout::MainHorizontal),
            "main-vertical" => Ok(Layout::MainVertical),
            "tiled" => Ok(Layout::Tiled),
            other => Err(format!("unknown layout: {}", other)),
        }
    }
}
