use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownPresetError {
    kind: &'static str,
    value: String,
}

/// Reader colour presets. `Night01` is the only dark one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day01,
    Day02,
    Day03,
    Day04,
    Day05,
    Night01,
}

struct Preset {
    swatch: &'static str,
    primary: [&'static str; 3],
    background: [&'static str; 2],
    surface: [&'static str; 4],
    border: &'static str,
}

const SHADOW: &str = "rgba(107, 100, 147, .16)";
const DAY_PRIMARY: [&str; 3] = ["#ffe6e7", "#ff6f75", "#e5353e"];
const DAY_SURFACE: [&str; 4] = [
    "rgba(0, 0, 0, 0.08)",
    "rgba(0, 0, 0, 0.12)",
    "rgba(0, 0, 0, 0.48)",
    "rgba(0, 0, 0, 0.9)",
];
const DAY_BORDER: &str = "rgba(0, 0, 0, 0.08)";
const DAY_HOVER: &str = "rgba(0, 0, 0, 0.04)";

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Day01,
        Theme::Day02,
        Theme::Day03,
        Theme::Day04,
        Theme::Day05,
        Theme::Night01,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Day01 => "day01",
            Theme::Day02 => "day02",
            Theme::Day03 => "day03",
            Theme::Day04 => "day04",
            Theme::Day05 => "day05",
            Theme::Night01 => "night01",
        }
    }

    pub fn is_night(self) -> bool {
        self == Theme::Night01
    }

    /// Colour shown for the theme in a picker.
    pub fn swatch(self) -> &'static str {
        self.preset().swatch
    }

    /// CSS custom properties, in declaration order.
    pub fn vars(self) -> [(&'static str, &'static str); 11] {
        let preset = self.preset();
        [
            ("--primary-red-50", preset.primary[0]),
            ("--primary-red-300", preset.primary[1]),
            ("--primary-red-500", preset.primary[2]),
            ("--shadow-16", SHADOW),
            ("--background", preset.background[0]),
            ("--background-hover-black-4", preset.background[1]),
            ("--surface-gray-50", preset.surface[0]),
            ("--surface-gray-100", preset.surface[1]),
            ("--surface-gray-500", preset.surface[2]),
            ("--surface-gray-900", preset.surface[3]),
            ("--border-black-8", preset.border),
        ]
    }

    fn preset(self) -> Preset {
        let day = |swatch, background| Preset {
            swatch,
            primary: DAY_PRIMARY,
            background: [background, DAY_HOVER],
            surface: DAY_SURFACE,
            border: DAY_BORDER,
        };
        match self {
            Theme::Day01 => Preset {
                surface: ["#f5f5f5", "#ebebeb", "#808080", "#191919"],
                ..day("#E0E0E0", "#fff")
            },
            Theme::Day02 => day("#F5F1E8", "#faf9f4"),
            Theme::Day03 => day("#F4ECD1", "#f4ecd1"),
            Theme::Day04 => day("#DAF2DA", "#ebfaeb"),
            Theme::Day05 => day("#DCEAEE", "#edf5f7"),
            Theme::Night01 => Preset {
                swatch: "#191919",
                primary: ["rgba(229, 53, 62, 0.16)", "rgba(229, 53, 62, 0.48)", "#ff4d55"],
                background: ["#1f1f1f", "rgba(255, 255, 255, 0.08)"],
                surface: [
                    "rgba(255, 255, 255, 0.08)",
                    "rgba(255, 255, 255, 0.12)",
                    "rgba(255, 255, 255, 0.4)",
                    "rgba(255, 255, 255, 0.6)",
                ],
                border: "rgba(255, 255, 255, 0.12)",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = UnknownPresetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "day" => Ok(Theme::Day01),
            "night" => Ok(Theme::Night01),
            _ => Theme::ALL
                .into_iter()
                .find(|theme| theme.name() == value)
                .ok_or_else(|| UnknownPresetError {
                    kind: "theme",
                    value: value.to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// 黑体
    Sans,
    /// 宋体
    Serif,
    /// 楷体
    Kai,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Sans, FontFamily::Serif, FontFamily::Kai];

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Sans => "黑体",
            FontFamily::Serif => "宋体",
            FontFamily::Kai => "楷体",
        }
    }

    pub fn stack(self) -> &'static str {
        match self {
            FontFamily::Sans => {
                "SourceHanSansSC-Regular,SourceHanSansCN-Regular,PingFangSC-Regular,\"Microsoft YaHei\",system-ui,-apple-system,Segoe UI,Roboto,Emoji,Helvetica,Arial,sans-serif"
            }
            FontFamily::Serif => {
                "SourceHanSerifSC-Regular,SourceHanSerifCN-Regular,STSong,Simsun,system-ui,-apple-system,Georgia,Times New Roman,Times,serif"
            }
            FontFamily::Kai => {
                "KaitiSC-Regular,STKaiti,Kaiti,system-ui,-apple-system,Georgia,Times New Roman,Times,serif"
            }
        }
    }
}

impl FromStr for FontFamily {
    type Err = UnknownPresetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "黑体" | "sans" => Ok(FontFamily::Sans),
            "宋体" | "serif" => Ok(FontFamily::Serif),
            "楷体" | "kai" => Ok(FontFamily::Kai),
            _ => Err(UnknownPresetError {
                kind: "font family",
                value: value.to_string(),
            }),
        }
    }
}
