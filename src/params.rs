use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};

/// How the generator mirrors the fundamental region across the grid. The
/// discriminants are the wire indices used in parameter strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symmetry {
    None,
    Mirror2,
    Rot2,
    Mirror4,
    Rot4,
}

impl Symmetry {
    pub const ALL: [Symmetry; 5] = [
        Symmetry::None,
        Symmetry::Mirror2,
        Symmetry::Rot2,
        Symmetry::Mirror4,
        Symmetry::Rot4,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap()
    }

    pub fn from_index(i: usize) -> Option<Symmetry> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Symmetry::None => "None",
            Symmetry::Mirror2 => "2-way mirror",
            Symmetry::Rot2 => "2-way rotational",
            Symmetry::Mirror4 => "4-way mirror",
            Symmetry::Rot4 => "4-way rotational",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub width: usize,
    pub height: usize,
    /// Target share of wall squares, in percent. The generator may inflate
    /// this when a density refuses to produce a good puzzle.
    pub black_percent: u32,
    pub symmetry: Symmetry,
    /// Guarantee the puzzle needs at least one backtracking guess (otherwise
    /// guarantee it needs none).
    pub hard: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            width: 7,
            height: 7,
            black_percent: 20,
            symmetry: Symmetry::Rot4,
            hard: false,
        }
    }
}

impl Params {
    /// `full` includes the generation settings; the short form is safe to put
    /// in URLs without leaking hints about the puzzle.
    pub fn encode(&self, full: bool) -> String {
        let mut out = format!("{}x{}", self.width, self.height);
        if full {
            out.push_str(&format!("b{}s{}", self.black_percent, self.symmetry.index()));
            if self.hard {
                out.push('r');
            }
        }
        out
    }

    /// Parse `WxH(bN)?(sN)?(r)?`; omitted fields keep their defaults.
    pub fn decode(s: &str) -> anyhow::Result<Params> {
        let caps = regex::Regex::new(r"^(\d+)x(\d+)(?:b(\d+))?(?:s(\d+))?(r)?$")
            .unwrap()
            .captures(s)
            .ok_or_else(|| anyhow!("expected a parameter string like 10x10b20s4, got '{s}'"))?;

        let mut params = Params {
            width: caps[1].parse()?,
            height: caps[2].parse()?,
            ..Params::default()
        };
        if let Some(m) = caps.get(3) {
            params.black_percent = m.as_str().parse()?;
        }
        if let Some(m) = caps.get(4) {
            let i: usize = m.as_str().parse()?;
            params.symmetry =
                Symmetry::from_index(i).ok_or_else(|| anyhow!("unknown symmetry index {i}"))?;
        }
        params.hard = caps.get(5).is_some();
        Ok(params)
    }

    /// The short form only pins the grid shape, so only that much is checked
    /// unless `full` is set.
    pub fn validate(&self, full: bool) -> anyhow::Result<()> {
        if self.width < 2 || self.height < 2 {
            bail!("width and height must be at least 2");
        }
        if full {
            if !(5..=100).contains(&self.black_percent) {
                bail!("percentage of black squares must be between 5 and 100");
            }
            if self.symmetry == Symmetry::Rot4 && self.width != self.height {
                bail!("4-way rotational symmetry requires a square grid");
            }
        }
        Ok(())
    }
}

pub fn presets() -> Vec<(String, Params)> {
    let mut out = vec![];
    for size in [7, 10, 14] {
        for hard in [false, true] {
            let params = Params {
                width: size,
                height: size,
                hard,
                ..Params::default()
            };
            let label = format!("{size}x{size} {}", if hard { "hard" } else { "easy" });
            out.push((label, params));
        }
    }
    out
}

pub fn fetch_preset(i: usize) -> Option<(String, Params)> {
    presets().into_iter().nth(i)
}

/// One entry of the custom-game dialog, mirrored to and from [`Params`] by
/// [`configure`] and [`custom_params`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Choices { options: Vec<String>, selected: usize },
    Boolean(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigItem {
    pub name: &'static str,
    pub value: ConfigValue,
}

pub fn configure(params: &Params) -> Vec<ConfigItem> {
    vec![
        ConfigItem {
            name: "Width",
            value: ConfigValue::Text(params.width.to_string()),
        },
        ConfigItem {
            name: "Height",
            value: ConfigValue::Text(params.height.to_string()),
        },
        ConfigItem {
            name: "%age of black squares",
            value: ConfigValue::Text(params.black_percent.to_string()),
        },
        ConfigItem {
            name: "Symmetry",
            value: ConfigValue::Choices {
                options: Symmetry::ALL.iter().map(|s| s.label().to_string()).collect(),
                selected: params.symmetry.index(),
            },
        },
        ConfigItem {
            name: "Difficulty",
            value: ConfigValue::Choices {
                options: vec!["Easy".to_string(), "Hard".to_string()],
                selected: params.hard as usize,
            },
        },
    ]
}

pub fn custom_params(items: &[ConfigItem]) -> anyhow::Result<Params> {
    let text = |i: usize| -> anyhow::Result<&str> {
        match items.get(i).map(|item| &item.value) {
            Some(ConfigValue::Text(s)) => Ok(s),
            _ => bail!("expected a text field at position {i}"),
        }
    };
    let choice = |i: usize| -> anyhow::Result<usize> {
        match items.get(i).map(|item| &item.value) {
            Some(ConfigValue::Choices { selected, .. }) => Ok(*selected),
            _ => bail!("expected a choice field at position {i}"),
        }
    };

    Ok(Params {
        width: text(0)?.trim().parse()?,
        height: text(1)?.trim().parse()?,
        black_percent: text(2)?.trim().parse()?,
        symmetry: Symmetry::from_index(choice(3)?)
            .ok_or_else(|| anyhow!("unknown symmetry choice"))?,
        hard: choice(4)? == 1,
    })
}
