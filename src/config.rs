use crate::expansion::DEFAULT_EXPANDED_DEPTH;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row offset inside a wrapped level, as a fraction of the level spacing.
pub const ROW_SPACING_RATIO: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub grid_cols: usize,
    pub default_expanded_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 220.0,
            vertical_spacing: 140.0,
            grid_cols: 6,
            default_expanded_depth: DEFAULT_EXPANDED_DEPTH,
        }
    }
}

impl LayoutConfig {
    /// Column count used for wrapping; zero is treated as one.
    pub fn columns(&self) -> usize {
        self.grid_cols.max(1)
    }

    pub fn row_spacing(&self) -> f32 {
        self.vertical_spacing * ROW_SPACING_RATIO
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    horizontal_spacing: Option<f32>,
    vertical_spacing: Option<f32>,
    grid_cols: Option<usize>,
    default_expanded_depth: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    primary_color: Option<String>,
    primary_text_color: Option<String>,
    primary_border_color: Option<String>,
    secondary_text_color: Option<String>,
    line_color: Option<String>,
    root_color: Option<String>,
    background: Option<String>,
    node_width: Option<f32>,
    node_height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlay a JSON5 config document on the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "base" || theme_name == "default" {
            config.theme = Theme::classic();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.primary_color {
            config.theme.primary_color = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.primary_text_color = v;
        }
        if let Some(v) = vars.primary_border_color {
            config.theme.primary_border_color = v;
        }
        if let Some(v) = vars.secondary_text_color {
            config.theme.secondary_text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.root_color {
            config.theme.root_color = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.node_width {
            config.theme.node_width = v;
        }
        if let Some(v) = vars.node_height {
            config.theme.node_height = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.horizontal_spacing {
            config.layout.horizontal_spacing = v;
        }
        if let Some(v) = layout.vertical_spacing {
            config.layout.vertical_spacing = v;
        }
        if let Some(v) = layout.grid_cols {
            config.layout.grid_cols = v;
        }
        if let Some(v) = layout.default_expanded_depth {
            config.layout.default_expanded_depth = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}
