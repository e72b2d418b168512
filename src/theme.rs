use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub primary_color: String,
    pub primary_text_color: String,
    pub primary_border_color: String,
    pub secondary_text_color: String,
    pub line_color: String,
    pub root_color: String,
    pub background: String,
    pub node_width: f32,
    pub node_height: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            primary_color: "#ECECFF".to_string(),
            primary_text_color: "#333333".to_string(),
            primary_border_color: "#9370DB".to_string(),
            secondary_text_color: "#666666".to_string(),
            line_color: "#333333".to_string(),
            root_color: "#FFFFDE".to_string(),
            background: "#FFFFFF".to_string(),
            node_width: 180.0,
            node_height: 64.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            primary_color: "#F8FAFF".to_string(),
            primary_text_color: "#1C2430".to_string(),
            primary_border_color: "#C7D2E5".to_string(),
            secondary_text_color: "#5B6B85".to_string(),
            line_color: "#7A8AA6".to_string(),
            root_color: "#EEF2F8".to_string(),
            background: "#FFFFFF".to_string(),
            node_width: 180.0,
            node_height: 64.0,
        }
    }
}
