//! Styling rules for rendered features.
//!
//! Points are bucketed into six connectivity tiers, each with a strict lower
//! bound. Tiers are checked highest-first and the first match wins; anything
//! that clears no bound (including NaN) lands in the last tier. Axial lines
//! share one constant style.

use serde::Serialize;

/// One connectivity bucket. `above == None` marks the catch-all tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub above: Option<f64>,
    pub color: &'static str,
    pub radius: u32,
    pub label: &'static str,
}

/// Tier table in descending order of value.
pub const TIERS: [Tier; 6] = [
    Tier {
        above: Some(1.45),
        color: "red",
        radius: 12,
        label: "Very High (>1.45)",
    },
    Tier {
        above: Some(1.35),
        color: "orange",
        radius: 10,
        label: "Fairly High (1.35–1.45)",
    },
    Tier {
        above: Some(1.25),
        color: "lime",
        radius: 8,
        label: "Moderately High (1.25–1.35)",
    },
    Tier {
        above: Some(1.15),
        color: "blue",
        radius: 6,
        label: "Moderately Low (1.15–1.25)",
    },
    Tier {
        above: Some(1.05),
        color: "magenta",
        radius: 5,
        label: "Fairly Low (1.05–1.15)",
    },
    Tier {
        above: None,
        color: "black",
        radius: 4,
        label: "Very Low (<1.05)",
    },
];

pub const LEGEND_TITLE: &str = "Connectivity";

/// Pick the tier for a connectivity value.
pub fn tier_for(value: f64) -> &'static Tier {
    TIERS
        .iter()
        .find(|tier| match tier.above {
            Some(bound) => value > bound,
            None => true,
        })
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Circle-marker options for a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointStyle {
    pub color: &'static str,
    pub radius: u32,
    pub weight: u32,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

/// Style a node from its (optional) connectivity attribute. Missing values count as 0.
pub fn style_point(connectivity: Option<f64>) -> PointStyle {
    let tier = tier_for(connectivity.unwrap_or(0.0));
    PointStyle {
        color: tier.color,
        radius: tier.radius,
        weight: 1,
        fill_opacity: 0.8,
    }
}

pub fn point_popup(connectivity: Option<f64>) -> String {
    format!("Connectivity: {:.6}", connectivity.unwrap_or(0.0))
}

/// Path options applied to every axial line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    /// Theme hook for the glow filter (`.leaflet-interactive.axial-line`).
    #[serde(rename = "className")]
    pub class_name: &'static str,
}

pub const AXIAL_LINE_STYLE: LineStyle = LineStyle {
    color: "#003366",
    weight: 3,
    opacity: 0.9,
    class_name: "axial-line",
};

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// Declarative legend content, rendered by [`legend_html`].
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn connectivity() -> Self {
        Self {
            title: LEGEND_TITLE,
            entries: TIERS
                .iter()
                .map(|tier| LegendEntry {
                    color: tier.color,
                    label: tier.label,
                })
                .collect(),
        }
    }
}

pub fn legend_html(legend: &Legend) -> String {
    let mut html = format!("<b>{}</b><br>", legend.title);
    for entry in &legend.entries {
        html.push_str(&format!(
            "<i style=\"background:{}\"></i> {}<br>",
            entry.color, entry.label
        ));
    }
    html
}
