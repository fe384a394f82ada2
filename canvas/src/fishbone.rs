//! Fishbone (Ishikawa) diagram: category reference data, layout, and SVG output.
//!
//! The layout is a pure function of the category list and [`LayoutParams`]:
//! branches are paired above and below the spine, one pair per column,
//! columns spaced evenly back from the head. The spine grows when there are
//! more columns than fit, so branches never overlap whatever the category
//! count.

#[cfg(test)]
#[path = "fishbone_test.rs"]
mod fishbone_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::FishboneAnalysis;
use crate::camera::{Point, Transform};

/// The six "M" cause categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Man,
    Machine,
    Material,
    Method,
    Measurement,
    Environment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Man,
        Self::Machine,
        Self::Material,
        Self::Method,
        Self::Measurement,
        Self::Environment,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Machine => "Machine",
            Self::Material => "Material",
            Self::Method => "Method",
            Self::Measurement => "Measurement",
            Self::Environment => "Environment",
        }
    }

    /// Icon name in the lucide icon set.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Man => "user",
            Self::Machine => "cog",
            Self::Material => "package",
            Self::Method => "file-text",
            Self::Measurement => "bar-chart-3",
            Self::Environment => "cloud",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Geometry knobs for [`FishboneLayout::compute`]. All values are in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutParams {
    /// x of the spine tail.
    pub origin_x: f64,
    /// y of the spine.
    pub center_y: f64,
    /// Minimum spine length; grows to fit all branch columns.
    pub spine_length: f64,
    /// Horizontal distance between branch columns.
    pub branch_spacing: f64,
    /// Vertical reach of each branch from the spine.
    pub branch_length: f64,
    /// How far a branch leans back towards the tail.
    pub branch_slant: f64,
    /// Length of the arrowhead at the spine head.
    pub head_size: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            center_y: 500.0,
            spine_length: 900.0,
            branch_spacing: 260.0,
            branch_length: 200.0,
            branch_slant: 80.0,
            head_size: 20.0,
        }
    }
}

/// A straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// One category branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub category: Category,
    /// From the joint on the spine out to the branch tip.
    pub line: Segment,
    /// Anchor for the category label, just beyond the tip.
    pub label_at: Point,
    pub above: bool,
}

impl Branch {
    /// Point `t` of the way from the spine joint to the tip.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let Segment { from, to } = self.line;
        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishboneLayout {
    pub spine: Segment,
    /// Triangle at the spine head: tip, upper corner, lower corner.
    pub arrow_head: [Point; 3],
    pub branches: Vec<Branch>,
    /// Bounding box width and height, including label room.
    pub width: f64,
    pub height: f64,
}

/// Gap between a branch tip and its label.
const LABEL_GAP: f64 = 16.0;
/// Extra canvas around the drawing.
const MARGIN: f64 = 40.0;
/// Horizontal room reserved to the right of the head for the problem label.
const HEAD_LABEL_ROOM: f64 = 240.0;

impl FishboneLayout {
    /// Lay out one branch per category. Even indices go above the spine, odd
    /// below; each pair shares a column, the first column nearest the head.
    #[must_use]
    pub fn compute(categories: &[Category], params: &LayoutParams) -> Self {
        let columns = categories.len().div_ceil(2);
        #[allow(clippy::cast_precision_loss)]
        let needed = (columns as f64 + 1.0) * params.branch_spacing;
        let spine_length = params.spine_length.max(needed);

        let cy = params.center_y;
        let head_x = params.origin_x + spine_length;
        let spine = Segment { from: Point::new(params.origin_x, cy), to: Point::new(head_x, cy) };

        let half = params.head_size / 2.0;
        let arrow_head = [
            Point::new(head_x + params.head_size, cy),
            Point::new(head_x, cy - half),
            Point::new(head_x, cy + half),
        ];

        let branches = categories
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                let above = i % 2 == 0;
                #[allow(clippy::cast_precision_loss)]
                let column = (i / 2) as f64;
                let joint_x = head_x - (column + 1.0) * params.branch_spacing;
                let dir = if above { -1.0 } else { 1.0 };
                let tip = Point::new(joint_x - params.branch_slant, cy + dir * params.branch_length);
                Branch {
                    category,
                    line: Segment { from: Point::new(joint_x, cy), to: tip },
                    label_at: Point::new(tip.x, tip.y + dir * LABEL_GAP),
                    above,
                }
            })
            .collect();

        Self {
            spine,
            arrow_head,
            branches,
            width: head_x + params.head_size + HEAD_LABEL_ROOM + MARGIN,
            height: cy + params.branch_length + LABEL_GAP + MARGIN,
        }
    }

    /// Render as a standalone SVG document.
    ///
    /// The problem statement is drawn at the head and, when an analysis is
    /// given, its causes are spread along their category's branch. The
    /// drawing is wrapped in a group carrying `transform`, so a panned or
    /// zoomed view renders the same way the interactive canvas does.
    #[must_use]
    pub fn to_svg(&self, analysis: Option<&FishboneAnalysis>, transform: &Transform) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        ));
        out.push_str(&format!(
            "<g transform=\"translate({} {}) scale({})\">\n",
            fmt_num(transform.x),
            fmt_num(transform.y),
            fmt_num(transform.scale),
        ));

        out.push_str(&line(self.spine, 3.0));
        let [tip, upper, lower] = self.arrow_head;
        out.push_str(&format!(
            "<polygon points=\"{},{} {},{} {},{}\" fill=\"black\"/>\n",
            fmt_num(tip.x),
            fmt_num(tip.y),
            fmt_num(upper.x),
            fmt_num(upper.y),
            fmt_num(lower.x),
            fmt_num(lower.y),
        ));

        if let Some(a) = analysis {
            out.push_str(&text(
                Point::new(tip.x + 12.0, tip.y),
                "start",
                "middle",
                "font-weight=\"bold\"",
                &a.problem_statement,
            ));
        }

        for b in &self.branches {
            out.push_str(&line(b.line, 2.0));
            let baseline = if b.above { "auto" } else { "hanging" };
            out.push_str(&text(b.label_at, "middle", baseline, "font-weight=\"bold\"", b.category.label()));

            let Some(a) = analysis else {
                continue;
            };
            let causes: Vec<_> = a.causes_for(b.category).collect();
            #[allow(clippy::cast_precision_loss)]
            let slots = causes.len() as f64 + 1.0;
            for (j, cause) in causes.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let at = b.point_at((j as f64 + 1.0) / slots);
                let extra = if cause.is_root_cause { "fill=\"#b91c1c\"" } else { "" };
                out.push_str(&text(Point::new(at.x - 8.0, at.y), "end", "middle", extra, &cause.title));
            }
        }

        out.push_str("</g>\n</svg>\n");
        out
    }
}

fn line(seg: Segment, width: f64) -> String {
    format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\" stroke-width=\"{}\" stroke-linecap=\"round\"/>\n",
        fmt_num(seg.from.x),
        fmt_num(seg.from.y),
        fmt_num(seg.to.x),
        fmt_num(seg.to.y),
        fmt_num(width),
    )
}

fn text(at: Point, anchor: &str, baseline: &str, extra: &str, content: &str) -> String {
    let extra = if extra.is_empty() { String::new() } else { format!(" {extra}") };
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" font-family=\"sans-serif\" font-size=\"14\"{extra}>{}</text>\n",
        fmt_num(at.x),
        fmt_num(at.y),
        escape_xml(content),
    )
}

/// Format a coordinate without a trailing `.0` and with at most two decimals.
fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_owned()
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
