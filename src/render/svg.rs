// =============================================================================
// RENDER SVG — Le radar des axes
// =============================================================================
//
// Géométrie du radar (n axes) :
//
//   angle(i) = -π/2 + i * 2π/n        (le premier axe pointe vers le haut)
//   point(i) = centre + r * v_i/100 * (cos angle, sin angle)
//
// Quatre anneaux de grille (r/4, r/2, 3r/4, r), un rayon par axe, le
// polygone de l'utilisateur, puis les libellés courts à 1.12 r.
//
// =============================================================================

use std::f64::consts::PI;
use std::fmt::Write;

use super::Renderer;
use crate::core::data::QuizData;
use crate::core::engine::ScoringResult;

const DEFAULT_STROKE: &str = "rgb(79,102,255)";
const GRID_RINGS: usize = 4;

/// Renderer SVG du radar
#[derive(Debug, Clone)]
pub struct SvgRadarRenderer {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgRadarRenderer {
    fn default() -> Self {
        SvgRadarRenderer {
            width: 360.0,
            height: 320.0,
        }
    }
}

impl SvgRadarRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        SvgRadarRenderer { width, height }
    }

    fn center(&self) -> (f64, f64) {
        (self.width * 0.52, self.height * 0.54)
    }

    fn radius(&self) -> f64 {
        self.width.min(self.height) * 0.36
    }

    /// Le SVG du radar pour un vecteur et des libellés donnés
    pub fn radar(&self, labels: &[&str], values: &[f64], color: Option<&str>) -> String {
        let (cx, cy) = self.center();
        let r = self.radius();
        let n = labels.len().min(values.len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if n == 0 {
            out.push_str("</svg>\n");
            return out;
        }

        for k in 1..=GRID_RINGS {
            let ring = vec![100.0 * k as f64 / GRID_RINGS as f64; n];
            let _ = writeln!(
                out,
                r#"  <polygon points="{}" fill="none" stroke="rgb(15,23,42)" stroke-opacity="0.12"/>"#,
                points_attr(&radar_points(&ring, cx, cy, r))
            );
        }
        for (x, y) in radar_points(&vec![100.0; n], cx, cy, r) {
            let _ = writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="rgb(15,23,42)" stroke-opacity="0.12"/>"#,
                cx, cy, x, y
            );
        }

        let stroke = color.unwrap_or(DEFAULT_STROKE);
        let _ = writeln!(
            out,
            r#"  <polygon points="{}" fill="rgb(79,102,255)" fill-opacity="0.14" stroke="{}" stroke-width="2"/>"#,
            points_attr(&radar_points(&values[..n], cx, cy, r)),
            escape_xml(stroke)
        );

        let label_pts = radar_points(&vec![112.0; n], cx, cy, r);
        for (i, ((x, y), label)) in label_pts.into_iter().zip(labels).enumerate() {
            let ty = if i == 0 { y - 6.0 } else { y + 4.0 };
            let _ = writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12" fill="rgb(15,23,42)" fill-opacity="0.72">{}</text>"#,
                x,
                ty,
                escape_xml(label)
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Sommets du polygone radar (100 = sur le cercle extérieur).
///
/// Les valeurs négatives sont ramenées à 0 ; au-delà de 100 on sort du
/// cercle, ce qui sert à placer les libellés.
pub fn radar_points(values: &[f64], cx: f64, cy: f64, r: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let angle = -PI / 2.0 + i as f64 * (2.0 * PI / n as f64);
            let scaled = r * v.max(0.0) / 100.0;
            (cx + scaled * angle.cos(), cy + scaled * angle.sin())
        })
        .collect()
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Échappe le texte inséré dans le SVG
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

impl Renderer for SvgRadarRenderer {
    fn render_result(&self, data: &QuizData, result: &ScoringResult) -> String {
        let labels: Vec<&str> = data.axes.iter().map(|a| a.short.as_str()).collect();
        let values: Vec<f64> = result.vector.iter().map(|v| v.clamp(0.0, 100.0)).collect();
        let color = result.primary(data).and_then(|s| s.color.as_deref());
        self.radar(&labels, &values, color)
    }

    fn name(&self) -> &str {
        "svg"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_first_point_points_up() {
        let pts = radar_points(&[100.0, 100.0, 100.0, 100.0], 50.0, 50.0, 10.0);
        assert!((pts[0].0 - 50.0).abs() < EPS);
        assert!((pts[0].1 - 40.0).abs() < EPS);
        // deuxième axe à droite
        assert!((pts[1].0 - 60.0).abs() < EPS);
        assert!((pts[1].1 - 50.0).abs() < EPS);
    }

    #[test]
    fn test_zero_collapses_to_center() {
        let pts = radar_points(&[0.0, -20.0], 5.0, 7.0, 3.0);
        for (x, y) in pts {
            assert!((x - 5.0).abs() < EPS && (y - 7.0).abs() < EPS);
        }
    }

    #[test]
    fn test_svg_structure() {
        let svg = SvgRadarRenderer::default().radar(&["A", "B & C", "D"], &[50.0, 75.0, 10.0], Some("#ff0000"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        // 4 anneaux + le polygone utilisateur
        assert_eq!(svg.matches("<polygon").count(), 5);
        assert_eq!(svg.matches("<line").count(), 3);
        assert!(svg.contains("B &amp; C"));
        assert!(svg.contains(r##"stroke="#ff0000""##));
    }

    #[test]
    fn test_empty_radar() {
        let svg = SvgRadarRenderer::default().radar(&[], &[], None);
        assert!(!svg.contains("<polygon"));
    }
}
