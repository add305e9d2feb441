use crate::domain::services::aggregation::ChartBucket;
use std::f64::consts::PI;
use std::fmt::Write;

const COLORS: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

const EMPTY_LABEL: &str = "Sem dados";

fn color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// Point on the unit circle for a fraction of a full turn.
pub fn coordinates_for_fraction(fraction: f64) -> (f64, f64) {
    ((2.0 * PI * fraction).cos(), (2.0 * PI * fraction).sin())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn empty_chart(width: u32, height: u32) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" text-anchor="middle" fill="#9ca3af" font-family="Arial, sans-serif" font-size="14">{label}</text></svg>"##,
        w = width,
        h = height,
        x = width / 2,
        y = height / 2,
        label = EMPTY_LABEL,
    )
}

/// Donut chart with a legend. Slices follow bucket order.
pub fn render_donut(title: &str, buckets: &[ChartBucket]) -> String {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 {
        return empty_chart(360, 220);
    }

    let legend_height = 24 * buckets.len() as u32;
    let height = 220.max(legend_height + 40);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="460" height="{h}" viewBox="0 0 460 {h}" font-family="Arial, sans-serif">"#,
        h = height
    );
    let _ = write!(svg, r#"<text x="10" y="20" font-size="14" font-weight="bold">{}</text>"#, escape_xml(title));
    svg.push_str(r#"<g transform="translate(110 120) scale(80) rotate(-90)">"#);

    let mut cumulative = 0.0;
    for (i, bucket) in buckets.iter().enumerate() {
        let fraction = bucket.count as f64 / total as f64;
        if fraction >= 1.0 {
            let _ = write!(svg, r#"<circle cx="0" cy="0" r="1" fill="{}"/>"#, color(i));
            break;
        }
        let (sx, sy) = coordinates_for_fraction(cumulative);
        cumulative += fraction;
        let (ex, ey) = coordinates_for_fraction(cumulative);
        let large_arc = if fraction > 0.5 { 1 } else { 0 };
        let _ = write!(
            svg,
            r#"<path d="M {sx:.4} {sy:.4} A 1 1 0 {large_arc} 1 {ex:.4} {ey:.4} L 0 0" fill="{c}"/>"#,
            c = color(i)
        );
    }
    svg.push_str(r##"<circle cx="0" cy="0" r="0.6" fill="#ffffff"/></g>"##);
    let _ = write!(
        svg,
        r#"<text x="110" y="126" text-anchor="middle" font-size="18" font-weight="bold">{}</text>"#,
        total
    );

    for (i, bucket) in buckets.iter().enumerate() {
        let y = 40 + 24 * i as u32;
        let _ = write!(
            svg,
            r#"<rect x="220" y="{y}" width="12" height="12" fill="{c}"/><text x="240" y="{ty}" font-size="12">{label} ({count}, {pct:.1}%)</text>"#,
            y = y,
            ty = y + 11,
            c = color(i),
            label = escape_xml(&bucket.label),
            count = bucket.count,
            pct = bucket.percentage,
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Horizontal bar chart; bar widths are relative to the largest bucket.
pub fn render_bars(title: &str, buckets: &[ChartBucket]) -> String {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    if max == 0 {
        return empty_chart(460, 160);
    }

    let bar_area = 260.0;
    let height = 40 + 28 * buckets.len() as u32;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="460" height="{h}" viewBox="0 0 460 {h}" font-family="Arial, sans-serif">"#,
        h = height
    );
    let _ = write!(svg, r#"<text x="10" y="20" font-size="14" font-weight="bold">{}</text>"#, escape_xml(title));

    for (i, bucket) in buckets.iter().enumerate() {
        let y = 34 + 28 * i as u32;
        let width = bucket.count as f64 / max as f64 * bar_area;
        let _ = write!(
            svg,
            r#"<text x="10" y="{ty}" font-size="12">{label}</text><rect x="150" y="{y}" width="{w:.1}" height="18" rx="3" fill="{c}"/><text x="{cx:.1}" y="{ty}" font-size="12">{count}</text>"#,
            ty = y + 13,
            y = y,
            w = width,
            cx = 156.0 + width,
            c = color(i),
            label = escape_xml(&bucket.label),
            count = bucket.count,
        );
    }

    svg.push_str("</svg>");
    svg
}
