//! Builds the SVG document for a laid-out card. Positions come from
//! `layout::card`; this module only serializes them.

use std::fmt::Write;

use crate::layout::{CardFont, CardLayout, CardSpec, PlacedLine};

pub fn build_svg(spec: &CardSpec, layout: &CardLayout) -> String {
    let mut svg = String::with_capacity(1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = spec.width,
        h = spec.height
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        spec.width, spec.height, spec.background
    );

    for line in &layout.quote_lines {
        push_text(&mut svg, line, spec.quote_font, spec.quote_size, spec.quote_color);
    }
    push_text(
        &mut svg,
        &layout.attribution,
        spec.attribution_font,
        spec.attribution_size,
        spec.attribution_color,
    );

    svg.push_str("</svg>");
    svg
}

fn push_text(svg: &mut String, line: &PlacedLine, font: CardFont, size: f32, fill: &str) {
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" font-family="{family}, {generic}" font-weight="bold" font-size="{size}" fill="{fill}" text-anchor="middle">{text}</text>"#,
        x = line.center_x,
        y = line.baseline_y,
        family = font.svg_family(),
        generic = font.generic_family(),
        text = escape_xml(&line.text),
    );
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_card;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <3 don't"#),
            "Tom &amp; &quot;Jerry&quot; &lt;3 don&apos;t"
        );
    }

    #[test]
    fn test_svg_contains_every_line_and_attribution() {
        let spec = CardSpec::default();
        let layout = layout_card(
            &spec,
            "If they wanted to, they would. Stop making excuses for people who don't try.",
            "Real Talk",
        );
        let svg = build_svg(&spec, &layout);

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("fill=\"#000000\""));
        assert_eq!(svg.matches("<text ").count(), layout.quote_lines.len() + 1);
        assert!(svg.contains("\u{2014} Real Talk"));
        assert!(svg.contains("don&apos;t"));
        assert!(svg.ends_with("</svg>"));
    }
}
