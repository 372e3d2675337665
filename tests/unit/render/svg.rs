use super::*;
use crate::foundation::core::{HexColor, Point, Rect};
use crate::scene::model::RectPrimitive;

fn scene(primitives: Vec<Primitive>, fonts: &[&str]) -> Scene {
    Scene {
        width: 200,
        height: 50,
        font_families: fonts.iter().map(|s| (*s).to_owned()).collect(),
        primitives,
    }
}

fn fitted(text: &str) -> Primitive {
    Primitive::FittedText(FittedText {
        text: text.to_owned(),
        origin: Point::new(40.0, 30.0),
        anchor: TextAnchor::Middle,
        font_size: 32.0,
        font_weight: 700,
        target_width: 61.25,
        fill: HexColor::from_static("#ffffff"),
        opacity: 1.0,
        cell: Rect::new(10.0, 0.0, 71.25, 40.0),
    })
}

#[test]
fn document_has_canvas_size_and_viewbox() {
    let svg = scene_to_svg(&scene(vec![], &["sans-serif"]));
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="200" height="50" viewBox="0 0 200 50""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn fitted_text_uses_text_length() {
    let svg = scene_to_svg(&scene(vec![fitted("365")], &["sans-serif"]));
    assert!(svg.contains(r#"textLength="61.25" lengthAdjust="spacingAndGlyphs""#));
    assert!(svg.contains(">365</text>"));
    assert!(svg.contains(r#"text-anchor="middle""#));
}

#[test]
fn rect_fill_is_written() {
    let svg = scene_to_svg(&scene(
        vec![Primitive::Rect(RectPrimitive {
            bounds: Rect::new(0.0, 0.0, 200.0, 50.0),
            fill: HexColor::from_static("#112233"),
        })],
        &[],
    ));
    assert!(svg.contains(r##"<rect x="0.00" y="0.00" width="200.00" height="50.00" fill="#112233"/>"##));
}

#[test]
fn font_families_are_quoted_and_escaped() {
    let svg = scene_to_svg(&scene(
        vec![fitted("1")],
        &["Open Sans", "Evil\"/><script>", "sans-serif"],
    ));
    assert!(svg.contains("font-family=\"&apos;Open Sans&apos;, &apos;Evil&quot;/&gt;&lt;script&gt;&apos;, sans-serif\""));
    assert!(!svg.contains("<script>"));
}

#[test]
fn malicious_colors_cannot_break_out_of_attributes() {
    let bad = HexColor::normalize("\"/><image href=\"x").unwrap();
    let svg = scene_to_svg(&scene(
        vec![Primitive::Rect(RectPrimitive {
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
            fill: bad,
        })],
        &[],
    ));
    assert!(!svg.contains("<image"));
}
