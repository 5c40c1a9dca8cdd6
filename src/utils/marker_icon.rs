/// SVG del marcador numerado: círculo relleno con borde blanco y el label al centro
pub fn marker_svg(label: &str, color: &str, size: u32) -> String {
    let half = size / 2;
    let radius = half.saturating_sub(3);
    let text_y = half + 5;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"><circle cx="{half}" cy="{half}" r="{radius}" fill="{fill}"/><circle cx="{half}" cy="{half}" r="{radius}" fill="none" stroke="white" stroke-width="3"/><text x="{half}" y="{text_y}" text-anchor="middle" font-family="Arial" font-size="14" font-weight="700" fill="white">{text}</text></svg>"#,
        fill = escape_xml(color),
        text = escape_xml(label),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
