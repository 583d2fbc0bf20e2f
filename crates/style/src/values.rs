/// CSS length value, currently only `px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        match self {
            Length::Px(v) => v,
        }
    }
}

/// Parse `NNpx` (e.g. "16px", "-12.5px", "0px"). A bare `0` is accepted too.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    if v == "0" {
        return Some(Length::Px(0.0));
    }

    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    num.is_finite().then_some(Length::Px(num))
}

/// Horizontal translation of a computed `transform` value.
///
/// Understands `none`, `matrix(a, b, c, d, tx, ty)` (what computed styles
/// report) and `translateX(<length>)`.
pub fn parse_translate_x(transform: &str) -> Option<f32> {
    let t = transform.trim();
    if t.eq_ignore_ascii_case("none") || t.is_empty() {
        return Some(0.0);
    }

    if let Some(args) = t.strip_prefix("matrix(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 6 {
            return None;
        }
        return parts[4].parse::<f32>().ok().filter(|v| v.is_finite());
    }

    if let Some(arg) = t.strip_prefix("translateX(").and_then(|s| s.strip_suffix(')')) {
        return parse_length(arg).map(Length::px);
    }

    None
}

/// Computed-style form of a pure horizontal translation.
pub fn format_matrix_x(x: f32) -> String {
    let x = (x * 1000.0).round() / 1000.0;
    // Avoid "-0" in the output.
    let x = if x == 0.0 { 0.0 } else { x };
    format!("matrix(1, 0, 0, 1, {x}, 0)")
}
