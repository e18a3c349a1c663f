//! Filename pattern formatting.
//!
//! Patterns carry literal text plus placeholders: `{w}` width, `{h}` height,
//! `{d}` depth, `{t}` thickness (depth when thickness is unset), `{id}` the
//! device id, `{part}` the part name. A `{part}` with no part supplied
//! renders as the empty string. Unknown brace tokens pass through verbatim.

use crate::dimensions::Dimensions;

/// Expands a filename pattern for one device part.
pub fn format_filename(
    pattern: &str,
    device_id: &str,
    dims: &Dimensions,
    part: Option<&str>,
) -> String {
    pattern
        .replace("{w}", &dims.width.to_string())
        .replace("{h}", &dims.height.to_string())
        .replace("{d}", &dims.depth.to_string())
        .replace("{t}", &dims.thickness_or_depth().to_string())
        .replace("{id}", device_id)
        .replace("{part}", part.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_placeholders() {
        let dims = Dimensions::new(40, 197, 30, Some(28));
        assert_eq!(
            format_filename("{id}-h{h}-w{w}-d{d}-t{t}-{part}.stl", "cutlery", &dims, Some("grip")),
            "cutlery-h197-w40-d30-t28-grip.stl"
        );
    }

    #[test]
    fn thickness_placeholder_falls_back_to_depth() {
        let dims = Dimensions::new(40, 197, 30, None);
        assert_eq!(format_filename("t{t}.stl", "x", &dims, None), "t30.stl");
    }

    #[test]
    fn missing_part_renders_empty() {
        let dims = Dimensions::new(67, 160, 20, Some(22));
        assert_eq!(
            format_filename("h{h}-{part}.stl", "button", &dims, None),
            "h160-.stl"
        );
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let dims = Dimensions::new(67, 160, 20, Some(22));
        assert_eq!(
            format_filename("h{h}-{color}.stl", "button", &dims, None),
            "h160-{color}.stl"
        );
    }

    #[test]
    fn literal_patterns_unchanged() {
        let dims = Dimensions::new(67, 160, 20, Some(22));
        assert_eq!(format_filename("Pin.stl", "button", &dims, None), "Pin.stl");
    }

    #[test]
    fn no_supported_placeholder_survives_formatting() {
        let dims = Dimensions::new(1, 2, 3, None);
        let out = format_filename("{w}{h}{d}{t}{id}{part}", "dev", &dims, Some("p"));
        for token in ["{w}", "{h}", "{d}", "{t}", "{id}", "{part}"] {
            assert!(!out.contains(token), "unresolved {token} in {out}");
        }
    }
}
