//! User-adjustable device dimensions, in whole millimetres.

/// The four dimensions a customer can adjust before downloading.
///
/// Thickness is optional; filename patterns fall back to depth when it is
/// unset (see [`crate::pattern`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub thickness: Option<u32>,
}

impl Dimensions {
    pub fn new(width: u32, height: u32, depth: u32, thickness: Option<u32>) -> Self {
        Self {
            width,
            height,
            depth,
            thickness,
        }
    }

    /// Thickness when set, depth otherwise. This is the value the `{t}`
    /// placeholder renders.
    pub fn thickness_or_depth(&self) -> u32 {
        self.thickness.unwrap_or(self.depth)
    }

    /// Starting dimensions for a product type, as the customization form
    /// presents them. Unknown or missing types get the generic defaults.
    pub fn defaults_for(product_type: Option<&str>) -> Self {
        match product_type {
            Some("button") => Self::new(67, 160, 20, Some(22)),
            Some("cup") => Self::new(80, 160, 80, Some(22)),
            Some("cutlery") => Self::new(40, 197, 30, Some(28)),
            Some("bidet") => Self::new(200, 200, 200, Some(40)),
            _ => Self::new(160, 160, 30, Some(22)),
        }
    }
}
