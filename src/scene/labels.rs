use crate::foundation::core::Size;

/// Identifier the graphics backend uses to find a label's render object.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LabelId(pub u64);

/// A text render object created by the host. Dropping it releases the object.
pub trait LabelObject: Send {
    fn id(&self) -> LabelId;

    /// Rendered size in label-local units.
    fn size(&self) -> Size;
}

/// Creates text render objects; font selection and rasterization are the host's business.
pub trait LabelFactory: Send + Sync {
    fn create_label(&self, text: &str, font_size: u32) -> Box<dyn LabelObject>;
}

/// Label text is padded by one space on either side.
pub fn label_text(name: &str) -> String {
    format!(" {name} ")
}

/// Font size for a label sized against `height_basis` output units.
pub fn font_size_for(height_basis: u32) -> u32 {
    (f64::from(height_basis) / 9.81) as u32
}

/// Create a label for `name` sized against `height_basis`.
pub fn create_label(
    factory: &dyn LabelFactory,
    name: &str,
    height_basis: u32,
) -> Box<dyn LabelObject> {
    factory.create_label(&label_text(name), font_size_for(height_basis))
}
