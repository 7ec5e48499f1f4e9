pub use crate::sections::{
    AuthResultRenderer, CtaRenderer, DividerRenderer, DocListRenderer, FooterRenderer,
    ImageRenderer, LoginStepRenderer, StorePickerRenderer, TextRenderer, register_standard,
};
pub use crate::sections::layout::ColumnsRenderer;
pub use veriflow_core::prelude::*;
