//! Standard renderers, grouped by family.

pub mod action;
pub mod auth;
pub mod commerce;
pub mod docs;
pub mod layout;
pub mod media;
pub mod text;

pub use action::CtaRenderer;
pub use auth::{AuthResultRenderer, LoginStepRenderer};
pub use commerce::StorePickerRenderer;
pub use docs::DocListRenderer;
pub use layout::{ColumnsRenderer, DividerRenderer, FooterRenderer};
pub use media::ImageRenderer;
pub use text::TextRenderer;

use veriflow_core::catalog::tags;
use veriflow_core::registry::SectionRegistry;

/// Install every standard renderer under its catalog tag.
pub fn register_standard(registry: &mut SectionRegistry) {
    registry.register(tags::TEXT, TextRenderer);
    registry.register(tags::IMAGE, ImageRenderer);
    registry.register(tags::CALL_TO_ACTION, CtaRenderer);
    registry.register(tags::DIVIDER, DividerRenderer);
    registry.register(tags::COLUMNS, ColumnsRenderer);
    registry.register(tags::STORE_PICKER, StorePickerRenderer);
    registry.register(tags::LOGIN_STEP, LoginStepRenderer);
    registry.register(tags::AUTH_RESULT, AuthResultRenderer);
    registry.register(tags::DOC_LIST, DocListRenderer);
    registry.register(tags::FOOTER, FooterRenderer);
}
