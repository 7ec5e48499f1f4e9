//! Flow Editor
//!
//! Structural mutation rules for a flow document. The editor owns a working
//! copy (copy-on-write against whatever runtime sessions are reading) and
//! renumbers sibling `order` values after every insert so the document
//! stays contiguous and saveable. Persistence happens only on explicit
//! save, through the sink boundary.

use thiserror::Error;
use veriflow_core::document::{FlowDocument, Page, PageType, Section};

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("page `{0}` is mandatory and cannot be deleted")]
    MandatoryPage(String),

    #[error("page `{0}` not found")]
    PageNotFound(String),

    #[error("section `{0}` not found")]
    SectionNotFound(String),

    #[error("section `{0}` has no column slot {1}")]
    NoSuchColumn(String, usize),

    #[error("config patch must be a JSON object")]
    PatchNotAnObject,
}

/// Where to insert a new section.
#[derive(Debug, Clone, Default)]
pub struct InsertAt {
    /// Index within the target list; append when absent or out of range.
    pub position: Option<usize>,
    /// Target a column slot of this section instead of the page list.
    pub parent_section: Option<String>,
    pub column: Option<usize>,
}

fn renumber(sections: &mut [Section]) {
    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as i64;
    }
}

fn renumber_pages(pages: &mut [Page]) {
    for (index, page) in pages.iter_mut().enumerate() {
        page.order = index as i64;
    }
}

pub struct FlowEditor {
    doc: FlowDocument,
}

impl FlowEditor {
    /// Start editing a working copy. Runtime sessions keep reading the
    /// snapshot they resolved; they never observe these mutations.
    pub fn new(doc: FlowDocument) -> Self {
        FlowEditor { doc }
    }

    pub fn document(&self) -> &FlowDocument {
        &self.doc
    }

    pub fn into_document(self) -> FlowDocument {
        self.doc
    }

    /// Insert a new page immediately before the terminal thank-you page
    /// (or at the end when none exists) and renumber. Returns the new id.
    pub fn add_page(&mut self, page_type: PageType) -> String {
        let position = self
            .doc
            .thank_you_index()
            .unwrap_or(self.doc.pages.len());
        let page = Page::new(page_type, 0);
        let id = page.id.clone();
        self.doc.pages.insert(position, page);
        renumber_pages(&mut self.doc.pages);
        tracing::debug!(page = %id, ?page_type, position, "page added");
        id
    }

    /// Delete a page. Mandatory pages are protected by policy, and the
    /// mandatory flag is judged from the page type, not the stored bool.
    pub fn delete_page(&mut self, page_id: &str) -> Result<(), PolicyError> {
        let index = self
            .doc
            .pages
            .iter()
            .position(|p| p.id == page_id)
            .ok_or_else(|| PolicyError::PageNotFound(page_id.to_string()))?;
        if self.doc.pages[index].page_type.is_mandatory() {
            return Err(PolicyError::MandatoryPage(page_id.to_string()));
        }
        self.doc.pages.remove(index);
        renumber_pages(&mut self.doc.pages);
        Ok(())
    }

    fn page_mut(&mut self, page_id: &str) -> Result<&mut Page, PolicyError> {
        self.doc
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| PolicyError::PageNotFound(page_id.to_string()))
    }

    /// Insert a section into a page's flat list or into one column slot,
    /// then renumber the affected list so `order` stays contiguous.
    pub fn add_section(
        &mut self,
        page_id: &str,
        kind: &str,
        at: InsertAt,
    ) -> Result<String, PolicyError> {
        let section = Section::new(kind, 0);
        let id = section.id.clone();
        let page = self.page_mut(page_id)?;

        let list: &mut Vec<Section> = match &at.parent_section {
            None => &mut page.sections,
            Some(parent_id) => {
                let column = at.column.unwrap_or(0);
                let parent = page
                    .sections
                    .iter_mut()
                    .find(|s| s.id == *parent_id)
                    .ok_or_else(|| PolicyError::SectionNotFound(parent_id.clone()))?;
                let slots = parent.children.get_or_insert_with(Vec::new);
                if column >= slots.len() {
                    // Slots are a fixed-size array in spirit; tolerate sparse
                    // historical data by growing to the addressed slot.
                    if column > 8 {
                        return Err(PolicyError::NoSuchColumn(parent_id.clone(), column));
                    }
                    slots.resize_with(column + 1, Vec::new);
                }
                &mut slots[column]
            }
        };

        let position = at.position.unwrap_or(list.len()).min(list.len());
        list.insert(position, section);
        renumber(list);
        Ok(id)
    }

    /// Shallow-merge a JSON object patch into a section's `config`.
    pub fn update_section(
        &mut self,
        section_id: &str,
        patch: serde_json::Value,
    ) -> Result<(), PolicyError> {
        let Some(patch) = patch.as_object() else {
            return Err(PolicyError::PatchNotAnObject);
        };
        let section = self
            .find_section_mut(section_id)
            .ok_or_else(|| PolicyError::SectionNotFound(section_id.to_string()))?;
        if !section.config.is_object() {
            section.config = serde_json::Value::Object(Default::default());
        }
        if let Some(config) = section.config.as_object_mut() {
            for (key, value) in patch {
                config.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Move a section within its own list and renumber.
    pub fn move_section(
        &mut self,
        page_id: &str,
        section_id: &str,
        new_index: usize,
    ) -> Result<(), PolicyError> {
        let page = self.page_mut(page_id)?;
        let from = page
            .sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| PolicyError::SectionNotFound(section_id.to_string()))?;
        let section = page.sections.remove(from);
        let to = new_index.min(page.sections.len());
        page.sections.insert(to, section);
        renumber(&mut page.sections);
        Ok(())
    }

    /// Depth-limited search: page lists first, then column slots.
    fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        for page in &mut self.doc.pages {
            for section in &mut page.sections {
                if section.id == section_id {
                    return Some(section);
                }
                if let Some(slots) = &mut section.children {
                    for slot in slots {
                        for child in slot {
                            if child.id == section_id {
                                return Some(child);
                            }
                        }
                    }
                }
            }
        }
        None
    }
}
