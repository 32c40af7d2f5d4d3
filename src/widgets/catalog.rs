use crate::widgets::field::{Category, FieldKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub field_name: &'static str,
    pub label: &'static str,
    pub category: Category,
}

impl From<FieldKind> for CatalogEntry {
    fn from(kind: FieldKind) -> Self {
        Self {
            field_name: kind.name(),
            label: kind.label(),
            category: kind.category(),
        }
    }
}

pub const CATEGORY_ORDER: [Category; 6] = [
    Category::Biometric,
    Category::Navigation,
    Category::Environment,
    Category::Device,
    Category::Media,
    Category::Custom,
];

/// Palette entries, grouped by category in display order.
pub fn palette() -> Vec<CatalogEntry> {
    CATEGORY_ORDER
        .iter()
        .flat_map(|cat| {
            FieldKind::ALL
                .into_iter()
                .filter(move |k| k.category() == *cat)
                .map(CatalogEntry::from)
        })
        .collect()
}
