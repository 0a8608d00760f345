/// Metadata describing a UI tree provider implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Toolkit the provider introspects, e.g. `Qt/QML`.
    pub technology: &'static str,
}

impl ProviderDescriptor {
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        technology: &'static str,
    ) -> Self {
        Self { id, display_name, technology }
    }
}
