use super::types::ProductType;

/// Mutable line state threaded through every processing step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    /// Product type the machining stage is tooled for, `None` before the
    /// first setup change.
    pub current_setup: Option<ProductType>,
    /// Guards against scheduling a second shift maintenance before the
    /// pending one has been processed.
    pub maintenance_scheduled: bool,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether machining can start on `product` without a setup change
    pub fn is_tooled_for(&self, product: ProductType) -> bool {
        self.current_setup == Some(product)
    }
}
