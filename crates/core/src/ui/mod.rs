pub mod attributes;
pub mod element;
pub mod identifiers;
pub mod query;
pub mod value;

pub use attributes::names as attribute_names;
pub use element::{UiElement, WAIT_POLL_INTERVAL};
pub use identifiers::RuntimeId;
pub use query::{Cardinality, DuplicatePolicy, ElementQuery, QueryResult, QueryScope, evaluate};
pub use value::UiValue;
