pub use super::domains::Entity as Domains;
pub use super::records::Entity as Records;
