pub mod pagination;
pub mod product;
pub mod user;

pub use pagination::{ListQuery, Page, PageRequest, Pagination};
pub use product::{Product, ProductFields, ProductPayload};
pub use user::User;
