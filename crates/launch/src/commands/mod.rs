pub mod affected;
pub mod order;
pub mod stop;
pub mod validate;
