pub mod attrs;
pub mod bindable;
