pub mod event;
pub mod marker;
pub mod trail;
