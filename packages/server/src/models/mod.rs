pub mod auth;
pub mod listing;
pub mod pricing;
pub mod shared;
pub mod submission;
pub mod testimonial;
