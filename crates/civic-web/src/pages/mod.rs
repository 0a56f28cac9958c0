//! Server-rendered HTML pages.

pub mod contact;
pub mod dashboard;
pub mod home;
pub mod inquiries;
pub mod layout;
pub mod map;
