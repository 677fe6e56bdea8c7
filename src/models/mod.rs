//! Data models for Fleetsite

pub mod admin;
pub mod analytics;
pub mod blog;
pub mod comment;
pub mod contact;
pub mod enums;
pub mod site_content;
pub mod subscriber;

// Re-export commonly used types
pub use analytics::DailyAnalytics;
pub use blog::BlogPost;
pub use comment::Comment;
pub use contact::ContactRequest;
pub use enums::{CommentStatus, ContactStatus, PostStatus, SubscriberStatus};
pub use site_content::SiteContent;
pub use subscriber::Subscriber;
