//! Transfer records, form validation, and local collections for Artmart

pub mod entities;
pub mod forms;
pub mod local;

pub use entities::{
    Achievement, Artwork, ArtworkStatus, Campaign, Challenge, DeliveryRecord, OverviewMetrics,
    PaymentRecord, Product, RecordId, Shop, Submission, VerificationCounts,
};
pub use forms::{
    collect_field_errors, validate_form, ArtworkForm, ChallengeForm, FieldErrors,
    ShopRegistrationForm, SubmissionForm,
};
pub use local::{Identified, LocalCollection};
