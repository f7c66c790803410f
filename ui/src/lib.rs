//! Presentational components shared by the PhanTask pages.

mod cards;
pub use cards::{
    FeedbackSummaryCard, FocusReminderCard, NoticeBoardCard, ScheduleCard, SocialHighlightsCard,
};

mod create_student;
pub use create_student::CreateStudentCard;

mod roles;
pub use roles::RoleTags;

mod toast;
pub use toast::{ToastHost, Toaster, use_toaster, use_toaster_provider};
