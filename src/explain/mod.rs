pub mod appeal;
pub mod compose;
pub mod growth;
pub mod platforms;

pub use appeal::{audience_appeal, detect_segments};
pub use compose::{compose_reason, matched_keywords_summary, view_details};
pub use growth::estimate_growth;
pub use platforms::{detect_mentions, summarize_mentions, MentionHit};
