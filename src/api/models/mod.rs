pub mod candidate;
pub mod limit;
pub mod swipe;

pub use candidate::{Candidate, CandidatePhoto};
pub use limit::SwipeLimitInfo;
pub use swipe::{DiscoveryPage, SwipeAction, SwipeReceipt, SwipeRequest};
