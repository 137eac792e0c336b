//! Document generation: profile data, JD classification, requirement
//! extraction and the letter/about/suggestion builders.

pub mod about;
pub mod classify;
pub mod letter;
pub mod profile;
pub mod requirements;
pub mod suggestions;

pub use classify::{classify, JdCategory};
pub use profile::CandidateProfile;
pub use requirements::{extract_requirements, JdRequirements};
