pub mod catalogs;
pub mod chatbot;
pub mod ffi;
pub mod fuzz;
pub mod lookup;
pub mod matcher;
pub mod product;
pub mod reference;
mod report;
pub mod types;

pub use catalogs::{DEFAULT_REFERENCE_PATH, DEFAULT_THRESHOLD};
pub use chatbot::{respond, Conversation, Exchange};
pub use ffi::{answer_to_json, detect_to_json, suggest_to_json};
pub use fuzz::{partial_ratio, ratio};
pub use lookup::{suggest, SubstitutionLookup};
pub use matcher::{detect, AllergenMatcher};
pub use product::{FileProductSource, LookupError, ProductSource};
pub use reference::{ReferenceData, ReferenceDataError};
pub use types::*;
