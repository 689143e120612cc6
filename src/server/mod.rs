pub mod router;
pub mod routes;

pub use router::{ScribeState, scribe_router};
