pub mod check;
pub mod codes;
pub mod model_summary;
pub mod project;
pub mod record;

pub use check::*;
pub use codes::*;
pub use model_summary::*;
pub use project::*;
pub use record::*;
