// Card requests and card views.

pub mod request;
pub mod view;

pub use request::{ALL_REPOS, CardAttributes, CardRequest, CardTarget, processing_order};
pub use view::CardView;
