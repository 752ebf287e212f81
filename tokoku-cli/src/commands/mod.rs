pub mod auth;
pub mod cart;
pub mod orders;
pub mod pay;
pub mod products;
pub mod seller;

use crate::print_error;
use tokoku::{ApiError, TokokuError};

/// Render a flow error the way the pages do: validation and rejection
/// details verbatim, transport failures as a generic line, missing sessions
/// as a login hint.
pub fn report(err: &TokokuError) {
    match err {
        TokokuError::Unauthenticated => {
            print_error("Silakan login terlebih dahulu! (tokoku login <username>)");
        }
        TokokuError::Validation(message) | TokokuError::Forbidden(message) => {
            print_error(message);
        }
        TokokuError::Api(ApiError::Rejected { detail, .. }) => {
            // The backend's detail is meant to be shown verbatim.
            print_error(detail);
        }
        TokokuError::Api(_) => {
            print_error("Terjadi kesalahan. Pastikan server berjalan.");
        }
        other => print_error(&other.to_string()),
    }
}

/// Report a flow error and exit non-zero, like a page that alerts and stops.
pub fn fail(err: &TokokuError) -> ! {
    report(err);
    std::process::exit(1);
}
