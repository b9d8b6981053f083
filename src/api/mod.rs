pub mod convert;
pub mod index;

pub use convert::{handle_generate_pdf, ConvertRequest, ErrorResponse, __path_handle_generate_pdf};
pub use index::{handle_index, handle_static};
