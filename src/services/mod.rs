pub mod payload_decoder;
pub mod session_service;

pub use payload_decoder::PayloadDecoder;
pub use session_service::SessionService;
