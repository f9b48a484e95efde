pub mod origin;
pub mod request_id;

pub use origin::origin_middleware;
pub use request_id::{request_id_middleware, RequestId};
