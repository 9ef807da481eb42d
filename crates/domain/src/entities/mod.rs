//! Domain entities - Objects owned by a single normalized route

mod route_instruction;
mod route_response;

pub use route_instruction::RouteInstruction;
pub use route_response::RouteResponse;
