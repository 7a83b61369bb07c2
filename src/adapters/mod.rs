// Adapters layer: concrete front-ends and storage backends for the ports in `domain::ports`.

pub mod console;
pub mod storage;
