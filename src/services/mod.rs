pub mod result_service;
pub mod test_service;
