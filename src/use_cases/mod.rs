pub mod dto;
pub mod get_summary;
pub mod process_payment;
pub mod purge_payments;
pub mod submit_payment;
