pub mod bounded_payment_queue;
