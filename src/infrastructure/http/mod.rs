pub mod reqwest_processor_client;
