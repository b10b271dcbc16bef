pub mod constants;
pub mod selected_image;
pub mod service_config;
pub mod service_envelope;
pub mod service_error;

#[cfg(test)]
pub(crate) mod test_server;
