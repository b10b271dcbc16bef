pub mod http_classifier;
