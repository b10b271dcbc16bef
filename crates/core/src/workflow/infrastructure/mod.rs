pub mod background_worker;
