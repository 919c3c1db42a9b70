mod classifier_tests;
mod log_file_tests;
mod sampler_tests;
mod state_tests;
